use super::draft::Field;

/// Per page-view counters. Only ever logged, never read back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormAnalytics {
    pub submissions: u32,
    pub errors: u32,
    pub spam_attempts: u32,
    pub organization_focus: u32,
    pub location_focus: u32,
}

impl FormAnalytics {
    /// Only the optional organization and location fields are tracked.
    pub fn record_focus(&mut self, field: Field) {
        match field {
            Field::Organization => self.organization_focus += 1,
            Field::Location => self.location_focus += 1,
            _ => {}
        }
    }
}
