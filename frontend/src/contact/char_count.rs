/// Visual state of the message counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountLevel {
    Normal,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCount {
    pub length: usize,
    pub max: usize,
}

impl CharCount {
    /// Length is measured in UTF-16 code units, matching the `maxlength`
    /// attribute the browser enforces on the textarea.
    pub fn of(text: &str, max: usize) -> Self {
        Self {
            length: text.encode_utf16().count(),
            max,
        }
    }

    // Warning past 75% of the limit, error past 90%.
    pub fn level(&self) -> CountLevel {
        if self.length * 10 > self.max * 9 {
            CountLevel::Error
        } else if self.length * 4 > self.max * 3 {
            CountLevel::Warning
        } else {
            CountLevel::Normal
        }
    }

    pub fn label(&self) -> String {
        format!("{} / {} characters", self.length, self.max)
    }

    pub fn class(&self) -> Option<&'static str> {
        match self.level() {
            CountLevel::Normal => None,
            CountLevel::Warning => Some("warning"),
            CountLevel::Error => Some("error"),
        }
    }
}
