use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::Storage;

use crate::config;

/// The six user-editable fields of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Organization,
    Location,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Organization,
        Field::Location,
        Field::Message,
    ];

    /// DOM id of the input element.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Organization => "organization",
            Field::Location => "location",
            Field::Message => "message",
        }
    }

    pub fn error_id(self) -> String {
        format!("{}-error", self.id())
    }
}

/// Unsent form contents as persisted in local storage.
///
/// Missing keys deserialize to empty strings so that a partially written
/// entry still restores what it has. Anything that is not a JSON object of
/// strings is rejected and treated as no draft at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub location: String,
    pub message: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Organization => &self.organization,
            Field::Location => &self.location,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Organization => &mut self.organization,
            Field::Location => &mut self.location,
            Field::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Copies every non-empty stored value over `target`, leaving the rest alone.
    /// Returns whether anything was copied.
    pub fn restore_into(&self, target: &mut Draft) -> bool {
        let mut restored = false;
        for field in Field::ALL {
            let stored = self.get(field);
            if !stored.is_empty() {
                target.set(field, stored.to_string());
                restored = true;
            }
        }
        restored
    }
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Storage(String),
    #[error("stored draft is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Key-value persistence for the single form draft.
pub trait DraftStore {
    fn load(&self) -> Result<Option<Draft>, DraftError>;
    fn save(&self, draft: &Draft) -> Result<(), DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// Browser `localStorage` under [`config::DRAFT_STORAGE_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageDrafts;

impl LocalStorageDrafts {
    fn storage(&self) -> Result<Storage, DraftError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(DraftError::Unavailable)
    }
}

fn js_error(value: wasm_bindgen::JsValue) -> DraftError {
    DraftError::Storage(format!("{:?}", value))
}

impl DraftStore for LocalStorageDrafts {
    fn load(&self) -> Result<Option<Draft>, DraftError> {
        let raw = self
            .storage()?
            .get_item(config::DRAFT_STORAGE_KEY)
            .map_err(js_error)?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, draft: &Draft) -> Result<(), DraftError> {
        let raw = serde_json::to_string(draft)?;
        self.storage()?
            .set_item(config::DRAFT_STORAGE_KEY, &raw)
            .map_err(js_error)
    }

    fn clear(&self) -> Result<(), DraftError> {
        self.storage()?
            .remove_item(config::DRAFT_STORAGE_KEY)
            .map_err(js_error)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryDrafts;

#[cfg(test)]
mod memory {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory stand-in for `localStorage`. Holds the raw serialized value so
    /// tests can plant corrupt entries. Clones share the same slot.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct MemoryDrafts {
        raw: Rc<RefCell<Option<String>>>,
    }

    impl MemoryDrafts {
        pub(crate) fn with_raw(raw: &str) -> Self {
            let store = Self::default();
            *store.raw.borrow_mut() = Some(raw.to_string());
            store
        }

        pub(crate) fn raw(&self) -> Option<String> {
            self.raw.borrow().clone()
        }
    }

    impl DraftStore for MemoryDrafts {
        fn load(&self) -> Result<Option<Draft>, DraftError> {
            match self.raw.borrow().as_deref() {
                Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
                None => Ok(None),
            }
        }

        fn save(&self, draft: &Draft) -> Result<(), DraftError> {
            *self.raw.borrow_mut() = Some(serde_json::to_string(draft)?);
            Ok(())
        }

        fn clear(&self) -> Result<(), DraftError> {
            *self.raw.borrow_mut() = None;
            Ok(())
        }
    }
}
