//! JSON fixtures standing in for a rendered form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::FieldLocator;
use crate::error::{SyncError, SyncResult};

/// A captured form keyed by selector.
///
/// ```json
/// {
///   "fields": { "[data-test-id=\"appointment-form-date-input\"]": "2024-06-01T14:00:00Z" },
///   "children": { ".note": [ { "fields": { "p": "Needs a muzzle" } } ] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureFragment {
    #[serde(default)]
    pub fields: HashMap<String, String>,
    #[serde(default)]
    pub children: HashMap<String, Vec<FixtureFragment>>,
}

impl FixtureFragment {
    pub fn from_json(content: &str) -> SyncResult<Self> {
        serde_json::from_str(content).map_err(|e| SyncError::Serialization(e.to_string()))
    }

    /// Builder used by tests and by callers assembling a form by hand.
    pub fn with_field(mut self, selector: &str, text: &str) -> Self {
        self.fields.insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_children(mut self, selector: &str, children: Vec<FixtureFragment>) -> Self {
        self.children.insert(selector.to_string(), children);
        self
    }
}

impl FieldLocator for FixtureFragment {
    fn find_one(&self, selector: &str) -> SyncResult<Option<String>> {
        Ok(self.fields.get(selector).cloned())
    }

    fn find_all(&self, selector: &str) -> SyncResult<Vec<Self>> {
        Ok(self.children.get(selector).cloned().unwrap_or_default())
    }
}
