//! Project model
//!
//! A project is identified by its name. Every other field belongs to the
//! runtime and is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A project as exchanged with the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name (identity)
    pub name: String,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Project {
    /// Create a project with no extra fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Attach an extra field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}
