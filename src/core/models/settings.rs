//! Settings models
//!
//! Settings are an opaque JSON object. The adapter never looks inside one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the runtime stores editor theme overrides
pub const EDITOR_THEME_KEY: &str = "editorTheme";

/// An opaque settings mapping
pub type SettingsMap = Map<String, Value>;

/// Arguments for reading a user's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettingsRequest {
    /// Identity injected upstream (None when no identity is available)
    pub user: Option<String>,
}

/// Arguments for replacing part of a user's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettingsUpdate {
    /// Identity injected upstream (None when no identity is available)
    pub user: Option<String>,
    /// Settings sent by the client
    pub settings: SettingsMap,
}
