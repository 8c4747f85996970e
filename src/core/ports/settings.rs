//! Settings port

use async_trait::async_trait;
use serde_json::Value;

use super::RuntimeError;
use crate::core::models::{SettingsMap, UserSettingsRequest, UserSettingsUpdate};

/// Settings half of the runtime
#[async_trait]
pub trait SettingsRuntime: Send + Sync {
    /// Read a global setting. Resolves `None` when the key is unset.
    async fn get(&self, key: &str) -> Result<Option<Value>, RuntimeError>;

    /// Write a global setting
    ///
    /// Rejects keys the runtime does not allow to be changed.
    async fn set(&self, key: &str, value: Value) -> Result<(), RuntimeError>;

    /// Read the settings stored for a user
    async fn get_user_settings(&self, opts: UserSettingsRequest)
    -> Result<SettingsMap, RuntimeError>;

    /// Store settings for a user
    async fn update_user_settings(&self, opts: UserSettingsUpdate) -> Result<(), RuntimeError>;
}
