//! Settings operations of the in-memory runtime

use async_trait::async_trait;
use serde_json::Value;

use super::{ANONYMOUS_USER, MemoryRuntime, lock};
use crate::core::models::{SettingsMap, UserSettingsRequest, UserSettingsUpdate};
use crate::core::ports::{RuntimeError, SettingsRuntime};

#[async_trait]
impl SettingsRuntime for MemoryRuntime {
    async fn get(&self, key: &str) -> Result<Option<Value>, RuntimeError> {
        Ok(lock(&self.settings).get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), RuntimeError> {
        if !self.writable_keys.iter().any(|k| k == key) {
            return Err(RuntimeError::invalid(format!("Setting '{key}' cannot be changed")));
        }
        lock(&self.settings).insert(key.to_string(), value);
        Ok(())
    }

    async fn get_user_settings(
        &self,
        opts: UserSettingsRequest,
    ) -> Result<SettingsMap, RuntimeError> {
        let user = opts.user.as_deref().unwrap_or(ANONYMOUS_USER);
        Ok(lock(&self.user_settings).get(user).cloned().unwrap_or_default())
    }

    async fn update_user_settings(&self, opts: UserSettingsUpdate) -> Result<(), RuntimeError> {
        let user = opts.user.unwrap_or_else(|| ANONYMOUS_USER.to_string());
        lock(&self.user_settings).entry(user).or_default().extend(opts.settings);
        Ok(())
    }
}
