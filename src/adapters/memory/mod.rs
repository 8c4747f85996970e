//! In-memory runtime
//!
//! Implements both runtime ports over process memory. Nothing is persisted
//! and nothing is versioned; it exists so the API can be served and
//! exercised without the real flow runtime behind it.

mod projects;
mod settings;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::core::models::{EDITOR_THEME_KEY, Project, SettingsMap};

/// Key user settings are stored under when no identity is supplied
pub const ANONYMOUS_USER: &str = "_";

/// Runtime state kept in memory
#[derive(Debug)]
pub struct MemoryRuntime {
    projects: Mutex<BTreeMap<String, Project>>,
    settings: Mutex<SettingsMap>,
    user_settings: Mutex<BTreeMap<String, SettingsMap>>,
    writable_keys: Vec<String>,
}

impl Default for MemoryRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRuntime {
    /// Empty runtime where only `editorTheme` may be written
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: Mutex::new(BTreeMap::new()),
            settings: Mutex::new(SettingsMap::new()),
            user_settings: Mutex::new(BTreeMap::new()),
            writable_keys: vec![EDITOR_THEME_KEY.to_string()],
        }
    }

    /// Seed a project
    #[must_use]
    pub fn with_project(self, project: Project) -> Self {
        lock(&self.projects).insert(project.name.clone(), project);
        self
    }

    /// Seed a global setting, bypassing the writable-key check
    #[must_use]
    pub fn with_setting(self, key: impl Into<String>, value: Value) -> Self {
        lock(&self.settings).insert(key.into(), value);
        self
    }

    /// Allow `key` to be written through `set`
    #[must_use]
    pub fn with_writable_key(mut self, key: impl Into<String>) -> Self {
        self.writable_keys.push(key.into());
        self
    }
}

/// Lock ignoring poison; every critical section leaves the maps consistent
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
