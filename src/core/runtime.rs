//! Runtime handle
//!
//! The bundle of port implementations injected into the editor API.

use std::fmt;
use std::sync::Arc;

use super::ports::{ProjectsRuntime, SettingsRuntime};

/// Cheaply cloneable reference to the runtime collaborator
#[derive(Clone)]
pub struct RuntimeHandle {
    /// Project operations
    pub projects: Arc<dyn ProjectsRuntime>,
    /// Settings operations
    pub settings: Arc<dyn SettingsRuntime>,
}

impl RuntimeHandle {
    /// Build a handle from separate implementations
    pub fn new(projects: Arc<dyn ProjectsRuntime>, settings: Arc<dyn SettingsRuntime>) -> Self {
        Self { projects, settings }
    }

    /// Build a handle from one value implementing both ports
    pub fn from_shared<R>(runtime: Arc<R>) -> Self
    where
        R: ProjectsRuntime + SettingsRuntime + 'static,
    {
        Self {
            projects: runtime.clone(),
            settings: runtime,
        }
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle").finish_non_exhaustive()
    }
}
