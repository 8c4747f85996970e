//! API handlers
//!
//! These handlers are HTTP-agnostic. They take typed input, forward it to the
//! runtime and return `Result<T, ApiError>`. Choosing the success status is
//! left to the server layer.

use std::sync::{PoisonError, RwLock};

use log::{debug, warn};
use serde_json::Value;

use crate::config::EditorConfig;
use crate::core::RuntimeHandle;
use crate::core::models::{
    EDITOR_THEME_KEY, Project, SettingsMap, UserSettingsRequest, UserSettingsUpdate,
};
use crate::core::ports::RuntimeError;

use super::error::ApiError;
use super::types::{ProjectsData, RequestContext};

/// What an initialization binds: the runtime plus config-derived defaults
#[derive(Debug, Clone)]
struct Binding {
    runtime: RuntimeHandle,
    theme: SettingsMap,
}

/// The editor API, bound to a runtime
///
/// Build it with [`EditorApi::init`] before serving any request. Calling
/// [`EditorApi::reinit`] swaps the runtime for every request that starts
/// afterwards; requests already awaiting the old runtime finish against it.
#[derive(Debug)]
pub struct EditorApi {
    binding: RwLock<Binding>,
}

impl EditorApi {
    /// Initialize the API with its configuration and runtime
    #[must_use]
    pub fn init(config: &EditorConfig, runtime: RuntimeHandle) -> Self {
        Self {
            binding: RwLock::new(Binding {
                runtime,
                theme: config.theme.clone(),
            }),
        }
    }

    /// Rebind the API to a new configuration and runtime
    pub fn reinit(&self, config: &EditorConfig, runtime: RuntimeHandle) {
        let mut binding = self.binding.write().unwrap_or_else(PoisonError::into_inner);
        *binding = Binding {
            runtime,
            theme: config.theme.clone(),
        };
        debug!("editor api re-initialized");
    }

    fn binding(&self) -> Binding {
        self.binding.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn runtime(&self) -> RuntimeHandle {
        self.binding().runtime
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// List all projects
    pub async fn list_projects(&self) -> Result<ProjectsData, ApiError> {
        let projects = self
            .runtime()
            .projects
            .get()
            .await
            .map_err(|e| rejected("projects.get", e))?;
        Ok(ProjectsData { projects })
    }

    /// Create a project
    pub async fn create_project(&self, project: Project) -> Result<Project, ApiError> {
        self.runtime()
            .projects
            .create(project)
            .await
            .map_err(|e| rejected("projects.create", e))
    }

    /// Delete a project by name
    pub async fn delete_project(&self, name: &str) -> Result<(), ApiError> {
        let deleted = self
            .runtime()
            .projects
            .delete(name)
            .await
            .map_err(|e| rejected("projects.delete", e))?;
        if deleted {
            Ok(())
        } else {
            Err(ApiError::not_found(format!("Project '{name}' not found")))
        }
    }

    /// Update a project by name
    pub async fn update_project(&self, name: &str, project: Project) -> Result<Project, ApiError> {
        self.runtime()
            .projects
            .update(name, project)
            .await
            .map_err(|e| rejected("projects.update", e))
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Get the settings of the requesting user
    pub async fn user_settings(&self, ctx: &RequestContext) -> Result<SettingsMap, ApiError> {
        let opts = UserSettingsRequest {
            user: ctx.user.clone(),
        };
        self.runtime()
            .settings
            .get_user_settings(opts)
            .await
            .map_err(|e| rejected("settings.getUserSettings", e))
    }

    /// Store settings for the requesting user
    pub async fn update_user_settings(
        &self,
        ctx: &RequestContext,
        settings: SettingsMap,
    ) -> Result<(), ApiError> {
        let opts = UserSettingsUpdate {
            user: ctx.user.clone(),
            settings,
        };
        self.runtime()
            .settings
            .update_user_settings(opts)
            .await
            .map_err(|e| rejected("settings.updateUserSettings", e))
    }

    /// Get the editor settings: theme defaults overlaid with stored overrides
    pub async fn settings(&self) -> Result<SettingsMap, ApiError> {
        let Binding { runtime, theme } = self.binding();
        let stored = runtime
            .settings
            .get(EDITOR_THEME_KEY)
            .await
            .map_err(|e| rejected("settings.get", e))?;
        Ok(merge_theme(theme, stored))
    }

    /// Store editor theme overrides
    pub async fn update_settings(&self, settings: SettingsMap) -> Result<(), ApiError> {
        self.runtime()
            .settings
            .set(EDITOR_THEME_KEY, Value::Object(settings))
            .await
            .map_err(|e| rejected("settings.set", e))
    }
}

/// Log a runtime rejection and convert it for the client
fn rejected(operation: &str, err: RuntimeError) -> ApiError {
    warn!("runtime rejected {operation}: {err}");
    ApiError::from(err)
}

/// Shallow merge: stored keys win over defaults
fn merge_theme(mut defaults: SettingsMap, stored: Option<Value>) -> SettingsMap {
    match stored {
        Some(Value::Object(overrides)) => defaults.extend(overrides),
        None | Some(Value::Null) => {},
        Some(other) => warn!("ignoring non-object {EDITOR_THEME_KEY} setting: {other}"),
    }
    defaults
}
