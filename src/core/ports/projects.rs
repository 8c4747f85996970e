//! Projects port
//!
//! Defines the project operations the runtime exposes to the editor.

use async_trait::async_trait;

use super::RuntimeError;
use crate::core::models::Project;

/// Project management half of the runtime
///
/// Implementations own project storage. Name uniqueness is theirs to
/// enforce.
#[async_trait]
pub trait ProjectsRuntime: Send + Sync {
    /// List all projects
    async fn get(&self) -> Result<Vec<Project>, RuntimeError>;

    /// Create a project, returning the stored record
    async fn create(&self, project: Project) -> Result<Project, RuntimeError>;

    /// Delete a project by name
    ///
    /// Resolves `false` when nothing was deleted.
    async fn delete(&self, name: &str) -> Result<bool, RuntimeError>;

    /// Update the named project, returning the stored record
    async fn update(&self, name: &str, project: Project) -> Result<Project, RuntimeError>;
}
