//! Project operations of the in-memory runtime

use async_trait::async_trait;
use log::debug;

use super::{MemoryRuntime, lock};
use crate::core::models::Project;
use crate::core::ports::{ProjectsRuntime, RuntimeError};

#[async_trait]
impl ProjectsRuntime for MemoryRuntime {
    async fn get(&self) -> Result<Vec<Project>, RuntimeError> {
        Ok(lock(&self.projects).values().cloned().collect())
    }

    async fn create(&self, project: Project) -> Result<Project, RuntimeError> {
        if project.name.trim().is_empty() {
            return Err(RuntimeError::invalid("Project name cannot be empty"));
        }

        {
            let mut projects = lock(&self.projects);
            if projects.contains_key(&project.name) {
                return Err(RuntimeError::invalid(format!(
                    "Project '{}' already exists",
                    project.name
                )));
            }
            projects.insert(project.name.clone(), project.clone());
        }
        debug!("created project {}", project.name);
        Ok(project)
    }

    async fn delete(&self, name: &str) -> Result<bool, RuntimeError> {
        Ok(lock(&self.projects).remove(name).is_some())
    }

    async fn update(&self, name: &str, project: Project) -> Result<Project, RuntimeError> {
        if project.name != name && project.name.trim().is_empty() {
            return Err(RuntimeError::invalid("Project name cannot be empty"));
        }

        {
            let mut projects = lock(&self.projects);
            if !projects.contains_key(name) {
                return Err(RuntimeError::not_found(format!("Project '{name}' not found")));
            }

            // A different name in the body renames the project
            if project.name != name {
                if projects.contains_key(&project.name) {
                    return Err(RuntimeError::invalid(format!(
                        "Project '{}' already exists",
                        project.name
                    )));
                }
                projects.remove(name);
            }
            projects.insert(project.name.clone(), project.clone());
        }

        if project.name != name {
            debug!("renamed project {name} to {}", project.name);
        }
        Ok(project)
    }
}
