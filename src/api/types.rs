//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::Serialize;

use crate::core::models::Project;

// =============================================================================
// REQUEST CONTEXT
// =============================================================================

/// Per-request data injected upstream of the handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user, passed to the runtime as-is
    pub user: Option<String>,
}

impl RequestContext {
    /// Context for a request made on behalf of `user`
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// Context for a request with no identity
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Projects list endpoint response data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsData {
    /// All projects known to the runtime
    pub projects: Vec<Project>,
}
