//! Request routing
//!
//! Maps `(method, path)` to an [`EditorApi`] call and the call's outcome to a
//! status code and JSON body.

use std::sync::Arc;

use log::debug;
use percent_encoding::percent_decode_str;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tiny_http::Method;

use crate::api::{ApiError, ApiErrorData, EditorApi, RequestContext};
use crate::core::models::{Project, SettingsMap};

// =============================================================================
// REPLY
// =============================================================================

/// A fully settled response, ready to be written by a listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body (None for an empty body)
    pub body: Option<Value>,
}

impl Reply {
    /// Successful reply carrying `body`
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// 204 with no body
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// Error reply with the `{ code, message }` body
    #[must_use]
    pub fn error(error: &ApiError) -> Self {
        let body = serde_json::to_value(ApiErrorData::from(error)).unwrap_or(Value::Null);
        Self::json(error.status_code(), body)
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Routes editor requests to an [`EditorApi`]
#[derive(Debug, Clone)]
pub struct Router {
    api: Arc<EditorApi>,
    prefix: String,
}

impl Router {
    /// Mount the API at the root path
    #[must_use]
    pub fn new(api: Arc<EditorApi>) -> Self {
        Self::with_prefix(api, "")
    }

    /// Mount the API under `prefix` (e.g. `/admin`)
    #[must_use]
    pub fn with_prefix(api: Arc<EditorApi>, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        Self { api, prefix }
    }

    /// Route one request and wait for its outcome
    ///
    /// `url` may carry a query string; it is ignored. An empty `body` is read
    /// as `{}`.
    pub async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        ctx: &RequestContext,
        body: &[u8],
    ) -> Reply {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        let reply = match self.route(method, path, ctx, body).await {
            Ok(reply) => reply,
            Err(e) => Reply::error(&e),
        };
        debug!("{method} {path} -> {}", reply.status);
        reply
    }

    async fn route(
        &self,
        method: &Method,
        path: &str,
        ctx: &RequestContext,
        body: &[u8],
    ) -> Result<Reply, ApiError> {
        let not_found = || ApiError::not_found(format!("API endpoint not found: {method} {path}"));
        let not_allowed =
            || ApiError::method_not_allowed(format!("Method {method} not allowed on {path}"));

        let route = self.strip_prefix(path).ok_or_else(not_found)?;
        let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
        let api = &self.api;

        match segments.as_slice() {
            ["projects"] => match method {
                Method::Get => json(api.list_projects().await?, 200),
                Method::Post => {
                    let project = read_json::<Project>(body)?;
                    json(api.create_project(project).await?, 201)
                },
                _ => Err(not_allowed()),
            },

            ["projects", raw_name] => {
                let name = decode_segment(raw_name)?;
                match method {
                    Method::Delete => {
                        api.delete_project(&name).await?;
                        Ok(Reply::no_content())
                    },
                    Method::Put => {
                        let project = read_json::<Project>(body)?;
                        json(api.update_project(&name, project).await?, 200)
                    },
                    _ => Err(not_allowed()),
                }
            },

            ["settings"] => match method {
                Method::Get => json(api.settings().await?, 200),
                Method::Post => {
                    let settings = read_json::<SettingsMap>(body)?;
                    api.update_settings(settings).await?;
                    Ok(Reply::no_content())
                },
                _ => Err(not_allowed()),
            },

            ["settings", "user"] => match method {
                Method::Get => json(api.user_settings(ctx).await?, 200),
                Method::Post => {
                    let settings = read_json::<SettingsMap>(body)?;
                    api.update_user_settings(ctx, settings).await?;
                    Ok(Reply::no_content())
                },
                _ => Err(not_allowed()),
            },

            _ => Err(not_found()),
        }
    }

    /// Path relative to the mount point, or None when outside it
    fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(&self.prefix)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}

// =============================================================================
// BODY AND PATH PARSING
// =============================================================================

/// Parse a JSON request body
fn read_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

/// Percent-decode a single path segment
fn decode_segment(raw: &str) -> Result<String, ApiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| ApiError::bad_request(format!("Invalid path segment: {raw}")))
}

fn json<T: Serialize>(data: T, status: u16) -> Result<Reply, ApiError> {
    let body = serde_json::to_value(data)
        .map_err(|e| ApiError::internal(format!("Failed to serialize response: {e}")))?;
    Ok(Reply::json(status, body))
}
