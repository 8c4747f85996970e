//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and the handlers
//! that forward each editor operation to the injected runtime. Any HTTP
//! server implementation can sit in front of it; the `server` module wires
//! it to `tiny_http`.
//!
//! ## Design
//!
//! - **Handlers forward, they do not decide**: every call goes straight to the runtime
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::EditorApi;
pub use types::{ProjectsData, RequestContext};
