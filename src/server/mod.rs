//! HTTP server adapters
//!
//! This module translates between HTTP and the HTTP-agnostic API layer.
//!
//! - `routes` - Path/method routing and status selection, independent of any listener
//! - `http` - `tiny_http` listener that feeds requests to the router

pub mod http;
pub mod routes;

pub use self::http::{ApiServer, MAX_BODY_BYTES, ShutdownHandle};
pub use self::routes::{Reply, Router};
pub use tiny_http::Method;
