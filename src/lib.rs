//! flow-editor-api - REST adapter for a visual flow editor
//!
//! This library exposes a flow runtime's project and settings operations as
//! HTTP endpoints. The runtime itself is injected through the port traits in
//! [`core::ports`]; the adapter forwards every call and maps the outcome to a
//! status code and JSON body.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod paths;
pub mod server;
