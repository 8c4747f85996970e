//! Core domain types for the editor API
//!
//! The adapter owns no state of its own. Everything it serves lives in the
//! runtime, which is reached only through the port traits defined here.
//!
//! ## Architecture
//!
//! - `models/` - Wire-level domain types (Project, settings mappings)
//! - `ports/` - Async trait definitions for the runtime collaborator
//! - `runtime` - The injectable bundle of port implementations

pub mod models;
pub mod ports;
pub mod runtime;

pub use runtime::RuntimeHandle;
