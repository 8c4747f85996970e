//! Port traits (interfaces) for the runtime collaborator
//!
//! The editor API never owns projects or settings. It forwards every call to
//! an implementation of these traits and reports the outcome.
//!
//! Implementations live in the `adapters` module (and in test mocks).
//!
//! ## Design Principle
//!
//! Every operation is async and resolves to either a value or a
//! [`RuntimeError`]. The adapter never interprets the reason for a
//! rejection beyond its classification, which decides the HTTP status.

mod error;
mod projects;
mod settings;

pub use error::RuntimeError;
pub use projects::ProjectsRuntime;
pub use settings::SettingsRuntime;
