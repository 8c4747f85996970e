//! Domain models for the editor API
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Project`] - A named, otherwise opaque project record
//! - [`SettingsMap`] - An opaque key/value settings bag
//! - [`UserSettingsRequest`] / [`UserSettingsUpdate`] - Per-user settings calls

mod project;
mod settings;

pub use project::Project;
pub use settings::{EDITOR_THEME_KEY, SettingsMap, UserSettingsRequest, UserSettingsUpdate};
