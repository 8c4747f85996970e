//! Centralized path definitions
//!
//! ## Layout
//!
//! ```text
//! <config dir>/flow-editor-api/
//! └── config.toml               # Server options, theme defaults
//! ```
//!
//! `<config dir>` is the platform config directory (`~/.config` on Linux).

use std::path::PathBuf;

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "flow-editor-api";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Get the config directory.
///
/// Falls back to `./.flow-editor-api` when the platform has no config dir.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(format!(".{CONFIG_DIR_NAME}")),
        |dir| dir.join(CONFIG_DIR_NAME),
    )
}

/// Get the default config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}
