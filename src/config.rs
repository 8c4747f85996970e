//! Configuration management
//!
//! Settings for the HTTP server and the static theme defaults served by
//! `GET /settings`. Stored as TOML at `<config dir>/flow-editor-api/config.toml`
//! unless a path is given explicitly.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 1880
//! prefix = "/admin"
//! user_header = "x-forwarded-user"
//!
//! [theme]
//! header = "Flows"
//! palette = { editable = true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::models::SettingsMap;
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// HTTP server options
    #[serde(default)]
    pub server: ServerConfig,
    /// Theme defaults, overlaid by the runtime's stored `editorTheme`
    #[serde(default)]
    pub theme: SettingsMap,
}

/// HTTP server options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix the routes are mounted under (empty = root)
    #[serde(default)]
    pub prefix: String,
    /// Request header carrying the authenticated user, set by a fronting proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_header: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    1880
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            prefix: String::new(),
            user_header: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EditorConfig {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from the default location, or defaults if it does not exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, or defaults if it does not exist
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
