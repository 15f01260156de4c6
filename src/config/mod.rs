//
//  klog-sdk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `klog` command-line tool, stored as TOML in a
//! platform-specific directory. The library itself is configured in code
//! through [`KlogConfig`](crate::KlogConfig); this file only feeds it.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/klog/config.toml`
//! - **macOS**: `~/Library/Application Support/klog/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\klog\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://blog.example.com"
//! timeout_ms = 10000
//! token_store = "keyring"
//! ```
//!
//! ## Keys
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `base_url` | unset | KLog server address |
//! | `timeout_ms` | `30000` | Per-request timeout |
//! | `token_store` | `keyring` | `keyring`, `file` or `memory` |

mod file;

pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_TIMEOUT;
use crate::auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["base_url", "timeout_ms", "token_store"];

/// Where the CLI keeps the token between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    Keyring,
    File,
    Memory,
}

impl TokenBackend {
    /// Builds the store for this backend.
    ///
    /// `File` falls back to memory if no home directory can be determined.
    pub fn build(self) -> Arc<dyn TokenStore> {
        match self {
            Self::Keyring => Arc::new(KeyringTokenStore::new()),
            Self::File => match FileTokenStore::default_location() {
                Some(store) => Arc::new(store),
                None => {
                    tracing::warn!("no data directory available, keeping token in memory");
                    Arc::new(MemoryTokenStore::new())
                }
            },
            Self::Memory => Arc::new(MemoryTokenStore::new()),
        }
    }
}

impl fmt::Display for TokenBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyring => "keyring",
            Self::File => "file",
            Self::Memory => "memory",
        })
    }
}

impl FromStr for TokenBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keyring" => Ok(Self::Keyring),
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown token store `{other}` (expected keyring, file or memory)"),
        }
    }
}

/// The `klog` configuration file.
///
/// # Examples
///
/// ```rust,ignore
/// use klog_sdk::config::Config;
///
/// let mut config = Config::load()?;
/// config.set("base_url", "https://blog.example.com")?;
/// config.save()?;
/// ```
///
/// # Notes
///
/// - All fields use `#[serde(default)]` so older or partial files still load
/// - The file is created on first save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub token_store: TokenBackend,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "klog")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The request timeout, falling back to the SDK default.
    pub fn timeout(&self) -> Duration {
        self.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis)
    }

    /// Reads a value by key. Unset and unknown keys return `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => self.base_url.clone(),
            "timeout_ms" => self.timeout_ms.map(|ms| ms.to_string()),
            "token_store" => Some(self.token_store.to_string()),
            _ => None,
        }
    }

    /// Sets a value by key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that don't parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                url::Url::parse(value).with_context(|| format!("`{value}` is not a valid URL"))?;
                self.base_url = Some(value.trim_end_matches('/').to_string());
            }
            "timeout_ms" => {
                let ms = value
                    .parse()
                    .with_context(|| format!("`{value}` is not a number of milliseconds"))?;
                self.timeout_ms = Some(ms);
            }
            "token_store" => self.token_store = value.parse()?,
            other => bail!("unknown config key `{other}` (expected one of: {})", CONFIG_KEYS.join(", ")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.token_store, TokenBackend::Keyring);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.get("base_url"), None);
        assert_eq!(config.get("token_store").as_deref(), Some("keyring"));
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("base_url", "https://blog.example.com/").unwrap();
        config.set("timeout_ms", "5000").unwrap();
        config.set("token_store", "file").unwrap();

        assert_eq!(config.get("base_url").as_deref(), Some("https://blog.example.com"));
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.token_store, TokenBackend::File);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("timeout_ms", "soon").is_err());
        assert!(config.set("token_store", "cookie").is_err());
        assert!(config.set("base_url", "not a url").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("klog").join("config.toml");

        let mut config = Config::default();
        config.set("base_url", "http://localhost:8080").unwrap();
        config.set("token_store", "memory").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
