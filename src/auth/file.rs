//
//  klog-sdk
//  auth/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # File-Based Token Storage
//!
//! Fallback for environments without keyring support:
//!
//! - Headless servers without desktop integration
//! - Docker containers
//! - CI/CD environments
//!
//! The token is written as plain text to a single file. On Unix the file is
//! kept at mode `0600`, including a pre-existing file with looser bits; the
//! token is only as safe as the account that owns it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{non_empty, TokenStore, DEFAULT_TOKEN_KEY};

/// Token storage backed by a file.
///
/// # Example
///
/// ```rust,ignore
/// use klog_sdk::auth::{FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::default_location().expect("no home directory");
/// store.set_token(Some("abc123"));
/// println!("token saved to {}", store.path().display());
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store that reads and writes `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `<data dir>/klog/klog_token`.
    ///
    /// - **Linux**: `~/.local/share/klog/klog_token`
    /// - **macOS**: `~/Library/Application Support/klog/klog_token`
    /// - **Windows**: `%APPDATA%\klog\data\klog_token`
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "klog")?;
        Some(Self::new(dirs.data_dir().join(DEFAULT_TOKEN_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten files that already existed.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => non_empty(Some(content.trim())).map(str::to_owned),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "failed to read token file");
                None
            }
        }
    }

    fn set_token(&self, token: Option<&str>) {
        let result = match non_empty(token) {
            Some(token) => self.write(token),
            None => self.remove(),
        };

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to update token file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert!(store.token().is_none());
        store.set_token(Some("abc123"));
        assert_eq!(store.token().as_deref(), Some("abc123"));

        // A second store on the same path sees the persisted value.
        let reopened = FileTokenStore::new(store.path());
        assert_eq!(reopened.token().as_deref(), Some("abc123"));

        store.clear_token();
        assert!(!store.path().exists());
        assert!(reopened.token().is_none());
    }

    #[test]
    fn test_overwrite_truncates() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.set_token(Some("a-much-longer-token"));
        store.set_token(Some("short"));
        assert_eq!(store.token().as_deref(), Some("short"));
    }

    #[test]
    fn test_unwritable_location_degrades_to_noop() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileTokenStore::new(blocker.join("token"));
        store.set_token(Some("abc"));
        assert!(store.token().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.set_token(Some("abc"));

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_file_permissions_are_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.set_token(Some("abc"));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.token().as_deref(), Some("abc"));
    }
}
