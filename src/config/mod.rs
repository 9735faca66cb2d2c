//! Persistent user-session configuration.
//!
//! The configuration lives in a single JSON file in the user's home directory and
//! holds the database connection string plus the name of the current user. Every
//! mutation is written through to disk immediately by replacing the file atomically;
//! there is no buffering and no locking, so concurrent invocations racing on the
//! file resolve as last writer wins.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the configuration file, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".gatorconfig.json";

/// In-memory copy of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string.
    pub db_url: String,
    /// Name of the user that `register` or `login` last switched to.
    pub current_user_name: String,
}

/// Reads and writes the configuration file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store bound to `~/.gatorconfig.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigUnavailable(HomeDirUnavailable)` if the home directory cannot be resolved.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Ok(Self::at(home.join(CONFIG_FILE_NAME)))
    }

    /// Store bound to an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration from disk.
    ///
    /// A missing file is an error, not an empty configuration: the file has to be
    /// created by hand before first use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigUnavailable` if the file cannot be read or does not decode into
    /// both `db_url` and `current_user_name`.
    pub fn load(&self) -> Result<Config> {
        debug!("Reading config from {}", self.path.display());

        let data = fs::read_to_string(&self.path).map_err(|e| ConfigError::Read {
            path: self.path.clone(),
            source: Arc::new(e),
        })?;

        let config = decode(&data).map_err(|e| ConfigError::Decode {
            path: self.path.clone(),
            source: Arc::new(e),
        })?;

        Ok(config)
    }

    /// Records `name` as the current user and persists the whole record.
    ///
    /// The in-memory value is updated first, then the file is overwritten with both
    /// fields. Out-of-band edits made since the last `load` are lost.
    ///
    /// # Errors
    ///
    /// Returns `ConfigUnavailable` if the configuration cannot be encoded or written.
    pub fn set_current_user(&self, config: &mut Config, name: &str) -> Result<()> {
        config.current_user_name = name.to_string();
        self.write(config)?;
        info!("Current user set to {}", name);
        Ok(())
    }

    fn write(&self, config: &Config) -> Result<()> {
        let data = encode(config).map_err(|e| ConfigError::Encode(Arc::new(e)))?;

        write_private(&self.path, data.as_bytes()).map_err(|e| ConfigError::Write {
            path: self.path.clone(),
            source: Arc::new(e),
        })?;

        debug!("Wrote config to {}", self.path.display());
        Ok(())
    }
}

/// Encodes the configuration as 2-space indented JSON.
pub fn encode(config: &Config) -> serde_json::Result<String> {
    serde_json::to_string_pretty(config)
}

/// Decodes the configuration; both fields are required.
pub fn decode(data: &str) -> serde_json::Result<Config> {
    serde_json::from_str(data)
}

/// Sibling path the new contents are staged in before the rename.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces `path` with `data` atomically: write to a temp file, then rename.
///
/// Readers see either the old file or the new one, never a partial write.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp = temp_path(path);
    let result = write_new_file(&temp, data).and_then(|()| fs::rename(&temp, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Creates `path` with owner-only permissions and flushes it to disk.
#[cfg(unix)]
fn write_new_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; a stale temp file may have other bits.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(data)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_new_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
