//! Configuration.
//!
//! Read from `~/.config/headlines/config.toml` (or `--config <PATH>`) at
//! startup.  A missing file means defaults; missing keys fall back to their
//! defaults; an unreadable or invalid file is an error.  Command-line flags
//! are applied on top by `main`.
//!
//! ```toml
//! # Pause before fetching so the "fetching" state is visible.
//! fetch_delay_ms = 1500
//! # Give up on a feed request after this many seconds.
//! request_timeout_secs = 30
//! # Where to write the log.  Defaults to the user cache directory.
//! log_file = "/tmp/headlines.log"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "headlines";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 1500,
            request_timeout_secs: 30,
            log_file: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io { path, source: e }),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/headlines/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// The configured log file, or `~/.cache/headlines/headlines.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join(APP_DIR).join("headlines.log")))
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fetch_delay(), Duration::from_millis(1500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fetch_delay_ms = 0").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.fetch_delay_ms, 0);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn full_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "fetch_delay_ms = 250\nrequest_timeout_secs = 5\nlog_file = \"/tmp/h.log\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.fetch_delay_ms, 250);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/h.log")));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fetch_delay_ms = \"soon\"").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
