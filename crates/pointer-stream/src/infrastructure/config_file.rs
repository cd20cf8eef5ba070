//! Optional TOML configuration file.
//!
//! Every key is optional; absent keys fall through to CLI/env values or the
//! built-in defaults (see `main.rs` for the precedence rules).
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1"
//! port = 8765
//! frequency_hz = 60
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level layout of the configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// IP address to bind the WebSocket listener to.
    pub bind: Option<String>,
    /// TCP port of the WebSocket listener.
    pub port: Option<u16>,
    /// Samples per second sent to each client.
    pub frequency_hz: Option<u32>,
}

impl ConfigFile {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Parse`] on malformed TOML, wrong value
    /// types, or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Io`] if the file cannot be read, otherwise
    /// see [`ConfigFile::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_server_section() {
        let text = r#"
            [server]
            bind = "0.0.0.0"
            port = 9000
            frequency_hz = 30
        "#;

        let cfg = ConfigFile::from_toml_str(text).unwrap();

        assert_eq!(cfg.server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(cfg.server.port, Some(9000));
        assert_eq!(cfg.server.frequency_hz, Some(30));
    }

    #[test]
    fn test_parse_empty_file_gives_all_none() {
        let cfg = ConfigFile::from_toml_str("").unwrap();
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn test_parse_partial_section_leaves_other_keys_unset() {
        let cfg = ConfigFile::from_toml_str("[server]\nfrequency_hz = 120\n").unwrap();
        assert_eq!(cfg.server.frequency_hz, Some(120));
        assert!(cfg.server.bind.is_none());
        assert!(cfg.server.port.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let result = ConfigFile::from_toml_str("[server]\nhost = \"localhost\"\n");
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let result = ConfigFile::from_toml_str("[server]\nport = \"eighty\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/pointer-stream.toml");

        let err = ConfigFile::load(path).unwrap_err();

        assert!(matches!(err, ConfigFileError::Io { .. }));
        assert!(err.to_string().contains("pointer-stream.toml"));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        // Arrange
        let path = std::env::temp_dir().join(format!(
            "pointer-stream-test-{}.toml",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "[server]\nport = 4242\n").unwrap();

        // Act
        let cfg = ConfigFile::load(&path);
        let _ = std::fs::remove_file(&path);

        // Assert
        assert_eq!(cfg.unwrap().server.port, Some(4242));
    }
}
