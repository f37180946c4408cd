//! Unified path management for MCC data files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for MCC configuration and data.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/mcc/               # Config directory
/// ├── secret.json              # Agent platform credentials
/// └── history.toml             # Durable task history
/// ```
pub struct MccPaths;

impl MccPaths {
    /// Returns the MCC configuration directory (e.g. `~/.config/mcc/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("mcc"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the durable history slot.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("history.toml"))
    }

    /// Returns the path to the secrets file.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_mcc() {
        let config_dir = MccPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("mcc"));
    }

    #[test]
    fn test_history_file_is_under_config_dir() {
        let history_file = MccPaths::history_file().unwrap();
        assert!(history_file.ends_with("history.toml"));
        let config_dir = MccPaths::config_dir().unwrap();
        assert!(history_file.starts_with(&config_dir));
    }

    #[test]
    fn test_secret_file_is_under_config_dir() {
        let secret_file = MccPaths::secret_file().unwrap();
        assert!(secret_file.ends_with("secret.json"));
        let config_dir = MccPaths::config_dir().unwrap();
        assert!(secret_file.starts_with(&config_dir));
    }
}
