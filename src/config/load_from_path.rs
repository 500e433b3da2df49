use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{PanelConfig, CONFIG_ENV, DEFAULT_CONFIG_PATH};
use crate::error::ConfigError;
use crate::{log_info, log_warn};

impl PanelConfig {
    /// First CLI argument, then `SYSLOG_PANEL_CONFIG`, then `config.yml`.
    pub fn resolve_path(cli_arg: Option<String>) -> PathBuf {
        cli_arg
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Loads and validates the config. A missing file means defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            log_info!("Loaded config from {}", path.display());
            Self::from_yaml(&content)?
        } else {
            log_warn!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file parses as YAML null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "master: http://10.0.0.2:8080\nmax: 10\nblacklist:\n  - INFO").unwrap();

        let config = PanelConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.master, "http://10.0.0.2:8080");
        assert_eq!(config.max, 10);
        assert!(config.is_blacklisted("INFO"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PanelConfig::load_from_path(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.max, 5);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = PanelConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.master, super::super::DEFAULT_MASTER);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max: [not, a, number]").unwrap();
        assert!(matches!(
            PanelConfig::load_from_path(file.path()),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_resolve_path_prefers_cli_argument() {
        let path = PanelConfig::resolve_path(Some("custom.yml".to_string()));
        assert_eq!(path, PathBuf::from("custom.yml"));
    }
}
