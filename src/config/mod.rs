// src/config/mod.rs
//! Panel configuration, injected by the host from a YAML file.

mod flag;
mod load_from_path;
mod validate;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use flag::Flag;

pub const CONFIG_ENV: &str = "SYSLOG_PANEL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub const DEFAULT_IDENTITY: &str = "MMM-syslog";
pub const DEFAULT_NAME: &str = "MMM-syslog-slave";
pub const DEFAULT_MASTER: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Relay identity; also the socket namespace. Kept untyped so the relay
    /// can reject non-string values itself.
    #[serde(default = "default_identity")]
    pub identity: Value,

    /// Display name, used as the header when `title` is unset.
    #[serde(default = "default_name")]
    pub name: String,

    /// Base address of the master.
    #[serde(default = "default_master")]
    pub master: String,

    /// How many messages the panel keeps.
    #[serde(default = "default_max")]
    pub max: usize,

    /// `false` for relative times, otherwise a strftime pattern.
    #[serde(default)]
    pub format: Flag<String>,

    /// Style class per message type.
    #[serde(default = "default_types")]
    pub types: HashMap<String, String>,

    /// Icon name per message type.
    #[serde(default = "default_icons")]
    pub icons: HashMap<String, String>,

    /// `false`, or the number of characters shown per message.
    #[serde(default, alias = "shortenMessage")]
    pub shorten_message: Flag<usize>,

    /// Message types that are dropped on arrival.
    #[serde(default)]
    pub blacklist: BTreeSet<String>,

    /// `false` hides the header, a string replaces it.
    #[serde(default)]
    pub title: Option<Flag<String>>,

    /// How long an alert stays on screen.
    #[serde(default = "default_alert_seconds", alias = "alertSeconds")]
    pub alert_seconds: u64,
}

fn default_identity() -> Value {
    Value::String(DEFAULT_IDENTITY.to_string())
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_master() -> String {
    DEFAULT_MASTER.to_string()
}

fn default_max() -> usize {
    5
}

fn default_alert_seconds() -> u64 {
    5
}

fn default_types() -> HashMap<String, String> {
    [("INFO", "dimmed"), ("WARNING", "normal"), ("ERROR", "bright")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_icons() -> HashMap<String, String> {
    [("INFO", "info"), ("WARNING", "exclamation"), ("ERROR", "exclamation-triangle")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            name: default_name(),
            master: default_master(),
            max: default_max(),
            format: Flag::default(),
            types: default_types(),
            icons: default_icons(),
            shorten_message: Flag::default(),
            blacklist: BTreeSet::new(),
            title: None,
            alert_seconds: default_alert_seconds(),
        }
    }
}

impl PanelConfig {
    /// Header text, or `None` when the header is switched off.
    pub fn header(&self) -> Option<&str> {
        match &self.title {
            Some(Flag::Switch(false)) => None,
            Some(Flag::Set(title)) if !title.is_empty() => Some(title.as_str()),
            _ => Some(self.name.as_str()),
        }
    }

    pub fn time_format(&self) -> Option<&str> {
        self.format.value().map(String::as_str)
    }

    /// `0` counts as switched off.
    pub fn shorten_to(&self) -> Option<usize> {
        self.shorten_message.value().copied().filter(|&max| max > 0)
    }

    pub fn is_blacklisted(&self, message_type: &str) -> bool {
        self.blacklist.contains(message_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_module_defaults() {
        let config: PanelConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.max, 5);
        assert!(config.format.is_disabled());
        assert!(config.shorten_message.is_disabled());
        assert!(config.blacklist.is_empty());
        assert_eq!(config.types.get("WARNING").map(String::as_str), Some("normal"));
        assert_eq!(config.icons.get("ERROR").map(String::as_str), Some("exclamation-triangle"));
        assert_eq!(config.identity, Value::String(DEFAULT_IDENTITY.to_string()));
        assert_eq!(config.header(), Some(DEFAULT_NAME));
    }

    #[test]
    fn test_flags_accept_bool_or_value() {
        let config: PanelConfig = serde_yaml::from_str(
            "format: \"%H:%M\"\nshortenMessage: 20\ntitle: false\nblacklist: [INFO]\n",
        )
        .unwrap();

        assert_eq!(config.time_format(), Some("%H:%M"));
        assert_eq!(config.shorten_to(), Some(20));
        assert_eq!(config.header(), None);
        assert!(config.is_blacklisted("INFO"));
        assert!(!config.is_blacklisted("ERROR"));
    }

    #[test]
    fn test_zero_shorten_length_means_no_shortening() {
        let config: PanelConfig = serde_yaml::from_str("shorten_message: 0\n").unwrap();
        assert_eq!(config.shorten_to(), None);

        let config: PanelConfig = serde_yaml::from_str("shorten_message: true\n").unwrap();
        assert_eq!(config.shorten_to(), None);
    }

    #[test]
    fn test_header_variants() {
        let mut config = PanelConfig::default();

        config.title = Some(Flag::Set("Server log".to_string()));
        assert_eq!(config.header(), Some("Server log"));

        config.title = Some(Flag::Set(String::new()));
        assert_eq!(config.header(), Some(DEFAULT_NAME));

        config.title = Some(Flag::Switch(true));
        assert_eq!(config.header(), Some(DEFAULT_NAME));
    }

    #[test]
    fn test_identity_is_kept_untyped() {
        let config: PanelConfig = serde_yaml::from_str("identity: 42\n").unwrap();
        assert_eq!(config.identity, serde_json::json!(42));
    }
}
