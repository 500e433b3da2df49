use url::Url;

use super::PanelConfig;
use crate::error::ConfigError;
use crate::util::time::is_valid_format;

impl PanelConfig {
    /// Checks everything the panel can check up front. The identity is left
    /// to the relay, which owns that precondition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.master_url()?;

        if self.max == 0 {
            return Err(ConfigError::Invalid {
                field: "max".to_string(),
                error: "must keep at least one message".to_string(),
            });
        }

        if let Some(format) = self.time_format() {
            if !is_valid_format(format) {
                return Err(ConfigError::InvalidFormat(format.to_string()));
            }
        }

        Ok(())
    }

    pub fn master_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.master).map_err(|source| ConfigError::InvalidMaster {
            address: self.master.clone(),
            source,
        })?;

        // plain websocket transport only
        match url.scheme() {
            "http" | "ws" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}
