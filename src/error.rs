use thiserror::Error;

/// Errors raised while building a [`crate::relay::NotificationRelay`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("Please set the module name for the notification relay (got {0}).")]
    InvalidIdentity(String),
}

/// Errors raised while loading or validating the panel configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid master address '{address}': {source}")]
    InvalidMaster {
        address: String,
        source: url::ParseError,
    },

    #[error("Unsupported master scheme '{0}', expected http or ws")]
    UnsupportedScheme(String),

    #[error("Invalid time format '{0}'")]
    InvalidFormat(String),

    #[error("Config error: {field}: {error}")]
    Invalid { field: String, error: String },
}

/// Errors raised while decoding a frame received from the master.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PacketError {
    #[error("Empty frame")]
    Empty,

    #[error("Unknown engine packet type '{0}'")]
    UnknownEngineType(char),

    #[error("Unknown socket packet type '{0}'")]
    UnknownSocketType(char),

    #[error("Malformed event data: {0}")]
    MalformedData(String),
}
