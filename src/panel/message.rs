use serde::{Deserialize, Serialize};

/// One log entry as pushed by the master. Missing fields fall back to
/// empty values so a sparse payload still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub silent: bool,
    #[serde(default)]
    pub timestamp: String,
}

impl LogMessage {
    pub fn new(kind: &str, message: &str, timestamp: &str) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
            silent: false,
            timestamp: timestamp.to_string(),
        }
    }
}
