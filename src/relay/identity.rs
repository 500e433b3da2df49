use std::fmt;

use serde_json::Value;

use crate::error::RelayError;

/// Module identity used as the socket namespace. Always a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIdentity(String);

impl ModuleIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&Value> for ModuleIdentity {
    type Error = RelayError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => ModuleIdentity::try_from(name.as_str()),
            other => Err(RelayError::InvalidIdentity(describe(other))),
        }
    }
}

impl TryFrom<&str> for ModuleIdentity {
    type Error = RelayError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        if name.trim().is_empty() {
            return Err(RelayError::InvalidIdentity("an empty string".to_string()));
        }
        Ok(Self(name.to_string()))
    }
}

impl fmt::Display for ModuleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
