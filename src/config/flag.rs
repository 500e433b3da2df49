use serde::{Deserialize, Serialize};

/// Options that are either a boolean switch or a value, e.g.
/// `format: false` / `format: "%H:%M"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag<T> {
    Switch(bool),
    Set(T),
}

impl<T> Flag<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Flag::Set(value) => Some(value),
            Flag::Switch(_) => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Flag::Switch(false))
    }
}

impl<T> Default for Flag<T> {
    fn default() -> Self {
        Flag::Switch(false)
    }
}
