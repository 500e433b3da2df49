use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Per-name event listener. Receives the event arguments without the name.
pub type Listener = Arc<dyn Fn(&[Value]) + Send + Sync>;

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<String, Vec<Listener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, name: &str, listener: Listener) {
        self.listeners
            .entry(name.to_string())
            .or_insert_with(Vec::new)
            .push(listener);
    }

    /// Snapshot of the listeners for `name`, so callers can invoke them
    /// without holding the registry lock.
    pub fn listeners(&self, name: &str) -> Vec<Listener> {
        self.listeners.get(name).cloned().unwrap_or_default()
    }

    pub fn count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.listeners.keys().collect();
        names.sort();
        f.debug_struct("ListenerRegistry")
            .field("names", &names)
            .finish()
    }
}
