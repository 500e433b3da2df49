use serde_json::{Map, Value};

use super::NotificationRelay;
use crate::log_debug;

impl NotificationRelay {
    /// Sends `notification` to the master. A missing or `null` payload goes
    /// out as `{}`.
    pub fn send_notification(&self, notification: &str, payload: Option<Value>) {
        let payload = match payload {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(payload) => payload,
        };

        log_debug!("Sending {} to {}", notification, self.socket.endpoint());
        self.socket.emit(notification, payload);
    }
}
