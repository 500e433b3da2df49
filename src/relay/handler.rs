use serde_json::Value;

/// The single consumer of everything the relay receives.
pub trait NotificationHandler: Send + Sync {
    fn on_notification(&self, notification: &str, payload: &Value);
}

impl<F> NotificationHandler for F
where
    F: Fn(&str, &Value) + Send + Sync,
{
    fn on_notification(&self, notification: &str, payload: &Value) {
        self(notification, payload)
    }
}

/// Slot occupant until a real handler is registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl NotificationHandler for NoopHandler {
    fn on_notification(&self, _notification: &str, _payload: &Value) {}
}
