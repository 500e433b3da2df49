use std::sync::{Arc, PoisonError};

use super::{NotificationHandler, NotificationRelay};

impl NotificationRelay {
    /// Replaces the callback. Applies to every event dispatched after this
    /// returns; the previous callback is dropped, never chained.
    pub fn set_notification_callback<H>(&self, handler: H)
    where
        H: NotificationHandler + 'static,
    {
        let handler: Arc<dyn NotificationHandler> = Arc::new(handler);
        *self
            .callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = handler;
    }
}
