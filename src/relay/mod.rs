// src/relay/mod.rs
//! Notification relay: one catch-all callback over a per-name socket.
//!
//! Every incoming event is dispatched twice. First through the socket's
//! original dispatch, untouched, so per-name listeners behave exactly as
//! on a bare socket. Then as a synthetic `["*", name, ...args]` packet to
//! the relay's catch-all listener, which hands `(name, payload)` to the
//! single registered [`NotificationHandler`].

mod handler;
mod identity;
mod install_catch_all;
mod new;
mod send_notification;
mod set_notification_callback;

use std::fmt;
use std::sync::{Arc, RwLock};

pub use handler::{NoopHandler, NotificationHandler};
pub use identity::ModuleIdentity;

use crate::socket::{Endpoint, Socket};

/// Reserved name of the catch-all channel. Never a real notification.
pub const CATCH_ALL: &str = "*";

pub(crate) type CallbackSlot = Arc<RwLock<Arc<dyn NotificationHandler>>>;

pub struct NotificationRelay {
    identity: ModuleIdentity,
    socket: Socket,
    callback: CallbackSlot,
}

impl NotificationRelay {
    pub fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.socket.endpoint()
    }

    /// The underlying socket, for per-name subscriptions.
    pub fn socket(&self) -> &Socket {
        &self.socket
    }
}

impl fmt::Debug for NotificationRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRelay")
            .field("identity", &self.identity)
            .field("socket", &self.socket)
            .field("callback", &"<RwLock>")
            .finish()
    }
}
