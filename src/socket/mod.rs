// src/socket/mod.rs
//! Namespaced socket.io client: per-name listeners, fire-and-forget emits
//! and a wrappable `onevent` dispatch entry point.

mod driver;
mod endpoint;
mod registry;
pub mod packet;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde_json::Value;
use tokio::sync::mpsc;

pub use endpoint::Endpoint;
pub use packet::EventPacket;
pub use registry::{Listener, ListenerRegistry};

use crate::log_debug;

/// Dispatch entry point for incoming events. Receives the socket so a
/// wrapper can call through to the dispatch it replaced.
pub type OnEvent = Arc<dyn Fn(&Socket, EventPacket) + Send + Sync>;

pub type OutboundReceiver = mpsc::UnboundedReceiver<EventPacket>;
pub type OutboundSender = mpsc::UnboundedSender<EventPacket>;

/// Reserved lifecycle events. They reach listeners directly and never pass
/// through `onevent`.
pub const CONNECT_EVENT: &str = "connect";
pub const DISCONNECT_EVENT: &str = "disconnect";

pub(crate) struct SocketInner {
    endpoint: Endpoint,
    listeners: RwLock<ListenerRegistry>,
    onevent: RwLock<OnEvent>,
    outbound: OutboundSender,
    connected: AtomicBool,
}

/// Handle to one connection. Dropping it ends the connection task.
pub struct Socket {
    inner: Arc<SocketInner>,
}

impl Socket {
    /// Builds a socket without starting any I/O. Emitted events queue up on
    /// the returned receiver.
    pub fn open(endpoint: Endpoint) -> (Self, OutboundReceiver) {
        let (outbound, receiver) = mpsc::unbounded_channel();
        let default_dispatch: OnEvent = Arc::new(|socket: &Socket, packet: EventPacket| {
            socket.dispatch_to_listeners(&packet);
        });

        let socket = Self {
            inner: Arc::new(SocketInner {
                endpoint,
                listeners: RwLock::new(ListenerRegistry::new()),
                onevent: RwLock::new(default_dispatch),
                outbound,
                connected: AtomicBool::new(false),
            }),
        };

        (socket, receiver)
    }

    /// Builds the socket and spawns the task that keeps it connected.
    /// Must be called from within a tokio runtime.
    pub fn connect(endpoint: Endpoint) -> Self {
        let (socket, outbound) = Self::open(endpoint.clone());
        let weak = Arc::downgrade(&socket.inner);
        tokio::spawn(driver::run(weak, endpoint, outbound));
        socket
    }

    pub(crate) fn from_weak(inner: &Weak<SocketInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// True while the namespace is connected.
    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.inner.connected.store(connected, Ordering::SeqCst);
    }

    /// Subscribes `listener` to events named `name`.
    pub fn on<F>(&self, name: &str, listener: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .on(name, Arc::new(listener));
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .count(name)
    }

    /// Queues `name` with `payload` for the master. Never fails; events
    /// emitted while disconnected are sent once the namespace connects.
    pub fn emit(&self, name: &str, payload: Value) {
        let packet = EventPacket::new(self.inner.endpoint.namespace(), name, vec![payload]);
        if self.inner.outbound.send(packet).is_err() {
            log_debug!("Dropping '{}' for {}: connection task has ended", name, self.inner.endpoint);
        }
    }

    /// Replaces the dispatch entry point with `wrap(current)`.
    pub fn wrap_onevent<F>(&self, wrap: F)
    where
        F: FnOnce(OnEvent) -> OnEvent,
    {
        let mut onevent = self
            .inner
            .onevent
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let current: OnEvent = onevent.clone();
        *onevent = wrap(current);
    }

    /// Entry point for every event received from the master.
    pub fn onevent(&self, packet: EventPacket) {
        let handler: OnEvent = self
            .inner
            .onevent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        handler(self, packet);
    }

    /// The unwrapped dispatch: calls every listener registered for the
    /// packet's name with its arguments.
    pub fn dispatch_to_listeners(&self, packet: &EventPacket) {
        let Some(name) = packet.name() else {
            log_debug!("Ignoring event without a string name on {}", self.inner.endpoint);
            return;
        };

        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners(name);

        for listener in listeners {
            listener(packet.args());
        }
    }

    pub(crate) fn emit_reserved(&self, name: &str) {
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners(name);

        for listener in listeners {
            listener(&[]);
        }
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("endpoint", &self.inner.endpoint.path())
            .field("connected", &self.is_connected())
            .field("listeners", &"<RwLock>")
            .finish()
    }
}
