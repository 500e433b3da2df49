use std::sync::{Arc, RwLock};

use serde_json::Value;
use url::Url;

use super::{CallbackSlot, ModuleIdentity, NoopHandler, NotificationRelay};
use crate::error::RelayError;
use crate::log_info;
use crate::socket::{Endpoint, OutboundReceiver, Socket};

impl NotificationRelay {
    /// Validates `identity` and connects to `{master}/{identity}`.
    ///
    /// The identity check happens before any socket exists, so an invalid
    /// identity never produces a connection. Must run inside a tokio runtime.
    pub fn new(identity: &Value, master: &Url) -> Result<Self, RelayError> {
        let identity = ModuleIdentity::try_from(identity)?;
        let endpoint = Endpoint::new(master, identity.as_str());
        log_info!("Opening notification relay to {}", endpoint);

        Ok(Self::attach(identity, Socket::connect(endpoint)))
    }

    /// Same as [`NotificationRelay::new`] but without a connection task;
    /// everything sent is left on the returned receiver.
    pub fn detached(identity: &Value, master: &Url) -> Result<(Self, OutboundReceiver), RelayError> {
        let identity = ModuleIdentity::try_from(identity)?;
        let endpoint = Endpoint::new(master, identity.as_str());
        let (socket, outbound) = Socket::open(endpoint);

        Ok((Self::attach(identity, socket), outbound))
    }

    fn attach(identity: ModuleIdentity, socket: Socket) -> Self {
        let callback: CallbackSlot = Arc::new(RwLock::new(Arc::new(NoopHandler)));
        Self::install_catch_all(&socket, Arc::clone(&callback));

        Self {
            identity,
            socket,
            callback,
        }
    }
}
