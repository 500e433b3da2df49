use std::sync::{Arc, PoisonError};

use serde_json::Value;

use super::{CallbackSlot, NotificationRelay, CATCH_ALL};
use crate::log_debug;
use crate::socket::{EventPacket, OnEvent, Socket};

impl NotificationRelay {
    /// Wraps the socket's dispatch once. The catch-all listener lives here
    /// rather than in the socket's registry, so a packet arriving from the
    /// wire named `*` cannot reach it through the original dispatch.
    pub(super) fn install_catch_all(socket: &Socket, callback: CallbackSlot) {
        let catch_all = move |args: &[Value]| forward(&callback, args);

        socket.wrap_onevent(move |original: OnEvent| -> OnEvent {
            Arc::new(move |socket: &Socket, packet: EventPacket| {
                let namespace = packet.namespace.clone();
                let id = packet.id;
                let args = packet.data.clone();

                original(socket, packet);

                let mut data = Vec::with_capacity(args.len() + 1);
                data.push(Value::String(CATCH_ALL.to_string()));
                data.extend(args);
                let synthetic = EventPacket { namespace, id, data };

                catch_all(synthetic.args());
            })
        });
    }
}

/// Body of the catch-all listener: `args` is `[original name, ...original args]`.
fn forward(callback: &CallbackSlot, args: &[Value]) {
    let Some(notification) = args.first().and_then(Value::as_str) else {
        return;
    };

    if notification == CATCH_ALL {
        log_debug!("Discarding catch-all marker received as a notification");
        return;
    }

    let payload = args.get(1).cloned().unwrap_or(Value::Null);
    let handler = callback
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

    handler.on_notification(notification, &payload);
}
