// src/panel/mod.rs
//! The syslog panel: a bounded list of the latest log messages fed by the
//! relay and redrawn by the host.

mod icons;
mod message;
mod state;
mod widget;

use serde_json::Value;
use tokio::sync::mpsc;

pub use icons::{icon_glyph, FALLBACK_ICON};
pub use message::LogMessage;
pub use state::{Alert, PanelEvent, PanelIntent, PanelState, PanelStateMachine};
pub use widget::PanelWidget;

use crate::config::PanelConfig;
use crate::event::Event;
use crate::relay::NotificationRelay;
use crate::log_info;

/// Sent once on start so the master pushes its backlog.
pub const PINGMASTER: &str = "PINGMASTER";
/// Carries a [`LogMessage`] from the master.
pub const NEW_MESSAGE: &str = "NEW_MESSAGE";

#[derive(Debug)]
pub struct SyslogPanel {
    config: PanelConfig,
    state: PanelState,
}

impl SyslogPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            state: PanelState::default(),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn messages(&self) -> &[LogMessage] {
        &self.state.messages
    }

    /// Routes every relay notification onto the host queue and announces
    /// the panel to the master.
    pub fn start(&self, relay: &NotificationRelay, host: mpsc::UnboundedSender<Event>) {
        log_info!("Starting module: {}", self.config.name);

        relay.set_notification_callback(move |notification: &str, payload: &Value| {
            let _ = host.send(Event::Notification {
                name: notification.to_string(),
                payload: payload.clone(),
            });
        });

        self.ping_master(relay);
    }

    pub fn ping_master(&self, relay: &NotificationRelay) {
        relay.send_notification(PINGMASTER, None);
    }

    /// Applies one notification and returns what the host has to do about it.
    pub fn socket_notification_received(&mut self, name: String, payload: Value) -> Vec<PanelEvent> {
        let (state, events) = PanelStateMachine::transition(
            std::mem::take(&mut self.state),
            PanelIntent::Notification { name, payload },
            &self.config,
        );
        self.state = state;
        events
    }
}
