// src/panel/state.rs
use serde_json::Value;

use super::{LogMessage, NEW_MESSAGE};
use crate::config::PanelConfig;
use crate::{log_debug, log_warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    /// Oldest first; rendering reverses it.
    pub messages: Vec<LogMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

// ----------------------------------------------------------------------------
// INTENT - what reached the panel
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PanelIntent {
    Notification { name: String, payload: Value },
}

// ----------------------------------------------------------------------------
// EVENTS - what the host has to act on
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    MessageAdded { total: usize },
    AlertRaised(Alert),
    RenderRequested,
}

// ----------------------------------------------------------------------------
// STATE MACHINE - (State, Intent) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct PanelStateMachine;

impl PanelStateMachine {
    pub fn transition(
        state: PanelState,
        intent: PanelIntent,
        config: &PanelConfig,
    ) -> (PanelState, Vec<PanelEvent>) {
        match intent {
            PanelIntent::Notification { name, payload } if name == NEW_MESSAGE => {
                Self::handle_new_message(state, payload, config)
            }
            PanelIntent::Notification { name, .. } => {
                log_debug!("Ignoring notification {}", name);
                (state, vec![])
            }
        }
    }

    fn handle_new_message(
        mut state: PanelState,
        payload: Value,
        config: &PanelConfig,
    ) -> (PanelState, Vec<PanelEvent>) {
        let message: LogMessage = match serde_json::from_value(payload) {
            Ok(message) => message,
            Err(e) => {
                log_warn!("Dropping malformed {} payload: {}", NEW_MESSAGE, e);
                return (state, vec![]);
            }
        };

        if config.is_blacklisted(&message.kind) {
            log_debug!("Blacklisted {} message dropped", message.kind);
            return (state, vec![]);
        }

        let mut events = Vec::with_capacity(3);
        if !message.silent {
            events.push(PanelEvent::AlertRaised(Alert {
                title: message.kind.clone(),
                message: message.message.clone(),
            }));
        }

        state.messages.push(message);
        if state.messages.len() > config.max {
            let excess = state.messages.len() - config.max;
            state.messages.drain(..excess);
        }

        events.push(PanelEvent::MessageAdded { total: state.messages.len() });
        events.push(PanelEvent::RenderRequested);
        (state, events)
    }
}
