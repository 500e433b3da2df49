// src/socket/packet.rs
//! Engine.IO v4 / Socket.IO v4 text framing.
//!
//! Format: `{engine type}{socket type}[/namespace,][ack id][json]`, e.g.
//! `42/MMM-syslog,["NEW_MESSAGE",{...}]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PacketError;

pub const DEFAULT_NAMESPACE: &str = "/";

/// Handshake sent by the server in the `0` (open) packet. Intervals are in ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

/// A named event: `data[0]` is the event name, the rest are its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPacket {
    pub namespace: String,
    pub id: Option<u64>,
    pub data: Vec<Value>,
}

impl EventPacket {
    pub fn new(namespace: &str, name: &str, args: Vec<Value>) -> Self {
        let mut data = Vec::with_capacity(args.len() + 1);
        data.push(Value::String(name.to_string()));
        data.extend(args);

        Self {
            namespace: namespace.to_string(),
            id: None,
            data,
        }
    }

    /// The event name, if the first element is a string.
    pub fn name(&self) -> Option<&str> {
        self.data.first().and_then(|v| v.as_str())
    }

    pub fn args(&self) -> &[Value] {
        self.data.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect { namespace: String, data: Option<Value> },
    Disconnect { namespace: String },
    Event(EventPacket),
    Ack { namespace: String, id: Option<u64>, data: Vec<Value> },
    ConnectError { namespace: String, data: Option<Value> },
    /// Binary events and acks; attachments are not supported.
    Binary { namespace: String },
}

impl SocketPacket {
    pub fn namespace(&self) -> &str {
        match self {
            SocketPacket::Connect { namespace, .. }
            | SocketPacket::Disconnect { namespace }
            | SocketPacket::Ack { namespace, .. }
            | SocketPacket::ConnectError { namespace, .. }
            | SocketPacket::Binary { namespace } => namespace,
            SocketPacket::Event(event) => &event.namespace,
        }
    }
}

pub fn decode_engine(frame: &str) -> Result<EnginePacket, PacketError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let rest = chars.as_str();

    match kind {
        '0' => serde_json::from_str(rest)
            .map(EnginePacket::Open)
            .map_err(|e| PacketError::MalformedData(e.to_string())),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(rest.to_string())),
        '3' => Ok(EnginePacket::Pong(rest.to_string())),
        '4' => Ok(EnginePacket::Message(rest.to_string())),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(PacketError::UnknownEngineType(other)),
    }
}

/// Heartbeat reply, echoing whatever the ping carried.
pub fn encode_pong(data: &str) -> String {
    format!("3{}", data)
}

/// Decodes the payload of an engine `4` (message) packet.
pub fn decode_socket(payload: &str) -> Result<SocketPacket, PacketError> {
    let mut chars = payload.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let mut rest = chars.as_str();

    if matches!(kind, '5' | '6') {
        // attachment count, then '-'
        rest = match rest.find('-') {
            Some(idx) => &rest[idx + 1..],
            None => rest,
        };
    }

    let namespace = if rest.starts_with('/') {
        match rest.find(',') {
            Some(idx) => {
                let namespace = &rest[..idx];
                rest = &rest[idx + 1..];
                namespace.to_string()
            }
            None => {
                let namespace = rest.to_string();
                rest = "";
                namespace
            }
        }
    } else {
        DEFAULT_NAMESPACE.to_string()
    };

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let id = if digits > 0 {
        let id = rest[..digits]
            .parse::<u64>()
            .map_err(|e| PacketError::MalformedData(e.to_string()))?;
        rest = &rest[digits..];
        Some(id)
    } else {
        None
    };

    let json = |raw: &str| -> Result<Option<Value>, PacketError> {
        if raw.is_empty() {
            Ok(None)
        } else {
            serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| PacketError::MalformedData(e.to_string()))
        }
    };

    let array = |raw: &str| -> Result<Vec<Value>, PacketError> {
        match json(raw)? {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(PacketError::MalformedData(format!("expected array, got {}", other))),
            None => Ok(Vec::new()),
        }
    };

    match kind {
        '0' => Ok(SocketPacket::Connect { namespace, data: json(rest)? }),
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let data = array(rest)?;
            if data.is_empty() {
                return Err(PacketError::MalformedData("event without name".to_string()));
            }
            Ok(SocketPacket::Event(EventPacket { namespace, id, data }))
        }
        '3' => Ok(SocketPacket::Ack { namespace, id, data: array(rest)? }),
        '4' => Ok(SocketPacket::ConnectError { namespace, data: json(rest)? }),
        '5' | '6' => Ok(SocketPacket::Binary { namespace }),
        other => Err(PacketError::UnknownSocketType(other)),
    }
}

fn frame_prefix(kind: char, namespace: &str) -> String {
    if namespace == DEFAULT_NAMESPACE {
        format!("4{}", kind)
    } else {
        format!("4{}{},", kind, namespace)
    }
}

/// Complete engine frame asking to join `namespace`.
pub fn encode_connect(namespace: &str) -> String {
    frame_prefix('0', namespace)
}

/// Complete engine frame carrying `event`.
pub fn encode_event(event: &EventPacket) -> String {
    let mut frame = frame_prefix('2', &event.namespace);
    if let Some(id) = event.id {
        frame.push_str(&id.to_string());
    }
    frame.push_str(&Value::Array(event.data.clone()).to_string());
    frame
}
