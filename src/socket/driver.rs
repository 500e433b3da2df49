// src/socket/driver.rs
//! Connection task: dials the master, keeps the Engine.IO heartbeat alive,
//! routes namespace events into `onevent` and drains the outbound queue.

use std::sync::Weak;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use rand::Rng;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::packet::{self, EnginePacket, SocketPacket};
use super::{Endpoint, OutboundReceiver, Socket, SocketInner, CONNECT_EVENT, DISCONNECT_EVENT};

const INITIAL_RECONNECT_DELAY: Duration = Duration::from_secs(1);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(5);
const RANDOMIZATION_FACTOR: f64 = 0.5;
/// Heartbeat allowance before the server handshake tells us the real one.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(20);

type WebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, PartialEq)]
enum SessionEnd {
    /// Connection lost; try again after a delay.
    Lost,
    /// Every socket handle is gone; stop for good.
    Dropped,
}

pub(crate) async fn run(socket: Weak<SocketInner>, endpoint: Endpoint, mut outbound: OutboundReceiver) {
    let url = endpoint.websocket_url();
    let mut backoff = INITIAL_RECONNECT_DELAY;

    loop {
        if socket.strong_count() == 0 {
            break;
        }

        match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                info!("Connected to {}", url);
                backoff = INITIAL_RECONNECT_DELAY;
                if session(&socket, &endpoint, stream, &mut outbound).await == SessionEnd::Dropped {
                    break;
                }
            }
            Err(err) => {
                warn!("Connection to {} failed: {}", url, err);
            }
        }

        tokio::time::sleep(jitter(backoff)).await;
        backoff = next_backoff(backoff);
    }

    debug!("Connection task for {} finished", endpoint);
}

async fn session(
    socket: &Weak<SocketInner>,
    endpoint: &Endpoint,
    stream: WebSocket,
    outbound: &mut OutboundReceiver,
) -> SessionEnd {
    let (mut write, mut read) = stream.split();
    let mut namespace_connected = false;
    let mut heartbeat_window = HANDSHAKE_TIMEOUT;
    let heartbeat = tokio::time::sleep(heartbeat_window);
    tokio::pin!(heartbeat);

    let end = loop {
        tokio::select! {
            frame = read.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break SessionEnd::Lost,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        warn!("Read error on {}: {}", endpoint, err);
                        break SessionEnd::Lost;
                    }
                };

                let engine_packet = match packet::decode_engine(&text) {
                    Ok(engine_packet) => engine_packet,
                    Err(err) => {
                        warn!("Skipping frame from {}: {}", endpoint, err);
                        continue;
                    }
                };

                match engine_packet {
                    EnginePacket::Open(handshake) => {
                        heartbeat_window = Duration::from_millis(handshake.ping_interval + handshake.ping_timeout);
                        heartbeat.as_mut().reset(Instant::now() + heartbeat_window);
                        let connect = packet::encode_connect(endpoint.namespace());
                        if write.send(Message::Text(connect)).await.is_err() {
                            break SessionEnd::Lost;
                        }
                    }
                    EnginePacket::Ping(data) => {
                        heartbeat.as_mut().reset(Instant::now() + heartbeat_window);
                        let pong = packet::encode_pong(&data);
                        if write.send(Message::Text(pong)).await.is_err() {
                            break SessionEnd::Lost;
                        }
                    }
                    EnginePacket::Close => break SessionEnd::Lost,
                    EnginePacket::Message(payload) => {
                        let socket_packet = match packet::decode_socket(&payload) {
                            Ok(socket_packet) => socket_packet,
                            Err(err) => {
                                warn!("Skipping packet from {}: {}", endpoint, err);
                                continue;
                            }
                        };

                        if socket_packet.namespace() != endpoint.namespace() {
                            debug!("Ignoring packet for namespace {}", socket_packet.namespace());
                            continue;
                        }

                        let Some(handle) = Socket::from_weak(socket) else {
                            break SessionEnd::Dropped;
                        };

                        match socket_packet {
                            SocketPacket::Connect { .. } => {
                                info!("Namespace {} connected", endpoint.namespace());
                                namespace_connected = true;
                                handle.set_connected(true);
                                handle.emit_reserved(CONNECT_EVENT);
                            }
                            SocketPacket::Event(event) => handle.onevent(event),
                            SocketPacket::Disconnect { .. } => {
                                info!("Master closed namespace {}", endpoint.namespace());
                                break SessionEnd::Lost;
                            }
                            SocketPacket::ConnectError { data, .. } => {
                                warn!("Namespace {} refused: {:?}", endpoint.namespace(), data);
                                break SessionEnd::Lost;
                            }
                            SocketPacket::Ack { id, .. } => debug!("Ignoring ack {:?}", id),
                            SocketPacket::Binary { .. } => warn!("Binary packets are not supported, skipping"),
                        }
                    }
                    EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
                }
            }
            queued = outbound.recv(), if namespace_connected => {
                let Some(event) = queued else {
                    break SessionEnd::Dropped;
                };
                let frame = packet::encode_event(&event);
                if write.send(Message::Text(frame)).await.is_err() {
                    break SessionEnd::Lost;
                }
            }
            _ = &mut heartbeat => {
                warn!("No heartbeat from {} within {:?}", endpoint, heartbeat_window);
                break SessionEnd::Lost;
            }
        }
    };

    if namespace_connected {
        if let Some(handle) = Socket::from_weak(socket) {
            handle.set_connected(false);
            handle.emit_reserved(DISCONNECT_EVENT);
        }
    }

    let _ = write.close().await;
    end
}

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_RECONNECT_DELAY)
}

fn jitter(delay: Duration) -> Duration {
    let factor = rand::thread_rng().gen_range((1.0 - RANDOMIZATION_FACTOR)..=(1.0 + RANDOMIZATION_FACTOR));
    delay.mul_f64(factor)
}
