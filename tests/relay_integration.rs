use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use syslog_panel::socket::{CONNECT_EVENT, DISCONNECT_EVENT};
use syslog_panel::NotificationRelay;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};
use url::Url;

const WAIT: Duration = Duration::from_secs(5);
const HANDSHAKE: &str = r#"0{"sid":"engine-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

type Server = WebSocketStream<TcpStream>;

async fn accept(listener: &TcpListener) -> Server {
    let (stream, _) = timeout(WAIT, listener.accept()).await.expect("no connection").unwrap();
    accept_async(stream).await.unwrap()
}

async fn next_text(ws: &mut Server) -> String {
    loop {
        match timeout(WAIT, ws.next()).await.expect("no frame") {
            Some(Ok(Message::Text(text))) => return text,
            Some(Ok(_)) => continue,
            other => panic!("connection ended: {:?}", other),
        }
    }
}

async fn send(ws: &mut Server, frame: &str) {
    ws.send(Message::Text(frame.to_string())).await.unwrap();
}

/// Plays the master's side of the handshake for namespace `/MMM-syslog`.
async fn open_namespace(ws: &mut Server) {
    send(ws, HANDSHAKE).await;
    assert_eq!(next_text(ws).await, "40/MMM-syslog,");
    send(ws, r#"40/MMM-syslog,{"sid":"ns-1"}"#).await;
}

async fn master() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
    (listener, url)
}

#[tokio::test]
async fn test_relay_forwards_wire_events_in_order() {
    let (listener, url) = master().await;
    let relay = NotificationRelay::new(&json!("MMM-syslog"), &url).unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    relay.set_notification_callback(move |name: &str, payload: &Value| {
        let _ = tx.send((name.to_string(), payload.clone()));
    });

    let status_args: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&status_args);
    relay.socket().on("STATUS", move |args| sink.lock().unwrap().extend_from_slice(args));

    // queued while disconnected
    relay.send_notification("PINGMASTER", None);

    let mut ws = accept(&listener).await;
    open_namespace(&mut ws).await;

    assert_eq!(next_text(&mut ws).await, r#"42/MMM-syslog,["PINGMASTER",{}]"#);
    assert!(relay.socket().is_connected());

    send(&mut ws, r#"42/MMM-syslog,["STATUS","ok"]"#).await;
    send(&mut ws, r#"42/MMM-syslog,["*","spoofed"]"#).await;
    send(&mut ws, r#"42/MMM-syslog,["NEW_MESSAGE",{"type":"INFO","message":"hi","timestamp":""}]"#).await;
    send(&mut ws, r#"42/other,["NEW_MESSAGE",{"type":"INFO","message":"not ours"}]"#).await;
    send(&mut ws, r#"42/MMM-syslog,["BARE"]"#).await;

    let first = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    let second = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    let third = timeout(WAIT, rx.recv()).await.unwrap().unwrap();

    assert_eq!(first, ("STATUS".to_string(), json!("ok")));
    assert_eq!(second.0, "NEW_MESSAGE");
    assert_eq!(second.1["message"], "hi");
    assert_eq!(third, ("BARE".to_string(), Value::Null));
    assert!(rx.try_recv().is_err());

    assert_eq!(*status_args.lock().unwrap(), vec![json!("ok")]);
}

#[tokio::test]
async fn test_heartbeat_is_answered() {
    let (listener, url) = master().await;
    let _relay = NotificationRelay::new(&json!("MMM-syslog"), &url).unwrap();

    let mut ws = accept(&listener).await;
    open_namespace(&mut ws).await;

    send(&mut ws, "2").await;
    assert_eq!(next_text(&mut ws).await, "3");
}

#[tokio::test]
async fn test_reconnects_after_master_drops_connection() {
    let (listener, url) = master().await;
    let relay = NotificationRelay::new(&json!("MMM-syslog"), &url).unwrap();

    let (tx, mut lifecycle) = mpsc::unbounded_channel();
    let on_connect = tx.clone();
    relay.socket().on(CONNECT_EVENT, move |_| {
        let _ = on_connect.send(CONNECT_EVENT);
    });
    relay.socket().on(DISCONNECT_EVENT, move |_| {
        let _ = tx.send(DISCONNECT_EVENT);
    });

    let mut ws = accept(&listener).await;
    open_namespace(&mut ws).await;
    assert_eq!(timeout(WAIT, lifecycle.recv()).await.unwrap(), Some(CONNECT_EVENT));

    ws.close(None).await.unwrap();
    drop(ws);
    assert_eq!(timeout(WAIT, lifecycle.recv()).await.unwrap(), Some(DISCONNECT_EVENT));
    assert!(!relay.socket().is_connected());

    let mut ws = accept(&listener).await;
    open_namespace(&mut ws).await;
    assert_eq!(timeout(WAIT, lifecycle.recv()).await.unwrap(), Some(CONNECT_EVENT));
}
