//! Transport integration tests
//!
//! Each test runs an in-process WebSocket server on an ephemeral port
//! and drives the real client channels against it.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{accept_async, tungstenite::Message};

use pulse_core::config::RealtimeConfig;
use pulse_core::term::{LineKind, SessionTarget, TerminalController};
use pulse_core::transport::{SessionEvent, TerminalSocket, TransportError};

const WAIT: Duration = Duration::from_secs(2);

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Poll `step` until it reports done, or fail after ~1s.
async fn wait_until(mut step: impl FnMut() -> bool) {
    for _ in 0..100 {
        if step() {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within the polling window");
}

#[tokio::test]
async fn terminal_socket_round_trip() {
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        ws.send(Message::Text(
            r#"{"type":"terminal:output","data":"\u001b[32mok\u001b[0m"}"#.to_string(),
        ))
        .await
        .unwrap();

        // The client's submitted command arrives as an input envelope.
        let frame = ws.next().await.unwrap().unwrap();
        let received = frame.into_text().unwrap();

        ws.close(None).await.unwrap();
        received
    });

    let (socket, mut events) = TerminalSocket::connect(&url, "s-1").await.unwrap();
    assert_eq!(socket.session_id(), "s-1");

    let opened = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    assert_eq!(opened, SessionEvent::Opened);

    let output = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    assert_eq!(output, SessionEvent::Output("\x1b[32mok\x1b[0m".to_string()));

    socket.send_input("ls -la\n".to_string()).await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(received, r#"{"type":"terminal:input","data":"ls -la\n"}"#);

    let closed = timeout(WAIT, events.recv()).await.unwrap().unwrap();
    assert_eq!(closed, SessionEvent::Closed);
    assert!(!socket.is_open());
}

#[tokio::test]
async fn terminal_connect_failure_is_reported() {
    // Bind and immediately drop to get a port nobody listens on.
    let (listener, url) = bind().await;
    drop(listener);

    let result = TerminalSocket::connect(&url, "s-dead").await;
    assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
}

#[tokio::test]
async fn controller_folds_a_full_session() {
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        ws.send(Message::Text(
            r#"{"type":"terminal:output","data":"\u001b[1;31mERROR\u001b[0m: disk full"}"#
                .to_string(),
        ))
        .await
        .unwrap();
        // Unknown envelope types are dropped without a trace in the log.
        ws.send(Message::Text(r#"{"type":"terminal:resize","data":""}"#.to_string()))
            .await
            .unwrap();

        let frame = ws.next().await.unwrap().unwrap();
        let received = frame.into_text().unwrap();
        ws.close(None).await.unwrap();
        received
    });

    let (socket, events) = TerminalSocket::connect(&url, "s-2").await.unwrap();
    let mut controller = TerminalController::new();
    controller
        .attach(
            socket,
            events,
            SessionTarget {
                server_id: 1,
                hostname: "web-1".to_string(),
                os: Some("Ubuntu".to_string()),
            },
        )
        .unwrap();

    let texts = |c: &TerminalController| -> Vec<String> {
        c.lines()
            .map(|l| l.segments.iter().map(|s| s.text.as_str()).collect())
            .collect()
    };

    wait_until(|| {
        controller.pump();
        texts(&controller).contains(&"Connected to terminal session".to_string())
    })
    .await;

    wait_until(|| {
        controller.pump();
        controller
            .lines()
            .any(|l| l.kind == LineKind::Output && l.segments[0].text == "ERROR")
    })
    .await;

    controller.set_entry("df -h".to_string());
    controller.submit().await.unwrap();
    assert_eq!(controller.entry(), "");
    assert_eq!(controller.history().entries(), ["df -h"]);

    let received = server.await.unwrap();
    assert_eq!(received, r#"{"type":"terminal:input","data":"df -h\n"}"#);

    wait_until(|| {
        controller.pump();
        texts(&controller).contains(&"Disconnected from terminal".to_string())
    })
    .await;
    assert!(!controller.is_connected());
}

#[tokio::test]
async fn telemetry_subscribes_and_forwards_snapshots() {
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        let frame = ws.next().await.unwrap().unwrap();
        let subscribe = frame.into_text().unwrap();

        ws.send(Message::Text(
            r#"{"type":"SERVER_SNAPSHOT","data":{"cpuPercent":55.0}}"#.to_string(),
        ))
        .await
        .unwrap();
        // Noise on the channel must not reach the subscriber.
        ws.send(Message::Text("not json".to_string())).await.unwrap();
        ws.send(Message::Text(
            r#"{"type":"SERVER_SNAPSHOT","data":{"cpuPercent":56.0}}"#.to_string(),
        ))
        .await
        .unwrap();

        subscribe
    });

    let (tx, mut rx) = mpsc::channel(16);
    let subscription =
        pulse_core::TelemetrySubscription::spawn(url, 7, RealtimeConfig::default(), tx);
    assert_eq!(subscription.server_id(), 7);

    let first = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(first["cpuPercent"], 55.0);
    let second = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(second["cpuPercent"], 56.0);

    let subscribe = server.await.unwrap();
    assert_eq!(subscribe, r#"{"type":"SUBSCRIBE_SERVER","serverId":7}"#);
}

#[tokio::test]
async fn telemetry_reconnects_and_resubscribes_after_drop() {
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        // First connection: accept the handshake, then drop it cold.
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        drop(ws);

        // Second connection: the subscription must be replayed.
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let frame = ws.next().await.unwrap().unwrap();
        let resubscribe = frame.into_text().unwrap();

        ws.send(Message::Text(
            r#"{"type":"SERVER_SNAPSHOT","data":{"cpuPercent":12.0}}"#.to_string(),
        ))
        .await
        .unwrap();

        // Hold the connection open until the test is done with it.
        let _ = ws.next().await;
        resubscribe
    });

    let config = RealtimeConfig {
        max_attempts: 5,
        backoff_base: Duration::from_millis(10),
        backoff_max: Duration::from_millis(50),
    };

    let (tx, mut rx) = mpsc::channel(16);
    let subscription = pulse_core::TelemetrySubscription::spawn(url, 3, config, tx);

    let snapshot = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(snapshot["cpuPercent"], 12.0);

    subscription.close();
    let resubscribe = server.await.unwrap();
    assert_eq!(resubscribe, r#"{"type":"SUBSCRIBE_SERVER","serverId":3}"#);
}
