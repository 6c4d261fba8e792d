//! End-to-end scenarios driven over real `TcpStream`s against a live
//! server instance, in the spirit of the teacher's own
//! `src/bin/irc_client_tests.rs` load-test harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ircrelay::{session, Registry};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let registry = Arc::new(Registry::new());

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };
            let registry = registry.clone();
            tokio::spawn(session::run(registry, stream));
        }
    });

    addr
}

async fn connect(addr: SocketAddr) -> TcpStream {
    TcpStream::connect(addr).await.unwrap()
}

async fn send(stream: &mut TcpStream, frame: &str) {
    stream.write_all(frame.as_bytes()).await.unwrap();
}

/// Reads one frame with a generous timeout so a missing reply fails the
/// test instead of hanging the suite.
async fn recv(stream: &mut TcpStream) -> String {
    let mut buf = [0u8; 1024];
    let n = timeout(Duration::from_secs(2), stream.read(&mut buf))
        .await
        .expect("timed out waiting for a frame")
        .unwrap();
    String::from_utf8_lossy(&buf[..n]).trim().to_string()
}

async fn register(addr: SocketAddr, nick: &str) -> TcpStream {
    let mut stream = connect(addr).await;
    send(&mut stream, nick).await;
    assert_eq!(recv(&mut stream).await, "#default");
    stream
}

#[tokio::test]
async fn duplicate_nickname_is_rejected() {
    let addr = start_server().await;
    let _alice = register(addr, "alice").await;

    let mut bob = connect(addr).await;
    send(&mut bob, "alice").await;
    assert_eq!(recv(&mut bob).await, "NICKNAME_ERROR");

    // The server closes the socket: the next read observes EOF.
    let mut buf = [0u8; 8];
    let n = bob.read(&mut buf).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn public_broadcast_reaches_both_members() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let mut bob = register(addr, "bob").await;

    send(&mut alice, "/msg hello").await;

    assert_eq!(recv(&mut bob).await, "#default <alice> hello");
    assert_eq!(recv(&mut alice).await, "#default <alice> hello");
}

#[tokio::test]
async fn private_message_with_away_bounces_to_sender() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let mut bob = register(addr, "bob").await;

    send(&mut bob, r#"/away "lunch""#).await;
    // /away never replies; give the server a beat to apply it before the
    // next client's /msg races the lookup.
    tokio::time::sleep(Duration::from_millis(50)).await;

    send(&mut alice, "/msg bob hi").await;
    assert_eq!(recv(&mut alice).await, "<bob> lunch");

    // bob never receives anything from this exchange.
    send(&mut alice, "/msg hello-again").await;
    assert_eq!(recv(&mut bob).await, "#default <alice> hello-again");
}

#[tokio::test]
async fn keyed_channel_round_trip() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let mut bob = register(addr, "bob").await;

    send(&mut alice, "/join secret s3cret").await;
    assert_eq!(recv(&mut alice).await, "/join #secret");

    send(&mut bob, "/join secret wrong").await;
    assert_eq!(recv(&mut bob).await, "CHANNEL_KEY_ERROR");

    send(&mut bob, "/join secret s3cret").await;
    assert_eq!(recv(&mut bob).await, "/join #secret");
}

#[tokio::test]
async fn invite_includes_password_line_for_keyed_channel() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let mut bob = register(addr, "bob").await;

    send(&mut alice, "/join secret s3cret").await;
    assert_eq!(recv(&mut alice).await, "/join #secret");

    send(&mut alice, "/invite bob").await;
    assert_eq!(
        recv(&mut bob).await,
        "<alice> Bonjour <bob> je t'invite à me rejoindre sur le canal #secret.\nMot de passe : [s3cret]."
    );
}

#[tokio::test]
async fn unknown_command_is_reported_only_to_caller() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let mut bob = register(addr, "bob").await;

    send(&mut alice, "/foo").await;
    assert_eq!(recv(&mut alice).await, "UNKNOWN_CMD_ERROR");

    // bob observes nothing: prove the channel is still otherwise live by
    // sending a broadcast and having alice receive exactly that, nothing
    // extra queued ahead of it.
    send(&mut bob, "/msg hi").await;
    assert_eq!(recv(&mut alice).await, "#default <bob> hi");
}

#[tokio::test]
async fn exit_removes_caller_from_channel_membership() {
    let addr = start_server().await;
    let mut alice = register(addr, "alice").await;
    let bob = register(addr, "bob").await;
    drop(bob);

    send(&mut alice, "/exit").await;

    let mut buf = [0u8; 8];
    let n = alice.read(&mut buf).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn concurrent_duplicate_registrations_exactly_one_wins() {
    let addr = start_server().await;

    let attempts = 8;
    let mut handles = Vec::new();
    for _ in 0..attempts {
        handles.push(tokio::spawn(async move {
            let mut stream = connect(addr).await;
            send(&mut stream, "contested").await;
            recv(&mut stream).await
        }));
    }

    let mut successes = 0;
    let mut failures = 0;
    for handle in handles {
        match handle.await.unwrap().as_str() {
            "#default" => successes += 1,
            "NICKNAME_ERROR" => failures += 1,
            other => panic!("unexpected reply: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(failures, attempts - 1);
}
