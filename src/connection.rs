//! Connection: per-client state, nickname, current channel, away message,
//! and the write side of the socket guarded by its send serializer.

use log::warn;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

use crate::wire::DEFAULT_CHANNEL;

/// The fields a session mutates on its own `Connection` (`current_channel`,
/// `away_message`). Bundled behind one lock: logically only the owning
/// session writes these, but the `Connection` is shared via `Arc` so peers
/// can read `away_message` (§4.1), and Rust needs one real synchronization
/// primitive for that regardless of who's allowed to write.
struct ConnMutable {
    current_channel: String,
    away_message: String,
}

/// A live, registered client. Exclusively owns its write half; the
/// enclosing `Mutex` is the "send serializer": every frame sent to this
/// connection acquires it, so writes from different handler calls never
/// interleave (data model invariant 6).
pub struct Connection {
    pub nickname: String,
    mutable: Mutex<ConnMutable>,
    writer: Mutex<OwnedWriteHalf>,
}

impl Connection {
    pub fn new(nickname: String, writer: OwnedWriteHalf) -> Self {
        Connection {
            nickname,
            mutable: Mutex::new(ConnMutable {
                current_channel: DEFAULT_CHANNEL.to_string(),
                away_message: String::new(),
            }),
            writer: Mutex::new(writer),
        }
    }

    pub async fn current_channel(&self) -> String {
        self.mutable.lock().await.current_channel.clone()
    }

    pub async fn set_current_channel(&self, channel: String) {
        self.mutable.lock().await.current_channel = channel;
    }

    pub async fn away_message(&self) -> String {
        self.mutable.lock().await.away_message.clone()
    }

    pub async fn set_away_message(&self, message: String) {
        self.mutable.lock().await.away_message = message;
    }

    /// Sends a frame to this connection. A broken socket is logged and
    /// swallowed: per §4.1/§5, a send failure must never propagate out of a
    /// handler and must never tear down a peer's session; the peer's own
    /// session will observe its own read failure and run `/exit`.
    pub async fn send(&self, frame: &str) {
        let mut writer = self.writer.lock().await;
        if let Err(err) = writer.write_all(frame.as_bytes()).await {
            warn!("dropping frame to <{}>: {err}", self.nickname);
            return;
        }
        if let Err(err) = writer.flush().await {
            warn!("flush failed for <{}>: {err}", self.nickname);
        }
    }

    /// Closes the socket. Called only by the owning session, on `/exit` or
    /// session teardown.
    pub async fn close(&self) {
        let mut writer = self.writer.lock().await;
        let _ = writer.shutdown().await;
    }
}
