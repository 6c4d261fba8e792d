//! Registry: the two concurrent mappings, nickname → Connection and
//! channel-name → Channel, with the locking discipline from §4.1.
//!
//! `users` and `channels` are each guarded by their own
//! `tokio::sync::Mutex`, not a sharded map, because §4.1 requires holding a
//! *single* lock across a lookup that is immediately followed by a send (so
//! a concurrent `/exit` can't close the socket in between). A task never
//! holds both locks at once (§5); every handler that needs both a channel
//! and a users lookup resolves the channel first and drops that guard
//! before taking the users lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

use crate::channel::Channel;
use crate::connection::Connection;
use crate::wire::DEFAULT_CHANNEL;

pub struct Registry {
    pub users: Mutex<HashMap<String, Arc<Connection>>>,
    pub channels: Mutex<HashMap<String, Arc<Channel>>>,
}

impl Registry {
    /// A fresh registry, pre-seeded with the default channel (key-less,
    /// empty), per data model invariant: "default channel exists at
    /// startup."
    pub fn new() -> Self {
        let mut channels = HashMap::new();
        channels.insert(
            DEFAULT_CHANNEL.to_string(),
            Arc::new(Channel::new(DEFAULT_CHANNEL.to_string(), None)),
        );
        Registry {
            users: Mutex::new(HashMap::new()),
            channels: Mutex::new(channels),
        }
    }

    /// Registers `nickname` under a fresh `Connection` owning `writer`.
    ///
    /// On a name collision, ownership of `writer` is handed back so the
    /// caller can send `NICKNAME_ERROR` and close it directly. The
    /// `Connection` (and thus its send serializer) is never constructed for
    /// a registration that didn't happen (data model invariant 1 and 4: two
    /// concurrent attempts for the same nickname cannot both succeed).
    pub async fn register(
        &self,
        nickname: String,
        writer: OwnedWriteHalf,
    ) -> Result<Arc<Connection>, OwnedWriteHalf> {
        let mut users = self.users.lock().await;
        if users.contains_key(&nickname) {
            return Err(writer);
        }
        let conn = Arc::new(Connection::new(nickname.clone(), writer));
        users.insert(nickname, conn.clone());
        Ok(conn)
    }

    pub async fn unregister(&self, nickname: &str) {
        let mut users = self.users.lock().await;
        users.remove(nickname);
    }

    /// Looks up and clones a channel handle, or `None` if it doesn't exist.
    /// Reading the key/name off the returned `Arc` afterwards needs no
    /// further lock; they're immutable after creation.
    pub async fn get_channel(&self, name: &str) -> Option<Arc<Channel>> {
        let channels = self.channels.lock().await;
        channels.get(name).cloned()
    }

    /// Creates the channel with `proposed_key` if it doesn't already exist;
    /// otherwise returns the existing channel untouched (its key is never
    /// mutated, even if `proposed_key` differs; the caller compares keys
    /// itself, after this call, to decide `CHANNEL_KEY_ERROR`).
    pub async fn create_or_get_channel(
        &self,
        name: String,
        proposed_key: Option<String>,
    ) -> Arc<Channel> {
        let mut channels = self.channels.lock().await;
        if let Some(existing) = channels.get(&name) {
            return existing.clone();
        }
        let chan = Arc::new(Channel::new(name.clone(), proposed_key));
        channels.insert(name, chan.clone());
        chan
    }

    /// Snapshot of all channel names, for `/list`. Ordering is unspecified.
    pub async fn channel_names(&self) -> Vec<String> {
        let channels = self.channels.lock().await;
        channels.keys().cloned().collect()
    }

    /// Snapshot of every registered nickname, for `/names` with no
    /// argument.
    pub async fn all_nicknames(&self) -> Vec<String> {
        let users = self.users.lock().await;
        users.keys().cloned().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::{TcpListener, TcpStream};

    async fn fake_writer() -> OwnedWriteHalf {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (_server_stream, _) = listener.accept().await.unwrap();
        let (_read, write) = client.into_split();
        write
    }

    #[tokio::test]
    async fn default_channel_exists_at_startup() {
        let registry = Registry::new();
        let names = registry.channel_names().await;
        assert_eq!(names, vec![DEFAULT_CHANNEL.to_string()]);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let registry = Registry::new();
        let w1 = fake_writer().await;
        let w2 = fake_writer().await;

        let first = registry.register("alice".to_string(), w1).await;
        assert!(first.is_ok());

        let second = registry.register("alice".to_string(), w2).await;
        assert!(second.is_err());

        let users = registry.users.lock().await;
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn create_or_get_channel_does_not_overwrite_key() {
        let registry = Registry::new();
        let first = registry
            .create_or_get_channel("#secret".to_string(), Some("s3cret".to_string()))
            .await;
        assert_eq!(first.key.as_deref(), Some("s3cret"));

        let second = registry
            .create_or_get_channel("#secret".to_string(), Some("other".to_string()))
            .await;
        assert_eq!(second.key.as_deref(), Some("s3cret"));
        assert!(Arc::ptr_eq(&first, &second));
    }
}
