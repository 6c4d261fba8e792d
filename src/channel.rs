//! Channel: a named group with an optional shared-secret key, identified by
//! a name beginning with `#`.

use dashmap::DashSet;

/// A channel's key is fixed at creation and never mutated (data model
/// invariant 5); membership is a concurrent set mutated without additional
/// locking; callers tolerate a snapshot that's briefly stale relative to a
/// concurrent `/join` or `/exit` (§5, "channel membership races").
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub key: Option<String>,
    members: DashSet<String>,
}

impl Channel {
    pub fn new(name: String, key: Option<String>) -> Self {
        Channel {
            name,
            key,
            members: DashSet::new(),
        }
    }

    pub fn add_member(&self, nickname: &str) {
        self.members.insert(nickname.to_string());
    }

    pub fn remove_member(&self, nickname: &str) {
        self.members.remove(nickname);
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// A stable snapshot of current members, safe to iterate over while a
    /// concurrent `/join` or `/exit` mutates the live set.
    pub fn members_snapshot(&self) -> Vec<String> {
        self.members.iter().map(|m| m.clone()).collect()
    }
}
