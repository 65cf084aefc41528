//! In-memory social graph store.
//!
//! This is the reference implementation of `SocialGraph`.
//! Records live in a HashMap behind an `Arc`, so clones share one snapshot.
//!
//! ## Properties
//!
//! - **Immutable**: built once from a set of records, never mutated after.
//!   Concurrent readers need no locking.
//! - **Follower index**: the reverse edges are computed at construction,
//!   sorted and deduplicated, so `followers_of` is a lookup, not a scan.
//! - **Last record wins**: if the same username is supplied twice, the later
//!   record replaces the earlier one.

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::debug;

use crate::model::User;
use super::SocialGraph;

// ============================================================================
// MemoryStore
// ============================================================================

/// Immutable in-memory social graph snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    users: HashMap<String, User>,
    /// username → sorted, deduplicated usernames following it
    followers: HashMap<String, Vec<String>>,
    edges: usize,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from user records.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut by_name: HashMap<String, User> = HashMap::new();
        for user in users {
            by_name.insert(user.username.clone(), user);
        }

        let mut followers: HashMap<String, Vec<String>> = HashMap::new();
        let mut edges = 0;
        for user in by_name.values() {
            edges += user.following.len();
            for followed in &user.following {
                followers
                    .entry(followed.clone())
                    .or_default()
                    .push(user.username.clone());
            }
        }
        for list in followers.values_mut() {
            list.sort();
            list.dedup();
        }

        debug!(users = by_name.len(), edges, "built memory store");

        Self {
            inner: Arc::new(MemoryInner {
                users: by_name,
                followers,
                edges,
            }),
        }
    }

    /// Iterate over all records in unspecified order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.inner.users.values()
    }
}

impl FromIterator<User> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self::from_users(iter)
    }
}

// ============================================================================
// SocialGraph impl
// ============================================================================

impl SocialGraph for MemoryStore {
    fn user(&self, username: &str) -> Option<&User> {
        self.inner.users.get(username)
    }

    fn followers_of(&self, username: &str) -> Vec<String> {
        self.inner.followers.get(username).cloned().unwrap_or_default()
    }

    fn follower_count(&self, username: &str) -> usize {
        self.inner.followers.get(username).map_or(0, Vec::len)
    }

    fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn user_count(&self) -> usize {
        self.inner.users.len()
    }

    fn edge_count(&self) -> usize {
        self.inner.edges
    }
}

// ============================================================================
// Tests
// ============================================================================
