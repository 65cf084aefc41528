//! # Social Graph Store
//!
//! `SocialGraph` is the contract between the query engine and whatever holds
//! the user records. The engine only ever reads through it.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Immutable in-memory snapshot with a follower index |

pub mod memory;

use crate::model::User;
use crate::{Error, Result};

pub use memory::MemoryStore;

// ============================================================================
// SocialGraph Trait
// ============================================================================

/// Read-only access to a social graph snapshot.
///
/// Usernames listed in a `following` sequence may have no record. Listing
/// lookups (`following_of`, `followers_of`, `follower_count`) accept such
/// dangling names; attribute lookups go through `user` / `require`.
pub trait SocialGraph: Send + Sync {
    /// Get a user record. Returns None if the username has no record.
    fn user(&self, username: &str) -> Option<&User>;

    /// Usernames whose `following` sequence contains `username`.
    ///
    /// Sorted ascending, no duplicates even when an edge is repeated.
    fn followers_of(&self, username: &str) -> Vec<String>;

    /// All usernames that have a record, sorted ascending.
    fn usernames(&self) -> Vec<&str>;

    /// Number of user records.
    fn user_count(&self) -> usize;

    /// Number of raw follow edges, repeated edges included.
    fn edge_count(&self) -> usize;

    // ========================================================================
    // Provided
    // ========================================================================

    fn contains(&self, username: &str) -> bool {
        self.user(username).is_some()
    }

    /// Like `user`, but a missing record is an `UnknownUser` error.
    fn require(&self, username: &str) -> Result<&User> {
        self.user(username)
            .ok_or_else(|| Error::UnknownUser(username.to_string()))
    }

    /// The raw following sequence. Empty for a dangling username.
    fn following_of(&self, username: &str) -> &[String] {
        self.user(username)
            .map(|u| u.following.as_slice())
            .unwrap_or(&[])
    }

    fn follower_count(&self, username: &str) -> usize {
        self.followers_of(username).len()
    }
}
