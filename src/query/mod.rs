//! # Query Engine
//!
//! Three pure stages over a `SocialGraph`:
//!
//! ```text
//! SearchSpec  ──search──▶  candidates  ──filter──▶  filtered  ──present──▶  report
//! ```
//!
//! No stage performs I/O or touches the store beyond reading it.

pub mod descriptor;
pub mod filter;
pub mod literal;
pub mod present;
pub mod search;
pub mod sort;

pub use descriptor::{
    FilterSpec, Format, Operation, Predicate, PresentSpec, Query, SearchSpec, SortKey,
};
pub use filter::filter;
pub use present::present;
pub use search::search;
pub use sort::sort_usernames;

use crate::storage::SocialGraph;

/// Usernames following `username`, sorted ascending without duplicates.
pub fn followers_of<S: SocialGraph + ?Sized>(store: &S, username: &str) -> Vec<String> {
    store.followers_of(username)
}
