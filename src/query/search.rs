//! Search stage: expand a start user through follow relations.
//!
//! Each operation maps the working set to the union of its members'
//! expansions. Sets are deduplicated by membership only, so the start user
//! stays in the result whenever a later step reaches it again.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::storage::SocialGraph;
use crate::Result;
use super::{Operation, SearchSpec};

/// Run the search stage. The result is sorted ascending.
///
/// Fails with `UnknownUser` when the start user has no record.
pub fn search<S: SocialGraph + ?Sized>(store: &S, spec: &SearchSpec) -> Result<Vec<String>> {
    store.require(&spec.username)?;

    let mut working = BTreeSet::from([spec.username.clone()]);
    for &operation in &spec.operations {
        working = expand(store, &working, operation);
        trace!(%operation, size = working.len(), "expanded working set");
    }

    debug!(start = %spec.username, steps = spec.operations.len(), hits = working.len(), "search");
    Ok(working.into_iter().collect())
}

/// One traversal step over a whole working set.
///
/// A member without a record follows nobody but can still have followers.
pub fn expand<S: SocialGraph + ?Sized>(
    store: &S,
    working: &BTreeSet<String>,
    operation: Operation,
) -> BTreeSet<String> {
    let mut next = BTreeSet::new();
    for member in working {
        match operation {
            Operation::Following => next.extend(store.following_of(member).iter().cloned()),
            Operation::Followers => next.extend(store.followers_of(member)),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use crate::storage::MemoryStore;
    use crate::Error;

    fn sample() -> MemoryStore {
        MemoryStore::from_users([
            User::new("a").with_name("ABU").with_location("Vancouver").with_website("www.me.com"),
            User::new("b").with_name("mee").with_location("Toronto").with_following(["a"]),
            User::new("c").with_name("anahita").with_location("Here").with_following(["a", "b"]),
            User::new("d")
                .with_name("AMir")
                .with_location("Nowhere")
                .with_bio("Hello")
                .with_following(["a", "b", "c"]),
        ])
    }

    #[test]
    fn test_followers_then_following() {
        let store = sample();
        let spec = SearchSpec::new("a")
            .then(Operation::Followers)
            .then(Operation::Following);
        assert_eq!(search(&store, &spec).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_followers_of_unfollowed_user() {
        let store = sample();
        let spec = SearchSpec::new("d").then(Operation::Followers);
        assert!(search(&store, &spec).unwrap().is_empty());
    }

    #[test]
    fn test_no_operations_returns_start() {
        let store = sample();
        assert_eq!(search(&store, &SearchSpec::new("c")).unwrap(), vec!["c"]);
    }

    #[test]
    fn test_origin_reached_again_is_kept() {
        let store = MemoryStore::from_users([
            User::new("a").with_following(["b"]),
            User::new("b").with_following(["a"]),
        ]);
        let spec = SearchSpec::new("a")
            .then(Operation::Following)
            .then(Operation::Following);
        assert_eq!(search(&store, &spec).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_union_deduplicates() {
        let store = sample();
        // following(d) = {a, b, c}; following of those = {a} ∪ {a, b} ∪ {} = {a, b}
        let spec = SearchSpec::new("d")
            .then(Operation::Following)
            .then(Operation::Following);
        assert_eq!(search(&store, &spec).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_dangling_member_expansion() {
        let store = MemoryStore::from_users([
            User::new("a").with_following(["ghost"]),
            User::new("b").with_following(["ghost", "ghost"]),
        ]);
        let reach = SearchSpec::new("a").then(Operation::Following);
        assert_eq!(search(&store, &reach).unwrap(), vec!["ghost"]);

        let past = SearchSpec::new("a")
            .then(Operation::Following)
            .then(Operation::Following);
        assert!(search(&store, &past).unwrap().is_empty());

        let back = SearchSpec::new("a")
            .then(Operation::Following)
            .then(Operation::Followers);
        assert_eq!(search(&store, &back).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_start_user() {
        let store = sample();
        let err = search(&store, &SearchSpec::new("zz").then(Operation::Followers)).unwrap_err();
        assert!(matches!(err, Error::UnknownUser(name) if name == "zz"));
    }
}
