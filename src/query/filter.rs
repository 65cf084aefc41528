//! Filter stage: narrow candidates by an ordered conjunction of predicates.

use tracing::{debug, trace};

use crate::storage::SocialGraph;
use crate::Result;
use super::{FilterSpec, Predicate};

/// Run the filter stage. The result is sorted ascending.
///
/// Each predicate narrows what the previous one kept. Duplicate candidates
/// are neither added nor removed.
pub fn filter<S: SocialGraph + ?Sized>(
    store: &S,
    candidates: &[String],
    spec: &FilterSpec,
) -> Result<Vec<String>> {
    let mut current = candidates.to_vec();
    for predicate in spec.iter() {
        current = narrow(store, current, predicate)?;
        trace!(%predicate, kept = current.len(), "applied predicate");
    }
    current.sort();

    debug!(candidates = candidates.len(), predicates = spec.len(), hits = current.len(), "filter");
    Ok(current)
}

/// Keep the candidates satisfying one predicate, in their current order.
pub fn narrow<S: SocialGraph + ?Sized>(
    store: &S,
    candidates: Vec<String>,
    predicate: &Predicate,
) -> Result<Vec<String>> {
    match predicate {
        Predicate::Follower(username) => {
            let user = store.require(username)?;
            Ok(candidates.into_iter().filter(|c| user.follows(c)).collect())
        }
        Predicate::Following(username) => {
            store.require(username)?;
            let followers = store.followers_of(username);
            Ok(candidates
                .into_iter()
                .filter(|c| followers.binary_search(c).is_ok())
                .collect())
        }
        Predicate::NameIncludes(text) => {
            keep_matching(store, candidates, text, |u| u.name.as_str())
        }
        Predicate::LocationIncludes(text) => {
            keep_matching(store, candidates, text, |u| u.location.as_str())
        }
    }
}

/// Case-insensitive substring test on one profile field.
fn keep_matching<S, F>(store: &S, candidates: Vec<String>, text: &str, field: F) -> Result<Vec<String>>
where
    S: SocialGraph + ?Sized,
    F: Fn(&crate::model::User) -> &str,
{
    let needle = text.to_uppercase();
    let mut kept = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let user = store.require(&candidate)?;
        if field(user).to_uppercase().contains(&needle) {
            kept.push(candidate);
        }
    }
    Ok(kept)
}
