//! Comparators over usernames and the stable sort that uses them.
//!
//! Every comparison is ordinal and case-sensitive. `Name` and `Popularity`
//! fall back to the username on a tie, so distinct usernames never compare
//! equal under any key.

use std::cmp::Ordering;

use crate::storage::SocialGraph;
use super::SortKey;

impl SortKey {
    /// Compare two usernames under this key.
    ///
    /// A username without a record sorts as if its name were empty.
    pub fn compare<S: SocialGraph + ?Sized>(&self, store: &S, a: &str, b: &str) -> Ordering {
        match self {
            SortKey::Username => a.cmp(b),
            SortKey::Name => name_of(store, a)
                .cmp(name_of(store, b))
                .then_with(|| a.cmp(b)),
            // reversed: more followers sorts first
            SortKey::Popularity => store
                .follower_count(b)
                .cmp(&store.follower_count(a))
                .then_with(|| a.cmp(b)),
        }
    }
}

fn name_of<'s, S: SocialGraph + ?Sized>(store: &'s S, username: &str) -> &'s str {
    store.user(username).map_or("", |u| u.name.as_str())
}

/// Stable in-place sort of `usernames` under `key`.
///
/// Insertion sort: an element only moves past neighbours that compare
/// strictly greater, so equal elements keep their input order.
pub fn sort_usernames<S, T>(store: &S, usernames: &mut [T], key: SortKey)
where
    S: SocialGraph + ?Sized,
    T: AsRef<str>,
{
    for i in 1..usernames.len() {
        let mut pos = i;
        while pos > 0
            && key.compare(store, usernames[pos - 1].as_ref(), usernames[pos].as_ref())
                == Ordering::Greater
        {
            usernames.swap(pos - 1, pos);
            pos -= 1;
        }
    }
}
