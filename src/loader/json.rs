//! JSON renditions of the graph snapshot and the query.
//!
//! Snapshot: an object keyed by username.
//!
//! ```json
//! {"a": {"name": "ABU", "location": "", "web": "", "bio": "", "following": ["b"]}}
//! ```
//!
//! Query: `{"search": {"username": "a", "operations": ["followers"]},
//! "filter": {"name-includes": "A"}, "present": {"sort-by": "name", "format": "short"}}`.
//! Filter keys are applied in document order.

use std::fmt;
use std::io::Read;

use hashbrown::HashMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

use crate::model::User;
use crate::query::{FilterSpec, Operation, PresentSpec, Query, SearchSpec};
use crate::storage::MemoryStore;
use crate::{Error, Result};

// ============================================================================
// Snapshot
// ============================================================================

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default, alias = "web")]
    website: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    following: Vec<String>,
}

/// Read user records from a JSON snapshot.
pub fn read_users<R: Read>(reader: R) -> Result<Vec<User>> {
    let profiles: HashMap<String, Profile> = serde_json::from_reader(reader)?;
    debug!(users = profiles.len(), "read json snapshot");

    Ok(profiles
        .into_iter()
        .map(|(username, p)| User {
            username,
            name: p.name,
            location: p.location,
            website: p.website,
            bio: p.bio,
            following: p.following,
        })
        .collect())
}

/// Read a JSON snapshot into a store.
pub fn read_store<R: Read>(reader: R) -> Result<MemoryStore> {
    Ok(MemoryStore::from_users(read_users(reader)?))
}

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawQuery {
    search: RawSearch,
    #[serde(default)]
    filter: OrderedPairs,
    present: OrderedPairs,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    username: String,
    #[serde(default)]
    operations: Vec<String>,
}

/// String-to-string object that keeps document order.
#[derive(Debug, Default)]
struct OrderedPairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = OrderedPairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<OrderedPairs, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Read a JSON query.
///
/// A document of the wrong shape is a `MalformedDescriptor`; unknown
/// operation, predicate, sort key or format names get their own errors.
pub fn read_query<R: Read>(reader: R) -> Result<Query> {
    let raw: RawQuery = serde_json::from_reader(reader).map_err(shape_error)?;

    let operations = raw
        .search
        .operations
        .iter()
        .map(|op| op.parse::<Operation>())
        .collect::<Result<Vec<_>>>()?;
    let search = SearchSpec { username: raw.search.username, operations };
    let filter = FilterSpec::from_pairs(raw.filter.0)?;
    let present = PresentSpec::from_pairs(raw.present.0)?;

    Ok(Query::new(search, filter, present))
}

/// Read a JSON query from a string.
pub fn parse_query(text: &str) -> Result<Query> {
    read_query(text.as_bytes())
}

fn shape_error(err: serde_json::Error) -> Error {
    match err.classify() {
        serde_json::error::Category::Data => Error::MalformedDescriptor(err.to_string()),
        _ => Error::Json(err),
    }
}
