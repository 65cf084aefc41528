//! Typed query descriptors.
//!
//! A descriptor can only hold values from its enumerated set. Text coming
//! from a collaborator is converted with `FromStr` / `Predicate::parse`,
//! which is where the `Unrecognized*` errors are raised.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::{Error, Result};

// ============================================================================
// Search
// ============================================================================

/// One traversal step of the search stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Replace each user by the users it follows.
    Following,
    /// Replace each user by the users following it.
    Followers,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Following => "following",
            Operation::Followers => "followers",
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "following" => Ok(Operation::Following),
            "followers" => Ok(Operation::Followers),
            other => Err(Error::UnrecognizedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the search starts and which steps it takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub username: String,
    pub operations: Vec<Operation>,
}

impl SearchSpec {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            operations: Vec::new(),
        }
    }

    /// Append a traversal step.
    pub fn then(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

// ============================================================================
// Filter
// ============================================================================

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Keep candidates that follow the given user.
    Following(String),
    /// Keep candidates the given user follows.
    Follower(String),
    /// Case-insensitive substring match on `name`.
    NameIncludes(String),
    /// Case-insensitive substring match on `location`.
    LocationIncludes(String),
}

impl Predicate {
    /// Build a predicate from its textual key and argument.
    pub fn parse(key: &str, argument: impl Into<String>) -> Result<Self> {
        let argument = argument.into();
        match key {
            "following" => Ok(Predicate::Following(argument)),
            "follower" => Ok(Predicate::Follower(argument)),
            "name-includes" => Ok(Predicate::NameIncludes(argument)),
            "location-includes" => Ok(Predicate::LocationIncludes(argument)),
            other => Err(Error::UnrecognizedPredicate(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Predicate::Following(_) => "following",
            Predicate::Follower(_) => "follower",
            Predicate::NameIncludes(_) => "name-includes",
            Predicate::LocationIncludes(_) => "location-includes",
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            Predicate::Following(arg)
            | Predicate::Follower(arg)
            | Predicate::NameIncludes(arg)
            | Predicate::LocationIncludes(arg) => arg,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key(), self.argument())
    }
}

/// Ordered conjunction of predicates. Empty keeps every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub predicates: SmallVec<[Predicate; 4]>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    /// Build from `(key, argument)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| Predicate::parse(key.as_ref(), value))
            .collect()
    }
}

impl FromIterator<Predicate> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self { predicates: iter.into_iter().collect() }
    }
}

// ============================================================================
// Presentation
// ============================================================================

/// Sort order of the presented results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Username,
    Name,
    /// Most followers first.
    Popularity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Username => "username",
            SortKey::Name => "name",
            SortKey::Popularity => "popularity",
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "username" => Ok(SortKey::Username),
            "name" => Ok(SortKey::Name),
            "popularity" => Ok(SortKey::Popularity),
            other => Err(Error::UnrecognizedSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// One-line list literal of usernames.
    Short,
    /// One block per user with every profile field.
    Long,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Short => "short",
            Format::Long => "long",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "short" => Ok(Format::Short),
            "long" => Ok(Format::Long),
            other => Err(Error::UnrecognizedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentSpec {
    pub sort_by: SortKey,
    pub format: Format,
}

impl PresentSpec {
    pub fn new(sort_by: SortKey, format: Format) -> Self {
        Self { sort_by, format }
    }

    /// Build from `(key, value)` pairs. Both `sort-by` and `format` are required.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut sort_by = None;
        let mut format = None;
        for (key, value) in pairs {
            match key.as_ref() {
                "sort-by" => sort_by = Some(value.as_ref().parse()?),
                "format" => format = Some(value.as_ref().parse()?),
                other => {
                    return Err(Error::MalformedDescriptor(format!(
                        "unknown presentation key `{other}`"
                    )));
                }
            }
        }
        let sort_by = sort_by.ok_or_else(|| {
            Error::MalformedDescriptor("presentation is missing `sort-by`".into())
        })?;
        let format = format.ok_or_else(|| {
            Error::MalformedDescriptor("presentation is missing `format`".into())
        })?;
        Ok(Self { sort_by, format })
    }
}

// ============================================================================
// Query
// ============================================================================

/// A full query: search, then filter, then present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search: SearchSpec,
    pub filter: FilterSpec,
    pub present: PresentSpec,
}

impl Query {
    pub fn new(search: SearchSpec, filter: FilterSpec, present: PresentSpec) -> Self {
        Self { search, filter, present }
    }
}
