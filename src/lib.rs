//! # twitterverse: Social Graph Query Engine
//!
//! A read-only store of user profiles and follow edges, and a three-stage
//! query pipeline over it.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `SocialGraph` is the contract between query engine and store
//! 2. **Pure stages**: search, filter and present are functions of their inputs
//! 3. **Typed descriptors**: unknown operation / predicate / sort names are
//!    rejected when a descriptor is built, never mid-query
//! 4. **No I/O in the core**: loaders and export live at the edges
//!
//! ## Quick Start
//!
//! ```rust
//! use twitterverse::{Twitterverse, User};
//! use twitterverse::query::{FilterSpec, Format, Operation, PresentSpec, Query, SearchSpec, SortKey};
//!
//! # fn example() -> twitterverse::Result<()> {
//! let graph = Twitterverse::from_users([
//!     User::new("a").with_name("ABU"),
//!     User::new("b").with_name("mee").with_following(["a"]),
//!     User::new("c").with_name("anahita").with_following(["a", "b"]),
//! ]);
//!
//! let query = Query::new(
//!     SearchSpec::new("a").then(Operation::Followers),
//!     FilterSpec::new(),
//!     PresentSpec::new(SortKey::Name, Format::Short),
//! );
//! assert_eq!(graph.execute(&query)?.report, "['c', 'b']");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Function | Output |
//! |-------|----------|--------|
//! | Search | `query::search` | candidates, sorted by username |
//! | Filter | `query::filter` | surviving candidates, sorted by username |
//! | Present | `query::present` | report text (`short` list or `long` blocks) |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod query;
pub mod execution;
pub mod loader;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::User;
pub use storage::{MemoryStore, SocialGraph};
pub use query::{
    FilterSpec, Format, Operation, Predicate, PresentSpec, Query, SearchSpec, SortKey,
};
pub use execution::{ExecutionStats, QueryResult};
pub use loader::DataFormat;

// ============================================================================
// Top-level handle
// ============================================================================

/// The primary entry point. A `Twitterverse` wraps a store and runs queries
/// against it.
#[derive(Debug, Clone)]
pub struct Twitterverse<S: SocialGraph> {
    store: S,
}

impl<S: SocialGraph> Twitterverse<S> {
    /// Create a handle over the given store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Run search → filter → present.
    pub fn execute(&self, query: &Query) -> Result<QueryResult> {
        execution::execute(&self.store, query)
    }

    pub fn search(&self, spec: &SearchSpec) -> Result<Vec<String>> {
        query::search(&self.store, spec)
    }

    pub fn filter(&self, candidates: &[String], spec: &FilterSpec) -> Result<Vec<String>> {
        query::filter(&self.store, candidates, spec)
    }

    pub fn present(&self, results: &mut [String], spec: &PresentSpec) -> Result<String> {
        query::present(&self.store, results, spec)
    }

    pub fn followers_of(&self, username: &str) -> Vec<String> {
        query::followers_of(&self.store, username)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory graph.
impl Twitterverse<MemoryStore> {
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self::with_store(MemoryStore::from_users(users))
    }

    /// Load a graph dump.
    pub fn open<R: std::io::BufRead>(reader: R, format: DataFormat) -> Result<Self> {
        Ok(Self::with_store(loader::load_store(reader, format)?))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unrecognized search operation: {0}")]
    UnrecognizedOperation(String),

    #[error("Unrecognized filter predicate: {0}")]
    UnrecognizedPredicate(String),

    #[error("Unrecognized sort key: {0}")]
    UnrecognizedSortKey(String),

    #[error("Unrecognized format: {0}")]
    UnrecognizedFormat(String),

    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("User {username:?} cannot be written as a text dump: {field} {problem}")]
    Unrepresentable { username: String, field: &'static str, problem: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
