//! Query execution.
//!
//! Runs search → filter → present for one `Query` against a `SocialGraph`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::query::{self, Query};
use crate::storage::SocialGraph;
use crate::Result;

/// Query execution result.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Final usernames in presentation order.
    pub usernames: Vec<String>,
    /// Rendered report.
    pub report: String,
    pub stats: ExecutionStats,
}

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub search_hits: usize,
    pub filter_hits: usize,
    pub operations: usize,
    pub predicates: usize,
    pub execution_time: Duration,
}

/// Execute a query against a store.
///
/// Any stage error ends the query; nothing is rendered for it.
pub fn execute<S: SocialGraph + ?Sized>(store: &S, query: &Query) -> Result<QueryResult> {
    let started = Instant::now();

    let candidates = query::search(store, &query.search)?;
    let mut usernames = query::filter(store, &candidates, &query.filter)?;
    let report = query::present(store, &mut usernames, &query.present)?;

    let stats = ExecutionStats {
        search_hits: candidates.len(),
        filter_hits: usernames.len(),
        operations: query.search.operations.len(),
        predicates: query.filter.len(),
        execution_time: started.elapsed(),
    };
    debug!(?stats, "executed query");

    Ok(QueryResult { usernames, report, stats })
}
