//! twitterverse: run queries against a social graph dump.
//!
//! Reports go to stdout, diagnostics to stderr. Set `RUST_LOG` for stage
//! tracing, e.g. `RUST_LOG=twitterverse=debug`.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use twitterverse::export::export_text_dump;
use twitterverse::loader::load_query;
use twitterverse::{DataFormat, MemoryStore, Query, SocialGraph, Twitterverse};

#[derive(Parser)]
#[command(name = "twitterverse")]
#[command(about = "Search, filter and present users of a social graph dump")]
struct Cli {
    /// Graph dump to load
    data: PathBuf,

    /// Query files to run, in order; one query is read from stdin when omitted
    queries: Vec<PathBuf>,

    /// Input format of the graph dump and the queries
    #[arg(short, long, value_enum, default_value_t = DataFormat::Text)]
    format: DataFormat,

    /// Print stage statistics to stderr after each query
    #[arg(long)]
    stats: bool,

    /// Write the loaded graph back out as a text dump and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twitterverse=warn")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every query succeeded.
fn run(cli: Cli) -> Result<bool> {
    let file = File::open(&cli.data)
        .with_context(|| format!("cannot open graph dump {}", cli.data.display()))?;
    let graph = Twitterverse::open(BufReader::new(file), cli.format)
        .with_context(|| format!("cannot load graph dump {}", cli.data.display()))?;
    info!(
        users = graph.store().user_count(),
        edges = graph.store().edge_count(),
        "loaded graph"
    );

    let mut stdout = io::stdout().lock();
    if cli.dump {
        export_text_dump(graph.store(), &mut stdout)?;
        return Ok(true);
    }

    if cli.queries.is_empty() {
        let query = load_query(io::stdin().lock(), cli.format).context("cannot read query from stdin")?;
        return run_query(&graph, &query, cli.stats, &mut stdout);
    }

    let mut all_ok = true;
    for path in &cli.queries {
        let outcome = read_query_file(path, cli.format)
            .and_then(|query| run_query(&graph, &query, cli.stats, &mut stdout));
        match outcome {
            Ok(ok) => all_ok &= ok,
            Err(e) => {
                eprintln!("error: {e:#}");
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn read_query_file(path: &Path, format: DataFormat) -> Result<Query> {
    let file = File::open(path).with_context(|| format!("cannot open query {}", path.display()))?;
    load_query(BufReader::new(file), format).with_context(|| format!("cannot read query {}", path.display()))
}

fn run_query(
    graph: &Twitterverse<MemoryStore>,
    query: &Query,
    stats: bool,
    out: &mut dyn Write,
) -> Result<bool> {
    match graph.execute(query) {
        Ok(result) => {
            // long reports carry their own trailing newline
            if result.report.ends_with('\n') {
                write!(out, "{}", result.report)?;
            } else {
                writeln!(out, "{}", result.report)?;
            }
            if stats {
                eprintln!(
                    "search: {} hit(s), filter: {} hit(s), {:?}",
                    result.stats.search_hits, result.stats.filter_hits, result.stats.execution_time
                );
            }
            Ok(true)
        }
        Err(e) => {
            warn!(start = %query.search.username, "query failed");
            eprintln!("error: {e}");
            Ok(false)
        }
    }
}
