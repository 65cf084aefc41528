//! # Loaders
//!
//! Turn external text into a `MemoryStore` or a `Query`. These are the only
//! parts of the crate that read input; the query engine never does.

pub mod json;
pub mod text;

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::query::Query;
use crate::storage::MemoryStore;
use crate::{Error, Result};

/// Input format for graph dumps and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DataFormat {
    /// Line-oriented format with `ENDBIO` / `END` and `SEARCH` / `FILTER` / `PRESENT` markers.
    #[default]
    Text,
    Json,
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(DataFormat::Text),
            "json" => Ok(DataFormat::Json),
            other => Err(Error::UnrecognizedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Text => f.write_str("text"),
            DataFormat::Json => f.write_str("json"),
        }
    }
}

/// Load a store in the given format.
pub fn load_store<R: BufRead>(reader: R, format: DataFormat) -> Result<MemoryStore> {
    match format {
        DataFormat::Text => text::read_store(reader),
        DataFormat::Json => json::read_store(reader),
    }
}

/// Load a query in the given format.
pub fn load_query<R: BufRead>(reader: R, format: DataFormat) -> Result<Query> {
    match format {
        DataFormat::Text => text::read_query(reader),
        DataFormat::Json => json::read_query(reader),
    }
}
