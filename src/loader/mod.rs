//! Loading the country dataset into an immutable `RecordSet`.
//!
//! The first row of the document is the field schema; every following
//! non-blank row becomes one `Record` zipped positionally against it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Record, RecordSet};

mod scan;

pub use scan::{split_fields, split_rows};

/// Errors raised while turning document text into records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The document contained no rows at all, not even a header.
    #[error("document is empty")]
    Empty,
}

/// Parse document text into a `RecordSet`.
///
/// Blank (whitespace-only) rows after the header are skipped. Missing
/// trailing columns read as empty strings and columns beyond the schema
/// are dropped. Unbalanced quotes are tolerated.
pub fn load(text: &str) -> Result<RecordSet, LoadError> {
    let rows = split_rows(text);
    let mut rows = rows.iter();

    let header = rows.next().ok_or(LoadError::Empty)?;
    let schema = split_fields(header);

    let records: Vec<Record> = rows
        .filter(|row| !row.trim().is_empty())
        .map(|row| build_record(&schema, split_fields(row)))
        .collect();

    debug!(
        fields = schema.len(),
        records = records.len(),
        "parsed delimited document"
    );

    Ok(RecordSet::new(schema, records))
}

/// Read a UTF-8 data file from disk and parse it with [`load`].
pub fn load_file(path: &Path) -> Result<RecordSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read data file at {}", path.display()))?;
    let records =
        load(&text).with_context(|| format!("failed to load data file at {}", path.display()))?;

    info!(
        path = %path.display(),
        records = records.len(),
        fields = records.schema().len(),
        "loaded records"
    );

    Ok(records)
}

fn build_record(schema: &[String], values: Vec<String>) -> Record {
    schema
        .iter()
        .cloned()
        .zip(values.into_iter().chain(std::iter::repeat_with(String::new)))
        .collect()
}
