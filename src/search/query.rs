//! Query normalization and per-record match classification.
//!
//! A query matches a record through its short name or its official
//! long name only:
//! - equal (case-insensitively) to either name is an exact match;
//! - contained in either name is a partial match.

use crate::models::{FieldNames, Record};

/// How a record matched a normalized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// Lowercase the query and strip surrounding whitespace.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Classify `record` against an already normalized query.
///
/// Returns `None` when neither name contains the query. An empty query
/// is contained in every name, so it is at least a partial match for
/// every record.
pub fn classify(normalized: &str, record: &Record, fields: &FieldNames) -> Option<MatchKind> {
    let name = fields.short_name(record).to_lowercase();
    let long_name = fields.long_name(record).to_lowercase();

    if name == normalized || long_name == normalized {
        Some(MatchKind::Exact)
    } else if name.contains(normalized) || long_name.contains(normalized) {
        Some(MatchKind::Partial)
    } else {
        None
    }
}
