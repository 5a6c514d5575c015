//! Core search module.
//!
//! `query` normalizes queries and classifies single records; `engine`
//! runs a query over a whole `RecordSet` with exact-over-partial
//! precedence.

pub mod engine;
pub mod query;

pub use engine::{search, SearchOutcome};
pub use query::{classify, normalize_query, MatchKind};
