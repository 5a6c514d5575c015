//! Core search entry point.
//!
//! `search` is a single linear scan over the shared snapshot. It holds
//! no state between calls and may run concurrently from any number of
//! request handlers.

use tracing::debug;

use crate::models::{FieldNames, Record, RecordSet};
use crate::search::query::{classify, normalize_query, MatchKind};

/// Resolve `query` against `records`.
///
/// When at least one record matches exactly, only the exact matches
/// are returned and every partial match is discarded. Otherwise all
/// partial matches are returned. Both sets keep document order.
pub fn search<'a>(query: &str, records: &'a RecordSet, fields: &FieldNames) -> Vec<&'a Record> {
    let normalized = normalize_query(query);

    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for record in records.records() {
        match classify(&normalized, record, fields) {
            Some(MatchKind::Exact) => exact.push(record),
            Some(MatchKind::Partial) => partial.push(record),
            None => {}
        }
    }

    debug!(
        query = %normalized,
        exact = exact.len(),
        partial = partial.len(),
        "search completed"
    );

    if exact.is_empty() {
        partial
    } else {
        exact
    }
}

/// Shape of a result sequence as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Empty,
    Single(&'a Record),
    Multiple(Vec<&'a Record>),
}

impl<'a> From<Vec<&'a Record>> for SearchOutcome<'a> {
    fn from(mut results: Vec<&'a Record>) -> Self {
        match results.len() {
            0 => SearchOutcome::Empty,
            1 => SearchOutcome::Single(results.remove(0)),
            _ => SearchOutcome::Multiple(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load;

    fn sample() -> RecordSet {
        load("Country,Capital\nUnited States,Washington\nUnited Kingdom,London\n").expect("load")
    }

    fn names<'a>(results: &[&'a Record]) -> Vec<&'a str> {
        results.iter().map(|r| r.value_or_empty("Country")).collect()
    }

    #[test]
    fn partial_query_returns_all_matches_in_order() {
        let set = sample();
        let results = search("united", &set, &FieldNames::default());
        assert_eq!(names(&results), vec!["United States", "United Kingdom"]);
    }

    #[test]
    fn exact_query_returns_only_exact_match() {
        let set = sample();
        let results = search("United States", &set, &FieldNames::default());
        assert_eq!(names(&results), vec!["United States"]);
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        let set = sample();
        assert!(search("xyz", &set, &FieldNames::default()).is_empty());
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let set = sample();
        let results = search("  UNITED kingdom ", &set, &FieldNames::default());
        assert_eq!(names(&results), vec!["United Kingdom"]);
    }

    #[test]
    fn exact_matches_discard_partials() {
        let set = load(
            "Country,Government: Country name: conventional long form\n\
             Niger,Republic of Niger\n\
             Nigeria,Federal Republic of Nigeria\n\
             Guinea,Republic of Guinea\n",
        )
        .expect("load");
        let fields = FieldNames::default();

        let results = search("niger", &set, &fields);
        assert_eq!(names(&results), vec!["Niger"]);

        let results = search("republic of", &set, &fields);
        assert_eq!(names(&results), vec!["Niger", "Nigeria", "Guinea"]);
    }

    #[test]
    fn multiple_exact_matches_keep_document_order() {
        let set = load(
            "Country,Government: Country name: conventional long form\n\
             Congo A,Congo\n\
             Congo,Republic of the Congo\n\
             Congo B,Congo\n",
        )
        .expect("load");
        let results = search("congo", &set, &FieldNames::default());
        assert_eq!(names(&results), vec!["Congo A", "Congo", "Congo B"]);
    }

    #[test]
    fn empty_query_returns_every_record_when_no_name_is_empty() {
        let set = load(
            "Country,Government: Country name: conventional long form\n\
             France,French Republic\n\
             Spain,Kingdom of Spain\n",
        )
        .expect("load");
        let results = search("   ", &set, &FieldNames::default());
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn empty_query_prefers_records_with_empty_names() {
        let set = load(
            "Country,Government: Country name: conventional long form\n\
             France,French Republic\n\
             Antarctica,\n\
             Spain,Kingdom of Spain\n",
        )
        .expect("load");
        let results = search("", &set, &FieldNames::default());
        assert_eq!(names(&results), vec!["Antarctica"]);
    }

    #[test]
    fn outcome_reflects_result_count() {
        let set = sample();
        let fields = FieldNames::default();

        assert_eq!(
            SearchOutcome::from(search("xyz", &set, &fields)),
            SearchOutcome::Empty
        );
        assert!(matches!(
            SearchOutcome::from(search("kingdom", &set, &fields)),
            SearchOutcome::Single(record) if record.value_or_empty("Capital") == "London"
        ));
        assert!(matches!(
            SearchOutcome::from(search("united", &set, &fields)),
            SearchOutcome::Multiple(records) if records.len() == 2
        ));
    }
}
