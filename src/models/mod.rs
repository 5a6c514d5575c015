//! Shared data models for loaded records, field mappings, and the
//! display table.
//!
//! `Record` and `RecordSet` form the JSON API surface returned by
//! `/api/search` and by `natlas search --format json`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default schema key holding a record's short (common) name.
pub const DEFAULT_SHORT_NAME_FIELD: &str = "Country";

/// Default schema key holding a record's official long-form name.
pub const DEFAULT_LONG_NAME_FIELD: &str = "Government: Country name: conventional long form";

/// One country or territory: an ordered mapping from field name to
/// value.
///
/// Field order follows the schema of the source document and is
/// preserved through JSON serialization and the "all data" view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field.
    ///
    /// Overwriting keeps the position of the first occurrence so that a
    /// duplicated schema column behaves like an insertion-ordered map:
    /// the later value wins, the earlier position stays.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value for `name`, if the record carries that field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value for `name`, or the empty string when absent.
    pub fn value_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of string fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    record.insert(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// The full, immutable collection of records produced by the loader.
///
/// Constructed once at startup and shared read-only (behind an `Arc`)
/// with every search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    schema: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(schema: Vec<String>, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    /// Field names taken verbatim from the header row.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Records in document row order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Schema keys of the two fields used for matching and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_short_name")]
    pub short_name: String,
    #[serde(default = "default_long_name")]
    pub long_name: String,
}

fn default_short_name() -> String {
    DEFAULT_SHORT_NAME_FIELD.to_string()
}

fn default_long_name() -> String {
    DEFAULT_LONG_NAME_FIELD.to_string()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            short_name: default_short_name(),
            long_name: default_long_name(),
        }
    }
}

impl FieldNames {
    /// Short name of `record`, or the empty string.
    pub fn short_name<'a>(&self, record: &'a Record) -> &'a str {
        record.value_or_empty(&self.short_name)
    }

    /// Official long name of `record`, or the empty string.
    pub fn long_name<'a>(&self, record: &'a Record) -> &'a str {
        record.value_or_empty(&self.long_name)
    }

    /// Human-readable label: `short (long)` when the long name is set,
    /// differs from the short name and is not the `none` placeholder;
    /// otherwise just the short name (`Unknown` when absent).
    pub fn display_name(&self, record: &Record) -> String {
        let name = record.get(&self.short_name).unwrap_or("Unknown");
        let long_name = self.long_name(record);
        if !long_name.is_empty() && long_name != name && long_name != "none" {
            format!("{name} ({long_name})")
        } else {
            name.to_string()
        }
    }
}

/// A headline field shown on the detail page, keyed by schema name and
/// rendered under a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub key: String,
    pub label: String,
}

impl DisplayField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Headline fields of the country dataset, in display order.
pub fn default_display_fields() -> Vec<DisplayField> {
    [
        (DEFAULT_SHORT_NAME_FIELD, "Country"),
        (DEFAULT_LONG_NAME_FIELD, "Official Name"),
        ("Geography: Location", "Location"),
        ("Geography: Area: total ", "Total Area"),
        ("People and Society: Population: total", "Population"),
        ("Government: Capital: name", "Capital"),
        ("Government: Government type", "Government Type"),
        ("People and Society: Languages", "Languages"),
        ("People and Society: Religions", "Religions"),
        ("People and Society: Nationality: noun", "Nationality"),
        (
            "People and Society: Life expectancy at birth: total population",
            "Life Expectancy",
        ),
        ("People and Society: Median age: total", "Median Age"),
        ("Geography: Climate", "Climate"),
        ("Geography: Natural resources", "Natural Resources"),
        ("Economy: Economic overview", "Economic Overview"),
        (
            "Economy: Real GDP per capita: Real GDP per capita 2024",
            "GDP Per Capita",
        ),
        ("Economy: Industries", "Industries"),
        ("Economy: Exports - partners", "Export Partners"),
        ("Economy: Imports - partners", "Import Partners"),
        ("Government: Independence", "Independence"),
        ("Government: National anthem(s): title", "National Anthem"),
        ("Government: Flag description", "Flag Description"),
        ("Military and Security: Military expenditures", "Military Expenditures"),
        (
            "Environment: Environment - current issues",
            "Environmental Issues",
        ),
    ]
    .into_iter()
    .map(|(key, label)| DisplayField::new(key, label))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_keeps_first_position_with_later_value() {
        let record: Record = [("A", "1"), ("B", "2"), ("A", "3")].into_iter().collect();

        let fields: Vec<_> = record.iter().collect();
        assert_eq!(fields, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let record: Record = [("Country", "France")].into_iter().collect();
        assert_eq!(record.get("Capital"), None);
        assert_eq!(record.value_or_empty("Capital"), "");
    }

    #[test]
    fn record_serializes_in_field_order() {
        let record: Record = [("Country", "A&B"), ("Capital", "")].into_iter().collect();
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"Country":"A&B","Capital":""}"#);
    }

    #[test]
    fn record_json_escapes_control_characters() {
        let record: Record = [("Note", "say \"hi\"\\\n\r\t")].into_iter().collect();
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"Note":"say \"hi\"\\\n\r\t"}"#);
    }

    #[test]
    fn record_deserializes_preserving_order() {
        let record: Record =
            serde_json::from_str(r#"{"Zeta":"z","Alpha":"a"}"#).expect("deserialize record");
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn display_name_includes_distinct_long_name() {
        let fields = FieldNames::default();
        let with_long: Record = [("Country", "Chad"), (DEFAULT_LONG_NAME_FIELD, "Republic of Chad")]
            .into_iter()
            .collect();
        let placeholder: Record = [("Country", "Aruba"), (DEFAULT_LONG_NAME_FIELD, "none")]
            .into_iter()
            .collect();
        let same: Record = [("Country", "Japan"), (DEFAULT_LONG_NAME_FIELD, "Japan")]
            .into_iter()
            .collect();

        assert_eq!(fields.display_name(&with_long), "Chad (Republic of Chad)");
        assert_eq!(fields.display_name(&placeholder), "Aruba");
        assert_eq!(fields.display_name(&same), "Japan");
        assert_eq!(fields.display_name(&Record::new()), "Unknown");
    }

    #[test]
    fn field_names_fill_defaults_from_partial_config() {
        let names: FieldNames = toml::from_str(r#"short_name = "Name""#).expect("parse");
        assert_eq!(names.short_name, "Name");
        assert_eq!(names.long_name, DEFAULT_LONG_NAME_FIELD);
    }
}
