//! Bibliographic records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry_type::KEY_FIELD;

/// Field holding the citation key of a parent record
pub const CROSSREF_FIELD: &str = "crossref";

/// A single bibliographic record.
///
/// The record stores the *name* of its entry type, never the descriptor, so
/// descriptors can be swapped in the registry without touching records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBibEntry")]
pub struct BibEntry {
    /// Citation key (e.g. "smith2020")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_key: Option<String>,
    /// Entry-type name as written in the source
    pub entry_type: String,
    /// Field values keyed by lowercase field name
    fields: BTreeMap<String, String>,
}

/// Deserialized shape before field names are normalized
#[derive(Deserialize)]
struct RawBibEntry {
    #[serde(default)]
    citation_key: Option<String>,
    entry_type: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

impl From<RawBibEntry> for BibEntry {
    /// Routes every field through [`BibEntry::set_field`]; a `bibtexkey`
    /// field wins over `citation_key`.
    fn from(raw: RawBibEntry) -> Self {
        let mut entry = BibEntry::new(raw.entry_type);
        entry.citation_key = raw.citation_key;
        for (name, value) in raw.fields {
            entry.set_field(&name, value);
        }
        entry
    }
}

impl BibEntry {
    /// Create an empty record of the given type
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self {
            citation_key: None,
            entry_type: entry_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the citation key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.citation_key = Some(key.into());
        self
    }

    /// Set a field value. Setting [`KEY_FIELD`] sets the citation key.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_lowercase();
        if name == KEY_FIELD {
            self.citation_key = Some(value.into());
        } else {
            self.fields.insert(name, value.into());
        }
    }

    /// Remove a field, returning its old value
    pub fn clear_field(&mut self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        if name == KEY_FIELD {
            self.citation_key.take()
        } else {
            self.fields.remove(&name)
        }
    }

    /// Get a field value. [`KEY_FIELD`] yields the citation key.
    pub fn field(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        if name == KEY_FIELD {
            self.citation_key.as_deref()
        } else {
            self.fields.get(&name).map(String::as_str)
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Citation key of the parent record, if any
    pub fn crossref(&self) -> Option<&str> {
        self.field(CROSSREF_FIELD)
    }

    /// Iterate over all non-key fields
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_case_insensitive() {
        let mut entry = BibEntry::new("article");
        entry.set_field("Title", "Hello");
        assert_eq!(entry.field("title"), Some("Hello"));
        assert_eq!(entry.field("TITLE"), Some("Hello"));
    }

    #[test]
    fn test_key_field_maps_to_citation_key() {
        let mut entry = BibEntry::new("article");
        assert!(!entry.has_field(KEY_FIELD));

        entry.set_field("bibtexkey", "smith2020");
        assert_eq!(entry.citation_key.as_deref(), Some("smith2020"));
        assert_eq!(entry.fields().count(), 0);

        assert_eq!(entry.clear_field(KEY_FIELD), Some("smith2020".to_string()));
        assert!(entry.citation_key.is_none());
    }

    #[test]
    fn test_deserialize_normalizes_fields() {
        let entry: BibEntry = serde_json::from_value(serde_json::json!({
            "entry_type": "article",
            "fields": { "Title": "On Things", "BIBTEXKEY": "smith2020" }
        }))
        .unwrap();

        assert_eq!(entry.citation_key.as_deref(), Some("smith2020"));
        assert_eq!(entry.field("title"), Some("On Things"));
        assert_eq!(entry.fields().collect::<Vec<_>>(), vec![("title", "On Things")]);
    }

    #[test]
    fn test_serialize_round_trip_keeps_key() {
        let mut entry = BibEntry::new("book").with_key("k");
        entry.set_field("title", "T");
        let json = serde_json::to_value(&entry).unwrap();
        let back: BibEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_crossref() {
        let mut entry = BibEntry::new("inproceedings").with_key("a");
        assert!(entry.crossref().is_none());
        entry.set_field("crossref", "proc");
        assert_eq!(entry.crossref(), Some("proc"));
    }
}
