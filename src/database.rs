//! In-memory record store used for cross-record lookups during validation

use std::collections::HashMap;

use tracing::warn;

use crate::entry::BibEntry;
use crate::entry_type::KEY_FIELD;
use crate::error::{EntryTypeError, Result};

/// An ordered collection of records, indexed by citation key
#[derive(Debug, Clone, Default)]
pub struct BibDatabase {
    entries: Vec<BibEntry>,
    by_key: HashMap<String, usize>,
}

impl BibDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Keys must be unique; keyless records are always accepted.
    pub fn insert(&mut self, entry: BibEntry) -> Result<()> {
        if let Some(key) = &entry.citation_key {
            if self.by_key.contains_key(key) {
                return Err(EntryTypeError::DuplicateKey { key: key.clone() });
            }
            self.by_key.insert(key.clone(), self.entries.len());
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a record by citation key
    pub fn get(&self, key: &str) -> Option<&BibEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[BibEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of `field` in `entry`, falling back to the record it crossrefs.
    ///
    /// The citation key is never inherited.
    pub fn resolve_field<'a>(&'a self, entry: &'a BibEntry, field: &str) -> Option<&'a str> {
        if let Some(value) = entry.field(field) {
            return Some(value);
        }
        if field.eq_ignore_ascii_case(KEY_FIELD) {
            return None;
        }

        let parent_key = entry.crossref()?;
        match self.get(parent_key) {
            Some(parent) => parent.field(field),
            None => {
                warn!(
                    key = entry.citation_key.as_deref().unwrap_or_default(),
                    crossref = parent_key,
                    "crossref points to a missing entry"
                );
                None
            }
        }
    }
}
