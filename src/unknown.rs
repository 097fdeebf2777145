//! Placeholder descriptor for unresolved entry types
//!
//! Records are read before the type definitions that may follow them in the
//! same file, so a record can name a type nobody has described yet. Until the
//! real schema turns up the record gets an [`UnknownEntryType`] carrying only
//! the name.

use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::database::BibDatabase;
use crate::entry::BibEntry;
use crate::entry_type::{serialize_entry_type, EntryType, EntryTypeKind, KEY_FIELD};

/// Entry type known only by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownEntryType {
    name: String,
    required: Vec<String>,
    optional: Vec<String>,
}

impl UnknownEntryType {
    /// Create a placeholder for `name`. Only the citation key is required.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: vec![KEY_FIELD.to_string()],
            optional: Vec::new(),
        }
    }
}

impl EntryType for UnknownEntryType {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_fields(&self) -> &[String] {
        &self.required
    }

    fn optional_fields(&self) -> &[String] {
        &self.optional
    }

    fn primary_optional_fields(&self) -> &[String] {
        self.optional_fields()
    }

    fn secondary_optional_fields(&self) -> &[String] {
        &[]
    }

    /// Always true: without a schema there is nothing to hold the record to,
    /// and the record must stay usable.
    fn has_all_required_fields(&self, _entry: &BibEntry, _database: &BibDatabase) -> bool {
        true
    }

    fn kind(&self) -> EntryTypeKind {
        EntryTypeKind::Unknown
    }

    fn is_visible_at_new_entry_dialog(&self) -> bool {
        true
    }
}

impl Serialize for UnknownEntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entry_type(self, serializer)
    }
}

impl PartialOrd for UnknownEntryType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnknownEntryType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
