//! Entry-type descriptors
//!
//! An entry type (`article`, `book`, ...) describes which fields a
//! bibliographic record of that type must carry and which it may carry.
//! Every descriptor, whether backed by a real schema or standing in for a
//! type name that has not been resolved yet, implements [`EntryType`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::database::BibDatabase;
use crate::entry::BibEntry;
use crate::unknown::UnknownEntryType;

/// Name of the citation-key field, required by every entry type
pub const KEY_FIELD: &str = "bibtexkey";

/// Separator for alternative required fields, e.g. `author/editor`
pub const ALTERNATIVE_SEPARATOR: char = '/';

/// Classification of an entry-type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTypeKind {
    /// Classic BibTeX types
    Bibtex,
    /// BibLaTeX types
    Biblatex,
    /// User-defined types
    Custom,
    /// Placeholder for a type name with no schema yet
    Unknown,
}

impl EntryTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryTypeKind::Bibtex => "bibtex",
            EntryTypeKind::Biblatex => "biblatex",
            EntryTypeKind::Custom => "custom",
            EntryTypeKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntryTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability contract shared by all entry-type descriptors.
///
/// Field lists are handed out as borrowed slices, so callers can read them
/// but never change the descriptor through them.
pub trait EntryType: fmt::Debug + Send + Sync {
    /// Display and lookup name of the type
    fn name(&self) -> &str;

    /// Fields a record of this type must carry
    ///
    /// The list is borrowed read-only:
    ///
    /// ```compile_fail
    /// use bibtex_entry_types::{EntryType, UnknownEntryType};
    ///
    /// let t = UnknownEntryType::new("thesis");
    /// t.required_fields().push("title".to_string());
    /// ```
    ///
    /// ```compile_fail
    /// use bibtex_entry_types::{EntryType, UnknownEntryType};
    ///
    /// let t = UnknownEntryType::new("thesis");
    /// t.required_fields()[0].clear();
    /// ```
    fn required_fields(&self) -> &[String];

    /// Fields a record of this type may carry
    ///
    /// ```compile_fail
    /// use bibtex_entry_types::{EntryType, UnknownEntryType};
    ///
    /// let t = UnknownEntryType::new("thesis");
    /// t.optional_fields().push("note".to_string());
    /// ```
    fn optional_fields(&self) -> &[String];

    /// Optional fields shown first in editors
    fn primary_optional_fields(&self) -> &[String];

    /// Optional fields shown after the primary ones
    fn secondary_optional_fields(&self) -> &[String];

    /// Whether `entry` carries every required field, looking through
    /// cross-references in `database` where needed
    fn has_all_required_fields(&self, entry: &BibEntry, database: &BibDatabase) -> bool;

    /// Classification tag of this descriptor
    fn kind(&self) -> EntryTypeKind;

    /// Whether the type is offered when creating a new record
    fn is_visible_at_new_entry_dialog(&self) -> bool;

    /// Required fields as shown in the type customization editor
    fn required_fields_for_customization(&self) -> &[String] {
        self.required_fields()
    }

    fn is_required(&self, field: &str) -> bool {
        self.required_fields().iter().any(|f| f == field)
    }

    fn is_optional(&self, field: &str) -> bool {
        self.optional_fields().iter().any(|f| f == field)
    }

    /// Total order by name, case-sensitive
    fn compare(&self, other: &dyn EntryType) -> Ordering {
        self.name().cmp(other.name())
    }
}

/// Serialized form shared by every descriptor
#[derive(Serialize)]
struct EntryTypeView<'a> {
    name: &'a str,
    kind: EntryTypeKind,
    required: &'a [String],
    primary_optional: &'a [String],
    secondary_optional: &'a [String],
    visible: bool,
}

pub(crate) fn serialize_entry_type<S: Serializer>(
    t: &dyn EntryType,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    EntryTypeView {
        name: t.name(),
        kind: t.kind(),
        required: t.required_fields(),
        primary_optional: t.primary_optional_fields(),
        secondary_optional: t.secondary_optional_fields(),
        visible: t.is_visible_at_new_entry_dialog(),
    }
    .serialize(serializer)
}

/// Required fields (or `a/b` alternative sets) with no non-blank value in
/// `entry` or the record it crossrefs.
pub fn missing_required_fields<'a>(
    required: &'a [String],
    entry: &BibEntry,
    database: &BibDatabase,
) -> Vec<&'a str> {
    required
        .iter()
        .filter(|field| {
            !field.split(ALTERNATIVE_SEPARATOR).any(|alternative| {
                database
                    .resolve_field(entry, alternative.trim())
                    .is_some_and(|value| !value.trim().is_empty())
            })
        })
        .map(String::as_str)
        .collect()
}

/// A descriptor backed by a real schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownEntryType {
    name: String,
    kind: EntryTypeKind,
    /// Always starts with [`KEY_FIELD`]
    required: Vec<String>,
    optional: Vec<String>,
    primary_optional: Vec<String>,
    secondary_optional: Vec<String>,
    visible: bool,
}

impl KnownEntryType {
    /// Start building a descriptor named `name`
    pub fn builder(name: impl Into<String>, kind: EntryTypeKind) -> KnownEntryTypeBuilder {
        KnownEntryTypeBuilder {
            name: name.into(),
            kind,
            required: Vec::new(),
            primary_optional: Vec::new(),
            secondary_optional: Vec::new(),
            visible: true,
        }
    }
}

impl EntryType for KnownEntryType {
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
        &self.primary_optional
    }

    fn secondary_optional_fields(&self) -> &[String] {
        &self.secondary_optional
    }

    fn has_all_required_fields(&self, entry: &BibEntry, database: &BibDatabase) -> bool {
        missing_required_fields(&self.required, entry, database).is_empty()
    }

    fn kind(&self) -> EntryTypeKind {
        self.kind
    }

    fn is_visible_at_new_entry_dialog(&self) -> bool {
        self.visible
    }

    /// The citation key cannot be customized away, so it is left out here
    fn required_fields_for_customization(&self) -> &[String] {
        &self.required[1..]
    }
}

/// Builder for [`KnownEntryType`]
#[derive(Debug, Clone)]
pub struct KnownEntryTypeBuilder {
    name: String,
    kind: EntryTypeKind,
    required: Vec<String>,
    primary_optional: Vec<String>,
    secondary_optional: Vec<String>,
    visible: bool,
}

impl KnownEntryTypeBuilder {
    pub fn required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn primary_optional<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_optional.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn secondary_optional<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_optional.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn build(self) -> KnownEntryType {
        let mut required: Vec<String> = Vec::with_capacity(self.required.len() + 1);
        required.push(KEY_FIELD.to_string());
        for field in self.required {
            if !required.contains(&field) {
                required.push(field);
            }
        }

        let mut optional = self.primary_optional.clone();
        optional.extend(self.secondary_optional.iter().cloned());

        KnownEntryType {
            name: self.name,
            kind: self.kind,
            required,
            optional,
            primary_optional: self.primary_optional,
            secondary_optional: self.secondary_optional,
            visible: self.visible,
        }
    }
}

/// Any entry-type descriptor a registry can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTypeDef {
    Known(KnownEntryType),
    Unknown(UnknownEntryType),
}

impl EntryTypeDef {
    pub fn is_unknown(&self) -> bool {
        matches!(self, EntryTypeDef::Unknown(_))
    }

    fn inner(&self) -> &dyn EntryType {
        match self {
            EntryTypeDef::Known(t) => t,
            EntryTypeDef::Unknown(t) => t,
        }
    }
}

impl Serialize for KnownEntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_entry_type(self, serializer)
    }
}

impl Serialize for EntryTypeDef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_entry_type(self.inner(), serializer)
    }
}

impl From<KnownEntryType> for EntryTypeDef {
    fn from(t: KnownEntryType) -> Self {
        EntryTypeDef::Known(t)
    }
}

impl From<UnknownEntryType> for EntryTypeDef {
    fn from(t: UnknownEntryType) -> Self {
        EntryTypeDef::Unknown(t)
    }
}

impl EntryType for EntryTypeDef {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn required_fields(&self) -> &[String] {
        self.inner().required_fields()
    }

    fn optional_fields(&self) -> &[String] {
        self.inner().optional_fields()
    }

    fn primary_optional_fields(&self) -> &[String] {
        self.inner().primary_optional_fields()
    }

    fn secondary_optional_fields(&self) -> &[String] {
        self.inner().secondary_optional_fields()
    }

    fn has_all_required_fields(&self, entry: &BibEntry, database: &BibDatabase) -> bool {
        self.inner().has_all_required_fields(entry, database)
    }

    fn kind(&self) -> EntryTypeKind {
        self.inner().kind()
    }

    fn is_visible_at_new_entry_dialog(&self) -> bool {
        self.inner().is_visible_at_new_entry_dialog()
    }

    fn required_fields_for_customization(&self) -> &[String] {
        self.inner().required_fields_for_customization()
    }
}

/// The classic BibTeX entry types
pub fn standard_types() -> Vec<KnownEntryType> {
    let bibtex = |name: &str| KnownEntryType::builder(name, EntryTypeKind::Bibtex);

    vec![
        bibtex("article")
            .required(["author", "title", "journal", "year"])
            .primary_optional(["volume", "number", "pages", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("book")
            .required(["title", "publisher", "year", "author/editor"])
            .primary_optional(["volume", "number", "series", "address", "edition", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("booklet")
            .required(["title"])
            .primary_optional(["author", "howpublished", "address", "month", "year"])
            .secondary_optional(["note"])
            .build(),
        bibtex("conference")
            .required(["author", "title", "booktitle", "year"])
            .primary_optional(["editor", "volume", "number", "series", "pages", "address", "month"])
            .secondary_optional(["organization", "publisher", "note"])
            .visible(false)
            .build(),
        bibtex("inbook")
            .required(["chapter/pages", "title", "publisher", "year", "author/editor"])
            .primary_optional(["volume", "number", "series", "type", "address", "edition", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("incollection")
            .required(["author", "title", "booktitle", "publisher", "year"])
            .primary_optional(["editor", "volume", "number", "series", "type", "chapter", "pages"])
            .secondary_optional(["address", "edition", "month", "note"])
            .build(),
        bibtex("inproceedings")
            .required(["author", "title", "booktitle", "year"])
            .primary_optional(["editor", "volume", "number", "series", "pages", "address", "month"])
            .secondary_optional(["organization", "publisher", "note"])
            .build(),
        bibtex("manual")
            .required(["title"])
            .primary_optional(["author", "organization", "address", "edition", "month", "year"])
            .secondary_optional(["note"])
            .build(),
        bibtex("mastersthesis")
            .required(["author", "title", "school", "year"])
            .primary_optional(["type", "address", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("misc")
            .primary_optional(["author", "title", "howpublished", "month", "year"])
            .secondary_optional(["note"])
            .build(),
        bibtex("phdthesis")
            .required(["author", "title", "school", "year"])
            .primary_optional(["type", "address", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("proceedings")
            .required(["title", "year"])
            .primary_optional(["editor", "volume", "number", "series", "address", "month"])
            .secondary_optional(["publisher", "organization", "note"])
            .build(),
        bibtex("techreport")
            .required(["author", "title", "institution", "year"])
            .primary_optional(["type", "number", "address", "month"])
            .secondary_optional(["note"])
            .build(),
        bibtex("unpublished")
            .required(["author", "title", "note"])
            .primary_optional(["month", "year"])
            .build(),
    ]
}
