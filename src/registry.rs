//! Entry-Type Registry
//!
//! Maps entry-type names to descriptors. Names are matched case-insensitively
//! but each descriptor keeps the spelling it was created with.
//!
//! When a record names a type the registry has never seen, [`EntryTypeRegistry::resolve`]
//! files an [`UnknownEntryType`] placeholder under that name. A definition
//! registered later overwrites the placeholder in place. Records only hold
//! the type name and are looked up again on every access, so they pick up
//! the new descriptor without being rewritten.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::database::BibDatabase;
use crate::entry::BibEntry;
use crate::entry_type::{standard_types, EntryType, EntryTypeDef};
use crate::error::{EntryTypeError, Result};
use crate::unknown::UnknownEntryType;

/// Registry of entry-type descriptors
#[derive(Debug, Clone, Default)]
pub struct EntryTypeRegistry {
    types: HashMap<String, EntryTypeDef>,
    hide_unknown_in_dialog: bool,
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl EntryTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the classic BibTeX types
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        for t in standard_types() {
            registry.insert(t.into());
        }
        registry
    }

    /// Leave placeholders out of [`Self::new_entry_choices`]
    pub fn set_hide_unknown_in_dialog(&mut self, hide: bool) {
        self.hide_unknown_in_dialog = hide;
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Get a descriptor by name
    pub fn get(&self, name: &str) -> Option<&EntryTypeDef> {
        self.types.get(&lookup_key(name))
    }

    /// Get a descriptor by name, failing if it is not registered
    pub fn require(&self, name: &str) -> Result<&EntryTypeDef> {
        self.get(name).ok_or_else(|| EntryTypeError::NotFound {
            name: name.to_string(),
        })
    }

    /// Get the descriptor for `name`, filing a placeholder if none exists
    pub fn resolve(&mut self, name: &str) -> Result<&EntryTypeDef> {
        let key = lookup_key(name);
        if key.is_empty() {
            return Err(EntryTypeError::EmptyName);
        }

        let def = self.types.entry(key).or_insert_with(|| {
            debug!(name, "no schema for entry type yet, using placeholder");
            UnknownEntryType::new(name.trim()).into()
        });
        Ok(&*def)
    }

    /// Register a descriptor, replacing whatever held its name.
    ///
    /// Returns the replaced descriptor. Blank names are refused.
    pub fn register(&mut self, def: impl Into<EntryTypeDef>) -> Result<Option<EntryTypeDef>> {
        let def = def.into();
        if def.name().trim().is_empty() {
            return Err(EntryTypeError::EmptyName);
        }
        Ok(self.insert(def))
    }

    /// Register a descriptor unless a real definition already holds its name.
    ///
    /// Placeholders may always be overwritten.
    pub fn try_register(&mut self, def: impl Into<EntryTypeDef>) -> Result<()> {
        let def = def.into();
        if def.name().trim().is_empty() {
            return Err(EntryTypeError::EmptyName);
        }
        if let Some(existing) = self.get(def.name()) {
            if !existing.is_unknown() {
                return Err(EntryTypeError::AlreadyRegistered {
                    name: existing.name().to_string(),
                });
            }
        }
        self.insert(def);
        Ok(())
    }

    /// Store `def` under its name; callers check the name is not blank
    fn insert(&mut self, def: EntryTypeDef) -> Option<EntryTypeDef> {
        let name = def.name().to_string();
        let previous = self.types.insert(lookup_key(&name), def);

        match &previous {
            Some(old) if old.is_unknown() => {
                info!(name = %name, "placeholder replaced by entry type definition");
            }
            Some(_) => debug!(name = %name, "entry type redefined"),
            None => debug!(name = %name, "entry type registered"),
        }
        previous
    }

    /// Remove a descriptor
    pub fn remove(&mut self, name: &str) -> Option<EntryTypeDef> {
        self.types.remove(&lookup_key(name))
    }

    /// Descriptor for a record's type, if registered
    pub fn descriptor_for(&self, entry: &BibEntry) -> Option<&EntryTypeDef> {
        self.get(&entry.entry_type)
    }

    /// Make sure every record in `database` has a descriptor
    pub fn resolve_all(&mut self, database: &BibDatabase) -> Result<()> {
        for entry in database.entries() {
            self.resolve(&entry.entry_type)?;
        }
        Ok(())
    }

    /// All descriptors, ordered by name
    pub fn sorted(&self) -> Vec<&EntryTypeDef> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by(|a, b| a.compare(*b));
        types
    }

    /// Descriptors offered when creating a new record, ordered by name
    pub fn new_entry_choices(&self) -> Vec<&EntryTypeDef> {
        self.sorted()
            .into_iter()
            .filter(|t| t.is_visible_at_new_entry_dialog())
            .filter(|t| !(self.hide_unknown_in_dialog && t.is_unknown()))
            .collect()
    }

    /// Names of all placeholders still waiting for a definition
    pub fn unknown_names(&self) -> Vec<&str> {
        self.sorted()
            .into_iter()
            .filter(|t| t.is_unknown())
            .map(|t| t.name())
            .collect()
    }

    /// Records missing required fields, in database order.
    ///
    /// Records whose type is not registered at all are treated like
    /// placeholders and never reported.
    pub fn incomplete_entries<'a>(&self, database: &'a BibDatabase) -> Vec<&'a BibEntry> {
        database
            .entries()
            .iter()
            .filter(|entry| {
                self.descriptor_for(entry)
                    .is_some_and(|t| !t.has_all_required_fields(entry, database))
            })
            .collect()
    }
}
