//! BibTeX Entry Types
//!
//! Describes, for each citation format (`article`, `book`, ...), which fields a
//! bibliographic record must carry and which it may carry, and checks records
//! against those descriptions.
//!
//! ## Features
//!
//! - **Uniform contract**: every descriptor implements [`EntryType`]
//! - **Placeholders**: records naming a type with no schema yet get an
//!   [`UnknownEntryType`] that accepts them as they are
//! - **Crossref-aware validation**: required fields may be inherited from a
//!   parent record
//! - **Configurable**: custom types from `entry-types.toml` or the environment
//!
//! ## Lifecycle of a type name
//!
//! ```text
//! parser sees @thesis{...}
//!     └─> registry.resolve("thesis")      -> UnknownEntryType("thesis")
//! parser later finds the thesis definition
//!     └─> registry.register(known)        -> placeholder overwritten
//! validation
//!     └─> registry.descriptor_for(entry)  -> looked up by name every time
//! ```

pub mod config;
pub mod database;
pub mod entry;
pub mod entry_type;
pub mod error;
pub mod registry;
pub mod unknown;

pub use config::{CustomTypeConfig, EntryTypesConfig, RegistryConfig};
pub use database::BibDatabase;
pub use entry::BibEntry;
pub use entry_type::{
    missing_required_fields, standard_types, EntryType, EntryTypeDef, EntryTypeKind, KnownEntryType,
    KnownEntryTypeBuilder, KEY_FIELD,
};
pub use error::{EntryTypeError, Result};
pub use registry::EntryTypeRegistry;
pub use unknown::UnknownEntryType;
