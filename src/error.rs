//! Error types for entry-type registries and their collaborators

use thiserror::Error;

/// Result type for entry-type operations
pub type Result<T> = std::result::Result<T, EntryTypeError>;

/// Entry-type registry errors
#[derive(Error, Debug)]
pub enum EntryTypeError {
    #[error("Entry type name must not be empty")]
    EmptyName,

    #[error("Entry type not found: {name}")]
    NotFound { name: String },

    #[error("Entry type already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("Duplicate citation key: {key}")]
    DuplicateKey { key: String },

    #[error("Invalid field assignment: {0}")]
    InvalidField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
