//! Configuration for entry-type registries
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (entry-types.toml)
//! - Environment variables (ENTRY_TYPES__*)
//!
//! ## Example config file (entry-types.toml):
//! ```toml
//! [registry]
//! include_standard = true
//! hide_unknown_in_dialog = false
//!
//! [[custom_types]]
//! name = "thesis"
//! required = ["author", "title", "school"]
//! primary_optional = ["year"]
//! secondary_optional = ["note"]
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entry_type::{EntryType, EntryTypeKind, KnownEntryType};
use crate::error::Result;
use crate::registry::EntryTypeRegistry;

/// Main configuration for entry types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryTypesConfig {
    /// Registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// User-defined entry types
    #[serde(default)]
    pub custom_types: Vec<CustomTypeConfig>,
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Seed the registry with the classic BibTeX types
    #[serde(default = "default_true")]
    pub include_standard: bool,

    /// Leave placeholders out of the new-entry choices
    #[serde(default)]
    pub hide_unknown_in_dialog: bool,
}

/// A user-defined entry type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTypeConfig {
    pub name: String,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub primary_optional: Vec<String>,

    #[serde(default)]
    pub secondary_optional: Vec<String>,

    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_standard: true,
            hide_unknown_in_dialog: false,
        }
    }
}

impl CustomTypeConfig {
    /// Build the descriptor this entry describes
    pub fn to_entry_type(&self) -> KnownEntryType {
        KnownEntryType::builder(self.name.trim(), EntryTypeKind::Custom)
            .required(self.required.iter().cloned())
            .primary_optional(self.primary_optional.iter().cloned())
            .secondary_optional(self.secondary_optional.iter().cloned())
            .visible(self.visible)
            .build()
    }
}

impl EntryTypesConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "entry-types.toml",
            ".entry-types.toml",
            "config/entry-types.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("org", "bibtex", "entry-types") {
            let xdg_config = dirs.config_dir().join("entry-types.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ENTRY_TYPES")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a registry from this configuration.
    ///
    /// Custom types override standard types of the same name.
    pub fn build_registry(&self) -> EntryTypeRegistry {
        let mut registry = if self.registry.include_standard {
            EntryTypeRegistry::with_standard_types()
        } else {
            EntryTypeRegistry::new()
        };
        registry.set_hide_unknown_in_dialog(self.registry.hide_unknown_in_dialog);

        for custom in &self.custom_types {
            let def = custom.to_entry_type();
            debug!(name = def.name(), "registering custom entry type");
            if let Err(e) = registry.register(def) {
                warn!(error = %e, "skipping custom entry type");
            }
        }

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntryTypeError;
    use tempfile::tempdir;

    fn thesis() -> CustomTypeConfig {
        CustomTypeConfig {
            name: "thesis".to_string(),
            required: vec!["author".to_string(), "school".to_string()],
            primary_optional: vec!["year".to_string()],
            secondary_optional: vec![],
            visible: true,
        }
    }

    #[test]
    fn test_default_config() {
        let config = EntryTypesConfig::default();
        assert!(config.registry.include_standard);
        assert!(!config.registry.hide_unknown_in_dialog);
        assert!(config.custom_types.is_empty());
        assert_eq!(config.build_registry().len(), 14);
    }

    #[test]
    fn test_serialize_config() {
        let mut config = EntryTypesConfig::default();
        config.custom_types.push(thesis());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[registry]"));
        assert!(toml_str.contains("[[custom_types]]"));
    }

    #[test]
    fn test_custom_types_registered() {
        let config = EntryTypesConfig {
            registry: RegistryConfig {
                include_standard: false,
                hide_unknown_in_dialog: false,
            },
            custom_types: vec![thesis()],
        };
        let registry = config.build_registry();
        assert_eq!(registry.len(), 1);

        let def = registry.get("thesis").unwrap();
        assert_eq!(def.kind(), EntryTypeKind::Custom);
        assert_eq!(def.required_fields(), ["bibtexkey", "author", "school"]);
        assert_eq!(def.optional_fields(), ["year"]);
    }

    #[test]
    fn test_custom_overrides_standard() {
        let mut article = thesis();
        article.name = "article".to_string();
        let config = EntryTypesConfig {
            custom_types: vec![article],
            ..Default::default()
        };
        let registry = config.build_registry();
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.get("article").unwrap().kind(), EntryTypeKind::Custom);
    }

    #[test]
    fn test_blank_custom_type_skipped() {
        let mut blank = thesis();
        blank.name = "   ".to_string();
        let config = EntryTypesConfig {
            registry: RegistryConfig {
                include_standard: false,
                hide_unknown_in_dialog: false,
            },
            custom_types: vec![blank, thesis()],
        };
        let registry = config.build_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("thesis").is_some());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = EntryTypesConfig::load_from(path.to_str()).unwrap_err();
        assert!(matches!(err, EntryTypeError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.toml");
        let path = path.to_str().unwrap();

        let mut config = EntryTypesConfig::default();
        config.registry.hide_unknown_in_dialog = true;
        config.custom_types.push(thesis());
        config.save(path).unwrap();

        let loaded = EntryTypesConfig::load_from(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }
}
