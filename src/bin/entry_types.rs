//! Entry Types CLI
//!
//! Lists entry types, shows their field lists and checks records against them.

use std::path::PathBuf;

use bibtex_entry_types::{
    missing_required_fields, BibDatabase, BibEntry, EntryType, EntryTypeError,
    EntryTypesConfig, KEY_FIELD,
};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "entry-types")]
#[command(about = "Inspect entry types and check records against them")]
struct Cli {
    /// Path to a config file (entry-types.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all entry types
    List {
        /// Only types offered when creating a new record
        #[arg(long)]
        dialog: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the fields of an entry type
    Show {
        /// Entry type name
        name: String,
    },

    /// Check a record against its entry type
    Check {
        /// Entry type name
        #[arg(short = 't', long = "type")]
        entry_type: String,
        /// Citation key
        #[arg(short, long)]
        key: Option<String>,
        /// Field assignment, e.g. --field title="On Things"
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref().and_then(|p| p.to_str());
    let config = EntryTypesConfig::load_from(config_path)?;
    let mut registry = config.build_registry();
    debug!(types = registry.len(), "registry ready");

    match cli.command {
        Commands::List { dialog, json } => {
            let types = if dialog {
                registry.new_entry_choices()
            } else {
                registry.sorted()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&types)?);
            } else {
                for t in types {
                    println!("{:<16} {}", t.name(), t.kind());
                }
            }
            Ok(())
        }

        Commands::Show { name } => {
            let t = registry.resolve(&name)?;
            println!("{} ({})", t.name(), t.kind());
            println!("  required:           {}", t.required_fields().join(", "));
            println!("  primary optional:   {}", t.primary_optional_fields().join(", "));
            println!("  secondary optional: {}", t.secondary_optional_fields().join(", "));
            if !t.is_visible_at_new_entry_dialog() {
                println!("  (hidden from new entry dialog)");
            }
            Ok(())
        }

        Commands::Check {
            entry_type,
            key,
            fields,
        } => {
            let mut entry = BibEntry::new(entry_type.as_str());
            if let Some(key) = key {
                entry.set_field(KEY_FIELD, key);
            }
            for assignment in &fields {
                let (name, value) = assignment
                    .split_once('=')
                    .ok_or_else(|| EntryTypeError::InvalidField(assignment.clone()))?;
                entry.set_field(name.trim(), value);
            }

            let mut database = BibDatabase::new();
            database.insert(entry.clone())?;

            let t = registry.resolve(&entry_type)?;
            if t.has_all_required_fields(&entry, &database) {
                println!("✅ {} record is complete", t.name());
                return Ok(());
            }

            println!("❌ {} record is missing required fields:", t.name());
            for field in missing_required_fields(t.required_fields(), &entry, &database) {
                println!("   └─ {}", field);
            }
            std::process::exit(1);
        }
    }
}
