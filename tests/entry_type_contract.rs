//! Entry-Type Contract Tests
//!
//! Exercises the public API the way a parser and a validator would use it.

use std::cmp::Ordering;

use bibtex_entry_types::{
    BibDatabase, BibEntry, EntryType, EntryTypeDef, EntryTypeKind, EntryTypeRegistry,
    EntryTypesConfig, KnownEntryType, UnknownEntryType, KEY_FIELD,
};

fn assert_send_sync<T: Send + Sync>() {}

// =============================================================================
// Unknown Entry Type
// =============================================================================

#[test]
fn test_unknown_type_contract() {
    for name in ["article", "Thesis", "x-custom", "ü"] {
        let t = UnknownEntryType::new(name);
        assert_eq!(t.name(), name);
        assert_eq!(t.required_fields(), [KEY_FIELD]);
        assert!(t.optional_fields().is_empty());
        assert!(t.secondary_optional_fields().is_empty());
        assert_eq!(t.primary_optional_fields(), t.optional_fields());
        assert_eq!(t.required_fields_for_customization(), t.required_fields());
        assert_eq!(t.kind(), EntryTypeKind::Unknown);
        assert!(t.is_visible_at_new_entry_dialog());
    }
}

#[test]
fn test_unknown_type_accepts_any_record() {
    let t = UnknownEntryType::new("thesis");
    let mut db = BibDatabase::new();

    let empty = BibEntry::new("thesis");
    let mut full = BibEntry::new("book").with_key("k");
    full.set_field("title", "T");
    db.insert(full.clone()).unwrap();

    assert!(t.has_all_required_fields(&empty, &db));
    assert!(t.has_all_required_fields(&full, &db));
    assert!(t.has_all_required_fields(&empty, &BibDatabase::new()));
}

#[test]
fn test_unknown_type_membership() {
    let t = UnknownEntryType::new("x");
    assert!(t.is_required("bibtexkey"));
    assert!(!t.is_required("title"));
    assert!(!t.is_required("BIBTEXKEY"));
    for field in ["anything", "bibtexkey", "", "title"] {
        assert!(!t.is_optional(field));
    }
}

#[test]
fn test_unknown_type_ordering() {
    let alpha = UnknownEntryType::new("alpha");
    let beta = UnknownEntryType::new("beta");
    assert_eq!(alpha.compare(&beta), Ordering::Less);
    assert_eq!(beta.compare(&alpha), Ordering::Greater);
    assert_eq!(
        UnknownEntryType::new("a").compare(&UnknownEntryType::new("a")),
        Ordering::Equal
    );
}

#[test]
fn test_field_views_are_not_shared() {
    let t = UnknownEntryType::new("x");
    let mut required = t.required_fields().to_vec();
    required.retain(|f| f != KEY_FIELD);
    let mut optional = t.optional_fields().to_vec();
    optional.push("title".to_string());

    assert_eq!(t.required_fields(), [KEY_FIELD]);
    assert!(t.optional_fields().is_empty());
}

#[test]
fn test_list_output_has_uniform_shape() {
    let mut registry = EntryTypeRegistry::with_standard_types();
    registry.resolve("zine").unwrap();

    let json = serde_json::to_value(registry.sorted()).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 15);
    for item in items {
        assert!(item["kind"].is_string());
        assert!(item["required"].is_array());
    }
    let zine = items.iter().find(|i| i["name"] == "zine").unwrap();
    assert_eq!(zine["kind"], "unknown");
}

#[test]
fn test_descriptors_are_shareable() {
    assert_send_sync::<UnknownEntryType>();
    assert_send_sync::<KnownEntryType>();
    assert_send_sync::<EntryTypeDef>();
    assert_send_sync::<EntryTypeRegistry>();

    let t = std::sync::Arc::new(UnknownEntryType::new("shared"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let t = t.clone();
            std::thread::spawn(move || t.is_required(KEY_FIELD) && t.name() == "shared")
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// =============================================================================
// Polymorphic Use
// =============================================================================

#[test]
fn test_mixed_descriptors_sort_by_name() {
    let mut types: Vec<Box<dyn EntryType>> = vec![
        Box::new(UnknownEntryType::new("zine")),
        Box::new(KnownEntryType::builder("article", EntryTypeKind::Bibtex).build()),
        Box::new(UnknownEntryType::new("Manual")),
    ];
    types.sort_by(|a, b| a.compare(b.as_ref()));

    let names: Vec<_> = types.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Manual", "article", "zine"]);
}

#[test]
fn test_crossref_satisfies_known_type() {
    let registry = EntryTypeRegistry::with_standard_types();
    let mut db = BibDatabase::new();

    let mut proc = BibEntry::new("proceedings").with_key("proc");
    proc.set_field("title", "Proceedings of Things");
    proc.set_field("booktitle", "Proceedings of Things");
    proc.set_field("year", "2001");
    db.insert(proc).unwrap();

    let mut paper = BibEntry::new("inproceedings").with_key("paper");
    paper.set_field("author", "Smith");
    paper.set_field("title", "A Paper");
    db.insert(paper.clone()).unwrap();

    let t = registry.descriptor_for(&paper).unwrap();
    assert!(!t.has_all_required_fields(&paper, &db));
    let incomplete = registry.incomplete_entries(&db);
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].citation_key.as_deref(), Some("paper"));

    let mut db = BibDatabase::new();
    let mut proc = BibEntry::new("proceedings").with_key("proc");
    proc.set_field("title", "Proceedings of Things");
    proc.set_field("booktitle", "Proceedings of Things");
    proc.set_field("year", "2001");
    db.insert(proc).unwrap();
    paper.set_field("crossref", "proc");
    db.insert(paper.clone()).unwrap();

    assert!(t.has_all_required_fields(&paper, &db));
    assert!(registry.incomplete_entries(&db).is_empty());
}

// =============================================================================
// Placeholder Resolution
// =============================================================================

#[test]
fn test_placeholder_then_definition() {
    let config: EntryTypesConfig = toml::from_str(
        r#"
        [registry]
        include_standard = true

        [[custom_types]]
        name = "thesis"
        required = ["author", "title", "school"]
        "#,
    )
    .unwrap();

    let mut db = BibDatabase::new();
    let mut entry = BibEntry::new("Thesis").with_key("t1");
    entry.set_field("author", "Smith");
    db.insert(entry).unwrap();

    let mut registry = EntryTypeRegistry::with_standard_types();
    registry.resolve_all(&db).unwrap();
    assert_eq!(registry.unknown_names(), vec!["Thesis"]);
    assert!(registry.incomplete_entries(&db).is_empty());

    for custom in &config.custom_types {
        registry.register(custom.to_entry_type()).unwrap();
    }
    assert!(registry.unknown_names().is_empty());
    let incomplete = registry.incomplete_entries(&db);
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].citation_key.as_deref(), Some("t1"));
}
