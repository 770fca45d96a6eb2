use std::path::Path;

use roodeck::role::Group;
use roodeck::store::RoleStore;
use roodeck::transfer::{self, EXPORT_FILE_NAME, ImportError};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn import_merges_into_the_seeded_store_and_selects_the_first_imported() {
    let mut store = RoleStore::default();
    let batch = transfer::parse_roles(&fixture("roles_batch.json")).unwrap();
    assert_eq!(batch.len(), 2);

    let merged = transfer::merge_roles(&store.roles, &batch);
    store.apply_import(merged, batch[0].clone());

    // code-writer is replaced in place, doc-scribe appended after the seeds.
    let slugs: Vec<_> = store
        .roles
        .iter()
        .map(|r| r.slug.as_deref().unwrap())
        .collect();
    assert_eq!(slugs, ["roo-commander", "code-writer", "doc-scribe"]);
    assert_eq!(store.roles[1].name.as_deref(), Some("💻 Code Writer II"));
    assert_eq!(
        store.roles[1].groups.as_deref(),
        Some(&[Group::Read, Group::Edit, Group::Command][..])
    );
    assert_eq!(store.current.slug.as_deref(), Some("code-writer"));
}

#[test]
fn a_single_object_file_imports_as_a_one_element_batch() {
    let batch = transfer::parse_roles(&fixture("single_role.json")).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].slug.as_deref(), Some("reviewer"));
    assert_eq!(batch[0].custom_instructions, None);
}

#[test]
fn one_invalid_element_rejects_the_whole_batch_with_a_full_report() {
    let err = transfer::parse_roles(&fixture("partially_invalid.json")).unwrap_err();
    let ImportError::Schema(report) = err else {
        panic!("expected a schema rejection, got: {err}");
    };
    assert_eq!(
        report,
        "Prompt at index 1: Slug can only contain letters, numbers, and hyphens (field: slug); \
         Prompt at index 2: Name is required (field: name)"
    );
}

#[test]
fn unknown_fields_are_stripped_and_the_file_still_imports() {
    let batch = transfer::parse_roles(&fixture("unknown_field.json")).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].slug.as_deref(), Some("sneaky"));
    // The foreign key is gone; it was never mapped onto a known field.
    assert_eq!(batch[0].groups, None);
    let back = serde_json::to_string(&batch).unwrap();
    assert!(!back.contains("permissions"));
}

#[test]
fn export_import_round_trips_the_seeded_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = RoleStore::default();

    let path = transfer::export_roles(&store.roles, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));

    let text = std::fs::read_to_string(&path).unwrap();
    let reimported = transfer::parse_roles(&text).unwrap();
    assert_eq!(reimported, store.roles);
}

#[test]
fn rejected_imports_leave_the_store_untouched() {
    let mut store = RoleStore::default();
    let before = store.roles.clone();

    if let Ok(batch) = transfer::parse_roles(&fixture("partially_invalid.json")) {
        let merged = transfer::merge_roles(&store.roles, &batch);
        store.apply_import(merged, batch[0].clone());
    }

    assert_eq!(store.roles, before);
    assert_eq!(store.current.slug.as_deref(), Some("roo-commander"));
}
