//! Template store behavior tests

use cellmap::core::{FieldValidator, RejectCode};
use cellmap::error::CellmapError;
use cellmap::store::{TemplateMeta, TemplateStore};
use cellmap::types::{FieldDefinition, FieldRequest};

fn meta(name: &str) -> TemplateMeta {
    TemplateMeta {
        name: name.to_string(),
        original_name: format!("{name}.xlsx"),
        mime_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        size_bytes: 2048,
    }
}

fn validated(kind: &str, reference: &str) -> FieldDefinition {
    let validator = FieldValidator::new();
    let request = FieldRequest {
        kind: kind.to_string(),
        label: "Some field".to_string(),
        field_type: "number".to_string(),
        cell_ref: (kind == "single").then(|| reference.to_string()),
        range_ref: (kind == "range").then(|| reference.to_string()),
        ..Default::default()
    };
    validator.validate(&request, &[]).unwrap()
}

#[test]
fn test_templates_list_newest_first() {
    let store = TemplateStore::new();
    let older = store.add_template(meta("first"));
    let newer = store.add_template(meta("second"));

    let listed = store.list_templates();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
}

#[test]
fn test_field_gets_id_and_timestamp() {
    let store = TemplateStore::new();
    let template = store.add_template(meta("batch"));

    let stored = store
        .add_field(template.id, validated("single", "B5"))
        .unwrap();
    assert_eq!(stored.definition.mapping.reference(), "B5");
    assert!(stored.created_at >= template.created_at);

    let fields = store.list_fields(template.id).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].id, stored.id);
}

#[test]
fn test_duplicate_recheck_is_authoritative() {
    let store = TemplateStore::new();
    let template = store.add_template(meta("batch"));

    store
        .add_field(template.id, validated("range", "C10:C29"))
        .unwrap();
    // Insert the same reference again without consulting the validator's
    // snapshot check, the way a racing second caller would.
    let err = store
        .add_field(template.id, validated("range", "C10:C29"))
        .unwrap_err();
    match err {
        CellmapError::Rejected(rejection) => {
            assert_eq!(rejection.code, RejectCode::DuplicateRangeRef);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn test_same_reference_across_kinds_is_not_a_duplicate() {
    let store = TemplateStore::new();
    let template = store.add_template(meta("batch"));

    store
        .add_field(template.id, validated("single", "B5"))
        .unwrap();
    store
        .add_field(template.id, validated("range", "B5:B5"))
        .unwrap();
    assert_eq!(store.list_fields(template.id).unwrap().len(), 2);
}

#[test]
fn test_duplicates_are_scoped_per_template() {
    let store = TemplateStore::new();
    let first = store.add_template(meta("batch-a"));
    let second = store.add_template(meta("batch-b"));

    store.add_field(first.id, validated("single", "B5")).unwrap();
    // Same cell on another template is fine.
    store.add_field(second.id, validated("single", "B5")).unwrap();
}
