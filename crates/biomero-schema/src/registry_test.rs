use crate::versions::SCHEMA_WORKFLOW_MANIFEST;
use crate::{get_json_schema, known_schema_ids};
use serde_json::Value;

#[test]
fn registry_returns_workflow_manifest_schema() {
    let schema = get_json_schema(SCHEMA_WORKFLOW_MANIFEST).expect("schema must exist");
    let parsed: Value = serde_json::from_str(schema.json).expect("embedded schema must be json");
    assert_eq!(parsed["type"], "object");
    assert!(parsed["required"]
        .as_array()
        .expect("required list")
        .iter()
        .any(|field| field == "schema-version"));
}

#[test]
fn every_known_id_resolves() {
    for id in known_schema_ids() {
        assert!(get_json_schema(id).is_some(), "{id} must resolve");
    }
    assert!(get_json_schema("biomero/unknown").is_none());
}
