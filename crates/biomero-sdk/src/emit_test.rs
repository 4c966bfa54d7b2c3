use super::{to_json_string, to_json_string_pretty, to_value, to_yaml_string};
use crate::documents::WorkflowSchema;
use crate::parse::{parse_document, parse_manifest, DocumentFormat};
use crate::validate::validate_manifest;
use biomero_schema::validate_schema_instance;
use biomero_schema::versions::SCHEMA_WORKFLOW_MANIFEST;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()))
}

/// Every value written in `original` appears unchanged in `emitted`; the
/// emitted tree may add defaults.
fn assert_contained(original: &Value, emitted: &Value, path: &str) {
    match (original, emitted) {
        (Value::Object(original), Value::Object(emitted)) => {
            for (key, value) in original {
                let child = emitted
                    .get(key)
                    .unwrap_or_else(|| panic!("`{path}.{key}` dropped on emit"));
                assert_contained(value, child, &format!("{path}.{key}"));
            }
        }
        (Value::Array(original), Value::Array(emitted)) => {
            assert_eq!(original.len(), emitted.len(), "length of `{path}` changed");
            for (index, (value, child)) in original.iter().zip(emitted).enumerate() {
                assert_contained(value, child, &format!("{path}[{index}]"));
            }
        }
        (Value::Number(original), Value::Number(emitted)) => {
            assert_eq!(original.as_f64(), emitted.as_f64(), "`{path}` changed");
        }
        _ => assert_eq!(original, emitted, "`{path}` changed"),
    }
}

#[test]
fn emitted_tree_contains_every_written_value() {
    let text = fixture("nuclei-tracking.yaml");
    let original = parse_document(&text, DocumentFormat::Yaml)
        .expect("fixture decodes");
    let manifest = validate_manifest(&original).expect("fixture is valid");

    let emitted = to_value(&manifest).expect("emit");
    assert_contained(&original, &emitted, "$");
    assert_eq!(emitted["configuration"]["output-folder"], json!("/outputs"));
    assert_eq!(emitted["inputs"][1]["value-key"], json!("[THRESHOLD]"));
    assert!(emitted["inputs"][1].get("format").is_none());
}

#[test]
fn internal_spellings_are_emitted_canonically() {
    let manifest = parse_manifest(&fixture("internal-names.json")).expect("fixture is valid");
    let emitted = to_value(&manifest).expect("emit");
    let root = emitted.as_object().expect("object");
    assert!(root.contains_key("schema-version"));
    assert!(!root.contains_key("schema_version"));
    assert_eq!(emitted["configuration"]["resources"]["ram-min"], json!(1024.0));
    assert_eq!(emitted["inputs"][0]["default-value"], json!(30));
    assert_eq!(emitted["inputs"][0]["set-by-server"], json!(false));
}

#[test]
fn emitted_tree_satisfies_the_published_schema() {
    for name in ["nuclei-tracking.yaml", "internal-names.json"] {
        let manifest = parse_manifest(&fixture(name)).expect("fixture is valid");
        let emitted = to_value(&manifest).expect("emit");
        let issues = validate_schema_instance(SCHEMA_WORKFLOW_MANIFEST, &emitted);
        assert!(issues.is_empty(), "{name}: {issues:?}");
    }
}

#[test]
fn emitted_text_parses_back_to_the_same_manifest() {
    let manifest = parse_manifest(&fixture("nuclei-tracking.yaml")).expect("fixture is valid");

    let yaml = to_yaml_string(&manifest).expect("yaml");
    assert_eq!(parse_manifest(&yaml).expect("yaml reparses"), manifest);

    let json = to_json_string(&manifest).expect("json");
    assert_eq!(parse_manifest(&json).expect("json reparses"), manifest);

    let pretty = to_json_string_pretty(&manifest).expect("pretty json");
    assert!(pretty.contains('\n'));
    assert_eq!(parse_manifest(&pretty).expect("pretty reparses"), manifest);
}

#[test]
fn normalized_manifest_deserializes_directly() {
    let manifest = parse_manifest(&fixture("internal-names.json")).expect("fixture is valid");
    let json = to_json_string(&manifest).expect("json");
    let decoded: WorkflowSchema = serde_json::from_str(&json).expect("serde decode");
    assert_eq!(decoded, manifest);
}
