use super::{validate_manifest, validate_manifest_with_options};
use crate::documents::{ContainerType, DefaultValue, ParameterType, ProblemClass};
use crate::options::{Policy, ValidateOptions};
use crate::parse::{parse_document, DocumentFormat};
use biomero_core::{IssueKind, IssueSeverity, ValidationIssue};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

fn minimal_manifest() -> Value {
    json!({
        "name": "Threshold-Python",
        "description": "Global threshold",
        "schema-version": "0.1.0",
        "citations": [{ "name": "scikit-image", "license": "BSD-3-Clause" }],
        "container-image": { "image": "biomero/w_threshold-python", "type": "oci" },
        "inputs": [],
        "command-line": "python run.py"
    })
}

fn load_fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()));
    parse_document(&text, DocumentFormat::Auto).expect("fixture must decode")
}

fn has_issue(issues: &[ValidationIssue], kind: IssueKind, path: &str) -> bool {
    issues
        .iter()
        .any(|issue| issue.kind == kind && issue.field_path.to_string() == path)
}

#[test]
fn minimal_manifest_gets_every_default() {
    let manifest = validate_manifest(&minimal_manifest()).expect("minimal manifest is valid");
    assert!(manifest.authors.is_empty());
    assert!(manifest.institutions.is_empty());
    assert!(manifest.outputs.is_empty());
    assert_eq!(manifest.problem_class, None);
    assert_eq!(manifest.configuration, None);
    assert_eq!(manifest.citations[0].doi, "");
    assert_eq!(manifest.citations[0].description, "");
    assert_eq!(manifest.container_image.container_type, ContainerType::Oci);
    assert_eq!(manifest.container_image.platforms, None);
}

#[test]
fn each_missing_required_field_is_named() {
    for field in [
        "name",
        "description",
        "schema-version",
        "citations",
        "container-image",
        "inputs",
        "command-line",
    ] {
        let mut document = minimal_manifest();
        document.as_object_mut().expect("object").remove(field);
        let issues = validate_manifest(&document).expect_err("must fail without required field");
        assert!(
            has_issue(&issues, IssueKind::MissingRequiredField, field),
            "missing `{field}` not reported: {issues:?}"
        );
    }
}

#[test]
fn empty_citations_is_a_uniqueness_violation() {
    let mut document = minimal_manifest();
    document["citations"] = json!([]);
    let issues = validate_manifest(&document).expect_err("citations must not be empty");
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "citations"));
}

#[test]
fn null_required_field_counts_as_missing() {
    let mut document = minimal_manifest();
    document["command-line"] = Value::Null;
    let issues = validate_manifest(&document).expect_err("null command-line must fail");
    assert!(has_issue(&issues, IssueKind::MissingRequiredField, "command-line"));
}

#[test]
fn non_object_document_is_a_type_mismatch() {
    let issues = validate_manifest(&json!(["not", "a", "manifest"])).expect_err("must fail");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::TypeMismatch);
    assert!(issues[0].field_path.is_root());
}

#[test]
fn affiliation_must_reference_an_institution() {
    let mut document = minimal_manifest();
    document["authors"] = json!([{ "name": "Ada", "affiliations": ["inst-x"] }]);
    document["institutions"] = json!([{ "id": "inst-y" }]);
    let issues = validate_manifest(&document).expect_err("unknown affiliation must fail");
    assert!(has_issue(
        &issues,
        IssueKind::CrossFieldConstraintViolation,
        "authors[0].affiliations[0]"
    ));

    document["institutions"] = json!([{ "id": "inst-y" }, { "id": "inst-x" }]);
    let manifest = validate_manifest(&document).expect("known affiliation passes");
    assert_eq!(manifest.authors[0].affiliations, vec!["inst-x".to_string()]);
    assert_eq!(manifest.institutions[1].name, "inst-x");
}

#[test]
fn affiliations_are_not_checked_against_a_broken_institution_list() {
    let mut document = minimal_manifest();
    document["authors"] = json!([{ "name": "Ada", "affiliations": ["inst-x"] }]);
    document["institutions"] = json!([{ "name": "no id here" }]);
    let issues = validate_manifest(&document).expect_err("institution without id must fail");
    assert!(has_issue(&issues, IssueKind::MissingRequiredField, "institutions[0].id"));
    assert!(!issues
        .iter()
        .any(|issue| issue.kind == IssueKind::CrossFieldConstraintViolation));
}

#[test]
fn duplicate_ids_are_reported_per_list() {
    let mut document = minimal_manifest();
    document["inputs"] = json!([
        { "id": "threshold", "type": "Number" },
        { "id": "threshold", "type": "float" }
    ]);
    document["outputs"] = json!([
        { "id": "count", "type": "Number" },
        { "id": "count", "type": "String" }
    ]);
    document["institutions"] = json!([{ "id": "irb" }, { "id": "irb" }]);
    document["command-line"] = json!("run [THRESHOLD]");

    let issues = validate_manifest(&document).expect_err("duplicate ids must fail");
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "inputs[1].id"));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "outputs[1].id"));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "institutions[1].id"));
}

#[test]
fn same_id_in_inputs_and_outputs_is_allowed() {
    let mut document = minimal_manifest();
    document["inputs"] = json!([{ "id": "count", "type": "Number" }]);
    document["outputs"] = json!([{ "id": "count", "type": "Number" }]);
    document["command-line"] = json!("run [COUNT]");
    validate_manifest(&document).expect("ids are unique per list");
}

#[test]
fn enum_failures_name_value_and_allowed_set() {
    let mut document = minimal_manifest();
    document["problem-class"] = json!("cell-painting");
    let issues = validate_manifest(&document).expect_err("unknown problem class must fail");
    let issue = issues
        .iter()
        .find(|issue| issue.kind == IssueKind::InvalidEnumValue)
        .expect("enum issue");
    assert_eq!(issue.field_path.to_string(), "problem-class");
    assert!(issue.message.contains("cell-painting"));
    assert!(issue.message.contains("object-tracking"));
    assert_eq!(issue.related.as_ref().expect("related")["value"], json!("cell-painting"));
}

#[test]
fn internal_spellings_are_accepted() {
    let manifest =
        validate_manifest(&load_fixture("internal-names.json")).expect("fixture is valid");
    assert_eq!(manifest.schema_version, "1.2.0");
    assert_eq!(manifest.problem_class, Some(ProblemClass::ObjectSegmentation));
    assert_eq!(manifest.container_image.container_type, ContainerType::Singularity);
    let configuration = manifest.configuration.as_ref().expect("configuration");
    assert_eq!(configuration.input_folder, "/in");
    let resources = configuration.resources.as_ref().expect("resources");
    assert_eq!(resources.ram_min, 1024.0);
    assert_eq!(resources.cores_min, 4.0);
    assert!(resources.cpu_avx2);
    assert!(!resources.cpu_avx);
    assert!(!resources.gpu);
    assert_eq!(resources.cuda_requirements, None);
    assert_eq!(manifest.inputs[0].default_value, Some(DefaultValue::Integer(30)));
    assert_eq!(manifest.inputs[0].value_key, "[DIAMETER]");
    assert_eq!(manifest.inputs[1].parameter_type, ParameterType::File);
    assert_eq!(manifest.inputs[1].command_line_flag, "--masks");
}

#[test]
fn canonical_spelling_wins_over_internal_spelling() {
    let mut document = minimal_manifest();
    document["schema_version"] = json!("9.9.9");
    let report = validate_manifest_with_options(&document, &ValidateOptions::default());
    let manifest = report.manifest.as_ref().expect("still valid");
    assert_eq!(manifest.schema_version, "0.1.0");
    assert!(report.warnings().any(|issue| {
        issue.reference.as_deref() == Some("field.duplicate_spelling")
            && issue.field_path.to_string() == "schema-version"
    }));
}

#[test]
fn unknown_fields_follow_the_configured_policy() {
    let mut document = minimal_manifest();
    document["maintainer"] = json!("someone");
    document["container-image"]["registry"] = json!("ghcr.io");

    let ignored = validate_manifest_with_options(&document, &ValidateOptions::default());
    assert!(ignored.is_valid());
    assert!(ignored.issues.is_empty());

    let warn = ValidateOptions {
        unknown_fields: Policy::Warn,
        ..ValidateOptions::default()
    };
    let warned = validate_manifest_with_options(&document, &warn);
    assert!(warned.is_valid());
    assert_eq!(warned.warnings().count(), 2);

    let reject = ValidateOptions {
        unknown_fields: Policy::Reject,
        ..ValidateOptions::default()
    };
    let rejected = validate_manifest_with_options(&document, &reject);
    assert!(!rejected.is_valid());
    assert!(has_issue(&rejected.issues, IssueKind::UnknownField, "maintainer"));
    assert!(has_issue(
        &rejected.issues,
        IssueKind::UnknownField,
        "container-image.registry"
    ));
}

#[test]
fn conventions_are_advisory_by_default() {
    let mut document = minimal_manifest();
    document["container-image"]["image"] = json!("Biomero/W_Threshold");
    document["schema-version"] = json!("v1");
    document["inputs"] = json!([{ "id": "sigma", "type": "float" }]);
    document["command-line"] = json!("python run.py [UNDECLARED]");

    let report = validate_manifest_with_options(&document, &ValidateOptions::default());
    assert!(report.is_valid());
    let warnings: Vec<_> = report.warnings().collect();
    assert!(warnings.iter().all(|issue| issue.kind == IssueKind::ConventionViolation));
    assert!(has_issue(&report.issues, IssueKind::ConventionViolation, "container-image.image"));
    assert!(has_issue(&report.issues, IssueKind::ConventionViolation, "schema-version"));
    assert!(has_issue(&report.issues, IssueKind::ConventionViolation, "inputs[0].value-key"));
    assert!(has_issue(&report.issues, IssueKind::ConventionViolation, "command-line"));

    let strict = validate_manifest_with_options(&document, &ValidateOptions::strict());
    assert!(!strict.is_valid());
    assert_eq!(strict.errors().count(), 4);
}

#[test]
fn every_independent_problem_is_collected() {
    let issues =
        validate_manifest(&load_fixture("many-problems.yaml")).expect_err("fixture is invalid");

    assert!(has_issue(&issues, IssueKind::MissingRequiredField, "schema-version"));
    assert!(has_issue(&issues, IssueKind::TypeMismatch, "description"));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "citations"));
    assert!(has_issue(&issues, IssueKind::InvalidEnumValue, "problem-class"));
    assert!(has_issue(&issues, IssueKind::InvalidEnumValue, "container-image.type"));
    assert!(has_issue(
        &issues,
        IssueKind::CrossFieldConstraintViolation,
        "authors[0].affiliations[0]"
    ));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "inputs[1].id"));
    assert!(has_issue(&issues, IssueKind::InvalidEnumValue, "inputs[2].format"));
    assert!(has_issue(
        &issues,
        IssueKind::CrossFieldConstraintViolation,
        "inputs[2].sub-type"
    ));
    assert!(has_issue(
        &issues,
        IssueKind::CrossFieldConstraintViolation,
        "inputs[3].format"
    ));

    let severities: Vec<IssueSeverity> = issues.iter().map(|issue| issue.severity).collect();
    let mut sorted = severities.clone();
    sorted.sort();
    assert_eq!(severities, sorted, "errors come before warnings");
}

#[test]
fn duplicate_ids_are_reported_even_when_an_item_is_invalid() {
    let mut document = minimal_manifest();
    document["inputs"] = json!([
        { "id": "threshold", "type": "Number", "description": 5 },
        { "id": "threshold", "type": "Number" }
    ]);
    document["institutions"] = json!([{ "id": "irb", "name": 7 }, { "id": "irb" }]);
    document["command-line"] = json!("run [THRESHOLD]");

    let issues = validate_manifest(&document).expect_err("must fail");
    assert!(has_issue(&issues, IssueKind::TypeMismatch, "inputs[0].description"));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "inputs[1].id"));
    assert!(has_issue(&issues, IssueKind::TypeMismatch, "institutions[0].name"));
    assert!(has_issue(&issues, IssueKind::UniquenessViolation, "institutions[1].id"));
}

#[test]
fn unknown_key_with_a_dot_gets_an_unambiguous_path() {
    let mut document = minimal_manifest();
    document["x.y"] = json!(1);
    let options = ValidateOptions {
        unknown_fields: Policy::Reject,
        ..ValidateOptions::default()
    };
    let report = validate_manifest_with_options(&document, &options);
    assert!(has_issue(&report.issues, IssueKind::UnknownField, r#"["x.y"]"#));
}
