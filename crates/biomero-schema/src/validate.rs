use biomero_core::{FieldPath, FieldPathSegment, IssueKind, ValidationIssue};
use jsonschema::error::ValidationErrorKind;
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::registry::get_json_schema;

/// Checks `instance` against an embedded JSON Schema.
///
/// The schema describes canonical spellings only, so documents written with
/// internal field names fail here even though the typed validator accepts
/// them.
pub fn validate_schema_instance(schema_id: &str, instance: &Value) -> Vec<ValidationIssue> {
    let Some(schema) = get_json_schema(schema_id) else {
        return vec![registry_issue(
            format!("unknown schema id: {schema_id}"),
            "schema_registry.unknown_schema",
        )];
    };

    let schema_json: Value = match serde_json::from_str(schema.json) {
        Ok(value) => value,
        Err(err) => {
            return vec![registry_issue(
                format!("embedded schema json parse failed: {err}"),
                "schema_registry.invalid_embedded_schema",
            )];
        }
    };

    let compiled = match JSONSchema::options().compile(&schema_json) {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![registry_issue(
                format!("schema compile failed for {schema_id}: {err}"),
                "schema_registry.compile_failed",
            )];
        }
    };

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(instance) {
        for error in errors {
            let mut field_path = json_pointer_to_field_path(error.instance_path.to_string().as_str());
            if let ValidationErrorKind::Required { property } = &error.kind {
                if let Some(name) = property.as_str() {
                    field_path = field_path.key(name);
                }
            }
            issues.push(ValidationIssue::error(
                classify(&error.kind),
                field_path,
                error.to_string(),
                "json_schema.validation",
            ));
        }
    }
    ValidationIssue::sort_stable(&mut issues);
    issues
}

fn classify(kind: &ValidationErrorKind) -> IssueKind {
    match kind {
        ValidationErrorKind::Required { .. } => IssueKind::MissingRequiredField,
        ValidationErrorKind::Enum { .. } | ValidationErrorKind::Constant { .. } => {
            IssueKind::InvalidEnumValue
        }
        ValidationErrorKind::MinItems { .. } | ValidationErrorKind::UniqueItems => {
            IssueKind::UniquenessViolation
        }
        _ => IssueKind::TypeMismatch,
    }
}

fn registry_issue(message: String, reference: &str) -> ValidationIssue {
    ValidationIssue::error(IssueKind::ParseError, FieldPath::root(), message, reference)
}

fn json_pointer_to_field_path(pointer: &str) -> FieldPath {
    let segments = pointer
        .split('/')
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let decoded = raw.replace("~1", "/").replace("~0", "~");
            match decoded.parse::<usize>() {
                Ok(index) => FieldPathSegment::Index(index),
                Err(_) => FieldPathSegment::Key(decoded),
            }
        })
        .collect();
    FieldPath::from_segments(segments)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
