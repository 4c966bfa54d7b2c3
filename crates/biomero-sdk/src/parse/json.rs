use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use serde_json::Value;

pub(crate) fn parse_json(input: &str) -> Result<Value, Vec<ValidationIssue>> {
    serde_json::from_str::<Value>(input).map_err(|err| {
        vec![ValidationIssue::error(
            IssueKind::ParseError,
            FieldPath::root(),
            format!("json parse failed at line {} column {}: {err}", err.line(), err.column()),
            "json.parse_error",
        )]
    })
}
