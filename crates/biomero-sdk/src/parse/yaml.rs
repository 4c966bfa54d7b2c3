use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use serde_json::{json, Value};

/// Duplicate mapping keys are rejected by the YAML decoder itself and come
/// back as a `yaml.duplicate_key` issue.
pub(crate) fn parse_yaml(input: &str) -> Result<Value, Vec<ValidationIssue>> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(input).map_err(|err| {
        let message = err.to_string();
        let reference = if message.to_ascii_lowercase().contains("duplicate") {
            "yaml.duplicate_key"
        } else {
            "yaml.parse_error"
        };
        let mut issue = ValidationIssue::error(
            IssueKind::ParseError,
            FieldPath::root(),
            format!("yaml parse failed: {message}"),
            reference,
        );
        if let Some(location) = err.location() {
            issue = issue.with_related(json!({
                "line": location.line(),
                "column": location.column(),
            }));
        }
        vec![issue]
    })?;

    let mut issues = Vec::new();
    find_non_finite_numbers(&yaml_value, FieldPath::root(), &mut issues);
    if !issues.is_empty() {
        ValidationIssue::sort_stable(&mut issues);
        return Err(issues);
    }

    serde_json::to_value(yaml_value).map_err(|err| {
        vec![ValidationIssue::error(
            IssueKind::ParseError,
            FieldPath::root(),
            format!("yaml-to-json conversion failed: {err}"),
            "yaml.to_json_error",
        )]
    })
}

/// `.nan` and `.inf` have no JSON form and would otherwise turn into `null`.
fn find_non_finite_numbers(
    value: &serde_yaml::Value,
    path: FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    match value {
        serde_yaml::Value::Number(number) => {
            let Some(number) = number.as_f64().filter(|number| !number.is_finite()) else {
                return;
            };
            issues.push(ValidationIssue::error(
                IssueKind::ParseError,
                path,
                format!("`{number}` is not a finite number"),
                "yaml.non_finite_number",
            ));
        }
        serde_yaml::Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                find_non_finite_numbers(item, path.index(index), issues);
            }
        }
        serde_yaml::Value::Mapping(mapping) => {
            for (key, item) in mapping {
                let key = match key {
                    serde_yaml::Value::String(key) => key.clone(),
                    serde_yaml::Value::Number(key) => key.to_string(),
                    serde_yaml::Value::Bool(key) => key.to_string(),
                    _ => continue,
                };
                find_non_finite_numbers(item, path.key(key), issues);
            }
        }
        serde_yaml::Value::Tagged(tagged) => find_non_finite_numbers(&tagged.value, path, issues),
        serde_yaml::Value::Null | serde_yaml::Value::Bool(_) | serde_yaml::Value::String(_) => {}
    }
}
