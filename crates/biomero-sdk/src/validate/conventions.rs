use crate::documents::{ContainerImage, OutputParameter, Parameter};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

const SEMVER_PATTERN: &str = r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$";
const PLACEHOLDER_PATTERN: &str = r"\[[A-Z0-9_]+\]";

fn semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(SEMVER_PATTERN).expect("valid regex"))
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"))
}

pub(crate) fn check_image_name(
    container_image: &ContainerImage,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) {
    let image = container_image.image.as_str();
    if image == image.to_lowercase() {
        return;
    }
    options.image_name_case.report(
        IssueKind::ConventionViolation,
        FieldPath::root().key("container-image").key("image"),
        format!("container image `{image}` should be lowercase"),
        "container_image.image.lowercase",
        issues,
    );
}

pub(crate) fn check_schema_version(
    schema_version: &str,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) {
    if semver_pattern().is_match(schema_version) {
        return;
    }
    options.schema_version_format.report(
        IssueKind::ConventionViolation,
        FieldPath::root().key("schema-version"),
        format!("schema-version `{schema_version}` is not MAJOR.MINOR.PATCH"),
        "schema_version.semver",
        issues,
    );
}

/// Input value-keys missing from the template, and bracketed placeholders in
/// the template that no parameter declares.
pub(crate) fn check_command_line(
    command_line: &str,
    inputs: &[(usize, Parameter)],
    outputs: &[(usize, OutputParameter)],
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) {
    let policy = options.command_line_references;
    for (index, input) in inputs {
        if command_line.contains(input.value_key.as_str()) {
            continue;
        }
        policy.report(
            IssueKind::ConventionViolation,
            FieldPath::root().key("inputs").index(*index).key("value-key"),
            format!(
                "value-key `{}` of input `{}` does not appear in command-line",
                input.value_key, input.id
            ),
            "command_line.value_key_unreferenced",
            issues,
        );
    }

    let declared: BTreeSet<&str> = inputs
        .iter()
        .map(|(_, input)| input.value_key.as_str())
        .chain(outputs.iter().map(|(_, output)| output.value_key.as_str()))
        .collect();
    let mut reported = BTreeSet::new();
    for placeholder in placeholder_pattern().find_iter(command_line) {
        let placeholder = placeholder.as_str();
        if declared.contains(placeholder) || !reported.insert(placeholder) {
            continue;
        }
        policy.report(
            IssueKind::ConventionViolation,
            FieldPath::root().key("command-line"),
            format!("placeholder `{placeholder}` matches no parameter value-key"),
            "command_line.placeholder_undeclared",
            issues,
        );
    }
}

#[cfg(test)]
#[path = "conventions_test.rs"]
mod tests;
