use super::configuration::read_configuration;
use super::container::read_container_image;
use super::conventions::{check_command_line, check_image_name, check_schema_version};
use super::metadata::{read_author, read_citation, read_institution};
use super::parameter::{read_output_parameter, read_parameter};
use super::reader::{type_mismatch, ErrorMark, Field, ObjectReader};
use super::report::ValidationReport;
use crate::documents::{Author, Institution, ProblemClass, WorkflowSchema};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use serde_json::{json, Value};
use std::collections::{BTreeSet, HashMap};

const NAME: Field = Field::plain("name");
const DESCRIPTION: Field = Field::plain("description");
const SCHEMA_VERSION: Field = Field::aliased("schema-version", "schema_version");
const AUTHORS: Field = Field::plain("authors");
const INSTITUTIONS: Field = Field::plain("institutions");
const CITATIONS: Field = Field::plain("citations");
const PROBLEM_CLASS: Field = Field::aliased("problem-class", "problem_class");
const CONTAINER_IMAGE: Field = Field::aliased("container-image", "container_image");
const CONFIGURATION: Field = Field::plain("configuration");
const INPUTS: Field = Field::plain("inputs");
const OUTPUTS: Field = Field::plain("outputs");
const COMMAND_LINE: Field = Field::aliased("command-line", "command_line");

type ItemReader<T> =
    fn(&Value, FieldPath, &ValidateOptions, &mut Vec<ValidationIssue>) -> Option<T>;

/// Items of one list field that passed their own checks, keyed by position.
struct ListItems<T> {
    items: Vec<(usize, T)>,
    /// String `id` of every object item, valid or not.
    ids: Vec<(usize, String)>,
    /// Every item passed; cross-entity checks against this list are sound.
    complete: bool,
}

impl<T> ListItems<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            ids: Vec::new(),
            complete: true,
        }
    }

    fn ids(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ids.iter().map(|(index, id)| (*index, id.as_str()))
    }

    fn into_values(self) -> Vec<T> {
        self.items.into_iter().map(|(_, item)| item).collect()
    }
}

/// Validates a document tree with default options.
pub fn validate_manifest(document: &Value) -> Result<WorkflowSchema, Vec<ValidationIssue>> {
    validate_manifest_with_options(document, &ValidateOptions::default()).into_result()
}

/// Validates a document tree, collecting every independent problem.
pub fn validate_manifest_with_options(
    document: &Value,
    options: &ValidateOptions,
) -> ValidationReport {
    let mut issues = Vec::new();
    let manifest = read_manifest(document, options, &mut issues);
    let mut report = ValidationReport::from_issues(issues);
    let error_count = report.errors().count();
    tracing::debug!(
        errors = error_count,
        warnings = report.warnings().count(),
        "workflow manifest validated"
    );
    if error_count == 0 {
        report.manifest = manifest;
    }
    report
}

fn read_manifest(
    document: &Value,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<WorkflowSchema> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(document, FieldPath::root(), issues)?;

    let name = reader.required_string(NAME, issues);
    let description = reader.required_string(DESCRIPTION, issues);
    let schema_version = reader.required_string(SCHEMA_VERSION, issues);
    let authors = read_list(&mut reader, AUTHORS, false, read_author, options, issues);
    let institutions = read_list(
        &mut reader,
        INSTITUTIONS,
        false,
        read_institution,
        options,
        issues,
    );
    let citations = read_list(&mut reader, CITATIONS, true, read_citation, options, issues);
    let problem_class = reader.optional_literal::<ProblemClass>(PROBLEM_CLASS, issues);
    let container_image = reader.required(CONTAINER_IMAGE, issues).and_then(|image| {
        read_container_image(image, reader.field_path(CONTAINER_IMAGE), options, issues)
    });
    let configuration = reader.lookup(CONFIGURATION, issues).and_then(|configuration| {
        read_configuration(
            configuration,
            reader.field_path(CONFIGURATION),
            options,
            issues,
        )
    });
    let inputs = read_list(&mut reader, INPUTS, true, read_parameter, options, issues);
    let outputs = read_list(
        &mut reader,
        OUTPUTS,
        false,
        read_output_parameter,
        options,
        issues,
    );
    let command_line = reader.required_string(COMMAND_LINE, issues);
    reader.finish(options.unknown_fields, issues);

    if let Some(citations) = &citations {
        if citations.complete && citations.items.is_empty() {
            issues.push(ValidationIssue::error(
                IssueKind::UniquenessViolation,
                FieldPath::root().key(CITATIONS.canonical),
                "`citations` must contain at least one citation",
                "citations.non_empty",
            ));
        }
    }
    if let Some(institutions) = &institutions {
        check_unique_ids(INSTITUTIONS, institutions.ids(), issues);
        if let (Some(authors), true) = (&authors, institutions.complete) {
            check_affiliations(&authors.items, &institutions.items, issues);
        }
    }
    if let Some(inputs) = &inputs {
        check_unique_ids(INPUTS, inputs.ids(), issues);
    }
    if let Some(outputs) = &outputs {
        check_unique_ids(OUTPUTS, outputs.ids(), issues);
    }

    if let Some(schema_version) = &schema_version {
        check_schema_version(schema_version, options, issues);
    }
    if let Some(container_image) = &container_image {
        check_image_name(container_image, options, issues);
    }
    if let (Some(command_line), Some(inputs)) = (&command_line, &inputs) {
        let outputs = outputs.as_ref().map_or(&[][..], |outputs| &outputs.items[..]);
        check_command_line(command_line, &inputs.items, outputs, options, issues);
    }

    if mark.failed(issues) {
        return None;
    }
    Some(WorkflowSchema {
        name: name?,
        description: description?,
        schema_version: schema_version?,
        authors: authors?.into_values(),
        institutions: institutions?.into_values(),
        citations: citations?.into_values(),
        problem_class,
        container_image: container_image?,
        configuration,
        inputs: inputs?.into_values(),
        outputs: outputs?.into_values(),
        command_line: command_line?,
    })
}

/// `None` when a required list is missing or the value is not a list.
fn read_list<T>(
    reader: &mut ObjectReader<'_>,
    field: Field,
    required: bool,
    read_item: ItemReader<T>,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<ListItems<T>> {
    let value = if required {
        reader.required(field, issues)?
    } else {
        match reader.lookup(field, issues) {
            Some(value) => value,
            None => return Some(ListItems::empty()),
        }
    };
    let Some(values) = value.as_array() else {
        issues.push(type_mismatch(&reader.field_path(field), "a list", value));
        return None;
    };

    let path = reader.field_path(field);
    let mut list = ListItems::empty();
    for (index, value) in values.iter().enumerate() {
        if let Some(id) = value.get("id").and_then(Value::as_str) {
            list.ids.push((index, id.to_string()));
        }
        match read_item(value, path.index(index), options, issues) {
            Some(item) => list.items.push((index, item)),
            None => list.complete = false,
        }
    }
    Some(list)
}

fn check_unique_ids<'a>(
    field: Field,
    ids: impl Iterator<Item = (usize, &'a str)>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (index, id) in ids {
        if let Some(first) = first_seen.get(id) {
            issues.push(
                ValidationIssue::error(
                    IssueKind::UniquenessViolation,
                    FieldPath::root().key(field.canonical).index(index).key("id"),
                    format!(
                        "duplicate id `{id}` in `{}` (first at {}[{first}])",
                        field.canonical, field.canonical
                    ),
                    "list.duplicate_id",
                )
                .with_related(json!({ "first_index": first })),
            );
            continue;
        }
        first_seen.insert(id, index);
    }
}

fn check_affiliations(
    authors: &[(usize, Author)],
    institutions: &[(usize, Institution)],
    issues: &mut Vec<ValidationIssue>,
) {
    let known: BTreeSet<&str> = institutions
        .iter()
        .map(|(_, institution)| institution.id.as_str())
        .collect();
    for (author_index, author) in authors {
        for (position, affiliation) in author.affiliations.iter().enumerate() {
            if known.contains(affiliation.as_str()) {
                continue;
            }
            issues.push(ValidationIssue::error(
                IssueKind::CrossFieldConstraintViolation,
                FieldPath::root()
                    .key(AUTHORS.canonical)
                    .index(*author_index)
                    .key("affiliations")
                    .index(position),
                format!(
                    "affiliation `{affiliation}` of author `{}` matches no institution id",
                    author.name
                ),
                "authors.affiliation.unknown_institution",
            ));
        }
    }
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
