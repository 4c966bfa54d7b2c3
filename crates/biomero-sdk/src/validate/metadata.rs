use super::reader::{ErrorMark, Field, ObjectReader};
use crate::documents::{Author, Citation, Institution};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, ValidationIssue};
use serde_json::Value;

const NAME: Field = Field::plain("name");
const EMAIL: Field = Field::plain("email");
const AFFILIATIONS: Field = Field::plain("affiliations");
const ID: Field = Field::plain("id");
const DOI: Field = Field::plain("doi");
const LICENSE: Field = Field::plain("license");
const DESCRIPTION: Field = Field::plain("description");

pub(crate) fn read_author(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Author> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let name = reader.required_string(NAME, issues);
    let email = reader.optional_string(EMAIL, issues);
    let affiliations = reader.optional_string_list(AFFILIATIONS, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(Author {
        name: name?,
        email,
        affiliations: affiliations.unwrap_or_default(),
    })
}

pub(crate) fn read_institution(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Institution> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let id = reader.required_string(ID, issues);
    let name = reader.optional_string(NAME, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    let id = id?;
    Some(Institution {
        name: name.unwrap_or_else(|| id.clone()),
        id,
    })
}

pub(crate) fn read_citation(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Citation> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let name = reader.required_string(NAME, issues);
    let doi = reader.optional_string(DOI, issues);
    let license = reader.required_string(LICENSE, issues);
    let description = reader.optional_string(DESCRIPTION, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(Citation {
        name: name?,
        doi: doi.unwrap_or_default(),
        license: license?,
        description: description.unwrap_or_default(),
    })
}
