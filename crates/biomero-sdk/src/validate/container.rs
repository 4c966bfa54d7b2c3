use super::reader::{ErrorMark, Field, ObjectReader};
use crate::documents::{ContainerImage, ContainerType};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, ValidationIssue};
use serde_json::Value;

const IMAGE: Field = Field::plain("image");
const TYPE: Field = Field::plain("type");
const PLATFORMS: Field = Field::plain("platforms");

pub(crate) fn read_container_image(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<ContainerImage> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let image = reader.required_string(IMAGE, issues);
    let container_type = reader.required_literal::<ContainerType>(TYPE, issues);
    let platforms = reader.optional_string_list(PLATFORMS, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(ContainerImage {
        image: image?,
        container_type: container_type?,
        platforms,
    })
}
