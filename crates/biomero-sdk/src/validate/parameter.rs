use super::reader::{invalid_enum_value, type_mismatch, ErrorMark, Field, ObjectReader};
use crate::documents::{
    default_command_line_flag, default_value_key, ArrayFormat, DefaultValue, ImageFormat,
    ImageSubType, Literal, OutputParameter, OutputParameterType, Parameter, ParameterType,
};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use serde_json::Value;

const ID: Field = Field::plain("id");
const TYPE: Field = Field::plain("type");
const NAME: Field = Field::plain("name");
const DESCRIPTION: Field = Field::plain("description");
const VALUE_KEY: Field = Field::aliased("value-key", "value_key");
const COMMAND_LINE_FLAG: Field = Field::aliased("command-line-flag", "command_line_flag");
const DEFAULT_VALUE: Field = Field::aliased("default-value", "default_value");
const OPTIONAL: Field = Field::plain("optional");
const SET_BY_SERVER: Field = Field::aliased("set-by-server", "set_by_server");
const FORMAT: Field = Field::plain("format");
const SUB_TYPE: Field = Field::aliased("sub-type", "sub_type");

/// Fields shared by input and output parameters, before defaulting.
struct CommonFields {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    value_key: Option<String>,
    command_line_flag: Option<String>,
    default_value: Option<DefaultValue>,
    optional: Option<bool>,
    set_by_server: Option<bool>,
}

impl CommonFields {
    fn read(reader: &mut ObjectReader<'_>, issues: &mut Vec<ValidationIssue>) -> Self {
        let id = reader.required_string(ID, issues);
        let name = reader.optional_string(NAME, issues);
        let description = reader.optional_string(DESCRIPTION, issues);
        let value_key = reader.optional_string(VALUE_KEY, issues);
        let command_line_flag = reader.optional_string(COMMAND_LINE_FLAG, issues);
        let default_value = reader
            .lookup(DEFAULT_VALUE, issues)
            .and_then(|value| read_default_value(value, &reader.field_path(DEFAULT_VALUE), issues));
        let optional = reader.optional_bool(OPTIONAL, issues);
        let set_by_server = reader.optional_bool(SET_BY_SERVER, issues);
        Self {
            id,
            name,
            description,
            value_key,
            command_line_flag,
            default_value,
            optional,
            set_by_server,
        }
    }
}

pub(crate) fn read_parameter(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Parameter> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let parameter_type = reader.required_literal::<ParameterType>(TYPE, issues);
    let common = CommonFields::read(&mut reader, issues);
    let format = reader.optional_string(FORMAT, issues);
    let sub_type = reader.optional_literal::<ImageSubType>(SUB_TYPE, issues);
    let path = reader.path().clone();
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    let parameter_type = parameter_type?;
    check_type_specific_fields(parameter_type, format.as_deref(), sub_type, &path, issues);
    if mark.failed(issues) {
        return None;
    }

    let id = common.id?;
    Some(Parameter {
        parameter_type,
        name: common.name.unwrap_or_else(|| id.clone()),
        description: common.description.unwrap_or_default(),
        value_key: common.value_key.unwrap_or_else(|| default_value_key(&id)),
        command_line_flag: common
            .command_line_flag
            .unwrap_or_else(|| default_command_line_flag(&id)),
        default_value: common.default_value,
        optional: common.optional.unwrap_or(false),
        set_by_server: common.set_by_server.unwrap_or(false),
        format,
        sub_type,
        id,
    })
}

pub(crate) fn read_output_parameter(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<OutputParameter> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let parameter_type = reader.required_literal::<OutputParameterType>(TYPE, issues);
    let common = CommonFields::read(&mut reader, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    let id = common.id?;
    Some(OutputParameter {
        parameter_type: parameter_type?,
        name: common.name.unwrap_or_else(|| id.clone()),
        description: common.description.unwrap_or_default(),
        value_key: common.value_key.unwrap_or_else(|| default_value_key(&id)),
        command_line_flag: common
            .command_line_flag
            .unwrap_or_else(|| default_command_line_flag(&id)),
        default_value: common.default_value,
        optional: common.optional.unwrap_or(false),
        set_by_server: common.set_by_server.unwrap_or(false),
        id,
    })
}

/// file: any extension; image: an image extension plus a sub-type;
/// array: npy or npz.
fn check_type_specific_fields(
    parameter_type: ParameterType,
    format: Option<&str>,
    sub_type: Option<ImageSubType>,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    if !parameter_type.requires_format() {
        return;
    }

    let format_path = path.key(FORMAT.canonical);
    match format {
        None => issues.push(missing_for_type(parameter_type, FORMAT, &format_path)),
        Some(format) => match parameter_type {
            ParameterType::Image => check_format::<ImageFormat>(format, &format_path, issues),
            ParameterType::Array => check_format::<ArrayFormat>(format, &format_path, issues),
            _ => {}
        },
    }

    if parameter_type == ParameterType::Image && sub_type.is_none() {
        issues.push(missing_for_type(
            parameter_type,
            SUB_TYPE,
            &path.key(SUB_TYPE.canonical),
        ));
    }
}

fn check_format<T: Literal>(format: &str, path: &FieldPath, issues: &mut Vec<ValidationIssue>) {
    if T::from_literal(format).is_none() {
        issues.push(invalid_enum_value::<T>(path, format));
    }
}

fn missing_for_type(parameter_type: ParameterType, field: Field, path: &FieldPath) -> ValidationIssue {
    ValidationIssue::error(
        IssueKind::CrossFieldConstraintViolation,
        path.clone(),
        format!(
            "`{}` is required when parameter type is `{parameter_type}`",
            field.canonical
        ),
        "parameter.type_specific.required",
    )
}

fn read_default_value(
    value: &Value,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<DefaultValue> {
    match value {
        Value::Bool(flag) => Some(DefaultValue::Boolean(*flag)),
        Value::String(text) => Some(DefaultValue::String(text.clone())),
        Value::Number(number) if number.is_u64() && number.as_i64().is_none() => {
            issues.push(type_mismatch(path, "an integer that fits in 64 signed bits", value));
            None
        }
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Some(DefaultValue::Integer(integer)),
            None => number.as_f64().map(DefaultValue::Float),
        },
        other => {
            issues.push(type_mismatch(
                path,
                "a string, integer, float or boolean",
                other,
            ));
            None
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
