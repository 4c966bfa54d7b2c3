use crate::documents::Literal;
use crate::options::Policy;
use biomero_core::{FieldPath, IssueKind, ValidationIssue};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

/// A field's canonical (document) spelling and the internal spelling that is
/// accepted interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub canonical: &'static str,
    pub internal: &'static str,
}

impl Field {
    pub(crate) const fn plain(name: &'static str) -> Self {
        Self {
            canonical: name,
            internal: name,
        }
    }

    pub(crate) const fn aliased(canonical: &'static str, internal: &'static str) -> Self {
        Self {
            canonical,
            internal,
        }
    }
}

/// Counts errors pushed after construction, so an entity can tell whether
/// its own fields failed.
pub(crate) struct ErrorMark(usize);

impl ErrorMark {
    pub(crate) fn new(issues: &[ValidationIssue]) -> Self {
        Self(count_errors(issues))
    }

    pub(crate) fn failed(&self, issues: &[ValidationIssue]) -> bool {
        count_errors(issues) > self.0
    }
}

fn count_errors(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|issue| issue.is_error()).count()
}

/// Reads typed fields out of one JSON object, recording every key it
/// touches so the leftovers can be reported as unknown.
pub(crate) struct ObjectReader<'a> {
    object: &'a Map<String, Value>,
    path: FieldPath,
    seen: BTreeSet<&'a str>,
}

impl<'a> ObjectReader<'a> {
    pub(crate) fn open(
        value: &'a Value,
        path: FieldPath,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Self> {
        match value.as_object() {
            Some(object) => Some(Self {
                object,
                path,
                seen: BTreeSet::new(),
            }),
            None => {
                issues.push(type_mismatch(&path, "an object", value));
                None
            }
        }
    }

    pub(crate) fn path(&self) -> &FieldPath {
        &self.path
    }

    pub(crate) fn field_path(&self, field: Field) -> FieldPath {
        self.path.key(field.canonical)
    }

    /// Canonical spelling wins when both are present. `null` counts as absent.
    pub(crate) fn lookup(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<&'a Value> {
        let object = self.object;
        let canonical = object.get_key_value(field.canonical);
        let internal = if field.internal == field.canonical {
            None
        } else {
            object.get_key_value(field.internal)
        };

        if let Some((key, _)) = canonical {
            self.seen.insert(key.as_str());
        }
        if let Some((key, _)) = internal {
            self.seen.insert(key.as_str());
        }

        if let (Some(_), Some(_)) = (canonical, internal) {
            issues.push(ValidationIssue::warning(
                IssueKind::UniquenessViolation,
                self.field_path(field),
                format!(
                    "both `{}` and `{}` are set; using `{}`",
                    field.canonical, field.internal, field.canonical
                ),
                "field.duplicate_spelling",
            ));
        }

        canonical
            .or(internal)
            .map(|(_, value)| value)
            .filter(|value| !value.is_null())
    }

    pub(crate) fn required(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<&'a Value> {
        let value = self.lookup(field, issues);
        if value.is_none() {
            issues.push(ValidationIssue::error(
                IssueKind::MissingRequiredField,
                self.field_path(field),
                format!("missing required field `{}`", field.canonical),
                "field.required",
            ));
        }
        value
    }

    pub(crate) fn required_string(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<String> {
        let value = self.required(field, issues)?;
        expect_string(value, &self.field_path(field), issues)
    }

    pub(crate) fn optional_string(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<String> {
        let value = self.lookup(field, issues)?;
        expect_string(value, &self.field_path(field), issues)
    }

    pub(crate) fn optional_bool(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<bool> {
        let value = self.lookup(field, issues)?;
        match value.as_bool() {
            Some(flag) => Some(flag),
            None => {
                issues.push(type_mismatch(&self.field_path(field), "a boolean", value));
                None
            }
        }
    }

    /// Integers are accepted where a float is declared.
    pub(crate) fn optional_number(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<f64> {
        let value = self.lookup(field, issues)?;
        match value.as_f64() {
            Some(number) => Some(number),
            None => {
                issues.push(type_mismatch(&self.field_path(field), "a number", value));
                None
            }
        }
    }

    pub(crate) fn required_literal<T: Literal>(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<T> {
        let value = self.required(field, issues)?;
        expect_literal(value, &self.field_path(field), issues)
    }

    pub(crate) fn optional_literal<T: Literal>(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<T> {
        let value = self.lookup(field, issues)?;
        expect_literal(value, &self.field_path(field), issues)
    }

    pub(crate) fn optional_list(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<&'a Vec<Value>> {
        let value = self.lookup(field, issues)?;
        expect_list(value, &self.field_path(field), issues)
    }

    /// `None` when absent or when any item is not a string.
    pub(crate) fn optional_string_list(
        &mut self,
        field: Field,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Vec<String>> {
        let items = self.optional_list(field, issues)?;
        string_items(items, &self.field_path(field), issues)
    }

    /// Reports keys nothing asked for, per the unknown-field policy.
    pub(crate) fn finish(self, policy: Policy, issues: &mut Vec<ValidationIssue>) {
        for key in self.object.keys() {
            if self.seen.contains(key.as_str()) {
                continue;
            }
            if policy == Policy::Ignore {
                tracing::trace!(path = %self.path, key = %key, "ignoring unknown field");
                continue;
            }
            policy.report(
                IssueKind::UnknownField,
                self.path.key(key.as_str()),
                format!("unknown field `{key}`"),
                "field.unknown",
                issues,
            );
        }
    }
}

pub(crate) fn string_items(
    items: &[Value],
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<String>> {
    let mut strings = Vec::with_capacity(items.len());
    let mut failed = false;
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(text) => strings.push(text.to_string()),
            None => {
                issues.push(type_mismatch(&path.index(index), "a string", item));
                failed = true;
            }
        }
    }
    (!failed).then_some(strings)
}

fn expect_string(
    value: &Value,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value.as_str() {
        Some(text) => Some(text.to_string()),
        None => {
            issues.push(type_mismatch(path, "a string", value));
            None
        }
    }
}

fn expect_list<'a>(
    value: &'a Value,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a Vec<Value>> {
    match value.as_array() {
        Some(items) => Some(items),
        None => {
            issues.push(type_mismatch(path, "a list", value));
            None
        }
    }
}

fn expect_literal<T: Literal>(
    value: &Value,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<T> {
    let text = expect_string(value, path, issues)?;
    let literal = T::from_literal(text.as_str());
    if literal.is_none() {
        issues.push(invalid_enum_value::<T>(path, text.as_str()));
    }
    literal
}

pub(crate) fn invalid_enum_value<T: Literal>(path: &FieldPath, found: &str) -> ValidationIssue {
    let field = path.leaf_key().unwrap_or("value");
    ValidationIssue::error(
        IssueKind::InvalidEnumValue,
        path.clone(),
        format!(
            "`{field}` value `{found}` is not one of: {}",
            T::ALLOWED.join(", ")
        ),
        "field.enum",
    )
    .with_related(json!({ "value": found, "allowed": T::ALLOWED }))
}

pub(crate) fn type_mismatch(path: &FieldPath, expected: &str, found: &Value) -> ValidationIssue {
    ValidationIssue::error(
        IssueKind::TypeMismatch,
        path.clone(),
        format!("expected {expected}, found {}", describe(found)),
        "field.type",
    )
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
