use crate::field_path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// Classification of a manifest problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueKind {
    MissingRequiredField,
    TypeMismatch,
    InvalidEnumValue,
    /// Duplicate id within a list, or an empty list that must not be empty.
    UniquenessViolation,
    CrossFieldConstraintViolation,
    /// Key not declared by the entity it appears in.
    UnknownField,
    /// Advisory naming or formatting convention.
    ConventionViolation,
    /// Text could not be decoded into a document tree at all.
    ParseError,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingRequiredField => "MissingRequiredField",
            IssueKind::TypeMismatch => "TypeMismatch",
            IssueKind::InvalidEnumValue => "InvalidEnumValue",
            IssueKind::UniquenessViolation => "UniquenessViolation",
            IssueKind::CrossFieldConstraintViolation => "CrossFieldConstraintViolation",
            IssueKind::UnknownField => "UnknownField",
            IssueKind::ConventionViolation => "ConventionViolation",
            IssueKind::ParseError => "ParseError",
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub field_path: FieldPath,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Value>,
}

impl ValidationIssue {
    pub fn new(
        kind: IssueKind,
        severity: IssueSeverity,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &str,
    ) -> Self {
        Self {
            kind,
            severity,
            field_path,
            message: message.into(),
            reference: Some(reference.to_string()),
            related: None,
        }
    }

    pub fn error(
        kind: IssueKind,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &str,
    ) -> Self {
        Self::new(kind, IssueSeverity::Error, field_path, message, reference)
    }

    pub fn warning(
        kind: IssueKind,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &str,
    ) -> Self {
        Self::new(kind, IssueSeverity::Warning, field_path, message, reference)
    }

    pub fn with_related(mut self, related: Value) -> Self {
        self.related = Some(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    pub fn sort_stable(issues: &mut [Self]) {
        issues.sort_by(|left, right| {
            (left.severity, &left.field_path, left.kind, &left.message).cmp(&(
                right.severity,
                &right.field_path,
                right.kind,
                &right.message,
            ))
        });
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field_path, self.message, self.kind)
    }
}

#[cfg(test)]
#[path = "issues_test.rs"]
mod tests;
