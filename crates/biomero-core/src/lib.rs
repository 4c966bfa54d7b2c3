pub mod field_path;
pub mod issues;

pub use field_path::{FieldPath, FieldPathParseError, FieldPathSegment};
pub use issues::{IssueKind, IssueSeverity, ValidationIssue};
