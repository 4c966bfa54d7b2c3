use biomero_core::{FieldPath, IssueKind, IssueSeverity, ValidationIssue};
use serde::{Deserialize, Serialize};

/// How a finding outside the hard schema rules is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Ignore,
    Warn,
    Reject,
}

impl Policy {
    pub fn severity(self) -> Option<IssueSeverity> {
        match self {
            Policy::Ignore => None,
            Policy::Warn => Some(IssueSeverity::Warning),
            Policy::Reject => Some(IssueSeverity::Error),
        }
    }

    pub(crate) fn report(
        self,
        kind: IssueKind,
        field_path: FieldPath,
        message: impl Into<String>,
        reference: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(severity) = self.severity() {
            issues.push(ValidationIssue::new(
                kind, severity, field_path, message, reference,
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidateOptions {
    /// Keys that no entity declares. Ignored by default so newer manifests
    /// still validate.
    pub unknown_fields: Policy,
    /// `container-image.image` should be lowercase.
    pub image_name_case: Policy,
    /// `schema-version` should look like `MAJOR.MINOR.PATCH`.
    pub schema_version_format: Policy,
    /// Every input `value-key` should appear in `command-line`.
    pub command_line_references: Policy,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            unknown_fields: Policy::Ignore,
            image_name_case: Policy::Warn,
            schema_version_format: Policy::Warn,
            command_line_references: Policy::Warn,
        }
    }
}

impl ValidateOptions {
    /// Every policy set to `reject`.
    pub fn strict() -> Self {
        Self {
            unknown_fields: Policy::Reject,
            image_name_case: Policy::Reject,
            schema_version_format: Policy::Reject,
            command_line_references: Policy::Reject,
        }
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, OptionsError> {
        serde_yaml::from_str(input).map_err(|err| OptionsError::Yaml(err.to_string()))
    }

    pub fn from_json_str(input: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(input).map_err(|err| OptionsError::Json(err.to_string()))
    }

    pub fn from_str_auto(input: &str) -> Result<Self, OptionsError> {
        let trimmed = input.trim_start();
        if trimmed.starts_with('{') {
            Self::from_json_str(input)
        } else if trimmed.is_empty() {
            Ok(Self::default())
        } else {
            Self::from_yaml_str(input)
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("validator options yaml decode error: {0}")]
    Yaml(String),
    #[error("validator options json decode error: {0}")]
    Json(String),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
