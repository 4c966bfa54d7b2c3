mod json;
mod yaml;

use crate::documents::WorkflowSchema;
use crate::options::ValidateOptions;
use crate::validate::{validate_manifest_with_options, ValidationReport};
use biomero_core::ValidationIssue;
use biomero_schema::validate_schema_instance;
use biomero_schema::versions::SCHEMA_WORKFLOW_MANIFEST;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseManifestOptions {
    pub format: DocumentFormat,
    /// Check the raw document against the published JSON Schema before
    /// typed validation. Requires canonical field spellings.
    pub validate_schema: bool,
    pub validate: ValidateOptions,
}

impl Default for ParseManifestOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            validate_schema: false,
            validate: ValidateOptions::default(),
        }
    }
}

/// Decodes manifest text into a key-value tree without validating it.
pub fn parse_document(input: &str, format: DocumentFormat) -> Result<Value, Vec<ValidationIssue>> {
    match format {
        DocumentFormat::Auto if looks_like_json(input) => json::parse_json(input),
        DocumentFormat::Auto => yaml::parse_yaml(input),
        DocumentFormat::Json => json::parse_json(input),
        DocumentFormat::Yaml => yaml::parse_yaml(input),
    }
}

pub fn parse_manifest(input: &str) -> Result<WorkflowSchema, Vec<ValidationIssue>> {
    parse_manifest_with_options(input, &ParseManifestOptions::default()).into_result()
}

pub fn parse_manifest_with_options(
    input: &str,
    options: &ParseManifestOptions,
) -> ValidationReport {
    tracing::debug!(format = ?options.format, bytes = input.len(), "parsing workflow manifest");
    let value = match parse_document(input, options.format) {
        Ok(value) => value,
        Err(issues) => return ValidationReport::from_issues(issues),
    };

    if options.validate_schema {
        let issues = validate_schema_instance(SCHEMA_WORKFLOW_MANIFEST, &value);
        if !issues.is_empty() {
            return ValidationReport::from_issues(issues);
        }
    }

    validate_manifest_with_options(&value, &options.validate)
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
