use crate::documents::WorkflowSchema;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml encode failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Canonical key-value tree: hyphenated spellings, every default explicit.
pub fn to_value(manifest: &WorkflowSchema) -> Result<Value, EmitError> {
    Ok(serde_json::to_value(manifest)?)
}

pub fn to_json_string(manifest: &WorkflowSchema) -> Result<String, EmitError> {
    Ok(serde_json::to_string(manifest)?)
}

pub fn to_json_string_pretty(manifest: &WorkflowSchema) -> Result<String, EmitError> {
    Ok(serde_json::to_string_pretty(manifest)?)
}

pub fn to_yaml_string(manifest: &WorkflowSchema) -> Result<String, EmitError> {
    Ok(serde_yaml::to_string(manifest)?)
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod tests;
