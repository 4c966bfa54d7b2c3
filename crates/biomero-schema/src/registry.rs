use crate::embedded::EmbeddedSchema;
use crate::versions::SCHEMA_WORKFLOW_MANIFEST;

const WORKFLOW_MANIFEST_SCHEMA: &str =
    include_str!("../../../schemas/workflow-manifest.schema.json");

pub fn get_json_schema(schema_id: &str) -> Option<EmbeddedSchema> {
    match schema_id {
        SCHEMA_WORKFLOW_MANIFEST => Some(EmbeddedSchema {
            id: SCHEMA_WORKFLOW_MANIFEST,
            json: WORKFLOW_MANIFEST_SCHEMA,
        }),
        _ => None,
    }
}

pub fn known_schema_ids() -> &'static [&'static str] {
    &[SCHEMA_WORKFLOW_MANIFEST]
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
