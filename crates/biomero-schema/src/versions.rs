pub const SCHEMA_WORKFLOW_MANIFEST: &str = "biomero/workflow-manifest";
