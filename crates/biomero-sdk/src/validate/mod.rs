mod configuration;
mod container;
mod conventions;
mod metadata;
mod parameter;
mod reader;
mod report;
mod workflow;

pub use report::ValidationReport;
pub use workflow::{validate_manifest, validate_manifest_with_options};
