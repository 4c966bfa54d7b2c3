//! Typed model, parser and collect-all validator for BIOMERO workflow
//! manifests.

pub mod documents;
pub mod emit;
pub mod options;
pub mod parse;
pub mod validate;

pub use biomero_core::{FieldPath, IssueKind, IssueSeverity, ValidationIssue};
pub use documents::{
    Author, Citation, ComputeCapability, Configuration, ContainerImage, ContainerType,
    CudaRequirements, DefaultValue, ImageFormat, ImageSubType, Institution, Literal,
    OutputParameter, OutputParameterType, Parameter, ParameterType, ProblemClass, Resources,
    WorkflowSchema,
};
pub use emit::{to_json_string, to_json_string_pretty, to_value, to_yaml_string, EmitError};
pub use options::{OptionsError, Policy, ValidateOptions};
pub use parse::{
    parse_document, parse_manifest, parse_manifest_with_options, DocumentFormat,
    ParseManifestOptions,
};
pub use validate::{validate_manifest, validate_manifest_with_options, ValidationReport};
