use super::configuration::Configuration;
use super::container::ContainerImage;
use super::literal::literal_enum;
use super::metadata::{Author, Citation, Institution};
use super::parameter::{OutputParameter, Parameter};
use serde::{Deserialize, Serialize};

literal_enum! {
    /// BIAFLOWS problem class.
    pub enum ProblemClass {
        ObjectSegmentation => "object-segmentation",
        PixelClassification => "pixel-classification",
        ObjectCounting => "object-counting",
        ObjectDetection => "object-detection",
        FilamentTreeTracing => "filament-tree-tracing",
        FilamentNetworksTracing => "filament-networks-tracing",
        LandmarkDetection => "landmark-detection",
        ParticleTracking => "particle-tracking",
        ObjectTracking => "object-tracking",
    }
}

/// Normalized workflow manifest. Every defaultable field carries its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSchema {
    /// Repository name without prefix, e.g. `NucleiTracking-ImageJ`.
    pub name: String,
    pub description: String,
    #[serde(rename = "schema-version", alias = "schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub institutions: Vec<Institution>,
    pub citations: Vec<Citation>,
    #[serde(
        rename = "problem-class",
        alias = "problem_class",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub problem_class: Option<ProblemClass>,
    #[serde(rename = "container-image", alias = "container_image")]
    pub container_image: ContainerImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<OutputParameter>,
    #[serde(rename = "command-line", alias = "command_line")]
    pub command_line: String,
}

impl WorkflowSchema {
    pub fn input(&self, id: &str) -> Option<&Parameter> {
        self.inputs.iter().find(|parameter| parameter.id == id)
    }

    pub fn output(&self, id: &str) -> Option<&OutputParameter> {
        self.outputs.iter().find(|parameter| parameter.id == id)
    }

    pub fn institution(&self, id: &str) -> Option<&Institution> {
        self.institutions.iter().find(|institution| institution.id == id)
    }
}
