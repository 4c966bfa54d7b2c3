use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_FOLDER: &str = "/inputs";
pub const DEFAULT_OUTPUT_FOLDER: &str = "/outputs";
pub const DEFAULT_CORES_MIN: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "input-folder", alias = "input_folder")]
    pub input_folder: String,
    #[serde(rename = "output-folder", alias = "output_folder")]
    pub output_folder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub networking: bool,
    /// Mebibytes.
    #[serde(rename = "ram-min", alias = "ram_min")]
    pub ram_min: f64,
    #[serde(rename = "cores-min", alias = "cores_min")]
    pub cores_min: f64,
    pub gpu: bool,
    #[serde(
        rename = "cuda-requirements",
        alias = "cuda_requirements",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cuda_requirements: Option<CudaRequirements>,
    #[serde(rename = "cpuAVX")]
    pub cpu_avx: bool,
    #[serde(rename = "cpuAVX2")]
    pub cpu_avx2: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CudaRequirements {
    #[serde(rename = "device-memory-min", alias = "device_memory_min")]
    pub device_memory_min: f64,
    #[serde(
        rename = "cuda-compute-capability",
        alias = "cuda_compute_capability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cuda_compute_capability: Option<ComputeCapability>,
}

/// Either a single minimum capability or the list of accepted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputeCapability {
    Minimum(String),
    OneOf(Vec<String>),
}
