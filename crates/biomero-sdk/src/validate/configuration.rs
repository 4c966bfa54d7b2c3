use super::reader::{string_items, type_mismatch, ErrorMark, Field, ObjectReader};
use crate::documents::{
    ComputeCapability, Configuration, CudaRequirements, Resources, DEFAULT_CORES_MIN,
    DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER,
};
use crate::options::ValidateOptions;
use biomero_core::{FieldPath, ValidationIssue};
use serde_json::Value;

const INPUT_FOLDER: Field = Field::aliased("input-folder", "input_folder");
const OUTPUT_FOLDER: Field = Field::aliased("output-folder", "output_folder");
const RESOURCES: Field = Field::plain("resources");

const NETWORKING: Field = Field::plain("networking");
const RAM_MIN: Field = Field::aliased("ram-min", "ram_min");
const CORES_MIN: Field = Field::aliased("cores-min", "cores_min");
const GPU: Field = Field::plain("gpu");
const CUDA_REQUIREMENTS: Field = Field::aliased("cuda-requirements", "cuda_requirements");
const CPU_AVX: Field = Field::plain("cpuAVX");
const CPU_AVX2: Field = Field::plain("cpuAVX2");

const DEVICE_MEMORY_MIN: Field = Field::aliased("device-memory-min", "device_memory_min");
const CUDA_COMPUTE_CAPABILITY: Field =
    Field::aliased("cuda-compute-capability", "cuda_compute_capability");

pub(crate) fn read_configuration(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Configuration> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let input_folder = reader.optional_string(INPUT_FOLDER, issues);
    let output_folder = reader.optional_string(OUTPUT_FOLDER, issues);
    let resources = reader.lookup(RESOURCES, issues).and_then(|resources| {
        read_resources(resources, reader.field_path(RESOURCES), options, issues)
    });
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(Configuration {
        input_folder: input_folder.unwrap_or_else(|| DEFAULT_INPUT_FOLDER.to_string()),
        output_folder: output_folder.unwrap_or_else(|| DEFAULT_OUTPUT_FOLDER.to_string()),
        resources,
    })
}

fn read_resources(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Resources> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let networking = reader.optional_bool(NETWORKING, issues);
    let ram_min = reader.optional_number(RAM_MIN, issues);
    let cores_min = reader.optional_number(CORES_MIN, issues);
    let gpu = reader.optional_bool(GPU, issues);
    let cuda_requirements = reader.lookup(CUDA_REQUIREMENTS, issues).and_then(|cuda| {
        read_cuda_requirements(cuda, reader.field_path(CUDA_REQUIREMENTS), options, issues)
    });
    let cpu_avx = reader.optional_bool(CPU_AVX, issues);
    let cpu_avx2 = reader.optional_bool(CPU_AVX2, issues);
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(Resources {
        networking: networking.unwrap_or(false),
        ram_min: ram_min.unwrap_or(0.0),
        cores_min: cores_min.unwrap_or(DEFAULT_CORES_MIN),
        gpu: gpu.unwrap_or(false),
        cuda_requirements,
        cpu_avx: cpu_avx.unwrap_or(false),
        cpu_avx2: cpu_avx2.unwrap_or(false),
    })
}

fn read_cuda_requirements(
    value: &Value,
    path: FieldPath,
    options: &ValidateOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Option<CudaRequirements> {
    let mark = ErrorMark::new(issues);
    let mut reader = ObjectReader::open(value, path, issues)?;

    let device_memory_min = reader.optional_number(DEVICE_MEMORY_MIN, issues);
    let cuda_compute_capability = reader
        .lookup(CUDA_COMPUTE_CAPABILITY, issues)
        .and_then(|capability| {
            read_compute_capability(
                capability,
                &reader.field_path(CUDA_COMPUTE_CAPABILITY),
                issues,
            )
        });
    reader.finish(options.unknown_fields, issues);

    if mark.failed(issues) {
        return None;
    }
    Some(CudaRequirements {
        device_memory_min: device_memory_min.unwrap_or(0.0),
        cuda_compute_capability,
    })
}

fn read_compute_capability(
    value: &Value,
    path: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) -> Option<ComputeCapability> {
    match value {
        Value::String(minimum) => Some(ComputeCapability::Minimum(minimum.clone())),
        Value::Array(items) => string_items(items, path, issues).map(ComputeCapability::OneOf),
        other => {
            issues.push(type_mismatch(path, "a string or a list of strings", other));
            None
        }
    }
}
