pub mod literal;

mod configuration;
mod container;
mod metadata;
mod parameter;
mod workflow;

pub use configuration::{
    ComputeCapability, Configuration, CudaRequirements, Resources, DEFAULT_CORES_MIN,
    DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER,
};
pub use container::{ContainerImage, ContainerType};
pub use literal::Literal;
pub use metadata::{Author, Citation, Institution};
pub use parameter::{
    default_command_line_flag, default_value_key, ArrayFormat, DefaultValue, ImageFormat,
    ImageSubType, OutputParameter, OutputParameterType, Parameter, ParameterType,
};
pub use workflow::{ProblemClass, WorkflowSchema};
