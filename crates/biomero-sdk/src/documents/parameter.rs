use super::literal::literal_enum;
use serde::{Deserialize, Serialize};

literal_enum! {
    pub enum ParameterType {
        Number => "Number",
        String => "String",
        Integer => "integer",
        Float => "float",
        Boolean => "boolean",
        LowerString => "string",
        File => "file",
        Image => "image",
        Array => "array",
    }
}

literal_enum! {
    pub enum OutputParameterType {
        Number => "Number",
        String => "String",
    }
}

literal_enum! {
    pub enum ImageSubType {
        Grayscale => "grayscale",
        Color => "color",
        Binary => "binary",
        Labeled => "labeled",
        Class => "class",
    }
}

literal_enum! {
    pub enum ImageFormat {
        Tif => "tif",
        Png => "png",
        Jpg => "jpg",
        Jpeg => "jpeg",
        Tiff => "tiff",
        OmeTiff => "ometiff",
    }
}

literal_enum! {
    pub enum ArrayFormat {
        Npy => "npy",
        Npz => "npz",
    }
}

/// Value pre-filled in the parameter dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub name: String,
    pub description: String,
    #[serde(rename = "value-key", alias = "value_key")]
    pub value_key: String,
    #[serde(rename = "command-line-flag", alias = "command_line_flag")]
    pub command_line_flag: String,
    #[serde(
        rename = "default-value",
        alias = "default_value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
    pub optional: bool,
    #[serde(rename = "set-by-server", alias = "set_by_server")]
    pub set_by_server: bool,
    /// File extension; required for file, image and array parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        rename = "sub-type",
        alias = "sub_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_type: Option<ImageSubType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputParameter {
    pub id: String,
    #[serde(rename = "type")]
    pub parameter_type: OutputParameterType,
    pub name: String,
    pub description: String,
    #[serde(rename = "value-key", alias = "value_key")]
    pub value_key: String,
    #[serde(rename = "command-line-flag", alias = "command_line_flag")]
    pub command_line_flag: String,
    #[serde(
        rename = "default-value",
        alias = "default_value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
    pub optional: bool,
    #[serde(rename = "set-by-server", alias = "set_by_server")]
    pub set_by_server: bool,
}

/// `[@ID]` with the id upper-cased, as BIAFLOWS command-line templates expect.
pub fn default_value_key(id: &str) -> String {
    format!("[{}]", id.to_uppercase())
}

pub fn default_command_line_flag(id: &str) -> String {
    format!("--{id}")
}

impl ParameterType {
    /// File-like types carry a `format` extension.
    pub fn requires_format(self) -> bool {
        matches!(
            self,
            ParameterType::File | ParameterType::Image | ParameterType::Array
        )
    }
}
