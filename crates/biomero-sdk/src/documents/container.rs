use super::literal::literal_enum;
use serde::{Deserialize, Serialize};

literal_enum! {
    pub enum ContainerType {
        Oci => "oci",
        Singularity => "singularity",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerImage {
    /// Expected to match the workflow repository name, lowercase only.
    pub image: String,
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
}
