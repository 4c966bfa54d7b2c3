use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Ids of entries in the manifest's `institutions` list.
    #[serde(default)]
    pub affiliations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    /// Falls back to `id` when the manifest leaves it out.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub name: String,
    #[serde(default)]
    pub doi: String,
    pub license: String,
    #[serde(default)]
    pub description: String,
}
