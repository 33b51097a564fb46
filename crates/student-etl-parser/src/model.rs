use serde::{Deserialize, Serialize};

/// Column names shared by every input format and the destination table.
pub const COLUMNS: [&str; 3] = ["Name", "Height", "Weight"];

/// One student row. Heights and weights are inches and pounds as read from
/// disk, meters and kilograms once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, height: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            height,
            weight,
        }
    }
}
