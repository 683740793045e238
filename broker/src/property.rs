//! Descriptors of mapper configuration properties, rendered by the admin console.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    String,
    /// A user profile attribute, the console offers the known attribute names
    UserProfileAttributeList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProperty {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_text: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
}

impl ConfigProperty {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        help_text: impl Into<String>,
        kind: PropertyType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: help_text.into(),
            kind,
        }
    }
}
