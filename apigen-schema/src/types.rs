//! Schema document definitions.
//!
//! This module contains the data structures representing the input API
//! description: the document envelope and the recursive schema nodes.

use serde::Deserialize;
use std::collections::BTreeMap;

/// API description document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    /// API name, used as the generated package.
    #[serde(default)]
    pub name: String,
    /// API version.
    #[serde(default)]
    pub version: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Named top-level schemas.
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaNode>,
}

impl DiscoveryDocument {
    /// Returns the version with `.` replaced by `_`.
    #[must_use]
    pub fn normalized_version(&self) -> String {
        self.version.replace('.', "_")
    }

    /// Returns the description, or an empty string.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// One type definition in the document.
///
/// Properties are kept in a [`BTreeMap`], so iteration is always in
/// lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Schema id; names the generated message when present.
    #[serde(default)]
    pub id: Option<String>,
    /// Node type (`object`, `array`, `string`, `integer`, `number`, `boolean`, `any`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Primitive format refinement.
    #[serde(default)]
    pub format: Option<String>,
    /// Reference to another named schema.
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    /// Enumerated values.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// Descriptions parallel to `enum_values`.
    #[serde(default)]
    pub enum_descriptions: Option<Vec<String>>,
    /// Item schema of an array.
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,
    /// Object properties.
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaNode>,
    /// Schema of extra, undeclared keys.
    #[serde(default)]
    pub additional_properties: Option<Box<SchemaNode>>,
    /// Whether the property is required.
    #[serde(default)]
    pub required: bool,
    /// Default value literal.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Title, used to name array items.
    #[serde(default)]
    pub title: Option<String>,
}

impl SchemaNode {
    /// Creates a node of the given type.
    #[must_use]
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Creates a reference node.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the node type, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns true if the node is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind() == Some("array")
    }

    /// Returns true if the node carries no schema information at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the default as literal text.
    ///
    /// String defaults are returned verbatim; other JSON literals are
    /// rendered as JSON text.
    #[must_use]
    pub fn default_text(&self) -> Option<String> {
        self.default.as_ref().map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
