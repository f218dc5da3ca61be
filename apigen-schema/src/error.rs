//! Error types for schema parsing and type resolution.

use thiserror::Error;

/// Error type for schema document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required document field.
    #[error("missing required document field '{field}'")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for type resolution and IR validation.
///
/// Every variant is fatal for the document being resolved.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A node's `type` or `format` is missing or unrecognized.
    #[error("unsupported schema type '{type_name}' at '{path}'")]
    UnsupportedSchemaType {
        /// Offending type or format token.
        type_name: String,
        /// Schema path of the node.
        path: String,
    },

    /// A referenced type is not registered.
    #[error("unresolved type reference '{name}'")]
    UnresolvedTypeReference {
        /// Type name.
        name: String,
    },

    /// A fully-qualified name was registered twice.
    #[error("attempt to re-register descriptor '{name}'")]
    Redefinition {
        /// Fully-qualified name.
        name: String,
    },

    /// A descriptor was registered without being declared first.
    #[error("descriptor '{name}' was registered without being declared")]
    IllegalDirectRegistration {
        /// Fully-qualified name.
        name: String,
    },

    /// A lookup dereferenced a type still under construction.
    #[error("cannot retrieve type currently being created: '{name}'")]
    InProgressReference {
        /// Fully-qualified name.
        name: String,
    },

    /// Resolution finished with types still nascent or unknown.
    #[error("malformed type registry: nascent [{}], unknown [{}]", .nascent.join(", "), .unknown.join(", "))]
    Incomplete {
        /// Types declared but never completed.
        nascent: Vec<String>,
        /// Types referenced but never defined.
        unknown: Vec<String>,
    },

    /// Enum values and descriptions differ in length.
    #[error("enum '{name}' has {values} values but {descriptions} descriptions")]
    MismatchedEnumDescriptions {
        /// Enum name.
        name: String,
        /// Number of values.
        values: usize,
        /// Number of descriptions.
        descriptions: usize,
    },

    /// An array node has no item schema.
    #[error("array type with no item type at '{path}'")]
    MissingArrayItems {
        /// Schema path of the node.
        path: String,
    },

    /// An inline object has no name to give the synthesized message.
    #[error("cannot create subtype without a name hint at '{path}'")]
    MissingNameHint {
        /// Schema path of the node.
        path: String,
    },

    /// A default value could not be decoded as a literal.
    #[error("invalid default value '{value}' at '{path}'")]
    InvalidDefault {
        /// Raw default text.
        value: String,
        /// Schema path of the field.
        path: String,
    },

    /// IR well-formedness error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates an unsupported schema type error.
    pub fn unsupported(type_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedSchemaType {
            type_name: type_name.into(),
            path: path.into(),
        }
    }

    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl ParseError {
    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
