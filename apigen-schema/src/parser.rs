//! Schema document parser.
//!
//! This module reads JSON API description documents into the types in
//! [`crate::types`].

use crate::error::ParseError;
use crate::types::{DiscoveryDocument, SchemaNode};
use std::path::Path;

/// Parses an API description document from a JSON string.
///
/// # Arguments
/// * `json` - Document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or `name`/`version` is missing.
pub fn parse_document(json: &str) -> Result<DiscoveryDocument, ParseError> {
    let document: DiscoveryDocument = serde_json::from_str(json)?;
    if document.name.is_empty() {
        return Err(ParseError::missing_field("name"));
    }
    if document.version.is_empty() {
        return Err(ParseError::missing_field("version"));
    }
    tracing::debug!(
        "Parsed document {} {} with {} schemas",
        document.name,
        document.version,
        document.schemas.len()
    );
    Ok(document)
}

/// Parses an API description document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_document_file(path: &Path) -> Result<DiscoveryDocument, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_document(&json)
}

/// Parses a single schema node from a JSON string.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed.
pub fn parse_schema_node(json: &str) -> Result<SchemaNode, ParseError> {
    Ok(serde_json::from_str(json)?)
}
