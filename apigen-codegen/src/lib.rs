//! # apigen Codegen
//!
//! Message definition rendering for resolved API descriptions.
//!
//! This crate provides:
//! - A proto2 interface definition emitter
//! - A protorpc message class emitter
//! - A generation driver with builder configuration
//! - File output

pub mod emit;
pub mod error;
pub mod generator;

pub use emit::{Emitter, IdlEmitter, SourceEmitter};
pub use error::CodegenError;
pub use generator::{Generator, GeneratorBuilder, OutputFormat};

/// Generates message definitions from an API description JSON string.
///
/// # Arguments
/// * `json` - API description document content
/// * `format` - Output syntax
///
/// # Returns
/// Generated definitions as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution or validation fails.
pub fn generate_from_json(json: &str, format: OutputFormat) -> Result<String, CodegenError> {
    let document = apigen_schema::parse_document(json)?;
    Generator::new().generate(&document, format)
}

/// Generates message definitions from an API description file.
///
/// # Arguments
/// * `path` - Path to the API description document
/// * `format` - Output syntax
///
/// # Returns
/// Generated definitions as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, resolution or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    format: OutputFormat,
) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, format)
}
