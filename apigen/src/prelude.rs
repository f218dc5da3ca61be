//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use apigen::prelude::*;
//! ```

// Core types
pub use apigen_core::{NameConvention, NameNormalizer, Names, PrettyPrinter};

// Schema types
pub use apigen_schema::{
    Descriptor, DiscoveryDocument, ExtendedEnum, ExtendedField, ExtendedFile, ExtendedMessage,
    ParseError, SchemaError, SchemaNode, TypeResolver, parse_document, parse_document_file,
    resolve_document, validate_file,
};

// Codegen types
pub use apigen_codegen::{
    CodegenError, Emitter, Generator, GeneratorBuilder, IdlEmitter, OutputFormat, SourceEmitter,
};
