//! # apigen Schema
//!
//! API description parser and type resolution.
//!
//! This crate provides:
//! - JSON document parsing into schema nodes
//! - Type resolution into a syntax-independent IR
//! - Forward reference and redefinition checking
//! - IR validation

pub mod error;
pub mod ir;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{
    Descriptor, DescriptorKind, ExtendedEnum, ExtendedEnumValue, ExtendedField, ExtendedFile,
    ExtendedMessage, FieldDescriptor, FieldKind, Label, TypeInfo, Variant,
};
pub use parser::{parse_document, parse_document_file, parse_schema_node};
pub use resolver::{TypeResolver, resolve_document};
pub use types::{DiscoveryDocument, SchemaNode};
pub use validation::validate_file;
