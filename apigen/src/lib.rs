//! # apigen
//!
//! Message definition generator for JSON API descriptions.
//!
//! apigen reads an API description document (a tree of named object, enum
//! and array schemas), resolves it into a syntax-independent set of message
//! and enum descriptors, and renders those as a proto2 interface definition
//! or as protorpc message classes.
//!
//! ## Features
//!
//! - **Deterministic output** - Properties are tagged in sorted key order and
//!   siblings are printed sorted by name
//! - **Forward references** - Schemas may refer to each other in any order,
//!   including recursively
//! - **Whole-document failure** - Dangling references or redefinitions reject
//!   the document before anything is written
//! - **Two output syntaxes** - proto2 and protorpc from the same IR
//!
//! ## Quick Start
//!
//! ```ignore
//! use apigen::prelude::*;
//!
//! let document = parse_document(&json)?;
//! let generator = Generator::builder().capitalize_enums(true).build();
//! let proto = generator.generate(&document, OutputFormat::Idl)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Identifier normalization and the indenting printer
//! - [`schema`] - Document parsing, type resolution and IR validation
//! - [`codegen`] - Emitters and the generation driver

pub mod prelude;

/// Identifier normalization and printing.
pub mod core {
    pub use apigen_core::*;
}

/// Document parsing and type resolution.
pub mod schema {
    pub use apigen_schema::*;
}

/// Emitters and the generation driver.
pub mod codegen {
    pub use apigen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use apigen_codegen::{
    CodegenError, Generator, GeneratorBuilder, OutputFormat, generate_from_file,
    generate_from_json,
};
pub use apigen_schema::{DiscoveryDocument, ExtendedFile, parse_document, parse_document_file};
