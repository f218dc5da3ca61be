//! # apigen Core
//!
//! Shared building blocks for schema-driven code generation.
//!
//! This crate provides:
//! - Identifier normalization (class, field, enum value names)
//! - Configurable naming conventions and prefix stripping
//! - An indentation-scoped line printer with width-aware word wrapping

pub mod names;
pub mod printer;

pub use names::{NameConvention, NameNormalizer, Names};
pub use printer::{IndentGuard, PrettyPrinter, wrap, wrap_indented};
