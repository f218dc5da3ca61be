//! Example generating both output syntaxes for a small API description.
//!
//! Run with: `cargo run --example generate [path/to/document.json]`
//!
//! Set `RUST_LOG=debug` to see the resolver trace.

use apigen::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"{
    "name": "library",
    "version": "v1.2",
    "description": "Manages shelves and the books on them.",
    "schemas": {
        "Book": {
            "id": "Book",
            "type": "object",
            "description": "A single book.",
            "properties": {
                "author": {"type": "string", "description": "Author name."},
                "isbn": {"type": "string", "format": "int64"},
                "published": {"type": "string", "format": "date-time"},
                "shelf": {"$ref": "Shelf"},
                "state": {
                    "type": "string",
                    "enum": ["available", "lent"],
                    "enumDescriptions": ["On the shelf.", "Currently lent out."],
                    "default": "available"
                },
                "tags": {"type": "array", "items": {"type": "string"}},
                "extra": {"type": "object", "additionalProperties": {"type": "string"}}
            }
        },
        "Shelf": {
            "id": "Shelf",
            "type": "object",
            "properties": {
                "books": {"type": "array", "items": {"$ref": "Book"}},
                "name": {"type": "string", "required": true}
            }
        }
    }
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let document = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => parse_document_file(&path)?,
        None => parse_document(SAMPLE)?,
    };

    let generator = Generator::builder().capitalize_enums(true).build();
    let file = generator.resolve(&document)?;
    let version = document.normalized_version();

    for format in [OutputFormat::Idl, OutputFormat::Source] {
        println!(
            "==> {}_{}_messages.{}",
            document.name,
            version,
            format.extension()
        );
        print!("{}", generator.render(&file, &version, format));
        println!();
    }

    Ok(())
}
