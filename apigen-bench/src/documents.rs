//! Synthetic API description documents.

use apigen_schema::types::{DiscoveryDocument, SchemaNode};
use serde_json::json;

/// Builds a document with `schemas` object schemas of `properties` properties each.
///
/// Property kinds rotate through strings, formatted integers, dates, inline
/// enums, arrays, open maps and references to the next schema, so every
/// resolver path is exercised. The last schema refers back to the first.
#[must_use]
pub fn synthetic_document(schemas: usize, properties: usize) -> DiscoveryDocument {
    let mut document = DiscoveryDocument {
        name: "bench".to_string(),
        version: "v1".to_string(),
        description: Some("Synthetic benchmark document.".to_string()),
        ..DiscoveryDocument::default()
    };

    for index in 0..schemas {
        let name = schema_name(index);
        let next = schema_name((index + 1) % schemas.max(1));
        let mut node = SchemaNode::of_type("object");
        node.id = Some(name.clone());
        node.description = Some(format!("Schema number {index} of the synthetic document."));
        for property in 0..properties {
            node.properties
                .insert(format!("field{property:03}"), property_node(property, &next));
        }
        document.schemas.insert(name, node);
    }

    document
}

/// Serializes [`synthetic_document`] as JSON text.
#[must_use]
pub fn synthetic_json(schemas: usize, properties: usize) -> String {
    let document = synthetic_document(schemas, properties);
    let schemas: serde_json::Map<String, serde_json::Value> = document
        .schemas
        .keys()
        .enumerate()
        .map(|(index, name)| {
            let next = schema_name((index + 1) % document.schemas.len());
            let properties: serde_json::Map<String, serde_json::Value> = (0..properties)
                .map(|p| (format!("field{p:03}"), property_json(p, &next)))
                .collect();
            (
                name.clone(),
                json!({
                    "id": name,
                    "type": "object",
                    "description": format!("Schema number {index} of the synthetic document."),
                    "properties": properties
                }),
            )
        })
        .collect();
    json!({
        "name": document.name,
        "version": document.version,
        "description": document.description,
        "schemas": schemas
    })
    .to_string()
}

fn schema_name(index: usize) -> String {
    format!("Schema{index:04}")
}

fn property_json(property: usize, next: &str) -> serde_json::Value {
    match property % 7 {
        0 => json!({"type": "string", "description": "A plain string."}),
        1 => json!({"type": "string", "format": "int64", "default": "0"}),
        2 => json!({"type": "string", "format": "date-time"}),
        3 => json!({
            "type": "string",
            "enum": ["FIRST", "SECOND", "THIRD"],
            "enumDescriptions": ["First value.", "Second value.", ""]
        }),
        4 => json!({"type": "array", "items": {"type": "integer", "format": "int32"}}),
        5 => json!({"type": "object", "additionalProperties": {"type": "string"}}),
        _ => json!({"$ref": next}),
    }
}

fn property_node(property: usize, next: &str) -> SchemaNode {
    serde_json::from_value(property_json(property, next)).expect("valid synthetic property")
}
