//! IR validation utilities.
//!
//! This module checks a resolved [`ExtendedFile`] for structural consistency
//! before it is handed to an emitter.

use crate::error::SchemaError;
use crate::ir::{ExtendedEnum, ExtendedFile, ExtendedMessage};
use std::collections::HashSet;

/// Validates a resolved file for structural consistency.
///
/// # Arguments
/// * `file` - The file to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_file(file: &ExtendedFile) -> Result<(), SchemaError> {
    validate_siblings(&file.package, &file.message_types, &file.enum_types)?;
    for enum_type in &file.enum_types {
        validate_enum(enum_type)?;
    }
    for message in &file.message_types {
        validate_message(message)?;
    }
    Ok(())
}

/// Validates that no two descriptors in one container share a name.
fn validate_siblings(
    container: &str,
    messages: &[ExtendedMessage],
    enums: &[ExtendedEnum],
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let names = messages
        .iter()
        .map(|m| &m.name)
        .chain(enums.iter().map(|e| &e.name));
    for name in names {
        if !seen.insert(name) {
            return Err(SchemaError::Validation {
                message: format!("Duplicate type name '{name}' in '{container}'"),
            });
        }
    }
    Ok(())
}

/// Validates a message definition and everything nested in it.
fn validate_message(message: &ExtendedMessage) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_numbers = HashSet::new();

    for field in &message.fields {
        if field.number() == 0 {
            return Err(SchemaError::Validation {
                message: format!(
                    "Field '{}' in message '{}' has tag 0",
                    field.name(),
                    message.full_name
                ),
            });
        }

        if !seen_names.insert(field.name()) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate field name '{}' in message '{}'",
                    field.name(),
                    message.full_name
                ),
            });
        }

        if !seen_numbers.insert(field.number()) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate field tag {} in message '{}'",
                    field.number(),
                    message.full_name
                ),
            });
        }
    }

    validate_siblings(&message.full_name, &message.message_types, &message.enum_types)?;
    for enum_type in &message.enum_types {
        validate_enum(enum_type)?;
    }
    for nested in &message.message_types {
        validate_message(nested)?;
    }
    Ok(())
}

/// Validates an enum definition.
fn validate_enum(enum_type: &ExtendedEnum) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_numbers = HashSet::new();

    for value in &enum_type.values {
        if !seen_names.insert(&value.name) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value name '{}' in enum '{}'",
                    value.name, enum_type.full_name
                ),
            });
        }

        if !seen_numbers.insert(value.number) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value {} in enum '{}'",
                    value.number, enum_type.full_name
                ),
            });
        }
    }

    Ok(())
}
