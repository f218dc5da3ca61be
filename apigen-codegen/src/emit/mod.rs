//! Output syntax backends.
//!
//! An [`Emitter`] renders one validated [`ExtendedFile`] into a
//! [`PrettyPrinter`]. Sibling ordering is decided here, not by the IR: at
//! every level enums are printed sorted by name, then messages sorted by
//! name, and enum values sorted by tag.

pub mod idl;
pub mod source;

pub use idl::IdlEmitter;
pub use source::SourceEmitter;

use apigen_core::printer::{PrettyPrinter, wrap_indented};
use apigen_schema::ir::{ExtendedEnum, ExtendedField, ExtendedFile, ExtendedMessage};

/// A syntax backend.
pub trait Emitter {
    /// Prints the file header, imports and package declaration.
    fn print_preamble(
        &self,
        printer: &mut PrettyPrinter,
        package: &str,
        version: &str,
        file: &ExtendedFile,
    );

    /// Prints one enum declaration.
    fn print_enum(&self, printer: &mut PrettyPrinter, enum_type: &ExtendedEnum);

    /// Prints one message declaration, including everything nested in it.
    fn print_message(&self, printer: &mut PrettyPrinter, message: &ExtendedMessage);
}

/// Prints a whole file: preamble, top-level enums, then top-level messages.
pub fn write_file<E: Emitter + ?Sized>(
    emitter: &E,
    printer: &mut PrettyPrinter,
    package: &str,
    version: &str,
    file: &ExtendedFile,
) {
    emitter.print_preamble(printer, package, version, file);
    print_enums(emitter, printer, &file.enum_types);
    print_messages(emitter, printer, &file.message_types);
}

/// Prints enums sorted by name.
pub fn print_enums<E: Emitter + ?Sized>(
    emitter: &E,
    printer: &mut PrettyPrinter,
    enums: &[ExtendedEnum],
) {
    for enum_type in sorted_enums(enums) {
        emitter.print_enum(printer, enum_type);
    }
}

/// Prints messages sorted by name.
pub fn print_messages<E: Emitter + ?Sized>(
    emitter: &E,
    printer: &mut PrettyPrinter,
    messages: &[ExtendedMessage],
) {
    for message in sorted_messages(messages) {
        emitter.print_message(printer, message);
    }
}

pub(crate) fn sorted_enums(enums: &[ExtendedEnum]) -> Vec<&ExtendedEnum> {
    let mut sorted: Vec<&ExtendedEnum> = enums.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

pub(crate) fn sorted_messages(messages: &[ExtendedMessage]) -> Vec<&ExtendedMessage> {
    let mut sorted: Vec<&ExtendedMessage> = messages.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

pub(crate) fn sorted_fields(fields: &[ExtendedField]) -> Vec<&ExtendedField> {
    let mut sorted: Vec<&ExtendedField> = fields.iter().collect();
    sorted.sort_by_key(|f| f.number());
    sorted
}

/// Returns `description`, or `fallback` if it is empty.
pub(crate) fn describe(description: &str, fallback: impl FnOnce() -> String) -> String {
    if description.is_empty() {
        fallback()
    } else {
        description.to_string()
    }
}

/// Prints a `name: description` catalogue under `heading`.
///
/// Nothing is printed for an empty catalogue. Every line starts with
/// `prefix` (the comment leader, or nothing inside a docstring).
pub(crate) fn print_catalogue<'a>(
    printer: &mut PrettyPrinter,
    heading: &str,
    prefix: &str,
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return;
    }
    let width = printer.remaining_width().saturating_sub(prefix.len());
    printer.write(prefix);
    printer.write(&format!("{prefix}{heading}:"));
    for (name, description) in entries {
        let entry = format!("{name}: {description}");
        for line in wrap_indented(&entry, width, "  ", "    ") {
            printer.write(&format!("{prefix}{line}"));
        }
    }
}

pub(crate) fn enum_entries(enum_types: &[ExtendedEnum]) -> Vec<(&str, &str)> {
    sorted_enums(enum_types)
        .into_iter()
        .map(|e| (e.name.as_str(), e.description.as_str()))
        .collect()
}

pub(crate) fn message_entries(messages: &[ExtendedMessage]) -> Vec<(&str, &str)> {
    sorted_messages(messages)
        .into_iter()
        .map(|m| (m.name.as_str(), m.description.as_str()))
        .collect()
}

pub(crate) fn field_entries(fields: &[ExtendedField]) -> Vec<(&str, &str)> {
    sorted_fields(fields)
        .into_iter()
        .map(|f| (f.name(), f.description.as_str()))
        .collect()
}
