//! Interface definition (proto2) emitter.

use super::{
    Emitter, describe, enum_entries, field_entries, message_entries, print_catalogue, print_enums,
    print_messages, sorted_fields,
};
use apigen_core::printer::{PrettyPrinter, wrap};
use apigen_schema::ir::{ExtendedEnum, ExtendedField, ExtendedFile, ExtendedMessage, FieldKind};

const COMMENT: &str = "// ";

/// Width reserved by the comment leader of the preamble description.
const PREAMBLE_COMMENT_WIDTH: usize = 3;

/// Renders the IR as a proto2 interface definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlEmitter;

impl IdlEmitter {
    /// Creates a new IDL emitter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn print_comment(printer: &mut PrettyPrinter, text: &str) {
        let width = printer.remaining_width().saturating_sub(COMMENT.len());
        for line in wrap(text, width) {
            printer.write(&format!("{COMMENT}{line}"));
        }
    }

    fn print_fields(printer: &mut PrettyPrinter, fields: &[ExtendedField]) {
        for field in sorted_fields(fields) {
            printer.blank();
            Self::print_comment(printer, &field.description);
            printer.write(&field_line(field));
        }
    }
}

/// Formats one field declaration.
fn field_line(field: &ExtendedField) -> String {
    let descriptor = &field.descriptor;
    let kind = descriptor.kind();
    let proto_type = if kind.is_reference() {
        descriptor.type_name.as_str()
    } else {
        descriptor.variant.keyword()
    };
    let default_statement = match descriptor.default_value() {
        Some(value) => format!(" [default = {}]", format_default(kind, value)),
        None => String::new(),
    };
    format!(
        "{} {} {} = {}{};",
        descriptor.label.as_str(),
        proto_type,
        descriptor.name,
        descriptor.number,
        default_statement
    )
}

fn format_default(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::String | FieldKind::Bytes => quote(value),
        FieldKind::Boolean => value.to_lowercase(),
        _ => value.to_string(),
    }
}

/// Double-quotes a string literal.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

impl Emitter for IdlEmitter {
    fn print_preamble(
        &self,
        printer: &mut PrettyPrinter,
        package: &str,
        version: &str,
        file: &ExtendedFile,
    ) {
        printer.write(&format!(
            "// Generated message classes for {package} version {version}."
        ));
        let width = printer
            .remaining_width()
            .saturating_sub(PREAMBLE_COMMENT_WIDTH);
        let description = wrap(&file.description, width);
        if !description.is_empty() {
            printer.write("//");
            for line in description {
                printer.write(&format!("{COMMENT}{line}"));
            }
        }
        printer.blank();
        printer.write("syntax = \"proto2\";");
        printer.write(&format!("package {};", file.package));
    }

    fn print_enum(&self, printer: &mut PrettyPrinter, enum_type: &ExtendedEnum) {
        let description = describe(&enum_type.description, || {
            format!("{} enum type.", enum_type.name)
        });
        Self::print_comment(printer, &description);
        let values = enum_type.sorted_values();
        print_catalogue(
            printer,
            "Values",
            COMMENT,
            values
                .iter()
                .map(|v| (v.name.as_str(), v.description.as_str())),
        );

        printer.write(&format!("enum {} {{", enum_type.name));
        {
            let mut body = printer.indent();
            for value in values {
                body.blank();
                Self::print_comment(&mut body, &value.description);
                body.write(&format!("{} = {};", value.name, value.number));
            }
        }
        printer.write("}");
        printer.blank();
    }

    fn print_message(&self, printer: &mut PrettyPrinter, message: &ExtendedMessage) {
        printer.blank();
        let description = describe(&message.description, || {
            format!("{} message type.", message.name)
        });
        Self::print_comment(printer, &description);
        print_catalogue(printer, "Enums", COMMENT, enum_entries(&message.enum_types));
        print_catalogue(
            printer,
            "Messages",
            COMMENT,
            message_entries(&message.message_types),
        );
        print_catalogue(printer, "Fields", COMMENT, field_entries(&message.fields));

        if message.is_empty() {
            printer.write(&format!("message {} {{}}", message.name));
            return;
        }
        printer.write(&format!("message {} {{", message.name));
        {
            let mut body = printer.indent();
            print_enums(self, &mut body, &message.enum_types);
            print_messages(self, &mut body, &message.message_types);
            Self::print_fields(&mut body, &message.fields);
        }
        printer.write("}");
    }
}
