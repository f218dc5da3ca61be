//! Data-class source (protorpc) emitter.

use super::{
    Emitter, describe, enum_entries, field_entries, message_entries, print_catalogue, print_enums,
    print_messages, sorted_fields,
};
use apigen_core::printer::{PrettyPrinter, wrap};
use apigen_schema::ir::{ExtendedEnum, ExtendedField, ExtendedFile, ExtendedMessage, FieldKind, Label};

/// Default namespace whose imports are grouped after all others.
pub const DEFAULT_VENDOR_NAMESPACE: &str = "google";

const DOCSTRING: &str = "\"\"\"";

/// Renders the IR as protorpc message classes.
#[derive(Debug, Clone)]
pub struct SourceEmitter {
    vendor_namespace: String,
}

impl SourceEmitter {
    /// Creates a source emitter with the default vendor namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::with_vendor_namespace(DEFAULT_VENDOR_NAMESPACE)
    }

    /// Creates a source emitter that groups imports mentioning `namespace` last.
    #[must_use]
    pub fn with_vendor_namespace(namespace: impl Into<String>) -> Self {
        Self {
            vendor_namespace: namespace.into(),
        }
    }

    /// Returns the vendor namespace.
    #[must_use]
    pub fn vendor_namespace(&self) -> &str {
        &self.vendor_namespace
    }

    fn print_imports(&self, printer: &mut PrettyPrinter, imports: &[String]) {
        let (mut vendor, mut other): (Vec<&str>, Vec<&str>) = imports
            .iter()
            .map(String::as_str)
            .partition(|i| i.contains(self.vendor_namespace.as_str()));
        for group in [&mut other, &mut vendor] {
            if group.is_empty() {
                continue;
            }
            group.sort_unstable();
            group.dedup();
            for import in group.iter() {
                printer.write(import);
            }
            printer.blank();
        }
    }

    fn print_class_separator(printer: &mut PrettyPrinter) {
        printer.blank();
        if printer.is_top_level() {
            printer.blank();
        }
    }

    /// Writes `"""description` wrapped to the current width.
    fn print_docstring_head(printer: &mut PrettyPrinter, description: &str) {
        let width = printer.remaining_width();
        for line in wrap(&format!("{DOCSTRING}{description}"), width) {
            printer.write(&line);
        }
    }

    fn print_message_docstring(printer: &mut PrettyPrinter, message: &ExtendedMessage) {
        let description = describe(&message.description, || {
            format!("{} message type.", message.name)
        });
        let fits = description.chars().count() < printer.remaining_width().saturating_sub(6);
        if message.is_empty() && fits {
            printer.write(&format!("{DOCSTRING}{description}{DOCSTRING}"));
            return;
        }
        Self::print_docstring_head(printer, &description);
        print_catalogue(printer, "Enums", "", enum_entries(&message.enum_types));
        print_catalogue(printer, "Messages", "", message_entries(&message.message_types));
        print_catalogue(printer, "Fields", "", field_entries(&message.fields));
        printer.write(DOCSTRING);
        printer.blank();
    }
}

impl Default for SourceEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats one field as a constructor call.
fn field_line(field: &ExtendedField) -> String {
    let descriptor = &field.descriptor;
    let kind = descriptor.kind();
    let (module, class) = match kind {
        FieldKind::String => ("messages", "StringField"),
        FieldKind::Integer => ("messages", "IntegerField"),
        FieldKind::Float => ("messages", "FloatField"),
        FieldKind::Boolean => ("messages", "BooleanField"),
        FieldKind::Bytes => ("messages", "BytesField"),
        FieldKind::Enum => ("messages", "EnumField"),
        FieldKind::Message => ("messages", "MessageField"),
        FieldKind::DateTime => ("message_types", "DateTimeField"),
    };

    let type_format = match kind {
        FieldKind::Enum | FieldKind::Message => format!("'{}', ", descriptor.type_name),
        _ => String::new(),
    };
    let label_format = match descriptor.label {
        Label::Optional => "",
        Label::Required => ", required=True",
        Label::Repeated => ", repeated=True",
    };
    let variant_format = if descriptor.variant == kind.default_variant() {
        String::new()
    } else {
        format!(", variant=messages.Variant.{}", descriptor.variant)
    };
    let default_format = match descriptor.default_value() {
        Some(value) => format!(", default={}", format_default(kind, value)),
        None => String::new(),
    };

    format!(
        "{} = {module}.{class}({type_format}{}{label_format}{variant_format}{default_format})",
        descriptor.name, descriptor.number
    )
}

fn format_default(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::String | FieldKind::Bytes => quote(value),
        FieldKind::Boolean => match value.to_ascii_lowercase().as_str() {
            "true" => "True".to_string(),
            "false" => "False".to_string(),
            _ => value.to_string(),
        },
        FieldKind::Enum => match value.parse::<i64>() {
            Ok(number) => number.to_string(),
            Err(_) => quote(value),
        },
        _ => value.to_string(),
    }
}

/// Single-quotes a string literal.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

impl Emitter for SourceEmitter {
    fn print_preamble(
        &self,
        printer: &mut PrettyPrinter,
        package: &str,
        version: &str,
        file: &ExtendedFile,
    ) {
        printer.write(&format!(
            "{DOCSTRING}Generated message classes for {package} version {version}."
        ));
        printer.blank();
        let width = printer.remaining_width();
        for line in wrap(&file.description, width) {
            printer.write(&line);
        }
        printer.write(DOCSTRING);
        printer.blank();
        self.print_imports(printer, &file.additional_imports);
        printer.blank();
        printer.write(&format!("package = '{}'", file.package));
        printer.blank();
        printer.blank();
    }

    fn print_enum(&self, printer: &mut PrettyPrinter, enum_type: &ExtendedEnum) {
        printer.write(&format!("class {}(messages.Enum):", enum_type.name));
        {
            let mut body = printer.indent();
            let description = describe(&enum_type.description, || {
                format!("{} enum type.", enum_type.name)
            });
            Self::print_docstring_head(&mut body, &description);
            let values = enum_type.sorted_values();
            print_catalogue(
                &mut body,
                "Values",
                "",
                values
                    .iter()
                    .map(|v| (v.name.as_str(), v.description.as_str())),
            );
            body.write(DOCSTRING);
            for value in &values {
                body.write(&format!("{} = {}", value.name, value.number));
            }
            if values.is_empty() {
                body.write("pass");
            }
        }
        Self::print_class_separator(printer);
    }

    fn print_message(&self, printer: &mut PrettyPrinter, message: &ExtendedMessage) {
        for decorator in &message.decorators {
            printer.write(&format!("@{decorator}"));
        }
        printer.write(&format!("class {}(messages.Message):", message.name));
        {
            let mut body = printer.indent();
            Self::print_message_docstring(&mut body, message);
            print_enums(self, &mut body, &message.enum_types);
            print_messages(self, &mut body, &message.message_types);
            for field in sorted_fields(&message.fields) {
                body.write(&field_line(field));
            }
        }
        Self::print_class_separator(printer);
    }
}
