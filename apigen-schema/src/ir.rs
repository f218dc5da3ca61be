//! Intermediate representation for code generation.
//!
//! The IR is a tree of files, messages, enums and fields that is independent
//! of any output syntax. Fields refer to enum and message types by *name*
//! only; names are resolved against the tree at emission time.

use std::fmt;

/// Import every generated file starts with.
pub const MESSAGES_IMPORT: &str = "from protorpc import messages";

/// Import required by temporal fields.
pub const TEMPORAL_IMPORT: &str = "from protorpc import message_types";

/// Type name of the temporal message.
pub const DATE_TIME_TYPE: &str = "protorpc.message_types.DateTimeMessage";

/// Wire representation of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// Signed 64-bit integer, carried as decimal text.
    Int64,
    /// Unsigned 64-bit integer, carried as decimal text.
    Uint64,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Bytes,
    /// Enum value.
    Enum,
    /// Nested message.
    Message,
    /// Date or date-time message.
    Temporal,
}

impl Variant {
    /// Returns the upper-case variant name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Int64 => "INT64",
            Self::Uint64 => "UINT64",
            Self::Int32 => "INT32",
            Self::Uint32 => "UINT32",
            Self::Bool => "BOOL",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
            Self::Enum => "ENUM",
            Self::Message => "MESSAGE",
            Self::Temporal => "TEMPORAL",
        }
    }

    /// Returns the lower-case scalar keyword used in interface definitions.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::Message => "message",
            Self::Temporal => "temporal",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    /// Optional field (default).
    #[default]
    Optional,
    /// Required field.
    Required,
    /// Repeated field.
    Repeated,
}

impl Label {
    /// Returns the lower-case label keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::Required => "required",
            Self::Repeated => "repeated",
        }
    }
}

/// Field class selected by a field's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Text field.
    String,
    /// Integer field.
    Integer,
    /// Floating point field.
    Float,
    /// Boolean field.
    Boolean,
    /// Bytes field.
    Bytes,
    /// Enum reference.
    Enum,
    /// Message reference.
    Message,
    /// Temporal message.
    DateTime,
}

impl FieldKind {
    /// Returns the field kind that carries the given variant.
    #[must_use]
    pub const fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Double | Variant::Float => Self::Float,
            Variant::Int64 | Variant::Uint64 | Variant::Int32 | Variant::Uint32 => Self::Integer,
            Variant::Bool => Self::Boolean,
            Variant::String => Self::String,
            Variant::Bytes => Self::Bytes,
            Variant::Enum => Self::Enum,
            Variant::Message => Self::Message,
            Variant::Temporal => Self::DateTime,
        }
    }

    /// Returns the variant this kind uses when none is given.
    #[must_use]
    pub const fn default_variant(self) -> Variant {
        match self {
            Self::String => Variant::String,
            Self::Integer => Variant::Int64,
            Self::Float => Variant::Double,
            Self::Boolean => Variant::Bool,
            Self::Bytes => Variant::Bytes,
            Self::Enum => Variant::Enum,
            Self::Message => Variant::Message,
            Self::DateTime => Variant::Temporal,
        }
    }

    /// Returns true if fields of this kind name another descriptor.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Enum | Self::Message | Self::DateTime)
    }

    /// Returns true if defaults of this kind are carried as literal text.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Bytes)
    }
}

/// Resolved wire representation of a schema attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Type name (primitive token or descriptor name).
    pub type_name: String,
    /// Wire variant.
    pub variant: Variant,
}

impl TypeInfo {
    /// Creates type information.
    #[must_use]
    pub fn new(type_name: impl Into<String>, variant: Variant) -> Self {
        Self {
            type_name: type_name.into(),
            variant,
        }
    }
}

/// Field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Tag, unique within the owning message.
    pub number: u32,
    /// Cardinality.
    pub label: Label,
    /// Type name.
    pub type_name: String,
    /// Wire variant.
    pub variant: Variant,
    /// Default value as literal text.
    pub default_value: Option<String>,
}

impl FieldDescriptor {
    /// Returns the field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        FieldKind::for_variant(self.variant)
    }

    /// Returns the default value if it is present and non-empty.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|d| !d.is_empty())
    }
}

/// Field definition with a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedField {
    /// The underlying field.
    pub descriptor: FieldDescriptor,
    /// Human-readable description.
    pub description: String,
}

impl ExtendedField {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Returns the field tag.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.descriptor.number
    }
}

/// Enum value definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedEnumValue {
    /// Value name.
    pub name: String,
    /// Tag.
    pub number: u32,
    /// Description.
    pub description: String,
}

/// Enum definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedEnum {
    /// Unqualified name.
    pub name: String,
    /// Dotted path of the enclosing descriptors plus `name`.
    pub full_name: String,
    /// Description.
    pub description: String,
    /// Values, in insertion order.
    pub values: Vec<ExtendedEnumValue>,
}

impl ExtendedEnum {
    /// Returns the values ordered by tag.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<&ExtendedEnumValue> {
        let mut values: Vec<&ExtendedEnumValue> = self.values.iter().collect();
        values.sort_by_key(|v| v.number);
        values
    }
}

/// Message definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedMessage {
    /// Unqualified name.
    pub name: String,
    /// Dotted path of the enclosing descriptors plus `name`.
    pub full_name: String,
    /// Description.
    pub description: String,
    /// Fields, in tag order as produced.
    pub fields: Vec<ExtendedField>,
    /// Nested messages.
    pub message_types: Vec<ExtendedMessage>,
    /// Nested enums.
    pub enum_types: Vec<ExtendedEnum>,
    /// Class-level annotations, outermost first.
    pub decorators: Vec<String>,
}

impl ExtendedMessage {
    /// Returns true if the message has no fields and no nested types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message_types.is_empty() && self.enum_types.is_empty()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ExtendedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Looks up a nested message by unqualified name.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&ExtendedMessage> {
        self.message_types.iter().find(|m| m.name == name)
    }

    /// Looks up a nested enum by unqualified name.
    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&ExtendedEnum> {
        self.enum_types.iter().find(|e| e.name == name)
    }
}

/// File definition: the root of the IR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedFile {
    /// Package name.
    pub package: String,
    /// Description.
    pub description: String,
    /// Top-level messages.
    pub message_types: Vec<ExtendedMessage>,
    /// Top-level enums.
    pub enum_types: Vec<ExtendedEnum>,
    /// Extra import lines, without duplicates.
    pub additional_imports: Vec<String>,
}

impl ExtendedFile {
    /// Creates an empty file carrying the base messages import.
    #[must_use]
    pub fn new(package: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            description: description.into(),
            message_types: Vec::new(),
            enum_types: Vec::new(),
            additional_imports: vec![MESSAGES_IMPORT.to_string()],
        }
    }

    /// Adds an import unless it is already present.
    pub fn add_import(&mut self, import: &str) {
        if !self.additional_imports.iter().any(|i| i == import) {
            self.additional_imports.push(import.to_string());
        }
    }

    /// Looks up a top-level message by name.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&ExtendedMessage> {
        self.message_types.iter().find(|m| m.name == name)
    }

    /// Looks up a top-level enum by name.
    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&ExtendedEnum> {
        self.enum_types.iter().find(|e| e.name == name)
    }
}

/// Kind of a registered descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Message descriptor.
    Message,
    /// Enum descriptor.
    Enum,
}

/// Borrowed view of a registered descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor<'a> {
    /// Message descriptor.
    Message(&'a ExtendedMessage),
    /// Enum descriptor.
    Enum(&'a ExtendedEnum),
}

impl Descriptor<'_> {
    /// Returns the unqualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Message(m) => &m.name,
            Self::Enum(e) => &e.name,
        }
    }

    /// Returns the fully-qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        match self {
            Self::Message(m) => &m.full_name,
            Self::Enum(e) => &e.full_name,
        }
    }

    /// Returns the descriptor kind.
    #[must_use]
    pub const fn kind(&self) -> DescriptorKind {
        match self {
            Self::Message(_) => DescriptorKind::Message,
            Self::Enum(_) => DescriptorKind::Enum,
        }
    }
}
