//! Schema to IR type resolution.
//!
//! [`TypeResolver`] walks schema nodes and builds the [`ExtendedFile`] tree.
//! Forward and recursive references are handled by name: a descriptor is
//! *declared* (nascent) before its children are resolved, references to
//! names that are not registered yet are parked in an unknown set, and
//! [`TypeResolver::validate`] rejects the document if anything is left over
//! once the walk is complete.

use crate::error::SchemaError;
use crate::ir::{
    DATE_TIME_TYPE, Descriptor, DescriptorKind, ExtendedEnum, ExtendedEnumValue, ExtendedField,
    ExtendedFile, ExtendedMessage, FieldDescriptor, FieldKind, Label, TEMPORAL_IMPORT, TypeInfo,
    Variant,
};
use crate::types::{DiscoveryDocument, SchemaNode};
use apigen_core::names::{NameNormalizer, Names};
use std::collections::{BTreeMap, BTreeSet};

/// Package the open-map encoding helper is imported from by default.
pub const DEFAULT_BASE_FILES_PACKAGE: &str = "apitools.base.py";

/// Name of the catch-all field synthesized for open maps.
pub const ADDITIONAL_PROPERTIES_FIELD: &str = "additionalProperties";

/// Name of the entry message synthesized for open maps.
pub const ADDITIONAL_PROPERTY_TYPE: &str = "AdditionalProperty";

/// Description given to enum values that have none.
const NO_DESCRIPTION: &str = "<no description>";

/// Maps a `format` token to its wire type.
///
/// 64-bit integers are carried as decimal text, so their type name is `string`.
fn format_type_info(format: &str) -> Option<TypeInfo> {
    let info = match format {
        "int32" => TypeInfo::new("integer", Variant::Int32),
        "uint32" => TypeInfo::new("integer", Variant::Uint32),
        "int64" => TypeInfo::new("string", Variant::Int64),
        "uint64" => TypeInfo::new("string", Variant::Uint64),
        "double" => TypeInfo::new("number", Variant::Double),
        "float" => TypeInfo::new("number", Variant::Float),
        "byte" => TypeInfo::new("byte", Variant::Bytes),
        "date" | "date-time" => TypeInfo::new(DATE_TIME_TYPE, Variant::Temporal),
        _ => return None,
    };
    Some(info)
}

/// Maps a bare primitive `type` to its wire type.
fn primitive_type_info(kind: &str) -> Option<TypeInfo> {
    let info = match kind {
        "string" => TypeInfo::new("string", FieldKind::String.default_variant()),
        "integer" => TypeInfo::new("integer", FieldKind::Integer.default_variant()),
        "boolean" => TypeInfo::new("boolean", FieldKind::Boolean.default_variant()),
        "number" => TypeInfo::new("number", FieldKind::Float.default_variant()),
        _ => return None,
    };
    Some(info)
}

fn compute_label(attrs: &SchemaNode) -> Label {
    if attrs.required {
        Label::Required
    } else if attrs.is_array() {
        Label::Repeated
    } else {
        Label::Optional
    }
}

/// Decodes a JSON literal and renders it back as text.
fn decode_literal(raw: &str, path: &str) -> Result<String, SchemaError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(value) => Ok(value.to_string()),
        Err(_) => Err(SchemaError::InvalidDefault {
            value: raw.to_string(),
            path: path.to_string(),
        }),
    }
}

fn tag(index: usize, owner: &str) -> Result<u32, SchemaError> {
    u32::try_from(index)
        .map_err(|_| SchemaError::validation(format!("too many entries in '{owner}'")))
}

/// A descriptor whose children are fully resolved.
enum Completed {
    Message(ExtendedMessage),
    Enum(ExtendedEnum),
}

impl Completed {
    fn full_name(&self) -> &str {
        match self {
            Self::Message(m) => &m.full_name,
            Self::Enum(e) => &e.full_name,
        }
    }
}

/// Builds the IR for one document.
///
/// A resolver is single-use: create one per document, feed it schemas, then
/// call [`TypeResolver::into_file`].
#[derive(Debug)]
pub struct TypeResolver<N = Names> {
    names: N,
    base_files_package: String,
    file: ExtendedFile,
    /// Full name to kind of every completed descriptor.
    registry: BTreeMap<String, DescriptorKind>,
    /// Full names declared but not yet completed.
    nascent: BTreeSet<String>,
    /// Names referenced but not yet registered.
    unknown: BTreeSet<String>,
    /// Messages under construction, outermost first. Their names form the
    /// current lexical path and the last one is the current container.
    scopes: Vec<ExtendedMessage>,
}

impl<N: NameNormalizer> TypeResolver<N> {
    /// Creates a resolver for a file with the given package and description.
    #[must_use]
    pub fn new(names: N, package: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            names,
            base_files_package: DEFAULT_BASE_FILES_PACKAGE.to_string(),
            file: ExtendedFile::new(package, description),
            registry: BTreeMap::new(),
            nascent: BTreeSet::new(),
            unknown: BTreeSet::new(),
            scopes: Vec::new(),
        }
    }

    /// Sets the package the open-map encoding helper is imported from.
    #[must_use]
    pub fn with_base_files_package(mut self, package: impl Into<String>) -> Self {
        self.base_files_package = package.into();
        self
    }

    /// Returns the name normalizer.
    #[must_use]
    pub fn names(&self) -> &N {
        &self.names
    }

    /// Returns the dotted path of the messages currently under construction.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.scopes
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Adds every schema of a document, in sorted name order.
    ///
    /// # Errors
    /// Returns the first resolution error.
    pub fn add_document(&mut self, document: &DiscoveryDocument) -> Result<(), SchemaError> {
        for (name, schema) in &document.schemas {
            self.add_descriptor_from_schema(name, schema)?;
        }
        Ok(())
    }

    /// Adds an enum built from parallel value and description lists.
    ///
    /// Value `i` gets tag `i`. Returns the normalized enum name.
    ///
    /// # Errors
    /// Returns `MismatchedEnumDescriptions` if the lists differ in length and
    /// `Redefinition` if the name is already taken at the current path.
    pub fn add_enum_descriptor(
        &mut self,
        name: &str,
        description: &str,
        values: &[String],
        descriptions: &[String],
    ) -> Result<String, SchemaError> {
        let enum_name = self.names.class_name(name);
        if values.len() != descriptions.len() {
            return Err(SchemaError::MismatchedEnumDescriptions {
                name: enum_name,
                values: values.len(),
                descriptions: descriptions.len(),
            });
        }
        let full_name = self.full_name(&enum_name);
        self.declare(&full_name)?;

        let mut enum_values = Vec::with_capacity(values.len());
        for (index, (value, value_description)) in values.iter().zip(descriptions).enumerate() {
            let description = if value_description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                value_description.clone()
            };
            enum_values.push(ExtendedEnumValue {
                name: self.names.normalize_enum_name(value),
                number: tag(index, &full_name)?,
                description,
            });
        }

        self.register(Completed::Enum(ExtendedEnum {
            name: enum_name.clone(),
            full_name,
            description: description.to_string(),
            values: enum_values,
        }))?;
        Ok(enum_name)
    }

    /// Adds a message built from an object schema.
    ///
    /// Does nothing if a descriptor named `name` already exists at the
    /// current path. Properties are resolved in sorted key order, so the
    /// property at sorted position `i` gets tag `i + 1`. Returns the name of
    /// the message.
    ///
    /// # Errors
    /// Returns `UnsupportedSchemaType` unless the node is an `object` or
    /// `any`, plus any error raised while resolving its properties.
    pub fn add_descriptor_from_schema(
        &mut self,
        name: &str,
        schema: &SchemaNode,
    ) -> Result<String, SchemaError> {
        let lookup_name = self.names.class_name(name);
        if let Some(existing) = self.get_descriptor(&self.full_name(&lookup_name))? {
            return Ok(existing.name().to_string());
        }
        match schema.kind() {
            Some("object" | "any") => {}
            other => {
                return Err(SchemaError::unsupported(
                    other.unwrap_or("<none>"),
                    self.full_name(name),
                ));
            }
        }

        let message_name = self
            .names
            .class_name(schema.id.as_deref().unwrap_or(name));
        let full_name = self.full_name(&message_name);
        self.declare(&full_name)?;

        let description = schema
            .description
            .clone()
            .unwrap_or_else(|| format!("A {message_name} object."));
        let message = ExtendedMessage {
            name: message_name.clone(),
            full_name,
            description,
            ..ExtendedMessage::default()
        };

        let (mut message, (fields, decorators)) =
            self.with_scope(message, |this| this.resolve_properties(schema))?;
        message.fields = fields;
        message.decorators = decorators;
        self.register(Completed::Message(message))?;
        Ok(message_name)
    }

    /// Looks up a descriptor, trying the path-qualified name before the bare name.
    ///
    /// # Errors
    /// Returns `InProgressReference` if the matching name is still under construction.
    pub fn lookup_descriptor(&self, name: &str) -> Result<Option<Descriptor<'_>>, SchemaError> {
        let qualified = self.full_name(name);
        if let Some(found) = self.get_descriptor(&qualified)? {
            return Ok(Some(found));
        }
        self.get_descriptor(name)
    }

    /// Like [`TypeResolver::lookup_descriptor`], but a missing name is an error.
    ///
    /// # Errors
    /// Returns `UnresolvedTypeReference` if no descriptor matches.
    pub fn lookup_descriptor_or_die(&self, name: &str) -> Result<Descriptor<'_>, SchemaError> {
        self.lookup_descriptor(name)?
            .ok_or_else(|| SchemaError::UnresolvedTypeReference {
                name: name.to_string(),
            })
    }

    /// Checks that every declared type was completed and every reference resolved.
    ///
    /// # Errors
    /// Returns `Incomplete` naming every outstanding type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.nascent.is_empty() && self.unknown.is_empty() {
            return Ok(());
        }
        let nascent: Vec<String> = self.nascent.iter().cloned().collect();
        let unknown: Vec<String> = self.unknown.iter().cloned().collect();
        tracing::warn!(
            "Type registry incomplete: nascent {:?}, unknown {:?}",
            nascent,
            unknown
        );
        Err(SchemaError::Incomplete { nascent, unknown })
    }

    /// Returns the file after validation.
    ///
    /// # Errors
    /// Returns `Incomplete` if validation fails.
    pub fn file_descriptor(&self) -> Result<&ExtendedFile, SchemaError> {
        self.validate()?;
        Ok(&self.file)
    }

    /// Consumes the resolver and returns the validated file.
    ///
    /// # Errors
    /// Returns `Incomplete` if validation fails.
    pub fn into_file(self) -> Result<ExtendedFile, SchemaError> {
        self.validate()?;
        Ok(self.file)
    }

    fn full_name(&self, name: &str) -> String {
        let mut full = String::new();
        for scope in &self.scopes {
            full.push_str(&scope.name);
            full.push('.');
        }
        full.push_str(name);
        full
    }

    /// Looks up an exact full name.
    fn get_descriptor(&self, full_name: &str) -> Result<Option<Descriptor<'_>>, SchemaError> {
        if self.registry.contains_key(full_name) {
            return Ok(self.locate(full_name));
        }
        if self.nascent.contains(full_name) {
            return Err(SchemaError::InProgressReference {
                name: full_name.to_string(),
            });
        }
        Ok(None)
    }

    /// Finds a registered descriptor in the tree.
    ///
    /// Completed descriptors live either in the file, inside other completed
    /// messages, or inside a message that is still on the scope stack.
    fn locate(&self, full_name: &str) -> Option<Descriptor<'_>> {
        let mut parts: Vec<&str> = full_name.split('.').collect();
        let leaf = parts.pop()?;
        let mut messages: &[ExtendedMessage] = &self.file.message_types;
        let mut enums: &[ExtendedEnum] = &self.file.enum_types;
        let mut on_scope_chain = true;

        for (depth, part) in parts.iter().enumerate() {
            let container = match messages.iter().find(|m| m.name == *part) {
                Some(message) => {
                    on_scope_chain = false;
                    message
                }
                None => match self.scopes.get(depth) {
                    Some(scope) if on_scope_chain && scope.name == *part => scope,
                    _ => return None,
                },
            };
            messages = &container.message_types;
            enums = &container.enum_types;
        }

        match self.registry.get(full_name)? {
            DescriptorKind::Message => messages
                .iter()
                .find(|m| m.name == leaf)
                .map(Descriptor::Message),
            DescriptorKind::Enum => enums.iter().find(|e| e.name == leaf).map(Descriptor::Enum),
        }
    }

    fn declare(&mut self, full_name: &str) -> Result<(), SchemaError> {
        if self.registry.contains_key(full_name) || !self.nascent.insert(full_name.to_string()) {
            return Err(SchemaError::Redefinition {
                name: full_name.to_string(),
            });
        }
        tracing::debug!("Declared descriptor {}", full_name);
        Ok(())
    }

    /// Moves a declared descriptor into the registry and the current container.
    fn register(&mut self, descriptor: Completed) -> Result<(), SchemaError> {
        let full_name = descriptor.full_name().to_string();
        if self.registry.contains_key(&full_name) {
            return Err(SchemaError::Redefinition { name: full_name });
        }
        if !self.nascent.remove(&full_name) {
            return Err(SchemaError::IllegalDirectRegistration { name: full_name });
        }
        self.unknown.remove(&full_name);

        let (messages, enums) = match self.scopes.last_mut() {
            Some(scope) => (&mut scope.message_types, &mut scope.enum_types),
            None => (&mut self.file.message_types, &mut self.file.enum_types),
        };
        match descriptor {
            Completed::Message(message) => {
                self.registry.insert(full_name.clone(), DescriptorKind::Message);
                messages.push(message);
            }
            Completed::Enum(enum_type) => {
                self.registry.insert(full_name.clone(), DescriptorKind::Enum);
                enums.push(enum_type);
            }
        }
        tracing::debug!("Registered descriptor {}", full_name);
        Ok(())
    }

    /// Runs `body` with `message` as the current container.
    ///
    /// The scope is popped on every exit, so siblings resolved afterwards see
    /// the unchanged parent path even when `body` fails.
    fn with_scope<T>(
        &mut self,
        message: ExtendedMessage,
        body: impl FnOnce(&mut Self) -> Result<T, SchemaError>,
    ) -> Result<(ExtendedMessage, T), SchemaError> {
        let depth = self.scopes.len();
        self.scopes.push(message);
        let result = body(self);
        self.scopes.truncate(depth + 1);
        let message = self
            .scopes
            .pop()
            .ok_or_else(|| SchemaError::validation("descriptor scope stack underflow"))?;
        Ok((message, result?))
    }

    fn resolve_properties(
        &mut self,
        schema: &SchemaNode,
    ) -> Result<(Vec<ExtendedField>, Vec<String>), SchemaError> {
        let owner = self.current_path();
        let message_name = self
            .scopes
            .last()
            .map(|message| message.name.clone())
            .unwrap_or_default();
        let mut fields = Vec::with_capacity(schema.properties.len() + 1);
        let mut decorators = Vec::new();

        for (index, (name, attrs)) in schema.properties.iter().enumerate() {
            let number = tag(index + 1, &owner)?;
            fields.push(self.field_from_property(name, number, attrs)?);
        }

        if let Some(value_schema) = schema.additional_properties.as_deref() {
            let entry_type = self.add_additional_property_type(&message_name, value_schema)?;
            let description = value_schema
                .description
                .clone()
                .unwrap_or_else(|| format!("Additional properties of type {message_name}"));
            let attrs = SchemaNode {
                kind: Some("array".to_string()),
                items: Some(Box::new(SchemaNode::reference(entry_type))),
                description: Some(description),
                ..SchemaNode::default()
            };
            let number = tag(schema.properties.len() + 1, &owner)?;
            fields.push(self.field_from_property(ADDITIONAL_PROPERTIES_FIELD, number, &attrs)?);
            let import = format!("from {} import encoding", self.base_files_package);
            self.file.add_import(&import);
            decorators.push(format!(
                "encoding.MapUnrecognizedFields('{ADDITIONAL_PROPERTIES_FIELD}')"
            ));
        }

        Ok((fields, decorators))
    }

    /// Synthesizes the `{key, value}` entry message of an open map.
    fn add_additional_property_type(
        &mut self,
        owner: &str,
        value_schema: &SchemaNode,
    ) -> Result<String, SchemaError> {
        let mut value = value_schema.clone();
        value.description = None;

        let key = SchemaNode {
            kind: Some("string".to_string()),
            description: Some("Name of the additional property.".to_string()),
            ..SchemaNode::default()
        };
        let mut properties = BTreeMap::new();
        properties.insert("key".to_string(), key);
        properties.insert("value".to_string(), value);

        let schema = SchemaNode {
            id: Some(ADDITIONAL_PROPERTY_TYPE.to_string()),
            kind: Some("object".to_string()),
            description: Some(format!("An additional property for a {owner} object.")),
            properties,
            ..SchemaNode::default()
        };
        self.add_descriptor_from_schema(ADDITIONAL_PROPERTY_TYPE, &schema)
    }

    fn field_from_property(
        &mut self,
        name: &str,
        number: u32,
        attrs: &SchemaNode,
    ) -> Result<ExtendedField, SchemaError> {
        let path = self.full_name(name);
        let field_name = self.names.clean_name(name);
        let label = compute_label(attrs);
        let name_hint = self
            .names
            .class_name(&format!("{}Value", self.names.class_name(name)));
        let type_info = self.type_info(attrs, &name_hint, &path)?;

        let default_value = match attrs.default_text() {
            Some(raw) => Some(self.normalize_default(raw, &type_info, &path)?),
            None => None,
        };
        let description = attrs
            .description
            .clone()
            .unwrap_or_else(|| format!("A {} attribute.", type_info.type_name));

        tracing::trace!(
            "Resolved field {} = {} ({}, {})",
            path,
            number,
            type_info.type_name,
            type_info.variant
        );
        Ok(ExtendedField {
            descriptor: FieldDescriptor {
                name: field_name,
                number,
                label,
                type_name: type_info.type_name,
                variant: type_info.variant,
                default_value,
            },
            description,
        })
    }

    fn normalize_default(
        &self,
        raw: String,
        type_info: &TypeInfo,
        path: &str,
    ) -> Result<String, SchemaError> {
        let kind = FieldKind::for_variant(type_info.variant);
        if kind.is_textual() || type_info.type_name == "string" {
            return Ok(raw);
        }
        match kind {
            FieldKind::Enum => Ok(self.names.normalize_enum_name(&raw)),
            FieldKind::Boolean => Ok(decode_literal(&raw, path)?.to_lowercase()),
            _ => decode_literal(&raw, path),
        }
    }

    /// Resolves the wire type of a schema attribute.
    ///
    /// For arrays this is the item type; the caller assigns the repeated label.
    fn type_info(
        &mut self,
        attrs: &SchemaNode,
        name_hint: &str,
        path: &str,
    ) -> Result<TypeInfo, SchemaError> {
        if let Some(reference) = attrs.reference.as_deref().filter(|r| !r.is_empty()) {
            let type_name = self.names.class_name(reference);
            self.add_if_unknown(&type_name);
            return Ok(TypeInfo::new(type_name, Variant::Message));
        }

        let Some(kind) = attrs.kind().filter(|k| !k.is_empty()) else {
            return Err(SchemaError::unsupported("<none>", path));
        };

        if let (Some(values), Some(descriptions)) = (&attrs.enum_values, &attrs.enum_descriptions)
        {
            let description = attrs.description.clone().unwrap_or_default();
            let enum_name = self.add_enum_descriptor(
                &format!("{name_hint}ValuesEnum"),
                &description,
                values,
                descriptions,
            )?;
            self.add_if_unknown(&enum_name);
            return Ok(TypeInfo::new(enum_name, Variant::Enum));
        }

        if let Some(format) = attrs.format.as_deref() {
            let info =
                format_type_info(format).ok_or_else(|| SchemaError::unsupported(format, path))?;
            if info.variant == Variant::Temporal {
                self.file.add_import(TEMPORAL_IMPORT);
            }
            return Ok(info);
        }

        if let Some(info) = primitive_type_info(kind) {
            return Ok(info);
        }

        match kind {
            "array" => {
                let items = attrs
                    .items
                    .as_deref()
                    .filter(|items| !items.is_empty())
                    .ok_or_else(|| SchemaError::MissingArrayItems {
                        path: path.to_string(),
                    })?;
                let item_hint = match items.title.as_deref().filter(|t| !t.is_empty()) {
                    Some(title) => title.to_string(),
                    None => format!("{name_hint}ListEntry"),
                };
                let item_hint = self.names.class_name(&item_hint);
                self.type_info(items, &item_hint, path)
            }
            "any" => Ok(TypeInfo::new("string", Variant::String)),
            "object" => {
                if name_hint.is_empty() {
                    return Err(SchemaError::MissingNameHint {
                        path: path.to_string(),
                    });
                }
                let mut schema = attrs.clone();
                schema.id = Some(name_hint.to_string());
                let message_name = self.add_descriptor_from_schema(name_hint, &schema)?;
                self.add_if_unknown(&message_name);
                Ok(TypeInfo::new(message_name, Variant::Message))
            }
            other => Err(SchemaError::unsupported(other, path)),
        }
    }

    /// Records `type_name` as unknown unless it is registered, qualified or bare.
    fn add_if_unknown(&mut self, type_name: &str) {
        let qualified = self.full_name(type_name);
        if self.registry.contains_key(&qualified) || self.registry.contains_key(type_name) {
            return;
        }
        if self.unknown.insert(type_name.to_string()) {
            tracing::debug!("Unresolved reference {} from {}", type_name, self.current_path());
        }
    }
}

/// Resolves every schema of a document into a validated file.
///
/// # Errors
/// Returns the first resolution error, or `Incomplete` if references remain
/// unresolved after the walk.
pub fn resolve_document<N: NameNormalizer>(
    names: N,
    document: &DiscoveryDocument,
    base_files_package: &str,
) -> Result<ExtendedFile, SchemaError> {
    let mut resolver = TypeResolver::new(names, document.name.clone(), document.description())
        .with_base_files_package(base_files_package);
    resolver.add_document(document)?;
    resolver.into_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::MESSAGES_IMPORT;
    use apigen_core::names::NameConvention;

    fn resolver() -> TypeResolver {
        TypeResolver::new(Names::default(), "test", "")
    }

    fn node(json: &str) -> SchemaNode {
        serde_json::from_str(json).expect("Failed to parse schema node")
    }

    fn field_numbers(message: &ExtendedMessage) -> Vec<(&str, u32)> {
        message.fields.iter().map(|f| (f.name(), f.number())).collect()
    }

    #[test]
    fn test_properties_tagged_in_sorted_order() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "b": {"type": "string"},
                "a": {"type": "integer"}
            }}"#,
        );
        assert_eq!(resolver.add_descriptor_from_schema("Foo", &schema).unwrap(), "Foo");

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        assert_eq!(foo.full_name, "Foo");
        assert_eq!(foo.description, "A Foo object.");
        assert_eq!(field_numbers(foo), [("a", 1), ("b", 2)]);

        let a = &foo.field("a").unwrap().descriptor;
        assert_eq!(a.type_name, "integer");
        assert_eq!(a.variant, Variant::Int64);
        assert_eq!(a.label, Label::Optional);
        let b = foo.field("b").unwrap();
        assert_eq!(b.descriptor.variant, Variant::String);
        assert_eq!(b.description, "A string attribute.");
    }

    #[test]
    fn test_inline_enum_synthesized() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "status": {
                    "type": "string",
                    "description": "Current state.",
                    "enum": ["X", "Y"],
                    "enumDescriptions": ["d1", ""]
                }
            }}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        let status_enum = foo.enum_type("StatusValueValuesEnum").unwrap();
        assert_eq!(status_enum.full_name, "Foo.StatusValueValuesEnum");
        assert_eq!(status_enum.description, "Current state.");
        let values: Vec<(&str, u32, &str)> = status_enum
            .values
            .iter()
            .map(|v| (v.name.as_str(), v.number, v.description.as_str()))
            .collect();
        assert_eq!(values, [("X", 0, "d1"), ("Y", 1, "<no description>")]);

        let status = &foo.field("status").unwrap().descriptor;
        assert_eq!(status.type_name, "StatusValueValuesEnum");
        assert_eq!(status.variant, Variant::Enum);
    }

    #[test]
    fn test_additional_properties_synthesized() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object",
                "properties": {"name": {"type": "string"}},
                "additionalProperties": {"type": "string", "description": "Labels."}}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        assert_eq!(field_numbers(foo), [("name", 1), ("additionalProperties", 2)]);
        assert_eq!(
            foo.decorators,
            ["encoding.MapUnrecognizedFields('additionalProperties')"]
        );

        let map_field = foo.field("additionalProperties").unwrap();
        assert_eq!(map_field.description, "Labels.");
        assert_eq!(map_field.descriptor.label, Label::Repeated);
        assert_eq!(map_field.descriptor.type_name, "AdditionalProperty");
        assert_eq!(map_field.descriptor.variant, Variant::Message);

        let entry = foo.message("AdditionalProperty").unwrap();
        assert_eq!(entry.full_name, "Foo.AdditionalProperty");
        assert_eq!(entry.description, "An additional property for a Foo object.");
        assert_eq!(field_numbers(entry), [("key", 1), ("value", 2)]);
        assert_eq!(
            entry.field("key").unwrap().description,
            "Name of the additional property."
        );
        assert_eq!(entry.field("value").unwrap().description, "A string attribute.");

        assert_eq!(
            file.additional_imports,
            [MESSAGES_IMPORT, "from apitools.base.py import encoding"]
        );
    }

    #[test]
    fn test_additional_properties_default_description_and_package() {
        let mut resolver = resolver().with_base_files_package("vendored.base");
        let schema = node(r#"{"id": "Foo", "type": "object", "additionalProperties": {"type": "integer"}}"#);
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        assert_eq!(
            foo.field("additionalProperties").unwrap().description,
            "Additional properties of type Foo"
        );
        assert_eq!(foo.field("additionalProperties").unwrap().number(), 1);
        assert!(
            file.additional_imports
                .contains(&"from vendored.base import encoding".to_string())
        );
    }

    #[test]
    fn test_nested_additional_properties_named_after_inner_message() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "labels": {"type": "object", "additionalProperties": {"type": "string"}}}}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let labels = file.message("Foo").unwrap().message("LabelsValue").unwrap();
        assert_eq!(
            labels.field("additionalProperties").unwrap().description,
            "Additional properties of type LabelsValue"
        );
        let entry = labels.message("AdditionalProperty").unwrap();
        assert_eq!(entry.full_name, "Foo.LabelsValue.AdditionalProperty");
        assert_eq!(
            entry.description,
            "An additional property for a LabelsValue object."
        );
    }

    #[test]
    fn test_dangling_reference_fails_validation() {
        let mut resolver = resolver();
        let schema = node(r#"{"id": "Foo", "type": "object", "properties": {"bar": {"$ref": "Bar"}}}"#);
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        match resolver.validate() {
            Err(SchemaError::Incomplete { nascent, unknown }) => {
                assert!(nascent.is_empty());
                assert_eq!(unknown, ["Bar"]);
            }
            other => panic!("Expected Incomplete, got {other:?}"),
        }
        let err = resolver.into_file().unwrap_err();
        assert!(err.to_string().contains("Bar"));
    }

    #[test]
    fn test_duplicate_id_is_redefinition() {
        let mut resolver = resolver();
        let first = node(r#"{"id": "Foo", "type": "object"}"#);
        let second = node(r#"{"id": "Foo", "type": "object", "properties": {"a": {"type": "string"}}}"#);
        resolver.add_descriptor_from_schema("first", &first).unwrap();

        let result = resolver.add_descriptor_from_schema("second", &second);
        assert!(matches!(result, Err(SchemaError::Redefinition { name }) if name == "Foo"));
    }

    #[test]
    fn test_add_descriptor_is_idempotent() {
        let mut resolver = resolver();
        let schema = node(r#"{"type": "object", "properties": {"a": {"type": "string"}}}"#);
        resolver.add_descriptor_from_schema("foo", &schema).unwrap();
        assert_eq!(resolver.add_descriptor_from_schema("foo", &schema).unwrap(), "Foo");

        let file = resolver.into_file().unwrap();
        assert_eq!(file.message_types.len(), 1);
    }

    #[test]
    fn test_forward_and_recursive_references() {
        let mut resolver = resolver();
        let document = DiscoveryDocument {
            name: "test".to_string(),
            version: "v1".to_string(),
            schemas: [
                (
                    "Node".to_string(),
                    node(r#"{"id": "Node", "type": "object", "properties": {
                        "children": {"type": "array", "items": {"$ref": "Node"}},
                        "owner": {"$ref": "Owner"}
                    }}"#),
                ),
                (
                    "Owner".to_string(),
                    node(r#"{"id": "Owner", "type": "object", "properties": {"root": {"$ref": "Node"}}}"#),
                ),
            ]
            .into_iter()
            .collect(),
            ..DiscoveryDocument::default()
        };
        resolver.add_document(&document).unwrap();
        resolver.validate().unwrap();

        let file = resolver.into_file().unwrap();
        let children = &file.message("Node").unwrap().field("children").unwrap().descriptor;
        assert_eq!(children.label, Label::Repeated);
        assert_eq!(children.type_name, "Node");
        assert_eq!(file.message("Owner").unwrap().field("root").unwrap().descriptor.type_name, "Node");
    }

    #[test]
    fn test_unsupported_top_level_type() {
        let mut resolver = resolver();
        let result = resolver.add_descriptor_from_schema("Foo", &SchemaNode::of_type("string"));
        assert!(matches!(
            result,
            Err(SchemaError::UnsupportedSchemaType { type_name, .. }) if type_name == "string"
        ));
    }

    #[test]
    fn test_unknown_format_is_unsupported() {
        let mut resolver = resolver();
        let schema = node(r#"{"id": "Foo", "type": "object", "properties": {"a": {"type": "string", "format": "uuid"}}}"#);
        let result = resolver.add_descriptor_from_schema("Foo", &schema);
        assert!(matches!(
            result,
            Err(SchemaError::UnsupportedSchemaType { type_name, path }) if type_name == "uuid" && path == "Foo.a"
        ));
    }

    #[test]
    fn test_missing_type_is_unsupported() {
        let mut resolver = resolver();
        let schema = node(r#"{"id": "Foo", "type": "object", "properties": {"a": {"description": "?"}}}"#);
        assert!(matches!(
            resolver.add_descriptor_from_schema("Foo", &schema),
            Err(SchemaError::UnsupportedSchemaType { .. })
        ));
    }

    #[test]
    fn test_scope_restored_after_error() {
        let mut resolver = resolver();
        let broken = node(
            r#"{"id": "Broken", "type": "object", "properties": {
                "inner": {"type": "object", "properties": {"bad": {"type": "widget"}}}
            }}"#,
        );
        assert!(resolver.add_descriptor_from_schema("Broken", &broken).is_err());
        assert_eq!(resolver.current_path(), "");

        let ok = node(r#"{"id": "Other", "type": "object"}"#);
        resolver.add_descriptor_from_schema("Other", &ok).unwrap();
        match resolver.lookup_descriptor("Other").unwrap() {
            Some(Descriptor::Message(message)) => assert_eq!(message.full_name, "Other"),
            other => panic!("Expected message, got {other:?}"),
        }
        // The failed messages were never completed.
        assert!(matches!(
            resolver.validate(),
            Err(SchemaError::Incomplete { nascent, .. }) if nascent.contains(&"Broken".to_string())
        ));
    }

    #[test]
    fn test_array_items() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "points": {"type": "array", "items": {"type": "object", "properties": {"x": {"type": "number"}}}},
                "cells": {"type": "array", "items": {"title": "cell", "type": "object"}}
            }}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        let tags = &foo.field("tags").unwrap().descriptor;
        assert_eq!((tags.type_name.as_str(), tags.label), ("string", Label::Repeated));
        let points = &foo.field("points").unwrap().descriptor;
        assert_eq!(points.type_name, "PointsValueListEntry");
        assert_eq!(foo.field("cells").unwrap().descriptor.type_name, "Cell");
        assert!(foo.message("PointsValueListEntry").is_some());
        assert!(foo.message("Cell").is_some());
    }

    #[test]
    fn test_array_without_items() {
        let mut resolver = resolver();
        let schema = node(r#"{"id": "Foo", "type": "object", "properties": {"a": {"type": "array"}}}"#);
        assert!(matches!(
            resolver.add_descriptor_from_schema("Foo", &schema),
            Err(SchemaError::MissingArrayItems { path }) if path == "Foo.a"
        ));
    }

    #[test]
    fn test_required_wins_over_array() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "a": {"type": "array", "items": {"type": "string"}, "required": true}
            }}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();
        let file = resolver.into_file().unwrap();
        let a = &file.message("Foo").unwrap().field("a").unwrap().descriptor;
        assert_eq!(a.label, Label::Required);
    }

    #[test]
    fn test_formats_and_temporal_import() {
        let mut resolver = resolver();
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "count": {"type": "string", "format": "int64"},
                "created": {"type": "string", "format": "date-time"},
                "ratio": {"type": "number", "format": "float"},
                "size": {"type": "integer", "format": "uint32"},
                "blob": {"type": "string", "format": "byte"},
                "extra": {"type": "any"}
            }}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        let info = |name: &str| {
            let d = &foo.field(name).unwrap().descriptor;
            (d.type_name.clone(), d.variant)
        };
        assert_eq!(info("count"), ("string".to_string(), Variant::Int64));
        assert_eq!(info("created"), (DATE_TIME_TYPE.to_string(), Variant::Temporal));
        assert_eq!(info("ratio"), ("number".to_string(), Variant::Float));
        assert_eq!(info("size"), ("integer".to_string(), Variant::Uint32));
        assert_eq!(info("blob"), ("byte".to_string(), Variant::Bytes));
        assert_eq!(info("extra"), ("string".to_string(), Variant::String));
        assert_eq!(file.additional_imports, [MESSAGES_IMPORT, TEMPORAL_IMPORT]);
    }

    #[test]
    fn test_default_values() {
        let names = Names::new(Vec::<String>::new(), NameConvention::LowerCamel, true);
        let mut resolver = TypeResolver::new(names, "test", "");
        let schema = node(
            r#"{"id": "Foo", "type": "object", "properties": {
                "label": {"type": "string", "default": "x y"},
                "flag": {"type": "boolean", "default": "true"},
                "limit": {"type": "integer", "default": "10"},
                "scale": {"type": "number", "default": 1.5},
                "count": {"type": "string", "format": "int64", "default": "7"},
                "mode": {"type": "string", "enum": ["fast", "slow"], "enumDescriptions": ["", ""], "default": "slow"}
            }}"#,
        );
        resolver.add_descriptor_from_schema("Foo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        let default = |name: &str| foo.field(name).unwrap().descriptor.default_value.clone();
        assert_eq!(default("label").as_deref(), Some("x y"));
        assert_eq!(default("flag").as_deref(), Some("true"));
        assert_eq!(default("limit").as_deref(), Some("10"));
        assert_eq!(default("scale").as_deref(), Some("1.5"));
        assert_eq!(default("count").as_deref(), Some("7"));
        assert_eq!(default("mode").as_deref(), Some("SLOW"));
        let mode_enum = foo.enum_type("ModeValueValuesEnum").unwrap();
        assert_eq!(mode_enum.values[0].name, "FAST");
    }

    #[test]
    fn test_invalid_default() {
        let mut resolver = resolver();
        let schema = node(r#"{"id": "Foo", "type": "object", "properties": {"n": {"type": "integer", "default": "ten"}}}"#);
        assert!(matches!(
            resolver.add_descriptor_from_schema("Foo", &schema),
            Err(SchemaError::InvalidDefault { value, path }) if value == "ten" && path == "Foo.n"
        ));
    }

    #[test]
    fn test_mismatched_enum_descriptions() {
        let mut resolver = resolver();
        let result = resolver.add_enum_descriptor(
            "Color",
            "",
            &["RED".to_string(), "GREEN".to_string()],
            &["red".to_string()],
        );
        assert!(matches!(
            result,
            Err(SchemaError::MismatchedEnumDescriptions { values: 2, descriptions: 1, .. })
        ));
        resolver.validate().unwrap();
    }

    #[test]
    fn test_top_level_enum() {
        let mut resolver = resolver();
        let name = resolver
            .add_enum_descriptor("color", "Colors.", &["RED".to_string()], &["Red.".to_string()])
            .unwrap();
        assert_eq!(name, "Color");
        match resolver.lookup_descriptor_or_die("Color").unwrap() {
            Descriptor::Enum(e) => assert_eq!(e.values[0].description, "Red."),
            other => panic!("Expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_missing_name() {
        let resolver = resolver();
        assert!(resolver.lookup_descriptor("Nope").unwrap().is_none());
        assert!(matches!(
            resolver.lookup_descriptor_or_die("Nope"),
            Err(SchemaError::UnresolvedTypeReference { name }) if name == "Nope"
        ));
    }

    #[test]
    fn test_lookup_nascent_is_in_progress() {
        let mut resolver = resolver();
        resolver.declare("Foo").unwrap();
        assert!(matches!(
            resolver.lookup_descriptor("Foo"),
            Err(SchemaError::InProgressReference { name }) if name == "Foo"
        ));
        assert!(matches!(resolver.declare("Foo"), Err(SchemaError::Redefinition { .. })));
    }

    #[test]
    fn test_lookup_prefers_path_qualified_name() {
        let mut resolver = resolver();
        let outer = node(r#"{"id": "Foo", "type": "object", "properties": {"bar": {"type": "object"}}}"#);
        let top = node(r#"{"id": "BarValue", "type": "object", "description": "Top level."}"#);
        resolver.add_descriptor_from_schema("Foo", &outer).unwrap();
        resolver.add_descriptor_from_schema("BarValue", &top).unwrap();

        // At the top level only the bare name matches.
        let found = resolver.lookup_descriptor("BarValue").unwrap().unwrap();
        assert_eq!(found.full_name(), "BarValue");
        let nested = resolver.lookup_descriptor("Foo.BarValue").unwrap().unwrap();
        assert_eq!(nested.full_name(), "Foo.BarValue");

        // Inside Foo the qualified name shadows the top-level one.
        resolver.scopes.push(ExtendedMessage {
            name: "Foo".to_string(),
            ..ExtendedMessage::default()
        });
        let shadowed = resolver.lookup_descriptor("BarValue").unwrap().unwrap();
        assert_eq!(shadowed.full_name(), "Foo.BarValue");
        // Names with no qualified match fall back to the bare name.
        assert_eq!(resolver.lookup_descriptor("Foo").unwrap().unwrap().full_name(), "Foo");
    }

    #[test]
    fn test_lookup_inside_open_scope() {
        let mut resolver = resolver();
        resolver.declare("Outer").unwrap();
        resolver.scopes.push(ExtendedMessage {
            name: "Outer".to_string(),
            full_name: "Outer".to_string(),
            ..ExtendedMessage::default()
        });
        resolver
            .add_enum_descriptor("Kind", "", &["A".to_string()], &[String::new()])
            .unwrap();

        let found = resolver.lookup_descriptor("Kind").unwrap().unwrap();
        assert_eq!(found.full_name(), "Outer.Kind");
        assert_eq!(found.kind(), DescriptorKind::Enum);
        assert!(matches!(
            resolver.lookup_descriptor("Outer"),
            Err(SchemaError::InProgressReference { .. })
        ));
    }

    #[test]
    fn test_register_without_declare() {
        let mut resolver = resolver();
        let result = resolver.register(Completed::Enum(ExtendedEnum {
            name: "Loose".to_string(),
            full_name: "Loose".to_string(),
            ..ExtendedEnum::default()
        }));
        assert!(matches!(
            result,
            Err(SchemaError::IllegalDirectRegistration { name }) if name == "Loose"
        ));
    }

    #[test]
    fn test_inline_object_requires_name_hint() {
        let mut resolver = resolver();
        let result = resolver.type_info(&SchemaNode::of_type("object"), "", "Foo.x");
        assert!(matches!(result, Err(SchemaError::MissingNameHint { path }) if path == "Foo.x"));
    }

    #[test]
    fn test_stripped_prefix_inline_message() {
        let names = Names::new(["Svc"], NameConvention::LowerCamel, false);
        let mut resolver = TypeResolver::new(names, "test", "");
        let schema = node(r#"{"id": "SvcFoo", "type": "object", "properties": {"svcSvcThing": {"type": "object"}}}"#);
        resolver.add_descriptor_from_schema("SvcFoo", &schema).unwrap();

        let file = resolver.into_file().unwrap();
        let foo = file.message("Foo").unwrap();
        let field = &foo.field("svcSvcThing").unwrap().descriptor;
        assert_eq!(field.type_name, "ThingValue");
        assert!(foo.message("ThingValue").is_some());
    }

    #[test]
    fn test_resolve_document_sets_file_metadata() {
        let document = DiscoveryDocument {
            name: "storage".to_string(),
            version: "v1".to_string(),
            description: Some("Stores things.".to_string()),
            schemas: [("Bucket".to_string(), node(r#"{"id": "Bucket", "type": "object"}"#))]
                .into_iter()
                .collect(),
        };
        let file = resolve_document(Names::default(), &document, DEFAULT_BASE_FILES_PACKAGE).unwrap();
        assert_eq!(file.package, "storage");
        assert_eq!(file.description, "Stores things.");
        assert!(file.message("Bucket").is_some());
    }
}
