//! Generation driver.
//!
//! [`Generator`] ties the pipeline together: resolve the document into a
//! validated IR, then render it with the emitter selected by
//! [`OutputFormat`]. Output is produced in memory first, so a failing
//! document never leaves a partial file behind.

use crate::emit::{Emitter, IdlEmitter, SourceEmitter, write_file};
use crate::error::CodegenError;
use apigen_core::names::{NameConvention, Names};
use apigen_core::printer::{DEFAULT_MAX_WIDTH, PrettyPrinter};
use apigen_schema::ir::ExtendedFile;
use apigen_schema::resolver::{DEFAULT_BASE_FILES_PACKAGE, TypeResolver};
use apigen_schema::types::DiscoveryDocument;
use apigen_schema::validation::validate_file;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// proto2 interface definition.
    Idl,
    /// protorpc message classes.
    Source,
}

impl OutputFormat {
    /// Returns the conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Idl => "proto",
            Self::Source => "py",
        }
    }

    /// Parses a format name or extension.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "idl" | "proto" | "proto2" => Some(Self::Idl),
            "source" | "py" | "python" | "protorpc" => Some(Self::Source),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idl => f.write_str("idl"),
            Self::Source => f.write_str("source"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CodegenError::generation(format!("unknown output format '{s}'")))
    }
}

/// Builder for configuring a [`Generator`].
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    strip_prefixes: Vec<String>,
    name_convention: NameConvention,
    capitalize_enums: bool,
    base_files_package: String,
    vendor_namespace: String,
    max_width: usize,
}

impl GeneratorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strip_prefixes: Vec::new(),
            name_convention: NameConvention::default(),
            capitalize_enums: false,
            base_files_package: DEFAULT_BASE_FILES_PACKAGE.to_string(),
            vendor_namespace: crate::emit::source::DEFAULT_VENDOR_NAMESPACE.to_string(),
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    /// Adds a prefix stripped from type names.
    #[must_use]
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefixes.push(prefix.into());
        self
    }

    /// Sets the prefixes stripped from type names.
    #[must_use]
    pub fn strip_prefixes(mut self, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.strip_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the field naming convention.
    #[must_use]
    pub fn name_convention(mut self, convention: NameConvention) -> Self {
        self.name_convention = convention;
        self
    }

    /// Sets whether enum value names are upper-cased.
    #[must_use]
    pub fn capitalize_enums(mut self, capitalize: bool) -> Self {
        self.capitalize_enums = capitalize;
        self
    }

    /// Sets the package the open-map encoding helper is imported from.
    #[must_use]
    pub fn base_files_package(mut self, package: impl Into<String>) -> Self {
        self.base_files_package = package.into();
        self
    }

    /// Sets the namespace whose imports are grouped last in source output.
    #[must_use]
    pub fn vendor_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.vendor_namespace = namespace.into();
        self
    }

    /// Sets the maximum output line width.
    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator {
        Generator {
            names: Names::new(self.strip_prefixes, self.name_convention, self.capitalize_enums),
            base_files_package: self.base_files_package,
            vendor_namespace: self.vendor_namespace,
            max_width: self.max_width,
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves documents and renders them.
#[derive(Debug, Clone)]
pub struct Generator {
    names: Names,
    base_files_package: String,
    vendor_namespace: String,
    max_width: usize,
}

impl Generator {
    /// Creates a generator with default settings.
    #[must_use]
    pub fn new() -> Self {
        GeneratorBuilder::new().build()
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the name normalizer.
    #[must_use]
    pub fn names(&self) -> &Names {
        &self.names
    }

    /// Resolves a document into a validated IR.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if resolution or validation fails.
    pub fn resolve(&self, document: &DiscoveryDocument) -> Result<ExtendedFile, CodegenError> {
        let mut resolver =
            TypeResolver::new(self.names.clone(), document.name.clone(), document.description())
                .with_base_files_package(self.base_files_package.clone());
        resolver.add_document(document)?;
        let file = resolver.into_file()?;
        validate_file(&file)?;
        tracing::debug!(
            "Resolved {} into {} messages and {} enums",
            document.name,
            file.message_types.len(),
            file.enum_types.len()
        );
        Ok(file)
    }

    /// Renders a validated IR.
    #[must_use]
    pub fn render(&self, file: &ExtendedFile, version: &str, format: OutputFormat) -> String {
        let emitter: Box<dyn Emitter> = match format {
            OutputFormat::Idl => Box::new(IdlEmitter::new()),
            OutputFormat::Source => Box::new(SourceEmitter::with_vendor_namespace(
                self.vendor_namespace.clone(),
            )),
        };
        let mut printer = PrettyPrinter::with_max_width(self.max_width);
        write_file(emitter.as_ref(), &mut printer, &file.package, version, file);
        tracing::info!(
            "Rendered {} output for {} ({} messages)",
            format,
            file.package,
            file.message_types.len()
        );
        printer.into_string()
    }

    /// Resolves and renders a document.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if resolution or validation fails.
    pub fn generate(
        &self,
        document: &DiscoveryDocument,
        format: OutputFormat,
    ) -> Result<String, CodegenError> {
        let file = self.resolve(document)?;
        Ok(self.render(&file, &document.normalized_version(), format))
    }

    /// Resolves and renders a document, then writes it to `path`.
    ///
    /// Nothing is written if resolution fails.
    ///
    /// # Errors
    /// Returns `CodegenError` if resolution or writing fails.
    pub fn write(
        &self,
        document: &DiscoveryDocument,
        format: OutputFormat,
        path: &Path,
    ) -> Result<(), CodegenError> {
        let output = self.generate(document, format)?;
        std::fs::write(path, output)?;
        tracing::debug!("Wrote {} output to {}", format, path.display());
        Ok(())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
