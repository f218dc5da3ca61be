//! Identifier normalization.
//!
//! Schema documents use free-form keys (`camelCase`, `snake_case`, dotted or
//! hyphenated ids). Generated code needs identifiers that are valid in the
//! target syntax, stable across runs, and free of service-specific prefixes.
//! [`Names`] is the stock implementation of [`NameNormalizer`].

/// Type names with these prefixes are already fully qualified and are never rewritten.
const QUALIFIED_PREFIXES: [&str; 2] = ["protorpc.", "message_types."];

/// Reserved words of the generated source syntax.
const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Identifier-cleaning capability consumed by the type resolver.
pub trait NameNormalizer {
    /// Returns a prefix-stripped, PascalCase, cleaned type name.
    fn class_name(&self, raw: &str) -> String;

    /// Returns a field name in the configured casing convention.
    fn field_name(&self, raw: &str) -> String;

    /// Replaces invalid characters, avoids leading digits and reserved words.
    fn clean_name(&self, raw: &str) -> String;

    /// Applies the enum value naming policy.
    fn normalize_enum_name(&self, raw: &str) -> String;
}

/// Casing convention applied by [`NameNormalizer::field_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameConvention {
    /// `lowerCamelCase` (default).
    #[default]
    LowerCamel,
    /// `lower_with_under`.
    LowerWithUnder,
    /// Leave the casing untouched.
    None,
}

impl NameConvention {
    /// Parses a convention from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "lower_camel" | "lowercamel" => Some(Self::LowerCamel),
            "lower_with_under" | "lowerwithunder" | "snake" => Some(Self::LowerWithUnder),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Name normalizer with a fixed style.
#[derive(Debug, Clone, Default)]
pub struct Names {
    strip_prefixes: Vec<String>,
    convention: NameConvention,
    capitalize_enums: bool,
}

impl Names {
    /// Creates a normalizer.
    ///
    /// Prefixes are tried longest first (ties broken alphabetically) and at
    /// most one is stripped from any name.
    #[must_use]
    pub fn new(
        strip_prefixes: impl IntoIterator<Item = impl Into<String>>,
        convention: NameConvention,
        capitalize_enums: bool,
    ) -> Self {
        let mut strip_prefixes: Vec<String> = strip_prefixes.into_iter().map(Into::into).collect();
        strip_prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        strip_prefixes.dedup();
        Self {
            strip_prefixes,
            convention,
            capitalize_enums,
        }
    }

    /// Returns the prefixes in the order they are tried.
    #[must_use]
    pub fn strip_prefixes(&self) -> &[String] {
        &self.strip_prefixes
    }

    /// Returns the field naming convention.
    #[must_use]
    pub const fn convention(&self) -> NameConvention {
        self.convention
    }

    /// Returns true if enum value names are upper-cased.
    #[must_use]
    pub const fn capitalize_enums(&self) -> bool {
        self.capitalize_enums
    }

    fn strip<'a>(&self, name: &'a str) -> &'a str {
        self.strip_prefixes
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix.as_str()))
            .unwrap_or(name)
    }
}

impl NameNormalizer for Names {
    fn class_name(&self, raw: &str) -> String {
        if QUALIFIED_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            return raw.to_string();
        }
        self.clean_name(&to_camel(self.strip(raw)))
    }

    fn field_name(&self, raw: &str) -> String {
        let stripped = self.strip(raw);
        let converted = match self.convention {
            NameConvention::LowerCamel => to_lower_camel(stripped),
            NameConvention::LowerWithUnder => from_camel(stripped),
            NameConvention::None => stripped.to_string(),
        };
        self.clean_name(&converted)
    }

    fn clean_name(&self, raw: &str) -> String {
        let mut name: String = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        while RESERVED_WORDS.contains(&name.as_str()) {
            name.push('_');
        }
        name
    }

    fn normalize_enum_name(&self, raw: &str) -> String {
        if self.capitalize_enums {
            raw.to_uppercase()
        } else {
            raw.to_string()
        }
    }
}

/// Joins `_`-separated segments, capitalizing the first letter of each.
fn to_camel(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for segment in name.split('_').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

fn to_lower_camel(name: &str) -> String {
    let camel = to_camel(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => camel,
    }
}

/// Splits `camelCase` words with `_` and lower-cases the result.
fn from_camel(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        let boundary = previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary && c.is_ascii_uppercase() {
            result.push('_');
        }
        result.extend(c.to_lowercase());
        previous = Some(c);
    }
    result
}
