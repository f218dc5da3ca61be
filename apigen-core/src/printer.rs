//! Indentation-scoped line printer.
//!
//! Emitters write whole lines; the printer prefixes the current indent and
//! tracks how much of the line width is left at the current depth so that
//! description text can be wrapped to fit.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

/// Default maximum line width.
pub const DEFAULT_MAX_WIDTH: usize = 78;

/// Default indentation token.
pub const DEFAULT_INDENT: &str = "  ";

/// Line sink with scoped indentation.
#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    out: String,
    indent: String,
    max_width: usize,
}

impl PrettyPrinter {
    /// Creates a printer with the default maximum width.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_width(DEFAULT_MAX_WIDTH)
    }

    /// Creates a printer with the given maximum width.
    #[must_use]
    pub fn with_max_width(max_width: usize) -> Self {
        Self {
            out: String::new(),
            indent: String::new(),
            max_width,
        }
    }

    /// Writes one line at the current indent.
    ///
    /// Trailing whitespace is trimmed; an empty line is written without indent.
    pub fn write(&mut self, line: &str) {
        let line = line.trim_end();
        if !line.is_empty() {
            self.out.push_str(&self.indent);
            self.out.push_str(line);
        }
        self.out.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Appends `token` to the indent until the returned guard is dropped.
    pub fn scoped_indent(&mut self, token: &str) -> IndentGuard<'_> {
        let restore = self.indent.len();
        self.indent.push_str(token);
        IndentGuard {
            printer: self,
            restore,
        }
    }

    /// Indents by [`DEFAULT_INDENT`] until the returned guard is dropped.
    pub fn indent(&mut self) -> IndentGuard<'_> {
        self.scoped_indent(DEFAULT_INDENT)
    }

    /// Width left on a line after the current indent.
    #[must_use]
    pub fn remaining_width(&self) -> usize {
        self.max_width.saturating_sub(self.indent.len())
    }

    /// Returns the current indent prefix.
    #[must_use]
    pub fn current_indent(&self) -> &str {
        &self.indent
    }

    /// Returns true if no indentation is active.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.indent.is_empty()
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the printer and returns the written text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the printer's indent when dropped.
#[derive(Debug)]
pub struct IndentGuard<'a> {
    printer: &'a mut PrettyPrinter,
    restore: usize,
}

impl Deref for IndentGuard<'_> {
    type Target = PrettyPrinter;

    fn deref(&self) -> &Self::Target {
        self.printer
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.printer
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.printer.indent.truncate(self.restore);
    }
}

/// Word-wraps `text` to `width` columns.
///
/// Whitespace runs such as embedded newlines are treated as plain spaces.
/// Blank text produces no lines.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    wrap_indented(text, width, "", "")
}

/// Word-wraps `text`, prefixing the first line with `initial` and the
/// following lines with `subsequent`. Indents count towards `width`.
#[must_use]
pub fn wrap_indented(text: &str, width: usize, initial: &str, subsequent: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let flattened: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let options = textwrap::Options::new(width.max(1))
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .initial_indent(initial)
        .subsequent_indent(subsequent);
    textwrap::wrap(&flattened, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}
