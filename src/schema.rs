//! Parsing and generation schemas.
//!
//! Schemas are immutable configuration values passed explicitly to every parse
//! and generate call:
//!
//! - [`ParsingSchema`]: how a single table is tokenized (separator, divider
//!   character, outer pipes, trimming)
//! - [`MultiTableOptions`]: how a document is split into a workbook, sheets and
//!   tables
//! - [`MultiTableParsingSchema`]: a [`ParsingSchema`] together with
//!   [`MultiTableOptions`]
//!
//! Functions that accept either kind are generic over the [`Schema`] trait,
//! which exposes the base configuration and, when present, the multi-table
//! extension.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::{MultiTableParsingSchema, ParsingSchema, Schema};
//!
//! let schema = ParsingSchema::new().with_outer_pipes(true);
//! assert!(schema.multi_table().is_none());
//!
//! let multi = MultiTableParsingSchema::new()
//!     .with_table_header_level(3)
//!     .with_capture_description(true);
//! assert_eq!(multi.multi_table().and_then(|m| m.table_header_level), Some(3));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The default schema for GFM-style tables.
pub const DEFAULT_SCHEMA: ParsingSchema = ParsingSchema::DEFAULT;

/// The default workbook schema: root marker `# Tables`, sheets at `##`.
pub const DEFAULT_MULTI_SCHEMA: MultiTableParsingSchema = MultiTableParsingSchema::DEFAULT;

/// Capability shared by every schema kind.
///
/// The table parser and generator only need [`Schema::parsing`]; the
/// extractor, splitter and section-aware generation additionally look at
/// [`Schema::multi_table`].
pub trait Schema: fmt::Display {
    /// The base tokenization settings.
    fn parsing(&self) -> &ParsingSchema;

    /// Multi-table settings, if this schema carries them.
    fn multi_table(&self) -> Option<&MultiTableOptions> {
        None
    }
}

/// Configuration for tokenizing and rendering a single table.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::ParsingSchema;
///
/// let schema = ParsingSchema::new();
/// assert_eq!(schema.column_separator, '|');
/// assert_eq!(schema.header_separator_char, '-');
/// assert!(!schema.require_outer_pipes);
/// assert!(schema.strip_whitespace);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingSchema {
    pub column_separator: char,
    pub header_separator_char: char,
    pub require_outer_pipes: bool,
    pub strip_whitespace: bool,
}

impl ParsingSchema {
    const DEFAULT: ParsingSchema = ParsingSchema {
        column_separator: '|',
        header_separator_char: '-',
        require_outer_pipes: false,
        strip_whitespace: true,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column separator character.
    ///
    /// ```rust
    /// use md_spreadsheet_parser::{parse_table_with_schema, ParsingSchema};
    ///
    /// let schema = ParsingSchema::new().with_column_separator(';');
    /// let table = parse_table_with_schema("a;b\n-;-\n1;2", &schema);
    /// assert_eq!(table.headers, Some(vec!["a".to_string(), "b".to_string()]));
    /// ```
    #[must_use]
    pub fn with_column_separator(mut self, separator: char) -> Self {
        self.column_separator = separator;
        self
    }

    /// Sets the character that makes up divider cells (`-` by default).
    #[must_use]
    pub fn with_header_separator_char(mut self, ch: char) -> Self {
        self.header_separator_char = ch;
        self
    }

    /// Whether generated rows are wrapped in outer separators.
    #[must_use]
    pub fn with_outer_pipes(mut self, require: bool) -> Self {
        self.require_outer_pipes = require;
        self
    }

    /// Whether cells are whitespace-trimmed while parsing.
    #[must_use]
    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    fn write_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column_separator='{}', header_separator_char='{}', require_outer_pipes={}, strip_whitespace={}",
            self.column_separator,
            self.header_separator_char,
            self.require_outer_pipes,
            self.strip_whitespace
        )
    }
}

impl Default for ParsingSchema {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ParsingSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParsingSchema(")?;
        self.write_fields(f)?;
        f.write_str(")")
    }
}

impl Schema for ParsingSchema {
    fn parsing(&self) -> &ParsingSchema {
        self
    }
}

/// Section structure settings for workbook, sheet and multi-table parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiTableOptions {
    /// Line that opens the workbook region. `None` means the whole document.
    pub root_marker: Option<Cow<'static, str>>,
    /// Heading level of sheet names (`2` means `## Name`). Always at least 1.
    pub sheet_header_level: usize,
    /// Heading level of table names. `None` selects blank-line splitting.
    pub table_header_level: Option<usize>,
    /// Keep the text between a table heading and its first row.
    pub capture_description: bool,
}

impl MultiTableOptions {
    const DEFAULT: MultiTableOptions = MultiTableOptions {
        root_marker: Some(Cow::Borrowed("# Tables")),
        sheet_header_level: 2,
        table_header_level: None,
        capture_description: false,
    };

    /// Heading prefix for sheet names, e.g. `"## "`.
    #[must_use]
    pub fn sheet_prefix(&self) -> String {
        heading_prefix(self.sheet_header_level.max(1))
    }

    /// Heading prefix for table names when section mode is enabled.
    #[must_use]
    pub fn table_prefix(&self) -> Option<String> {
        self.table_header_level.map(|level| heading_prefix(level.max(1)))
    }
}

impl Default for MultiTableOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A [`ParsingSchema`] extended with [`MultiTableOptions`].
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::MultiTableParsingSchema;
///
/// let schema = MultiTableParsingSchema::new()
///     .with_root_marker(Some("# Data"))
///     .with_sheet_header_level(2)
///     .with_outer_pipes(true);
///
/// assert_eq!(schema.multi.root_marker.as_deref(), Some("# Data"));
/// assert!(schema.parsing.require_outer_pipes);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiTableParsingSchema {
    #[serde(flatten)]
    pub parsing: ParsingSchema,
    #[serde(flatten)]
    pub multi: MultiTableOptions,
}

impl MultiTableParsingSchema {
    const DEFAULT: MultiTableParsingSchema = MultiTableParsingSchema {
        parsing: ParsingSchema::DEFAULT,
        multi: MultiTableOptions::DEFAULT,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a multi-table schema on top of existing tokenization settings.
    #[must_use]
    pub fn from_parsing(parsing: ParsingSchema) -> Self {
        MultiTableParsingSchema {
            parsing,
            multi: MultiTableOptions::default(),
        }
    }

    /// Sets (or clears) the workbook root marker line.
    #[must_use]
    pub fn with_root_marker<S>(mut self, marker: Option<S>) -> Self
    where
        S: Into<String>,
    {
        self.multi.root_marker = marker.map(|m| Cow::Owned(m.into()));
        self
    }

    /// Sets the sheet heading level; values below 1 are raised to 1.
    #[must_use]
    pub fn with_sheet_header_level(mut self, level: usize) -> Self {
        self.multi.sheet_header_level = level.max(1);
        self
    }

    /// Enables section mode with table names at the given heading level.
    #[must_use]
    pub fn with_table_header_level(mut self, level: usize) -> Self {
        self.multi.table_header_level = Some(level.max(1));
        self
    }

    /// Returns to blank-line splitting.
    #[must_use]
    pub fn without_table_header_level(mut self) -> Self {
        self.multi.table_header_level = None;
        self
    }

    #[must_use]
    pub fn with_capture_description(mut self, capture: bool) -> Self {
        self.multi.capture_description = capture;
        self
    }

    #[must_use]
    pub fn with_column_separator(mut self, separator: char) -> Self {
        self.parsing.column_separator = separator;
        self
    }

    #[must_use]
    pub fn with_header_separator_char(mut self, ch: char) -> Self {
        self.parsing.header_separator_char = ch;
        self
    }

    #[must_use]
    pub fn with_outer_pipes(mut self, require: bool) -> Self {
        self.parsing.require_outer_pipes = require;
        self
    }

    #[must_use]
    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.parsing.strip_whitespace = strip;
        self
    }
}

impl Default for MultiTableParsingSchema {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MultiTableParsingSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MultiTableParsingSchema(")?;
        self.parsing.write_fields(f)?;
        match &self.multi.root_marker {
            Some(marker) => write!(f, ", root_marker='{}'", marker)?,
            None => f.write_str(", root_marker=None")?,
        }
        write!(f, ", sheet_header_level={}", self.multi.sheet_header_level)?;
        match self.multi.table_header_level {
            Some(level) => write!(f, ", table_header_level={}", level)?,
            None => f.write_str(", table_header_level=None")?,
        }
        write!(
            f,
            ", capture_description={})",
            self.multi.capture_description
        )
    }
}

impl Schema for MultiTableParsingSchema {
    fn parsing(&self) -> &ParsingSchema {
        &self.parsing
    }

    fn multi_table(&self) -> Option<&MultiTableOptions> {
        Some(&self.multi)
    }
}

impl<S: Schema + ?Sized> Schema for &S {
    fn parsing(&self) -> &ParsingSchema {
        (**self).parsing()
    }

    fn multi_table(&self) -> Option<&MultiTableOptions> {
        (**self).multi_table()
    }
}

/// `"#" * level + " "`
pub(crate) fn heading_prefix(level: usize) -> String {
    let mut prefix = "#".repeat(level);
    prefix.push(' ');
    prefix
}
