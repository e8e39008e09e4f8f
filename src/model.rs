//! Document model: tables, sheets and workbooks.
//!
//! All three types are plain values. Parsing builds them, generation and
//! conversion only read them. Each one serializes to its canonical JSON
//! projection:
//!
//! | Type | Projection |
//! |------|------------|
//! | [`Table`] | `{name, description, headers, rows, metadata}` |
//! | [`Sheet`] | `{name, tables}` (plus `metadata` when non-empty) |
//! | [`Workbook`] | `{sheets}` (plus `metadata` when non-empty) |
//!
//! Non-ASCII text is written as-is, never `\u` escaped.

use crate::conversion::ConversionSchema;
use crate::generator::{generate_sheet_markdown, generate_table_markdown_with_schema, generate_workbook_markdown};
use crate::schema::{MultiTableParsingSchema, Schema};
use crate::validation::{self, Record, RecordShape};
use crate::{Metadata, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A grid of string cells with an optional header row.
///
/// When `headers` is present, parsed rows always have exactly as many cells
/// as there are headers.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{ParsingSchema, Table};
///
/// let table = Table::new(
///     Some(vec!["Name".into(), "Age".into()]),
///     vec![vec!["Alice".into(), "30".into()]],
/// )
/// .with_name("People");
///
/// assert_eq!(
///     table.to_markdown(&ParsingSchema::new().with_outer_pipes(true)),
///     "| Name | Age |\n| --- | --- |\n| Alice | 30 |"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Table {
    #[must_use]
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Table {
            headers,
            rows,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// `true` when the table has neither headers nor rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_none() && self.rows.is_empty()
    }

    /// Renders this table as Markdown.
    #[must_use]
    pub fn to_markdown<S: Schema + ?Sized>(&self, schema: &S) -> String {
        generate_table_markdown_with_schema(self, schema)
    }

    /// Converts every row into a record of `shape`.
    ///
    /// See [`validate_table_with_schema`](crate::validate_table_with_schema).
    pub fn validate(&self, shape: &RecordShape, conversion: &ConversionSchema) -> Result<Vec<Record>> {
        validation::validate_table_with_schema(self, shape, conversion)
    }

    /// Converts every row into a record of `shape` and maps it onto `T`.
    pub fn to_models<T>(&self, shape: &RecordShape, conversion: &ConversionSchema) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        validation::to_models(self, shape, conversion)
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A named group of tables.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>, tables: Vec<Table>) -> Self {
        Sheet {
            name: name.into(),
            tables,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the first table named `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use md_spreadsheet_parser::{Sheet, Table};
    ///
    /// let sheet = Sheet::new("S", vec![Table::default().with_name("a"), Table::default().with_name("b")]);
    /// assert!(sheet.get_table("b").is_some());
    /// assert!(sheet.get_table("c").is_none());
    /// ```
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.as_deref() == Some(name))
    }

    #[must_use]
    pub fn to_markdown<S: Schema + ?Sized>(&self, schema: &S) -> String {
        generate_sheet_markdown(self, schema)
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// An ordered collection of sheets.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Workbook {
    #[must_use]
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Workbook {
            sheets,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the first sheet named `name`.
    #[must_use]
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    #[must_use]
    pub fn to_markdown(&self, schema: &MultiTableParsingSchema) -> String {
        generate_workbook_markdown(self, schema)
    }

    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
