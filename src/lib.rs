//! # md_spreadsheet_parser
//!
//! Parse Markdown pipe tables into structured tables, sheets and workbooks,
//! write them back out, and convert rows into typed records.
//!
//! ## What is a Markdown spreadsheet?
//!
//! A plain Markdown document where a root heading (default `# Tables`) opens a
//! workbook, second-level headings name sheets, and pipe tables hold the
//! data. Presentation hints travel in HTML comment annotations that Markdown
//! renderers hide. See [`format`] for the full description.
//!
//! ## Key Features
//!
//! - **Lenient Parsing**: Irregular rows are padded or truncated, never rejected
//! - **Round-Trip Output**: Generated Markdown parses back to the same cells
//! - **Typed Records**: Validate rows against an explicit record shape with
//!   configurable converters, collecting every error in one pass
//! - **Serde Compatible**: All document types serialize to a stable JSON
//!   projection and map onto your own `#[derive(Deserialize)]` types
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! md_spreadsheet_parser = "0.1"
//! ```
//!
//! ### Parsing a table
//!
//! ```rust
//! use md_spreadsheet_parser::parse_table;
//!
//! let table = parse_table("| Name | Age |\n|---|---|\n| Alice | 30 |\n| Bob |");
//!
//! assert_eq!(table.headers, Some(vec!["Name".to_string(), "Age".to_string()]));
//! // Short rows are padded to the header width.
//! assert_eq!(table.rows[1], vec!["Bob".to_string(), String::new()]);
//! ```
//!
//! ### Parsing a workbook
//!
//! ```rust
//! use md_spreadsheet_parser::{parse_workbook, MultiTableParsingSchema};
//!
//! let markdown = "\
//! ## Tables
//!
//! ### Users
//!
//! | ID | Name |
//! | --- | --- |
//! | 1 | Alice |
//!
//! ### Orders
//!
//! | ID | Total |
//! | --- | --- |
//! | 7 | 12.50 |
//! ";
//!
//! let workbook = parse_workbook(markdown);
//! assert_eq!(workbook.sheets.len(), 2);
//! assert_eq!(workbook.sheets[1].name, "Orders");
//!
//! // Write it back out.
//! let schema = MultiTableParsingSchema::new().with_outer_pipes(true);
//! let text = workbook.to_markdown(&schema);
//! assert!(text.starts_with("# Tables\n\n## Users\n\n| ID | Name |"));
//! ```
//!
//! ### Typed records
//!
//! ```rust
//! use md_spreadsheet_parser::{parse_table, ConversionSchema, FieldDescriptor, FieldType, RecordShape};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//!     age: i64,
//!     is_active: bool,
//! }
//!
//! let table = parse_table("| Name | Age | Is Active |\n|---|---|---|\n| Alice | 30 | yes |");
//! let shape = RecordShape::new(
//!     "User",
//!     vec![
//!         FieldDescriptor::new("name", FieldType::String),
//!         FieldDescriptor::new("age", FieldType::Integer),
//!         FieldDescriptor::new("is_active", FieldType::Boolean),
//!     ],
//! );
//!
//! let users: Vec<User> = table.to_models(&shape, &ConversionSchema::default()).unwrap();
//! assert_eq!(users[0].age, 30);
//! assert!(users[0].is_active);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`trace` per header decision, `debug`
//! per parsed table, sheet and workbook, and for dropped annotations). No
//! subscriber is installed by the library.
//!
//! ## Thread Safety
//!
//! Every operation is a pure function over its inputs. Schemas are immutable
//! values and the default instances are constants, so parsing on many
//! threads at once needs no coordination.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parse a table and print its JSON projection
//! - **`workbook.rs`** - Sheets, sections and descriptions
//! - **`custom_conversion.rs`** - Boolean pairs and custom converters
//! - **`metadata.rs`** - Sidecar annotations through a round trip
//!
//! Run any example with: `cargo run --example <name>`

pub mod annotation;
pub mod conversion;
pub mod error;
pub mod format;
pub mod generator;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod schema;
pub mod tokenizer;
pub mod validation;
pub mod value;

pub use conversion::{ConversionSchema, Converter, FieldType, DEFAULT_BOOLEAN_PAIRS, DEFAULT_CONVERSION_SCHEMA};
pub use error::{Error, Result, RowError, ValidationFailure};
pub use generator::{
    generate_sheet_markdown, generate_table_markdown, generate_table_markdown_with_schema,
    generate_workbook_markdown,
};
pub use metadata::Metadata;
pub use model::{Sheet, Table, Workbook};
pub use parser::{
    parse_sheet, parse_table, parse_table_with_schema, parse_workbook, parse_workbook_with_schema,
    scan_tables, scan_tables_with_schema,
};
pub use schema::{
    MultiTableOptions, MultiTableParsingSchema, ParsingSchema, Schema, DEFAULT_MULTI_SCHEMA,
    DEFAULT_SCHEMA,
};
pub use validation::{to_models, validate_table, validate_table_with_schema, FieldDescriptor, Record, RecordShape};
pub use value::{Number, Value};
