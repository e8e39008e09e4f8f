//! Markdown Spreadsheet Format
//!
//! This module documents the text format read by the parser and written by
//! the generator.
//!
//! # Overview
//!
//! A document is ordinary Markdown. Tables are pipe tables; sheets and
//! workbooks are expressed with ATX headings; presentation data rides along
//! in HTML comments that other Markdown renderers hide.
//!
//! ```text
//! # Tables
//!
//! ## Inventory
//!
//! | Item | Qty |
//! | --- | --- |
//! | Bolt | 12 |
//! <!-- md-spreadsheet-table-metadata: {"columnWidths":[120,60]} -->
//!
//!
//! ## Orders
//!
//! | Id | Item |
//! | --- | --- |
//! | 1 | Bolt |
//! ```
//!
//! # Rows
//!
//! A row is one line split on the column separator (default `|`).
//!
//! - A separator preceded by a backslash is literal: `a\|b` is the single
//!   cell `a|b`. Backslashes before anything else are kept.
//! - A blank part before the first separator or after the last one is an
//!   outer pipe and is dropped. `| a | b |` and `a | b` both give `["a", "b"]`.
//! - Cells are trimmed unless `strip_whitespace` is off.
//! - Blank lines are skipped. A non-blank line without a separator is a
//!   one-cell row.
//!
//! # Header divider
//!
//! A row whose every cell is made only of the header separator character
//! (default `-`), colons and whitespace, and contains at least one header
//! separator character, is a divider:
//!
//! | Cell | Divider cell? |
//! |------|---------------|
//! | `---` | yes |
//! | `:--:` | yes |
//! | `:` | no |
//! | `-a-` | no |
//!
//! Until a header is found, a divider makes the row just before it the
//! header row and everything earlier is data. Once the header is known, a
//! divider is an ordinary row. A table without a divider has no headers.
//! Data rows are padded with empty cells or truncated to the header count.
//!
//! # Sections
//!
//! | Construct | Meaning |
//! |-----------|---------|
//! | root marker line (default `# Tables`) | start of the workbook region |
//! | heading at `sheet_header_level` (default `##`) | start of a sheet |
//! | heading shallower than the sheet level | end of the workbook region |
//! | heading at `table_header_level` (optional) | start of a named table |
//!
//! Without a table header level, tables inside a sheet are separated by
//! blank lines. With one, the non-table lines between the heading and the
//! first row form the table description when description capture is on.
//!
//! # Annotations
//!
//! One line each: `<!-- <marker>: <JSON object> -->`.
//!
//! | Marker | Owner |
//! |--------|-------|
//! | `md-spreadsheet-table-metadata` | the table above it |
//! | `md-spreadsheet-sheet-metadata` | the enclosing sheet |
//! | `md-spreadsheet-workbook-metadata` | the workbook |
//!
//! The older marker `md-spreadsheet-metadata` is read as a table annotation.
//! The object is stored under the `visual` metadata key. Invalid JSON or a
//! non-object payload is ignored. Annotation lines are never cells.
//!
//! # Output
//!
//! The generator writes cells joined by `" | "`, three divider characters per
//! column, and no alignment padding. Outer separators are written when the
//! schema requires them, and always for single-column rows and rows whose
//! first or last cell is blank. Sheets are separated by two blank lines
//! and tables within a sheet by one. Non-ASCII text is written unescaped in
//! both the Markdown and the JSON projection.
