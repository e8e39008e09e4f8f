//! Markdown table, sheet and workbook parsing.
//!
//! Parsing goes from the inside out:
//!
//! 1. [`parse_table_with_schema`] turns one block of lines into a [`Table`],
//!    deciding whether the first row is a header by looking for a divider row.
//! 2. [`scan_tables_with_schema`] splits a block into several tables, either at
//!    table headings (section mode) or at blank lines (heuristic mode).
//! 3. [`parse_sheet`] wraps the tables of one section into a named [`Sheet`].
//! 4. [`parse_workbook_with_schema`] finds the workbook region, splits it at
//!    sheet headings and stops at the first higher-level heading.
//!
//! Parsing never fails. Irregular rows are padded or truncated, and malformed
//! annotations are ignored.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::parse_workbook;
//!
//! let markdown = "# Tables\n\n## Users\n\n| ID | Name |\n|---|---|\n| 1 | Alice |\n\n# Appendix\n";
//! let workbook = parse_workbook(markdown);
//!
//! assert_eq!(workbook.sheets.len(), 1);
//! let users = workbook.get_sheet("Users").unwrap();
//! assert_eq!(users.tables[0].rows, vec![vec!["1".to_string(), "Alice".to_string()]]);
//! ```

use crate::annotation::{extract_visual, is_annotation_line, AnnotationKind};
use crate::metadata::SCHEMA_USED_KEY;
use crate::schema::{MultiTableParsingSchema, Schema, DEFAULT_MULTI_SCHEMA, DEFAULT_SCHEMA};
use crate::tokenizer::{is_separator_row, parse_row};
use crate::{Metadata, Sheet, Table, Workbook};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

/// Parses a Markdown table with the default schema.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::parse_table;
///
/// let table = parse_table("| A |\n|---|\n| 1 |");
/// assert_eq!(table.headers, Some(vec!["A".to_string()]));
/// assert_eq!(table.rows, vec![vec!["1".to_string()]]);
///
/// // Without a divider row there is no header.
/// let table = parse_table("| 1 |\n| 2 |");
/// assert_eq!(table.headers, None);
/// assert_eq!(table.rows.len(), 2);
/// ```
#[must_use]
pub fn parse_table(markdown: &str) -> Table {
    parse_table_with_schema(markdown, &DEFAULT_SCHEMA)
}

/// Parses a Markdown table.
///
/// A row becomes the header only when the very next row is a divider. Rows are
/// then padded with empty cells or truncated to the header width. The schema
/// description is recorded under `schema_used` and a table annotation found
/// anywhere in `markdown` is stored under `visual`.
#[must_use]
pub fn parse_table_with_schema<S: Schema + ?Sized>(markdown: &str, schema: &S) -> Table {
    let parsing = schema.parsing();

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    // A row that becomes the header if a divider follows it
    let mut potential_header: Option<Vec<String>> = None;

    for line in markdown.trim().lines() {
        let line = line.trim();
        if line.is_empty() || is_annotation_line(line) {
            continue;
        }
        let Some(row) = parse_row(line, parsing) else {
            continue;
        };

        if headers.is_some() {
            rows.push(row);
            continue;
        }

        match potential_header.take() {
            None => potential_header = Some(row),
            Some(candidate) if is_separator_row(&row, parsing) => {
                trace!(columns = candidate.len(), "header row confirmed");
                headers = Some(candidate);
            }
            Some(candidate) => {
                rows.push(candidate);
                potential_header = Some(row);
            }
        }
    }

    if let Some(candidate) = potential_header {
        rows.push(candidate);
    }

    if let Some(width) = headers.as_ref().map(Vec::len).filter(|w| *w > 0) {
        for row in &mut rows {
            row.resize(width, String::new());
        }
    }

    let mut metadata = Metadata::new();
    metadata.insert(SCHEMA_USED_KEY, JsonValue::String(schema.to_string()));
    if let Some(visual) = extract_visual(markdown.lines(), AnnotationKind::Table) {
        metadata.set_visual(visual);
    }

    debug!(
        has_headers = headers.is_some(),
        rows = rows.len(),
        "parsed table"
    );

    Table {
        name: None,
        description: None,
        headers,
        rows,
        metadata,
    }
}

/// Finds every table in `markdown` with the default multi-table schema,
/// ignoring sheet and workbook structure.
#[must_use]
pub fn scan_tables(markdown: &str) -> Vec<Table> {
    scan_tables_with_schema(markdown, &DEFAULT_MULTI_SCHEMA)
}

/// Finds every table in `markdown`, ignoring sheet and workbook structure.
///
/// With `table_header_level` set, each heading at that level starts a named
/// table. A heading shallower than that level closes the open table: the
/// lines after it, up to the next table heading, belong to no table and are
/// dropped. Deeper headings stay inside the section.
///
/// Without `table_header_level` the text is split at blank lines and every
/// chunk holding a column separator is parsed as a table.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{scan_tables_with_schema, MultiTableParsingSchema};
///
/// let markdown = "### Orders\nOpen orders only.\n\n| Id |\n|---|\n| 7 |\n\n### Notes\nNo table here.\n";
/// let schema = MultiTableParsingSchema::new()
///     .with_table_header_level(3)
///     .with_capture_description(true);
///
/// let tables = scan_tables_with_schema(markdown, &schema);
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].name.as_deref(), Some("Orders"));
/// assert_eq!(tables[0].description.as_deref(), Some("Open orders only."));
/// ```
#[must_use]
pub fn scan_tables_with_schema(markdown: &str, schema: &MultiTableParsingSchema) -> Vec<Table> {
    match schema.multi.table_header_level {
        Some(level) => extract_sections(markdown, schema, level.max(1)),
        None => extract_blocks(markdown, schema),
    }
}

/// Parses one sheet section: its tables plus any sheet annotation.
#[must_use]
pub fn parse_sheet(markdown: &str, name: &str, schema: &MultiTableParsingSchema) -> Sheet {
    let tables = scan_tables_with_schema(markdown, schema);
    let mut sheet = Sheet::new(name, tables);
    if let Some(visual) = extract_visual(markdown.lines(), AnnotationKind::Sheet) {
        sheet.metadata.set_visual(visual);
    }

    debug!(sheet = name, tables = sheet.tables.len(), "parsed sheet");
    sheet
}

/// Parses a workbook with the default multi-table schema.
#[must_use]
pub fn parse_workbook(markdown: &str) -> Workbook {
    parse_workbook_with_schema(markdown, &DEFAULT_MULTI_SCHEMA)
}

/// Parses a workbook.
///
/// When a root marker is configured, parsing starts on the line after the
/// first line equal to it; a document without the marker yields an empty
/// workbook. Each sheet heading opens a sheet, and any heading with fewer `#`
/// than the sheet level ends the workbook.
#[must_use]
pub fn parse_workbook_with_schema(markdown: &str, schema: &MultiTableParsingSchema) -> Workbook {
    let lines: Vec<&str> = markdown.lines().collect();

    let start = match schema.multi.root_marker.as_deref() {
        Some(marker) => match lines.iter().position(|line| line.trim() == marker) {
            Some(idx) => idx + 1,
            None => {
                debug!(marker, "root marker not found");
                return Workbook::default();
            }
        },
        None => 0,
    };

    let level = schema.multi.sheet_header_level.max(1);
    let prefix = schema.multi.sheet_prefix();

    let mut sheets = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut end = lines.len();

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let stripped = line.trim();

        let hashes = leading_hashes(stripped);
        if hashes > 0 && hashes < level {
            debug!(line = idx + 1, "higher-level heading ends workbook");
            end = idx;
            break;
        }

        if let Some(name) = stripped.strip_prefix(prefix.as_str()) {
            if let Some((name, body)) = current.take() {
                sheets.push(parse_sheet(&body.join("\n"), &name, schema));
            }
            current = Some((name.trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((name, body)) = current {
        sheets.push(parse_sheet(&body.join("\n"), &name, schema));
    }

    let mut workbook = Workbook::new(sheets);
    let region = lines.get(start..end).unwrap_or_default();
    if let Some(visual) = extract_visual(region.iter().copied(), AnnotationKind::Workbook) {
        workbook.metadata.set_visual(visual);
    }

    debug!(sheets = workbook.sheets.len(), "parsed workbook");
    workbook
}

/// Number of leading `#` characters.
fn leading_hashes(line: &str) -> usize {
    line.chars().take_while(|ch| *ch == '#').count()
}

/// Heading level of a Markdown ATX heading (`## Title`), if `line` is one.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = leading_hashes(line);
    let rest = &line[hashes..];
    (hashes > 0 && (rest.is_empty() || rest.starts_with(char::is_whitespace))).then_some(hashes)
}

/// Section mode: one table per heading at `level`.
fn extract_sections(markdown: &str, schema: &MultiTableParsingSchema, level: usize) -> Vec<Table> {
    let prefix = crate::schema::heading_prefix(level);
    let mut tables = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        let stripped = line.trim();

        if let Some(name) = stripped.strip_prefix(prefix.as_str()) {
            if let Some((name, body)) = current.take() {
                tables.extend(finish_section(&name, &body, schema));
            }
            current = Some((name.trim().to_string(), Vec::new()));
        } else if heading_level(stripped).is_some_and(|found| found < level) {
            // A shallower heading closes the open table section.
            if let Some((name, body)) = current.take() {
                tables.extend(finish_section(&name, &body, schema));
            }
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((name, body)) = current {
        tables.extend(finish_section(&name, &body, schema));
    }

    tables
}

/// Splits a section body into description and table. Sections without any
/// table line produce nothing.
fn finish_section(name: &str, body: &[&str], schema: &MultiTableParsingSchema) -> Option<Table> {
    if name.is_empty() {
        return None;
    }

    let separator = schema.parsing.column_separator;
    let Some(start) = body
        .iter()
        .position(|line| !is_annotation_line(line) && line.contains(separator))
    else {
        debug!(table = name, "section has no table rows, skipping");
        return None;
    };

    let (preamble, content) = body.split_at(start);

    let description = if schema.multi.capture_description {
        let text = preamble
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !is_annotation_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        (!text.is_empty()).then_some(text)
    } else {
        None
    };

    let mut table = parse_table_with_schema(&content.join("\n"), schema);
    if table.metadata.visual().is_none() {
        if let Some(visual) = extract_visual(preamble.iter().copied(), AnnotationKind::Table) {
            table.metadata.set_visual(visual);
        }
    }

    table.name = Some(name.to_string());
    table.description = description;
    Some(table)
}

/// Heuristic mode: one table per blank-line-separated chunk.
fn extract_blocks(markdown: &str, schema: &MultiTableParsingSchema) -> Vec<Table> {
    let separator = schema.parsing.column_separator;
    let mut tables: Vec<Table> = Vec::new();

    for block in blank_line_blocks(markdown) {
        let has_table_line = block
            .iter()
            .any(|line| !is_annotation_line(line) && line.contains(separator));

        if has_table_line {
            let table = parse_table_with_schema(&block.join("\n"), schema);
            if !table.is_empty() {
                tables.push(table);
            }
        } else if let Some(visual) = extract_visual(block.iter().copied(), AnnotationKind::Table) {
            // A detached annotation belongs to the table above it.
            match tables.last_mut() {
                Some(last) if last.metadata.visual().is_none() => last.metadata.set_visual(visual),
                _ => debug!("annotation without a preceding table, ignoring"),
            }
        }
    }

    tables
}

/// Groups consecutive non-blank lines.
fn blank_line_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
