//! Markdown generation.
//!
//! The generator is the inverse of the parser. Output is deterministic and
//! minimal: cells are joined with `" | "`, dividers are three header
//! separator characters per column, and no column alignment is attempted.
//!
//! Cells containing the column separator are written with it escaped (`\|`)
//! so that parsing the output gives back the same cells. For the same reason
//! single-column rows and rows with a blank first or last cell always get
//! outer separators, even when the schema does not require them.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::{generate_workbook_markdown, MultiTableParsingSchema, Sheet, Table, Workbook};
//!
//! let table = Table::new(Some(vec!["A".into()]), vec![vec!["1".into()]]);
//! let workbook = Workbook::new(vec![Sheet::new("Sheet1", vec![table])]);
//! let schema = MultiTableParsingSchema::new().with_outer_pipes(true);
//!
//! assert_eq!(
//!     generate_workbook_markdown(&workbook, &schema),
//!     "# Tables\n\n## Sheet1\n\n| A |\n| --- |\n| 1 |"
//! );
//! ```

use crate::annotation::{render_annotation, AnnotationKind};
use crate::schema::{MultiTableParsingSchema, ParsingSchema, Schema, DEFAULT_SCHEMA};
use crate::tokenizer::ESCAPE_CHAR;
use crate::{Sheet, Table, Workbook};
use std::borrow::Cow;

/// Width of generated divider cells.
const DIVIDER_WIDTH: usize = 3;

/// Renders a table with the default schema.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{generate_table_markdown, Table};
///
/// let table = Table::new(Some(vec!["Name".into()]), vec![vec!["a|b".into()]]);
/// assert_eq!(generate_table_markdown(&table), "| Name |\n| --- |\n| a\\|b |");
/// ```
#[must_use]
pub fn generate_table_markdown(table: &Table) -> String {
    generate_table_markdown_with_schema(table, &DEFAULT_SCHEMA)
}

/// Renders a table.
///
/// With a multi-table schema the table name is written as a heading (section
/// mode only) and the description follows it (when descriptions are
/// captured). A `visual` metadata object is written as a table annotation on
/// the line after the last row.
#[must_use]
pub fn generate_table_markdown_with_schema<S: Schema + ?Sized>(table: &Table, schema: &S) -> String {
    let parsing = schema.parsing();
    let mut lines: Vec<String> = Vec::new();

    if let Some(multi) = schema.multi_table() {
        if let (Some(name), Some(prefix)) = (table.name.as_deref(), multi.table_prefix()) {
            if !name.is_empty() {
                lines.push(format!("{}{}", prefix, name));
            }
        }

        if multi.capture_description {
            if let Some(description) = table.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(description.to_string());
                lines.push(String::new());
            }
        }
    }

    if let Some(headers) = table.headers.as_ref().filter(|h| !h.is_empty()) {
        lines.push(render_row(headers.iter().map(|h| escape_cell(h, parsing)), parsing));

        let divider = parsing.header_separator_char.to_string().repeat(DIVIDER_WIDTH);
        lines.push(render_row(
            headers.iter().map(|_| Cow::Borrowed(divider.as_str())),
            parsing,
        ));
    }

    for row in &table.rows {
        lines.push(render_row(row.iter().map(|c| escape_cell(c, parsing)), parsing));
    }

    if let Some(visual) = table.metadata.visual() {
        lines.push(render_annotation(AnnotationKind::Table, visual));
    }

    lines.join("\n")
}

/// Renders a sheet: its heading (multi-table schemas only), then each table
/// separated by a blank line, then the sheet annotation if any.
#[must_use]
pub fn generate_sheet_markdown<S: Schema + ?Sized>(sheet: &Sheet, schema: &S) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(multi) = schema.multi_table() {
        lines.push(format!("{}{}", multi.sheet_prefix(), sheet.name));
        lines.push(String::new());
    }

    for (i, table) in sheet.tables.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(generate_table_markdown_with_schema(table, schema));
    }

    if let Some(visual) = sheet.metadata.visual() {
        lines.push(String::new());
        lines.push(render_annotation(AnnotationKind::Sheet, visual));
    }

    lines.join("\n")
}

/// Renders a workbook: the root marker (if set), then each sheet separated
/// by two blank lines, then the workbook annotation if any.
#[must_use]
pub fn generate_workbook_markdown(workbook: &Workbook, schema: &MultiTableParsingSchema) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(marker) = schema.multi.root_marker.as_deref() {
        lines.push(marker.to_string());
        lines.push(String::new());
    }

    for (i, sheet) in workbook.sheets.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
            lines.push(String::new());
        }
        lines.push(generate_sheet_markdown(sheet, schema));
    }

    if let Some(visual) = workbook.metadata.visual() {
        lines.push(String::new());
        lines.push(render_annotation(AnnotationKind::Workbook, visual));
    }

    lines.join("\n")
}

/// Escapes literal column separators in a cell.
fn escape_cell<'a>(cell: &'a str, parsing: &ParsingSchema) -> Cow<'a, str> {
    let separator = parsing.column_separator;
    if !cell.contains(separator) {
        return Cow::Borrowed(cell);
    }

    let mut escaped = String::with_capacity(cell.len() + 2);
    for ch in cell.chars() {
        if ch == separator {
            escaped.push(ESCAPE_CHAR);
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Joins cells into one line. Outer separators are written when the schema
/// asks for them, and also whenever the row would not parse back without
/// them: a single cell (no separator on the line) or a blank first or last
/// cell (dropped as an outer-pipe remnant).
fn render_row<'a, I>(cells: I, parsing: &ParsingSchema) -> String
where
    I: Iterator<Item = Cow<'a, str>>,
{
    let cells: Vec<Cow<'a, str>> = cells.collect();
    let separator = parsing.column_separator;
    let joiner = format!(" {} ", separator);
    let joined = cells.join(joiner.as_str());

    if parsing.require_outer_pipes || needs_outer_separators(&cells) {
        format!("{} {} {}", separator, joined, separator)
    } else {
        joined
    }
}

fn needs_outer_separators(cells: &[Cow<'_, str>]) -> bool {
    match cells {
        [] => false,
        [_] => true,
        [first, .., last] => first.trim().is_empty() || last.trim().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_MULTI_SCHEMA;
    use crate::{parse_table_with_schema, parse_workbook, Metadata};
    use serde_json::json;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_basic_table_with_outer_pipes() {
        let table = Table::new(
            Some(row(&["Name", "Age"])),
            vec![row(&["Alice", "30"]), row(&["Bob", "25"])],
        );
        let schema = ParsingSchema::new().with_outer_pipes(true);
        assert_eq!(
            generate_table_markdown_with_schema(&table, &schema),
            "| Name | Age |\n| --- | --- |\n| Alice | 30 |\n| Bob | 25 |"
        );
    }

    #[test]
    fn test_headerless_table() {
        let table = Table::new(None, vec![row(&["A", "1"]), row(&["B", "2"])]);
        let schema = ParsingSchema::new().with_outer_pipes(true);
        assert_eq!(
            generate_table_markdown_with_schema(&table, &schema),
            "| A | 1 |\n| B | 2 |"
        );
    }

    #[test]
    fn test_name_and_description() {
        let table = Table::new(Some(row(&["Col1"])), vec![row(&["Val1"])])
            .with_name("MyTable")
            .with_description("This is a description.");
        let schema = MultiTableParsingSchema::new()
            .with_table_header_level(3)
            .with_capture_description(true)
            .with_outer_pipes(true);
        assert_eq!(
            generate_table_markdown_with_schema(&table, &schema),
            "### MyTable\nThis is a description.\n\n| Col1 |\n| --- |\n| Val1 |"
        );
    }

    #[test]
    fn test_name_omitted_without_section_mode() {
        let table = Table::new(Some(row(&["A"])), vec![]).with_name("Hidden");
        let text = generate_table_markdown_with_schema(&table, &MultiTableParsingSchema::new());
        assert_eq!(text, "| A |\n| --- |");
    }

    #[test]
    fn test_sheet_rendering() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                Table::new(Some(row(&["A"])), vec![row(&["1"])]),
                Table::new(Some(row(&["B"])), vec![row(&["2"])]),
            ],
        );
        let schema = MultiTableParsingSchema::new().with_outer_pipes(true);
        assert_eq!(
            generate_sheet_markdown(&sheet, &schema),
            "## Sheet1\n\n| A |\n| --- |\n| 1 |\n\n| B |\n| --- |\n| 2 |"
        );
        // Plain schemas carry no section structure.
        assert_eq!(
            generate_sheet_markdown(&sheet, &ParsingSchema::new()),
            "| A |\n| --- |\n| 1 |\n\n| B |\n| --- |\n| 2 |"
        );
    }

    #[test]
    fn test_workbook_sheets_separated_by_two_blank_lines() {
        let workbook = Workbook::new(vec![
            Sheet::new("S1", vec![Table::new(None, vec![row(&["x"])])]),
            Sheet::new("S2", vec![]),
        ]);
        let schema = MultiTableParsingSchema::new().with_root_marker(None::<String>);
        assert_eq!(
            generate_workbook_markdown(&workbook, &schema),
            "## S1\n\n| x |\n\n\n## S2\n"
        );
    }

    #[test]
    fn test_separator_escaped() {
        let table = Table::new(Some(row(&["a|b"])), vec![row(&["c|d|e"])]);
        let schema = ParsingSchema::new().with_outer_pipes(true);
        let text = generate_table_markdown_with_schema(&table, &schema);
        assert_eq!(text, "| a\\|b |\n| --- |\n| c\\|d\\|e |");

        let parsed = parse_table_with_schema(&text, &schema);
        assert_eq!(parsed.headers, table.headers);
        assert_eq!(parsed.rows, table.rows);
    }

    #[test]
    fn test_annotations_rendered() {
        let mut metadata = Metadata::new();
        metadata.insert("visual", json!({"layout": "日本語レイアウト"}));
        let table = Table::new(Some(row(&["A"])), vec![row(&["1"])]).with_metadata(metadata.clone());
        let sheet = Sheet::new("S", vec![table]).with_metadata(metadata.clone());
        let workbook = Workbook::new(vec![sheet]).with_metadata(metadata);

        let text = generate_workbook_markdown(&workbook, &MultiTableParsingSchema::new());
        assert!(text.contains(r#"<!-- md-spreadsheet-table-metadata: {"layout":"日本語レイアウト"} -->"#));
        assert!(text.contains(r#"<!-- md-spreadsheet-sheet-metadata: {"layout":"日本語レイアウト"} -->"#));
        assert!(text.contains(r#"<!-- md-spreadsheet-workbook-metadata: {"layout":"日本語レイアウト"} -->"#));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_blank_edge_cells_keep_their_columns() {
        let table = Table::new(
            Some(row(&["A", "B"])),
            vec![row(&["", "x"]), row(&["y", ""]), row(&["", ""]), row(&["p", "q"])],
        );
        let text = generate_table_markdown(&table);
        assert_eq!(
            text,
            "A | B\n--- | ---\n|  | x |\n| y |  |\n|  |  |\np | q"
        );

        let parsed = parse_table_with_schema(&text, &DEFAULT_SCHEMA);
        assert_eq!(parsed.rows, table.rows);
        assert_eq!(generate_table_markdown(&parsed), text);
    }

    #[test]
    fn test_single_column_rows_wrapped() {
        let table = Table::new(Some(row(&["A"])), vec![row(&[""]), row(&["1"])]);
        let text = generate_table_markdown(&table);
        assert_eq!(text, "| A |\n| --- |\n|  |\n| 1 |");

        let parsed = parse_table_with_schema(&text, &DEFAULT_SCHEMA);
        assert_eq!(parsed.headers, table.headers);
        assert_eq!(parsed.rows, table.rows);
    }

    #[test]
    fn test_single_column_workbook_round_trip_default_schema() {
        let workbook = Workbook::new(vec![Sheet::new(
            "S",
            vec![Table::new(Some(row(&["A"])), vec![row(&["1"])])],
        )]);
        let text = generate_workbook_markdown(&workbook, &DEFAULT_MULTI_SCHEMA);
        assert_eq!(text, "# Tables\n\n## S\n\n| A |\n| --- |\n| 1 |");

        let parsed = parse_workbook(&text);
        let sheet = parsed.get_sheet("S").unwrap();
        assert_eq!(sheet.tables.len(), 1);
        assert_eq!(sheet.tables[0].rows, vec![row(&["1"])]);
    }

    #[test]
    fn test_non_visual_metadata_not_rendered() {
        let mut metadata = Metadata::new();
        metadata.insert("schema_used", json!("whatever"));
        let table = Table::new(Some(row(&["A"])), vec![]).with_metadata(metadata);
        assert_eq!(generate_table_markdown(&table), "| A |\n| --- |");
    }
}
