//! Row tokenization and divider-row detection.
//!
//! A row is one line of text split on the schema's column separator. A
//! separator preceded by a backslash (`\|`) belongs to the cell text and is
//! unescaped while cleaning the cell. The escape character is fixed.

use crate::schema::ParsingSchema;

/// The fixed escape character for literal separators inside cells.
pub const ESCAPE_CHAR: char = '\\';

/// Trims (per schema) and unescapes a single cell.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{tokenizer::clean_cell, ParsingSchema};
///
/// assert_eq!(clean_cell("  a\\|b ", &ParsingSchema::new()), "a|b");
/// ```
#[must_use]
pub fn clean_cell(cell: &str, schema: &ParsingSchema) -> String {
    let cell = if schema.strip_whitespace {
        cell.trim()
    } else {
        cell
    };

    if !cell.contains(ESCAPE_CHAR) {
        return cell.to_string();
    }

    let mut escaped = String::with_capacity(2);
    escaped.push(ESCAPE_CHAR);
    escaped.push(schema.column_separator);
    cell.replace(&escaped, &schema.column_separator.to_string())
}

/// Splits `line` on every separator that is not directly preceded by the
/// escape character.
fn split_unescaped(line: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (idx, ch) in line.char_indices() {
        if ch == separator && prev != Some(ESCAPE_CHAR) {
            parts.push(&line[start..idx]);
            start = idx + ch.len_utf8();
        }
        prev = Some(ch);
    }
    parts.push(&line[start..]);
    parts
}

/// Tokenizes one line into cleaned cells.
///
/// Returns `None` for a line that is empty after trimming. Optional leading
/// and trailing separators are dropped.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{tokenizer::parse_row, ParsingSchema};
///
/// let schema = ParsingSchema::new();
/// assert_eq!(
///     parse_row("| a | b\\|c |", &schema),
///     Some(vec!["a".to_string(), "b|c".to_string()])
/// );
/// assert_eq!(parse_row("a | b", &schema), Some(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(parse_row("   ", &schema), None);
/// ```
#[must_use]
pub fn parse_row(line: &str, schema: &ParsingSchema) -> Option<Vec<String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = split_unescaped(line, schema.column_separator);

    if parts.len() > 1 {
        if parts.first().is_some_and(|p| p.trim().is_empty()) {
            parts.remove(0);
        }
        if parts.last().is_some_and(|p| p.trim().is_empty()) {
            parts.pop();
        }
    }

    Some(parts.into_iter().map(|p| clean_cell(p, schema)).collect())
}

/// Returns `true` when `row` is a header divider such as `|---|:--:|`.
///
/// Every cell must consist only of the header separator character, colons
/// and whitespace, and must contain the header separator character at least
/// once. A row with no cells is never a divider.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{tokenizer::is_separator_row, ParsingSchema};
///
/// let schema = ParsingSchema::new();
/// let row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
///
/// assert!(is_separator_row(&row(&["---", ":--:", "--:"]), &schema));
/// assert!(!is_separator_row(&row(&["---", "x"]), &schema));
/// assert!(!is_separator_row(&row(&[""]), &schema));
/// assert!(!is_separator_row(&[], &schema));
/// ```
#[must_use]
pub fn is_separator_row(row: &[String], schema: &ParsingSchema) -> bool {
    if row.is_empty() {
        return false;
    }

    let dash = schema.header_separator_char;
    row.iter().all(|cell| {
        let only_divider_chars = cell
            .chars()
            .all(|ch| ch == dash || ch == ':' || ch.is_whitespace());
        only_divider_chars && cell.contains(dash)
    })
}
