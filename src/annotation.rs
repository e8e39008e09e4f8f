//! Sidecar metadata annotations.
//!
//! An annotation is a single HTML comment line carrying a JSON object:
//!
//! ```text
//! <!-- md-spreadsheet-table-metadata: {"columnWidths": [100, 80]} -->
//! ```
//!
//! The marker names the kind of entity the data belongs to. Parsers store the
//! object under the `visual` key of that entity's metadata; the generator
//! writes it back out. Annotation lines are never table rows, and an
//! annotation whose JSON is malformed (or not an object) is dropped.

use serde_json::{Map, Value as JsonValue};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Accepted on parse as a table annotation; never generated.
const LEGACY_TABLE_MARKER: &str = "md-spreadsheet-metadata";

/// The entity an annotation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Table,
    Sheet,
    Workbook,
}

impl AnnotationKind {
    /// The marker written by the generator.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            AnnotationKind::Table => "md-spreadsheet-table-metadata",
            AnnotationKind::Sheet => "md-spreadsheet-sheet-metadata",
            AnnotationKind::Workbook => "md-spreadsheet-workbook-metadata",
        }
    }

    fn matches(&self, marker: &str) -> bool {
        marker == self.marker() || (*self == AnnotationKind::Table && marker == LEGACY_TABLE_MARKER)
    }

    fn from_marker(marker: &str) -> Option<Self> {
        [
            AnnotationKind::Table,
            AnnotationKind::Sheet,
            AnnotationKind::Workbook,
        ]
        .into_iter()
        .find(|kind| kind.matches(marker))
    }
}

/// Splits an annotation line into its marker and raw blob.
fn split_annotation(line: &str) -> Option<(&str, &str)> {
    let inner = line
        .trim()
        .strip_prefix(COMMENT_OPEN)?
        .strip_suffix(COMMENT_CLOSE)?
        .trim();
    let (marker, blob) = inner.split_once(':')?;
    Some((marker.trim(), blob.trim()))
}

/// The kind of annotation on `line`, whether or not its JSON is valid.
#[must_use]
pub fn annotation_kind(line: &str) -> Option<AnnotationKind> {
    split_annotation(line).and_then(|(marker, _)| AnnotationKind::from_marker(marker))
}

/// Returns `true` for any recognised annotation line.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::annotation::is_annotation_line;
///
/// assert!(is_annotation_line("<!-- md-spreadsheet-metadata: {} -->"));
/// assert!(is_annotation_line("  <!-- md-spreadsheet-sheet-metadata: not json -->"));
/// assert!(!is_annotation_line("<!-- just a comment -->"));
/// assert!(!is_annotation_line("| a | b |"));
/// ```
#[must_use]
pub fn is_annotation_line(line: &str) -> bool {
    annotation_kind(line).is_some()
}

/// Parses `line` as an annotation of `kind`.
///
/// Returns `None` if the line is not such an annotation or if its blob is not
/// a JSON object.
#[must_use]
pub fn parse_annotation(line: &str, kind: AnnotationKind) -> Option<Map<String, JsonValue>> {
    let (marker, blob) = split_annotation(line)?;
    if !kind.matches(marker) {
        return None;
    }

    match serde_json::from_str::<JsonValue>(blob) {
        Ok(JsonValue::Object(map)) => Some(map),
        Ok(other) => {
            tracing::debug!(marker, "ignoring non-object annotation: {}", other);
            None
        }
        Err(err) => {
            tracing::debug!(marker, error = %err, "ignoring malformed annotation");
            None
        }
    }
}

/// Scans `lines` for the first valid annotation of `kind`.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::annotation::{extract_visual, AnnotationKind};
///
/// let text = "| A |\n|---|\n| 1 |\n\n\n<!-- md-spreadsheet-metadata: {\"columnWidths\": [100]} -->";
/// let visual = extract_visual(text.lines(), AnnotationKind::Table).unwrap();
/// assert_eq!(visual["columnWidths"], serde_json::json!([100]));
/// ```
pub fn extract_visual<'a, I>(lines: I, kind: AnnotationKind) -> Option<Map<String, JsonValue>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .find_map(|line| parse_annotation(line, kind))
}

/// Renders an annotation line for `kind`.
///
/// Output JSON is compact and keeps non-ASCII text unescaped.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::annotation::{render_annotation, AnnotationKind};
/// use serde_json::json;
///
/// let visual = json!({"layout": "日本語"}).as_object().unwrap().clone();
/// assert_eq!(
///     render_annotation(AnnotationKind::Sheet, &visual),
///     r#"<!-- md-spreadsheet-sheet-metadata: {"layout":"日本語"} -->"#
/// );
/// ```
#[must_use]
pub fn render_annotation(kind: AnnotationKind, visual: &Map<String, JsonValue>) -> String {
    format!(
        "{} {}: {} {}",
        COMMENT_OPEN,
        kind.marker(),
        JsonValue::Object(visual.clone()),
        COMMENT_CLOSE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kinds() {
        assert_eq!(
            annotation_kind("<!-- md-spreadsheet-table-metadata: {} -->"),
            Some(AnnotationKind::Table)
        );
        assert_eq!(
            annotation_kind("<!-- md-spreadsheet-metadata: {} -->"),
            Some(AnnotationKind::Table)
        );
        assert_eq!(
            annotation_kind("<!--md-spreadsheet-workbook-metadata:{}-->"),
            Some(AnnotationKind::Workbook)
        );
        assert_eq!(annotation_kind("<!-- other: {} -->"), None);
        assert_eq!(annotation_kind("<!-- md-spreadsheet-metadata {} -->"), None);
    }

    #[test]
    fn test_wrong_kind_is_skipped() {
        let line = r#"<!-- md-spreadsheet-sheet-metadata: {"a": 1} -->"#;
        assert!(parse_annotation(line, AnnotationKind::Table).is_none());
        assert_eq!(
            parse_annotation(line, AnnotationKind::Sheet),
            json!({"a": 1}).as_object().cloned()
        );
    }

    #[test]
    fn test_malformed_blobs_dropped() {
        assert!(parse_annotation("<!-- md-spreadsheet-metadata: {oops -->", AnnotationKind::Table).is_none());
        assert!(parse_annotation("<!-- md-spreadsheet-metadata: [1, 2] -->", AnnotationKind::Table).is_none());
        assert!(parse_annotation("<!-- md-spreadsheet-metadata: -->", AnnotationKind::Table).is_none());
    }

    #[test]
    fn test_first_valid_wins() {
        let text = "<!-- md-spreadsheet-metadata: broken -->\n\
                    <!-- md-spreadsheet-metadata: {\"n\": 1} -->\n\
                    <!-- md-spreadsheet-metadata: {\"n\": 2} -->";
        let visual = extract_visual(text.lines(), AnnotationKind::Table).unwrap();
        assert_eq!(visual["n"], json!(1));
    }

    #[test]
    fn test_render_then_parse() {
        let visual = json!({"color": "赤", "widths": [1, 2]})
            .as_object()
            .cloned()
            .unwrap();
        let line = render_annotation(AnnotationKind::Table, &visual);
        assert!(!line.contains("\\u"));
        assert_eq!(parse_annotation(&line, AnnotationKind::Table), Some(visual));
    }
}
