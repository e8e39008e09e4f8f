//! Non-ASCII content must survive every output path unescaped.

use md_spreadsheet_parser::{
    generate_workbook_markdown, parse_table, parse_workbook, validate_table_with_schema,
    ConversionSchema, FieldDescriptor, FieldType, Metadata, MultiTableParsingSchema, RecordShape,
    Sheet, Table, Value, Workbook,
};
use serde_json::json;

const DOC: &str = "\
# Tables

## 在庫

| 品名 | 数量 | 有効 |
| --- | --- | --- |
| ネジ | 12 | はい |
| ナット | 0 | いいえ |
<!-- md-spreadsheet-table-metadata: {\"メモ\":\"幅を調整\"} -->

<!-- md-spreadsheet-sheet-metadata: {\"色\":\"青\"} -->

<!-- md-spreadsheet-workbook-metadata: {\"作成者\":\"山田\"} -->
";

#[test]
fn test_parse_non_ascii_workbook() {
    let workbook = parse_workbook(DOC);
    let sheet = workbook.get_sheet("在庫").unwrap();
    let table = &sheet.tables[0];

    assert_eq!(
        table.headers,
        Some(vec!["品名".to_string(), "数量".to_string(), "有効".to_string()])
    );
    assert_eq!(table.rows[1][0], "ナット");
    assert_eq!(table.metadata.get("visual"), Some(&json!({"メモ": "幅を調整"})));
    assert_eq!(sheet.metadata.get("visual"), Some(&json!({"色": "青"})));
    assert_eq!(workbook.metadata.get("visual"), Some(&json!({"作成者": "山田"})));
}

#[test]
fn test_generated_markdown_unescaped() {
    let workbook = parse_workbook(DOC);
    let schema = MultiTableParsingSchema::new().with_outer_pipes(true);
    let text = generate_workbook_markdown(&workbook, &schema);

    assert!(text.contains("## 在庫"));
    assert!(text.contains("| ネジ | 12 | はい |"));
    assert!(text.contains(r#"{"メモ":"幅を調整"}"#));
    assert!(text.contains(r#"{"色":"青"}"#));
    assert!(text.contains(r#"{"作成者":"山田"}"#));
    assert!(!text.contains("\\u"));

    let reparsed = parse_workbook(&text);
    assert_eq!(reparsed.sheets[0].tables[0].rows, workbook.sheets[0].tables[0].rows);
    assert_eq!(reparsed.metadata, workbook.metadata);
    assert_eq!(reparsed.sheets[0].metadata, workbook.sheets[0].metadata);
}

#[test]
fn test_json_projection_unescaped() {
    let mut metadata = Metadata::new();
    metadata.insert("visual", json!({"ラベル": "値"}));
    let table = Table::new(Some(vec!["列".into()]), vec![vec!["データ".into()]])
        .with_name("表")
        .with_description("説明文")
        .with_metadata(metadata);
    let workbook = Workbook::new(vec![Sheet::new("シート", vec![table])]);

    let text = workbook.to_json_string().unwrap();
    for expected in ["表", "説明文", "列", "データ", "ラベル", "値", "シート"] {
        assert!(text.contains(expected), "missing {} in {}", expected, text);
    }
    assert!(!text.contains("\\u"));
}

#[test]
fn test_japanese_boolean_pairs() {
    let table = parse_table("| 有効 |\n|---|\n| はい |\n| いいえ |");
    let shape = RecordShape::new("Flag", vec![FieldDescriptor::new("有効", FieldType::Boolean)]);
    let schema = ConversionSchema::new().with_boolean_pairs([("はい", "いいえ")]);

    let records = validate_table_with_schema(&table, &shape, &schema).unwrap();
    assert_eq!(records[0]["有効"], Value::Bool(true));
    assert_eq!(records[1]["有効"], Value::Bool(false));
}

#[test]
fn test_escaped_separator_with_wide_characters() {
    let table = parse_table("| 式 |\n|---|\n| 東\\|京 |");
    assert_eq!(table.rows, vec![vec!["東|京".to_string()]]);
}
