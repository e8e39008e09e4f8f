//! Property-based tests for the generate/parse round trip.
//!
//! Generated tables use cells without separators (blank cells included), so
//! parsing the generated text must reproduce the grid exactly, and a second
//! generate/parse cycle must be byte-identical.

use md_spreadsheet_parser::{
    generate_table_markdown_with_schema, generate_workbook_markdown, parse_table_with_schema,
    parse_workbook_with_schema, MultiTableParsingSchema, ParsingSchema, Sheet, Table, Workbook,
    DEFAULT_MULTI_SCHEMA,
};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.]{0,8}"
}

fn table() -> impl Strategy<Value = Table> {
    (1usize..5, 0usize..6).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec(cell(), width),
            prop::collection::vec(prop::collection::vec(cell(), width), height),
        )
            .prop_map(|(headers, rows)| Table::new(Some(headers), rows))
    })
}

fn sheet_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9]{0,6}"
}

fn workbook() -> impl Strategy<Value = Workbook> {
    prop::collection::vec(
        (sheet_name(), prop::collection::vec(table(), 1..3))
            .prop_map(|(name, tables)| Sheet::new(name, tables)),
        1..4,
    )
    .prop_map(Workbook::new)
}

fn parsing_schema() -> impl Strategy<Value = ParsingSchema> {
    any::<bool>().prop_map(|outer| ParsingSchema::new().with_outer_pipes(outer))
}

fn multi_schema() -> impl Strategy<Value = MultiTableParsingSchema> {
    prop_oneof![
        Just(DEFAULT_MULTI_SCHEMA),
        Just(MultiTableParsingSchema::new().with_outer_pipes(true)),
    ]
}

proptest! {
    #[test]
    fn prop_table_round_trip(table in table(), schema in parsing_schema()) {
        let text = generate_table_markdown_with_schema(&table, &schema);
        let parsed = parse_table_with_schema(&text, &schema);
        prop_assert_eq!(&parsed.headers, &table.headers);
        prop_assert_eq!(&parsed.rows, &table.rows);
    }

    #[test]
    fn prop_table_generation_idempotent(table in table(), schema in parsing_schema()) {
        let first = generate_table_markdown_with_schema(&table, &schema);
        let parsed = parse_table_with_schema(&first, &schema);
        let second = generate_table_markdown_with_schema(&parsed, &schema);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_separator_in_cells_round_trips(
        left in "[a-z]{0,4}",
        right in "[a-z]{0,4}",
    ) {
        let value = format!("{}|{}", left, right);
        let table = Table::new(Some(vec!["h".to_string()]), vec![vec![value]]);
        let schema = ParsingSchema::new().with_outer_pipes(true);
        let parsed = parse_table_with_schema(&generate_table_markdown_with_schema(&table, &schema), &schema);
        prop_assert_eq!(parsed.rows, table.rows);
    }

    #[test]
    fn prop_padded_rows_round_trip(table in table(), schema in parsing_schema()) {
        let mut ragged = table.clone();
        for (i, row) in ragged.rows.iter_mut().enumerate() {
            let keep = 1 + i % row.len();
            row.truncate(keep);
        }
        let padded = parse_table_with_schema(&generate_table_markdown_with_schema(&ragged, &schema), &schema);
        let again = parse_table_with_schema(&generate_table_markdown_with_schema(&padded, &schema), &schema);
        prop_assert_eq!(&again.headers, &padded.headers);
        prop_assert_eq!(&again.rows, &padded.rows);
    }

    #[test]
    fn prop_workbook_round_trip(workbook in workbook(), schema in multi_schema()) {
        let text = generate_workbook_markdown(&workbook, &schema);
        let parsed = parse_workbook_with_schema(&text, &schema);

        prop_assert_eq!(parsed.sheets.len(), workbook.sheets.len());
        for (expected, actual) in workbook.sheets.iter().zip(&parsed.sheets) {
            prop_assert_eq!(&actual.name, &expected.name);
            prop_assert_eq!(actual.tables.len(), expected.tables.len());
            for (t1, t2) in expected.tables.iter().zip(&actual.tables) {
                prop_assert_eq!(&t2.headers, &t1.headers);
                prop_assert_eq!(&t2.rows, &t1.rows);
            }
        }

        prop_assert_eq!(generate_workbook_markdown(&parsed, &schema), text);
    }
}
