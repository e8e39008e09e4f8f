//! Sheets, named tables and descriptions.
//!
//! Run with: RUST_LOG=md_spreadsheet_parser=debug cargo run --example workbook

use md_spreadsheet_parser::{parse_workbook_with_schema, MultiTableParsingSchema};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = "\
# Quarterly Report

Some prose that is not part of the workbook.

# Tables

## Sales

### By Region
Figures in thousands.

| Region | Q1 | Q2 |
| --- | --- | --- |
| North | 120 | 135 |
| South | 98 | 101 |

### By Product

| Product | Units |
| --- | --- |
| Widget | 4200 |

## Staff

### Headcount

| Team | People |
| --- | --- |
| Core | 12 |

# Appendix

| Not | Parsed |
| --- | --- |
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = MultiTableParsingSchema::new()
        .with_table_header_level(3)
        .with_capture_description(true)
        .with_outer_pipes(true);
    println!("Using {}\n", schema);

    let workbook = parse_workbook_with_schema(DOCUMENT, &schema);

    for sheet in &workbook.sheets {
        println!("Sheet '{}' ({} tables)", sheet.name, sheet.tables.len());
        for table in &sheet.tables {
            println!(
                "  {} - {} rows{}",
                table.name.as_deref().unwrap_or("<unnamed>"),
                table.rows.len(),
                table
                    .description
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default()
            );
        }
    }

    let regions = workbook
        .get_sheet("Sales")
        .and_then(|sheet| sheet.get_table("By Region"))
        .ok_or("missing Sales/By Region")?;
    assert_eq!(regions.rows[0], vec!["North", "120", "135"]);
    assert!(workbook.get_sheet("Appendix").is_none());

    println!("\nRegenerated:\n{}", workbook.to_markdown(&schema));

    Ok(())
}
