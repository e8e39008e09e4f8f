//! Sidecar annotations survive a parse/generate round trip.
//!
//! Run with: RUST_LOG=debug cargo run --example metadata

use md_spreadsheet_parser::{generate_workbook_markdown, parse_workbook, MultiTableParsingSchema};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = r##"# Tables

## Inventory

| Item | Qty |
| --- | --- |
| Bolt | 12 |
<!-- md-spreadsheet-table-metadata: {"columnWidths":[120,60],"frozen":1} -->

<!-- md-spreadsheet-sheet-metadata: {"tabColor":"#3366ff"} -->

<!-- md-spreadsheet-table-metadata: {broken json} -->

<!-- md-spreadsheet-workbook-metadata: {"activeSheet":0} -->
"##;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let workbook = parse_workbook(DOCUMENT);
    let sheet = workbook.get_sheet("Inventory").ok_or("missing sheet")?;

    println!("Workbook visual: {:?}", workbook.metadata.visual());
    println!("Sheet visual:    {:?}", sheet.metadata.visual());
    println!("Table visual:    {:?}", sheet.tables[0].metadata.visual());

    let text = generate_workbook_markdown(&workbook, &MultiTableParsingSchema::new().with_outer_pipes(true));
    println!("\nRegenerated:\n{}\n", text);

    let reparsed = parse_workbook(&text);
    assert_eq!(reparsed.metadata, workbook.metadata);
    assert_eq!(
        reparsed.sheets[0].tables[0].metadata.visual(),
        sheet.tables[0].metadata.visual()
    );

    println!("{}", serde_json::to_string_pretty(&reparsed.to_json()?)?);

    Ok(())
}
