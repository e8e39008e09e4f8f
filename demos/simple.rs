//! Parse a Markdown table and print its JSON projection.
//!
//! Run with: cargo run --example simple

use md_spreadsheet_parser::{parse_table, ParsingSchema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let markdown = "\
| Name | Role | Joined |
|:-----|:----:|-------:|
| Alice Johnson | Admin | 2021-04-01 |
| Bob Smith | Editor |
| Carol \\| Dave | Viewer | 2023-09-12 | extra |
";

    let table = parse_table(markdown);

    println!("Headers: {:?}", table.headers);
    for row in &table.rows {
        println!("  {:?}", row);
    }

    // Short rows are padded, long rows truncated, escaped pipes restored
    assert_eq!(table.rows[1][2], "");
    assert_eq!(table.rows[2].len(), 3);
    assert_eq!(table.rows[2][0], "Carol | Dave");

    println!("\nJSON:\n{}\n", serde_json::to_string_pretty(&table.to_json()?)?);

    let regenerated = table.to_markdown(&ParsingSchema::new().with_outer_pipes(true));
    println!("Regenerated:\n{}", regenerated);

    Ok(())
}
