//! Typed records with custom boolean literals and converters.
//!
//! Run with: cargo run --example custom_conversion

use md_spreadsheet_parser::{
    parse_table, ConversionSchema, Error, FieldDescriptor, FieldType, RecordShape, Value,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Task {
    title: String,
    done: bool,
    cost: f64,
    due: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let markdown = "\
| Title | Done | Cost | Due |
| --- | --- | --- | --- |
| Write docs | はい | ¥1,200 | 2024-06-01 |
| Ship release | いいえ | ¥30,000 | |
";
    let table = parse_table(markdown);

    let shape = RecordShape::new(
        "Task",
        vec![
            FieldDescriptor::new("title", FieldType::String),
            FieldDescriptor::new("done", FieldType::Boolean),
            FieldDescriptor::new("cost", FieldType::named("yen")),
            FieldDescriptor::new("due", FieldType::Date).optional(),
        ],
    );

    let schema = ConversionSchema::new()
        .with_boolean_pairs([("はい", "いいえ")])
        .with_type_converter(FieldType::named("yen"), |cell| {
            cell.trim()
                .trim_start_matches('¥')
                .replace(',', "")
                .parse::<f64>()
                .map(Value::from)
                .map_err(|e| format!("Invalid yen amount '{}': {}", cell, e))
        });

    let tasks: Vec<Task> = table.to_models(&shape, &schema)?;
    for task in &tasks {
        println!("{:?}", task);
    }

    // The default boolean pairs do not know the Japanese literals.
    match table.validate(&shape, &ConversionSchema::default()) {
        Err(Error::Validation(failure)) => println!("\nWith default pairs:\n{}", failure),
        other => println!("\nUnexpected: {:?}", other),
    }

    Ok(())
}
