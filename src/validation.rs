//! Record validation: turning a table's string cells into typed records.
//!
//! A [`RecordShape`] is an explicit list of [`FieldDescriptor`]s. Headers are
//! matched to field names after normalization (lowercase, spaces become
//! underscores, surrounding whitespace trimmed). Unmatched columns are
//! ignored. When two columns normalize to the same field the later one wins.
//!
//! Validation always sweeps the whole table. If any row fails, nothing is
//! returned and the [`ValidationFailure`] lists every problem found.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::{parse_table, validate_table, FieldDescriptor, FieldType, RecordShape, Value};
//!
//! let table = parse_table("| Name | Age | Is Active |\n|---|---|---|\n| Alice | 30 | yes |");
//! let shape = RecordShape::new(
//!     "User",
//!     vec![
//!         FieldDescriptor::new("name", FieldType::String),
//!         FieldDescriptor::new("age", FieldType::Integer),
//!         FieldDescriptor::new("is_active", FieldType::Boolean),
//!     ],
//! );
//!
//! let records = validate_table(&table, &shape).unwrap();
//! assert_eq!(records[0]["age"], Value::from(30));
//! assert_eq!(records[0]["is_active"], Value::Bool(true));
//! ```

use crate::conversion::{ConversionSchema, FieldType, DEFAULT_CONVERSION_SCHEMA};
use crate::error::{Error, Result, RowError, ValidationFailure};
use crate::{Table, Value};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// A validated row: field name to converted value, in shape order.
pub type Record = IndexMap<String, Value>;

/// One named, typed field of a record shape.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    /// Blank cells and missing columns become [`Value::Null`].
    pub optional: bool,
    /// Used when the column is missing from the table.
    pub default: Option<Value>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type,
            optional: false,
            default: None,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// A field is required when it is neither optional nor defaulted.
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }

    fn missing_value(&self) -> Option<Value> {
        match &self.default {
            Some(value) => Some(value.clone()),
            None if self.optional => Some(Value::Null),
            None => None,
        }
    }
}

/// The target of validation: a named, ordered list of fields.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordShape {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordShape {
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        RecordShape {
            name: name.into(),
            fields,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks that the shape is a usable record definition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use md_spreadsheet_parser::{FieldDescriptor, FieldType, RecordShape};
    ///
    /// assert!(RecordShape::new("Empty", vec![]).check().is_err());
    ///
    /// let dup = RecordShape::new(
    ///     "Dup",
    ///     vec![
    ///         FieldDescriptor::new("a", FieldType::String),
    ///         FieldDescriptor::new("a", FieldType::Integer),
    ///     ],
    /// );
    /// assert!(dup.check().is_err());
    /// ```
    pub fn check(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::invalid_shape(format!(
                "{} must declare at least one field",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(Error::invalid_shape(format!(
                    "{} has a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::invalid_shape(format!(
                    "{} declares field '{}' more than once",
                    self.name, field.name
                )));
            }
        }
        Ok(())
    }
}

/// Validates `table` against `shape` with the default conversion schema.
pub fn validate_table(table: &Table, shape: &RecordShape) -> Result<Vec<Record>> {
    validate_table_with_schema(table, shape, &DEFAULT_CONVERSION_SCHEMA)
}

/// Validates `table` against `shape`.
///
/// # Errors
///
/// - [`Error::InvalidShape`] if `shape` fails [`RecordShape::check`].
/// - [`Error::Validation`] if the table has no headers, or if any cell fails
///   conversion or any row lacks a required field.
pub fn validate_table_with_schema(
    table: &Table,
    shape: &RecordShape,
    conversion: &ConversionSchema,
) -> Result<Vec<Record>> {
    shape.check()?;

    let headers = match table.headers.as_deref() {
        Some(headers) if !headers.is_empty() => headers,
        _ => {
            return Err(ValidationFailure::new(vec![RowError::table("Table has no headers")]).into());
        }
    };

    let column_map = map_columns(headers, shape);

    let mut records = Vec::with_capacity(table.rows.len());
    let mut errors = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_number = row_idx + 1;
        let mut cells: IndexMap<&str, Value> = IndexMap::new();
        let mut row_errors = Vec::new();

        for (col_idx, cell) in row.iter().enumerate() {
            let Some(field) = column_map.get(&col_idx).copied() else {
                continue;
            };
            match conversion.convert(field, cell) {
                Ok(value) => {
                    cells.insert(field.name.as_str(), value);
                }
                Err(message) => row_errors.push(RowError::cell(row_number, &field.name, message)),
            }
        }

        if !row_errors.is_empty() {
            errors.extend(row_errors);
            continue;
        }

        let mut record = Record::with_capacity(shape.fields.len());
        let mut missing = Vec::new();
        for field in &shape.fields {
            match cells.shift_remove(field.name.as_str()).or_else(|| field.missing_value()) {
                Some(value) => {
                    record.insert(field.name.clone(), value);
                }
                None => missing.push(format!("'{}'", field.name)),
            }
        }

        if missing.is_empty() {
            records.push(record);
        } else {
            errors.push(RowError::row(
                row_number,
                format!("{} missing required fields: {}", shape.name, missing.join(", ")),
            ));
        }
    }

    tracing::debug!(
        shape = %shape.name,
        rows = table.rows.len(),
        errors = errors.len(),
        "validated table"
    );

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(ValidationFailure::new(errors).into())
    }
}

/// Validates `table` and maps every record onto `T`.
///
/// Mapping failures are collected per row like conversion failures.
///
/// # Examples
///
/// ```rust
/// use md_spreadsheet_parser::{parse_table, ConversionSchema, FieldDescriptor, FieldType, RecordShape};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Item {
///     sku: String,
///     qty: i64,
/// }
///
/// let table = parse_table("| SKU | Qty |\n|---|---|\n| A-1 | 3 |");
/// let shape = RecordShape::new(
///     "Item",
///     vec![
///         FieldDescriptor::new("sku", FieldType::String),
///         FieldDescriptor::new("qty", FieldType::Integer),
///     ],
/// );
///
/// let items: Vec<Item> = table.to_models(&shape, &ConversionSchema::default()).unwrap();
/// assert_eq!(items[0].sku, "A-1");
/// assert_eq!(items[0].qty, 3);
/// ```
pub fn to_models<T>(table: &Table, shape: &RecordShape, conversion: &ConversionSchema) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let records = validate_table_with_schema(table, shape, conversion)?;

    let mut models = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (row_idx, record) in records.into_iter().enumerate() {
        let mapped = serde_json::to_value(&record).and_then(serde_json::from_value::<T>);
        match mapped {
            Ok(model) => models.push(model),
            Err(err) => errors.push(RowError::row(row_idx + 1, err.to_string())),
        }
    }

    if errors.is_empty() {
        Ok(models)
    } else {
        Err(ValidationFailure::new(errors).into())
    }
}

pub(crate) fn normalize_header(header: &str) -> String {
    header.to_lowercase().replace(' ', "_").trim().to_string()
}

fn map_columns<'a>(
    headers: &[String],
    shape: &'a RecordShape,
) -> IndexMap<usize, &'a FieldDescriptor> {
    let mut by_field: IndexMap<&str, usize> = IndexMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header);
        if let Some(field) = shape.field(&normalized) {
            by_field.insert(field.name.as_str(), idx);
        }
    }

    by_field
        .into_iter()
        .filter_map(|(name, idx)| shape.field(name).map(|field| (idx, field)))
        .collect()
}
