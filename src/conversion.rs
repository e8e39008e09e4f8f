//! String-to-value coercion for record validation.
//!
//! A [`ConversionSchema`] decides how a cell string becomes a [`Value`] for a
//! given field. Converters are resolved in this order:
//!
//! 1. a converter registered for the field name
//! 2. blank cell in an optional field: [`Value::Null`]
//! 3. a converter registered for the field type
//! 4. the built-in coercion for the field type
//!
//! Built-in boolean coercion compares the trimmed, case-folded cell against
//! each configured `(true, false)` literal pair in order.
//!
//! ## Examples
//!
//! ```rust
//! use md_spreadsheet_parser::{ConversionSchema, FieldDescriptor, FieldType, Value};
//!
//! let schema = ConversionSchema::new()
//!     .with_boolean_pairs([("はい", "いいえ")])
//!     .with_type_converter(FieldType::named("money"), |cell| {
//!         cell.trim()
//!             .trim_start_matches('$')
//!             .replace(',', "")
//!             .parse::<f64>()
//!             .map(Value::from)
//!             .map_err(|e| e.to_string())
//!     });
//!
//! let active = FieldDescriptor::new("active", FieldType::Boolean);
//! assert_eq!(schema.convert(&active, "はい"), Ok(Value::Bool(true)));
//! assert!(schema.convert(&active, "yes").is_err());
//!
//! let price = FieldDescriptor::new("price", FieldType::named("money"));
//! assert_eq!(schema.convert(&price, "$2,000"), Ok(Value::from(2000.0)));
//! ```

use crate::validation::FieldDescriptor;
use crate::Value;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Boolean literal pairs used when none are configured.
pub const DEFAULT_BOOLEAN_PAIRS: [(&str, &str); 4] =
    [("true", "false"), ("yes", "no"), ("1", "0"), ("on", "off")];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The shared default conversion schema.
pub static DEFAULT_CONVERSION_SCHEMA: Lazy<ConversionSchema> = Lazy::new(ConversionSchema::default);

/// A cell converter. Errors are plain messages; the validator adds the row
/// and column.
pub type Converter = Arc<dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync>;

/// Semantic type of a record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    String,
    /// ISO `YYYY-MM-DD`
    Date,
    /// A caller-defined type, converted only through a registered type
    /// converter. Without one the raw cell string is kept.
    Named(String),
}

impl FieldType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => f.write_str("int"),
            FieldType::Float => f.write_str("float"),
            FieldType::Boolean => f.write_str("bool"),
            FieldType::String => f.write_str("str"),
            FieldType::Date => f.write_str("date"),
            FieldType::Named(name) => f.write_str(name),
        }
    }
}

/// Configuration for converting cells into typed values.
#[derive(Clone)]
pub struct ConversionSchema {
    pub boolean_pairs: Vec<(String, String)>,
    custom_converters: HashMap<FieldType, Converter>,
    field_converters: HashMap<String, Converter>,
}

impl Default for ConversionSchema {
    fn default() -> Self {
        ConversionSchema {
            boolean_pairs: DEFAULT_BOOLEAN_PAIRS
                .iter()
                .map(|(t, f)| (t.to_string(), f.to_string()))
                .collect(),
            custom_converters: HashMap::new(),
            field_converters: HashMap::new(),
        }
    }
}

impl fmt::Debug for ConversionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionSchema")
            .field("boolean_pairs", &self.boolean_pairs)
            .field("custom_converters", &self.custom_converters.keys().collect::<Vec<_>>())
            .field("field_converters", &self.field_converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConversionSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the boolean literal pairs.
    #[must_use]
    pub fn with_boolean_pairs<I, T, F>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, F)>,
        T: Into<String>,
        F: Into<String>,
    {
        self.boolean_pairs = pairs
            .into_iter()
            .map(|(t, f)| (t.into(), f.into()))
            .collect();
        self
    }

    /// Registers a converter for every field of `field_type`.
    #[must_use]
    pub fn with_type_converter<C>(mut self, field_type: FieldType, converter: C) -> Self
    where
        C: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.custom_converters.insert(field_type, Arc::new(converter));
        self
    }

    /// Registers a converter for the field called `name`. It takes precedence
    /// over type converters and receives the raw cell, blank or not.
    #[must_use]
    pub fn with_field_converter<C>(mut self, name: impl Into<String>, converter: C) -> Self
    where
        C: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.field_converters.insert(name.into(), Arc::new(converter));
        self
    }

    /// Converts one cell for `field`.
    pub fn convert(&self, field: &FieldDescriptor, cell: &str) -> std::result::Result<Value, String> {
        if let Some(converter) = self.field_converters.get(&field.name) {
            return converter(cell);
        }

        if field.optional && cell.trim().is_empty() {
            return Ok(Value::Null);
        }

        if let Some(converter) = self.custom_converters.get(&field.field_type) {
            return converter(cell);
        }

        self.convert_builtin(&field.field_type, cell)
    }

    /// Matches `cell` against the configured boolean pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use md_spreadsheet_parser::ConversionSchema;
    ///
    /// let schema = ConversionSchema::new();
    /// assert_eq!(schema.convert_bool(" Yes "), Ok(true));
    /// assert_eq!(schema.convert_bool("OFF"), Ok(false));
    /// assert!(schema.convert_bool("maybe").is_err());
    /// ```
    pub fn convert_bool(&self, cell: &str) -> std::result::Result<bool, String> {
        let folded = cell.trim().to_lowercase();
        for (truthy, falsy) in &self.boolean_pairs {
            if folded == truthy.to_lowercase() {
                return Ok(true);
            }
            if folded == falsy.to_lowercase() {
                return Ok(false);
            }
        }
        Err(format!("Invalid boolean value: '{}'", cell))
    }

    fn convert_builtin(&self, field_type: &FieldType, cell: &str) -> std::result::Result<Value, String> {
        let trimmed = cell.trim();
        match field_type {
            FieldType::Integer => {
                if trimmed.is_empty() {
                    return Err("Empty value for int field".to_string());
                }
                trimmed
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| format!("Invalid integer value: '{}'", cell))
            }
            FieldType::Float => {
                if trimmed.is_empty() {
                    return Err("Empty value for float field".to_string());
                }
                trimmed
                    .parse::<f64>()
                    .map(Value::from)
                    .map_err(|_| format!("Invalid float value: '{}'", cell))
            }
            FieldType::Boolean => self.convert_bool(cell).map(Value::Bool),
            FieldType::String => Ok(Value::String(cell.to_string())),
            FieldType::Date => {
                if trimmed.is_empty() {
                    return Err("Empty value for date field".to_string());
                }
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .map(Value::Date)
                    .map_err(|_| format!("Invalid date value: '{}'", cell))
            }
            FieldType::Named(_) => Ok(Value::String(cell.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor::new(name, field_type)
    }

    #[test]
    fn test_default_boolean_pairs() {
        let schema = ConversionSchema::default();
        let f = field("flag", FieldType::Boolean);
        for (cell, expected) in [
            ("Yes", true),
            ("0", false),
            ("True", true),
            ("off", false),
            ("ON", true),
            ("no", false),
        ] {
            assert_eq!(schema.convert(&f, cell), Ok(Value::Bool(expected)), "{}", cell);
        }
        assert_eq!(
            schema.convert(&f, ""),
            Err("Invalid boolean value: ''".to_string())
        );
    }

    #[test]
    fn test_restricted_pairs_reject_defaults() {
        let schema = ConversionSchema::new().with_boolean_pairs([("hai", "iie")]);
        let f = field("flag", FieldType::Boolean);
        assert_eq!(schema.convert(&f, "Hai"), Ok(Value::Bool(true)));
        assert_eq!(schema.convert(&f, "IIE"), Ok(Value::Bool(false)));
        assert_eq!(
            schema.convert(&f, "Yes"),
            Err("Invalid boolean value: 'Yes'".to_string())
        );
    }

    #[test]
    fn test_numbers() {
        let schema = ConversionSchema::default();
        let int = field("n", FieldType::Integer);
        let float = field("x", FieldType::Float);

        assert_eq!(schema.convert(&int, " 42 "), Ok(Value::from(42)));
        assert_eq!(schema.convert(&int, "-7"), Ok(Value::from(-7)));
        assert_eq!(schema.convert(&int, ""), Err("Empty value for int field".to_string()));
        assert!(schema.convert(&int, "4.5").is_err());

        assert_eq!(schema.convert(&float, "2.5"), Ok(Value::from(2.5)));
        assert_eq!(schema.convert(&float, "  "), Err("Empty value for float field".to_string()));
        assert!(schema.convert(&float, "abc").is_err());
    }

    #[test]
    fn test_optional_blank_is_null() {
        let schema = ConversionSchema::default();
        let f = field("n", FieldType::Integer).optional();
        assert_eq!(schema.convert(&f, "  "), Ok(Value::Null));
        assert_eq!(schema.convert(&f, "3"), Ok(Value::from(3)));
    }

    #[test]
    fn test_strings_kept_verbatim() {
        let schema = ConversionSchema::default();
        assert_eq!(
            schema.convert(&field("s", FieldType::String), " padded "),
            Ok(Value::from(" padded "))
        );
    }

    #[test]
    fn test_dates() {
        let schema = ConversionSchema::default();
        let f = field("d", FieldType::Date);
        assert_eq!(
            schema.convert(&f, "2024-02-29"),
            Ok(Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
        assert!(schema.convert(&f, "2023-02-29").is_err());
        assert!(schema.convert(&f, "").is_err());
    }

    #[test]
    fn test_field_converter_wins_over_type_converter() {
        let schema = ConversionSchema::new()
            .with_type_converter(FieldType::Integer, |_| Ok(Value::from(1)))
            .with_field_converter("special", |_| Ok(Value::from(2)));

        assert_eq!(schema.convert(&field("special", FieldType::Integer), "x"), Ok(Value::from(2)));
        assert_eq!(schema.convert(&field("other", FieldType::Integer), "x"), Ok(Value::from(1)));
    }

    #[test]
    fn test_field_converter_sees_blank_optional_cells() {
        let schema = ConversionSchema::new().with_field_converter("n", |cell| {
            Ok(Value::from(cell.trim().is_empty()))
        });
        let f = field("n", FieldType::Integer).optional();
        assert_eq!(schema.convert(&f, ""), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_type_converter_skipped_for_blank_optional() {
        let schema = ConversionSchema::new()
            .with_type_converter(FieldType::named("decimal"), |_| Err("called".to_string()));
        let f = field("price", FieldType::named("decimal")).optional();
        assert_eq!(schema.convert(&f, ""), Ok(Value::Null));
        assert!(schema.convert(&f, "1").is_err());
    }

    #[test]
    fn test_named_without_converter_keeps_text() {
        let schema = ConversionSchema::default();
        assert_eq!(
            schema.convert(&field("c", FieldType::named("color")), "red"),
            Ok(Value::from("red"))
        );
    }

    #[test]
    fn test_default_schema_is_shared() {
        assert_eq!(DEFAULT_CONVERSION_SCHEMA.boolean_pairs.len(), 4);
        let rendered = format!("{:?}", *DEFAULT_CONVERSION_SCHEMA);
        assert!(rendered.contains("boolean_pairs"));
    }
}
