//! # Scalar Types
//!
//! Classification of scalar `dataType` identifiers. Identifiers arrive either
//! as bare names (`string`, `date-only`) or as vocabulary URIs whose trailing
//! segment carries the name (`http://www.w3.org/2001/XMLSchema#dateTime`).

/// Primitive classification used for zero values and default coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// Any textual type.
    String,
    /// Whole numbers.
    Integer,
    /// Floating point numbers.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Calendar date (`2024-01-31`).
    Date,
    /// Time of day (`12:30:00`).
    Time,
    /// Date and time without offset.
    DateTimeOnly,
    /// Date and time with offset.
    DateTime,
    /// The null type.
    Nil,
    /// Unconstrained.
    Any,
}

impl ScalarType {
    /// Classifies a `dataType` identifier. Unknown names are treated as text.
    pub fn from_data_type(data_type: &str) -> Self {
        let segment = type_segment(data_type).to_ascii_lowercase();
        match segment.as_str() {
            "integer" | "int" | "long" | "short" | "byte" | "int32" | "int64" => {
                ScalarType::Integer
            }
            "number" | "float" | "double" | "decimal" => ScalarType::Number,
            "boolean" | "bool" => ScalarType::Boolean,
            "date" | "date-only" | "dateonly" => ScalarType::Date,
            "time" | "time-only" | "timeonly" => ScalarType::Time,
            "datetime-only" | "datetimeonly" => ScalarType::DateTimeOnly,
            "datetime" | "date-time" => ScalarType::DateTime,
            "nil" | "null" => ScalarType::Nil,
            "any" | "anytype" | "" => ScalarType::Any,
            _ => ScalarType::String,
        }
    }

    /// Whether the type is rendered as a JSON number.
    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Number)
    }
}

/// Trailing segment of a type identifier (after the last `#`, `/` or `:`).
pub fn type_segment(data_type: &str) -> &str {
    data_type
        .rsplit(['#', '/', ':'])
        .next()
        .unwrap_or(data_type)
}

/// Title-cased trailing segment: `...XMLSchema#dateTime` becomes `DateTime`.
pub fn type_display_name(data_type: &str) -> Option<String> {
    let segment = type_segment(data_type);
    let mut chars = segment.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
