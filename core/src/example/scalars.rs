//! # Scalar Values
//!
//! Leaf values for scalar shapes: authored defaults, enumerations, author
//! examples and finally a type-appropriate zero value.

use crate::shape::{ScalarShape, ScalarType, Shape};
use chrono::{DateTime, Utc};
use serde_json::{Number, Value as JsonValue};

use super::SynthesisOptions;

/// `Sun, 06 Nov 1994 08:49:37 GMT`
const RFC2616_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Picks the value a scalar contributes to a synthesized payload.
///
/// Order: `defaultValueStr` (coerced to the scalar's type), first enumerated
/// value, first usable author example (when examples are rendered), zero value.
pub fn scalar_value(shape: &Shape, scalar: &ScalarShape, options: &SynthesisOptions) -> JsonValue {
    let scalar_type = scalar.scalar_type();

    if let Some(default) = &scalar.default_value_str {
        return coerce(default, scalar_type);
    }
    if let Some(first) = scalar.values.first() {
        return first.clone();
    }
    if options.render_examples {
        if let Some(example) = shape.usable_examples().next() {
            match (&example.structured_value, &example.value) {
                (Some(structured), _) if !structured.is_null() => return structured.clone(),
                (_, Some(text)) => return coerce(text, scalar_type),
                _ => {}
            }
        }
    }
    zero_value(scalar, options.reference_time.unwrap_or_else(Utc::now))
}

/// Whether a scalar carries something authored (default or enumeration).
pub fn has_authored_value(scalar: &ScalarShape) -> bool {
    scalar.default_value_str.is_some() || !scalar.values.is_empty()
}

/// Converts authored text to the JSON type the scalar declares. Text that
/// does not parse is kept as a string.
pub fn coerce(text: &str, scalar_type: ScalarType) -> JsonValue {
    let trimmed = text.trim();
    match scalar_type {
        ScalarType::Integer | ScalarType::Number => {
            parse_number(trimmed).unwrap_or_else(|| JsonValue::String(text.to_string()))
        }
        ScalarType::Boolean => match trimmed {
            "true" => JsonValue::Bool(true),
            "false" => JsonValue::Bool(false),
            _ => JsonValue::String(text.to_string()),
        },
        ScalarType::Nil if trimmed == "null" => JsonValue::Null,
        _ => JsonValue::String(text.to_string()),
    }
}

fn parse_number(text: &str) -> Option<JsonValue> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(JsonValue::Number(int.into()));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
}

/// Zero value of the scalar's type. Date and time types are rendered from
/// `now`.
pub fn zero_value(scalar: &ScalarShape, now: DateTime<Utc>) -> JsonValue {
    match scalar.scalar_type() {
        ScalarType::String | ScalarType::Any => JsonValue::String(String::new()),
        ScalarType::Integer | ScalarType::Number => JsonValue::Number(0.into()),
        ScalarType::Boolean => JsonValue::Bool(false),
        ScalarType::Nil => JsonValue::Null,
        ScalarType::Date => JsonValue::String(now.format("%Y-%m-%d").to_string()),
        ScalarType::Time => JsonValue::String(now.format("%H:%M:%S").to_string()),
        ScalarType::DateTimeOnly => JsonValue::String(now.format("%Y-%m-%dT%H:%M:%S").to_string()),
        ScalarType::DateTime => {
            let rfc2616 = scalar
                .format
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case("rfc2616"));
            let text = if rfc2616 {
                now.format(RFC2616_FORMAT).to_string()
            } else {
                now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            };
            JsonValue::String(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Example, ShapeKind};
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap()
    }

    fn options() -> SynthesisOptions {
        SynthesisOptions {
            reference_time: Some(fixed_now()),
            ..SynthesisOptions::default()
        }
    }

    fn value_of(scalar: ScalarShape) -> JsonValue {
        let shape = Shape::new("s", ShapeKind::Scalar(scalar.clone()));
        scalar_value(&shape, &scalar, &options())
    }

    #[test]
    fn test_enum_first_value_without_default() {
        let scalar = ScalarShape {
            values: vec![json!("lookup"), json!("ml"), json!("fasttext")],
            ..ScalarShape::of("string")
        };
        assert_eq!(value_of(scalar), json!("lookup"));
    }

    #[test]
    fn test_default_wins_over_enum_and_is_coerced() {
        let scalar = ScalarShape {
            default_value_str: Some("25".into()),
            values: vec![json!(10), json!(25)],
            ..ScalarShape::of("integer")
        };
        assert_eq!(value_of(scalar), json!(25));

        let flag = ScalarShape {
            default_value_str: Some("true".into()),
            ..ScalarShape::of("boolean")
        };
        assert_eq!(value_of(flag), json!(true));

        let odd = ScalarShape {
            default_value_str: Some("many".into()),
            ..ScalarShape::of("number")
        };
        assert_eq!(value_of(odd), json!("many"));
    }

    #[test]
    fn test_author_example_before_zero_value() {
        let scalar = ScalarShape::of("string");
        let mut shape = Shape::new("s", ShapeKind::Scalar(scalar.clone()));
        shape.meta.examples.push(Example {
            value: Some("fido".into()),
            ..Example::default()
        });
        assert_eq!(scalar_value(&shape, &scalar, &options()), json!("fido"));

        let without_examples = SynthesisOptions {
            render_examples: false,
            ..options()
        };
        assert_eq!(scalar_value(&shape, &scalar, &without_examples), json!(""));
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(value_of(ScalarShape::of("string")), json!(""));
        assert_eq!(value_of(ScalarShape::of("integer")), json!(0));
        assert_eq!(value_of(ScalarShape::of("double")), json!(0));
        assert_eq!(value_of(ScalarShape::of("boolean")), json!(false));
        assert_eq!(value_of(ScalarShape::of("nil")), JsonValue::Null);
    }

    #[test]
    fn test_date_time_placeholders() {
        assert_eq!(value_of(ScalarShape::of("date-only")), json!("1994-11-06"));
        assert_eq!(value_of(ScalarShape::of("time-only")), json!("08:49:37"));
        assert_eq!(
            value_of(ScalarShape::of("datetime-only")),
            json!("1994-11-06T08:49:37")
        );
        assert_eq!(
            value_of(ScalarShape::of("datetime")),
            json!("1994-11-06T08:49:37Z")
        );
        let http_date = ScalarShape {
            format: Some("rfc2616".into()),
            ..ScalarShape::of("datetime")
        };
        assert_eq!(value_of(http_date), json!("Sun, 06 Nov 1994 08:49:37 GMT"));
    }
}
