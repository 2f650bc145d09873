// File: src/coerce.rs
// Purpose: Raw string -> typed value coercion, per field kind

use crate::messages;
use crate::schema::{FieldDescriptor, FieldKind};
use crate::value::{Value, DATE_FORMAT};
use chrono::NaiveDate;

/// Coerce one raw value to the field's kind
///
/// Returns the coercion message on failure. Presence is the caller's
/// concern; an empty string here is coerced like any other input.
pub fn coerce(field: &FieldDescriptor, raw: &str) -> Result<Value, String> {
    match field.kind {
        FieldKind::String => Ok(Value::Text(raw.to_string())),
        FieldKind::Number => parse_number(raw)
            .map(Value::Number)
            .ok_or_else(|| messages::NOT_A_NUMBER.to_string()),
        FieldKind::Boolean => Ok(Value::Bool(parse_checkbox(raw))),
        FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|_| messages::INVALID_DATE.to_string()),
        FieldKind::Enum => {
            let options = field.options_slice();
            if options.iter().any(|o| o.value == raw) {
                Ok(Value::Text(raw.to_string()))
            } else {
                Err(messages::invalid_enum(options, raw))
            }
        }
    }
}

/// Finite number after trimming surrounding whitespace
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Checkbox semantics: `false`, `off`, `0` and empty are false
pub fn parse_checkbox(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "off" | "0"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("on", true)]
    #[case("true", true)]
    #[case("yes", true)]
    #[case("1", true)]
    #[case("", false)]
    #[case("false", false)]
    #[case("OFF", false)]
    #[case("0", false)]
    fn test_parse_checkbox(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_checkbox(raw), expected);
    }

    #[rstest]
    #[case("42", Some(42.0))]
    #[case(" 2.5 ", Some(2.5))]
    #[case("-1e3", Some(-1000.0))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn test_parse_number(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(raw), expected);
    }

    #[test]
    fn test_coerce_date() {
        let field = FieldDescriptor::date("birthday");
        assert_eq!(
            coerce(&field, "2024-02-29"),
            Ok(Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
        assert_eq!(coerce(&field, "2023-02-29"), Err("Invalid date".to_string()));
        assert_eq!(coerce(&field, "29/02/2024"), Err("Invalid date".to_string()));
    }

    #[test]
    fn test_coerce_enum() {
        let field = FieldDescriptor::enumeration("plan", ["free", "pro"]);
        assert_eq!(coerce(&field, "pro"), Ok(Value::Text("pro".to_string())));
        assert_eq!(
            coerce(&field, "gold"),
            Err("Invalid enum value. Expected 'free' | 'pro', received 'gold'".to_string())
        );
    }

    #[test]
    fn test_coerce_string_is_untrimmed() {
        let field = FieldDescriptor::string("name");
        assert_eq!(coerce(&field, " a "), Ok(Value::Text(" a ".to_string())));
    }
}
