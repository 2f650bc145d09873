// File: src/messages.rs
// Purpose: User-facing validation messages, shared by server and client

use crate::schema::{EnumOption, FieldKind};
use chrono::NaiveDate;

use crate::value::DATE_FORMAT;

/// Shown when a second submission of the same form arrives mid-flight
pub const ALREADY_SUBMITTING: &str = "This form is already being submitted";

/// Shown when the mutation panics
pub const UNEXPECTED_FAILURE: &str = "Something went wrong, please try again";

pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_URL: &str = "Invalid url";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const INVALID_DATE: &str = "Invalid date";
pub const NOT_AN_INTEGER: &str = "Expected integer, received float";
pub const NOT_A_NUMBER: &str = "Expected number, received nan";

/// Shown when the request environment lacks a value its schema requires
pub fn missing_environment(key: &str) -> String {
    format!("Missing {} in request environment", key)
}

/// Message for a required field submitted empty
pub fn presence(kind: FieldKind) -> String {
    match kind {
        FieldKind::String => min_length(1),
        FieldKind::Number => "Expected number, received null".to_string(),
        FieldKind::Date => "Expected date, received null".to_string(),
        FieldKind::Enum | FieldKind::Boolean => "Required".to_string(),
    }
}

pub fn min_length(n: usize) -> String {
    format!("String must contain at least {} character(s)", n)
}

pub fn max_length(n: usize) -> String {
    format!("String must contain at most {} character(s)", n)
}

pub fn min(n: f64) -> String {
    format!("Number must be greater than or equal to {}", n)
}

pub fn max(n: f64) -> String {
    format!("Number must be less than or equal to {}", n)
}

pub fn gt(n: f64) -> String {
    format!("Number must be greater than {}", n)
}

pub fn lt(n: f64) -> String {
    format!("Number must be less than {}", n)
}

pub fn min_date(d: NaiveDate) -> String {
    format!("Date must be greater than or equal to {}", d.format(DATE_FORMAT))
}

pub fn max_date(d: NaiveDate) -> String {
    format!("Date must be smaller than or equal to {}", d.format(DATE_FORMAT))
}

pub fn invalid_enum(options: &[EnumOption], received: &str) -> String {
    let expected = options
        .iter()
        .map(|o| format!("'{}'", o.value))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "Invalid enum value. Expected {}, received '{}'",
        expected, received
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_without_fraction() {
        assert_eq!(gt(5.0), "Number must be greater than 5");
        assert_eq!(min(10.0), "Number must be greater than or equal to 10");
        assert_eq!(lt(2.5), "Number must be less than 2.5");
    }

    #[test]
    fn test_invalid_enum_lists_values() {
        let options = vec![
            EnumOption::new("Friend", "fromAFriend"),
            EnumOption::new("Search", "google"),
        ];
        assert_eq!(
            invalid_enum(&options, "tv"),
            "Invalid enum value. Expected 'fromAFriend' | 'google', received 'tv'"
        );
    }
}
