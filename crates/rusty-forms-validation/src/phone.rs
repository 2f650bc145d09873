//! Phone number validation

/// Validates a loosely formatted phone number
///
/// Allows an optional leading '+', digits, spaces, dashes, dots and
/// parentheses, and requires between 7 and 15 digits in total.
pub fn is_valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);

    if body.is_empty() {
        return false;
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')');
    if !body.chars().all(allowed) {
        return false;
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("555.123.4567"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("1234567890123456"));
    }
}
