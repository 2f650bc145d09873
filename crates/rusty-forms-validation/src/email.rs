//! Email validation

/// Validates basic email format
///
/// Checks for:
/// - Exactly one '@' symbol with content on both sides
/// - A dotted domain that does not start or end with '.' or '-'
/// - A top level domain of at least two characters
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return false;
    }

    let valid_local_char = |c: char| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '+');
    if !local.chars().all(valid_local_char) || local.starts_with('.') || local.ends_with('.') {
        return false;
    }

    let valid_domain_char = |c: char| c.is_alphanumeric() || c == '.' || c == '-';
    if !domain.chars().all(valid_domain_char) {
        return false;
    }

    domain
        .rsplit('.')
        .next()
        .map(|tld| tld.chars().count() >= 2)
        .unwrap_or(false)
}
