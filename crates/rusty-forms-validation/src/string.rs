//! String validation functions
//!
//! Lengths are counted in `char`s, not bytes, so "héllo" has length 5.

/// Natural character count of a string
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// At least `min` characters
pub fn has_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

/// At most `max` characters
pub fn has_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// URL validation (basic)
///
/// Accepts absolute http(s) URLs with a dotted host or `localhost`.
pub fn is_valid_url(url: &str) -> bool {
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    if rest.chars().any(char::is_whitespace) {
        return false;
    }

    let host = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let host = host.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    if host.is_empty() || host.starts_with('.') || host.ends_with('.') || host.contains("..") {
        return false;
    }

    host == "localhost" || host.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len("日本語"), 3);
        assert!(has_min_length("日本語", 3));
        assert!(!has_min_length("日本", 3));
        assert!(has_max_length("日本語", 3));
        assert!(!has_max_length("日本語!", 3));
    }

    #[test]
    fn test_length_validators() {
        assert!(has_min_length("hello", 3));
        assert!(!has_min_length("hi", 3));
        assert!(has_min_length("", 0));

        assert!(has_max_length("hello", 10));
        assert!(!has_max_length("verylongstring", 5));
    }

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("http://test.co.uk"));
        assert!(is_valid_url("https://example.com/path?q=1#top"));
        assert!(is_valid_url("http://localhost:3000/x"));

        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("http://nodomain"));
        assert!(!is_valid_url("http://exa mple.com"));
    }
}
