//! Common validation utilities.

use validator::ValidationError;

/// Validates a `#rrggbb` hex color string.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be a #rrggbb hex value".into());
        Err(err)
    }
}

/// Validates that a string is a well-formed http(s) URL.
///
/// Deliberately shallow: scheme plus a non-empty host part. Reachability is
/// the delivery path's problem, not the registration path's.
pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    let valid = matches!(rest, Some(r) if !r.is_empty() && !r.starts_with('/'));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("http_url");
        err.message = Some("Must be a valid http(s) URL".into());
        Err(err)
    }
}

/// Normalizes a display name into a stable lowercase slug.
///
/// Used for category and tag `name` columns so lookups by name are
/// case- and whitespace-insensitive.
pub fn slugify(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hex_colors() {
        assert!(validate_hex_color("#10b981").is_ok());
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("#000000").is_ok());
    }

    #[test]
    fn test_invalid_hex_colors() {
        assert!(validate_hex_color("10b981").is_err()); // missing #
        assert!(validate_hex_color("#10b98").is_err()); // too short
        assert!(validate_hex_color("#10b9811").is_err()); // too long
        assert!(validate_hex_color("#10b98g").is_err()); // non-hex digit
        assert!(validate_hex_color("").is_err());
    }

    #[test]
    fn test_valid_http_urls() {
        assert!(validate_http_url("https://example.com/hook").is_ok());
        assert!(validate_http_url("http://localhost:3000").is_ok());
    }

    #[test]
    fn test_invalid_http_urls() {
        assert!(validate_http_url("ftp://example.com").is_err());
        assert!(validate_http_url("example.com").is_err());
        assert!(validate_http_url("https://").is_err());
        assert!(validate_http_url("https:///path-only").is_err());
        assert!(validate_http_url("").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Workplace Safety"), "workplace-safety");
        assert_eq!(slugify("  Process   Improvement  "), "process-improvement");
        assert_eq!(slugify("benefits"), "benefits");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }
}
