//! Target URL validation performed before a scan is requested.

use crate::error::ValidationError;
use url::Url;

/// Parse and normalize a scan target.
///
/// Accepts absolute `http`/`https` URLs with a host. Input without a scheme
/// (`example.com/docs`) is treated as `https://`.
pub fn validate_url(input: &str) -> Result<Url, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let url = Url::parse(&candidate).map_err(|e| ValidationError::Malformed {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }
    match url.host_str() {
        Some(h) if !h.is_empty() => Ok(url),
        _ => Err(ValidationError::MissingHost(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            validate_url("https://example.com/a").unwrap().as_str(),
            "https://example.com/a"
        );
        assert_eq!(validate_url(" http://example.com ").unwrap().scheme(), "http");
    }

    #[test]
    fn test_bare_host_gets_https() {
        let u = validate_url("example.com/docs").unwrap();
        assert_eq!(u.as_str(), "https://example.com/docs");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(validate_url("   "), Err(ValidationError::Empty));
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(ValidationError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            validate_url("https://exa mple.com"),
            Err(ValidationError::Malformed { .. })
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }
}
