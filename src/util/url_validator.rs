use thiserror::Error;
use url::Url;

/// Errors that can occur during feed URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL string for use as a feed endpoint.
///
/// Feed URLs come from operator configuration, so only the shape is checked:
/// the URL must parse, use `http` or `https`, and name a host. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// - [`UrlValidationError::InvalidUrl`] if the string cannot be parsed
/// - [`UrlValidationError::UnsupportedScheme`] for `file://`, `ftp://`, etc.
/// - [`UrlValidationError::MissingHost`] if the URL has no host
///
/// # Examples
///
/// ```
/// use newsbot::util::validate_feed_url;
///
/// assert!(validate_feed_url("https://example.com/rss").is_ok());
/// assert!(validate_feed_url("file:///etc/passwd").is_err());
/// assert!(validate_feed_url("not a url").is_err());
/// ```
pub fn validate_feed_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_feed_url("https://example.com/feed.xml").is_ok());
        assert!(validate_feed_url("http://news.example.org").is_ok());
        assert!(validate_feed_url("http://127.0.0.1:8080/rss").is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let url = validate_feed_url("  https://example.com/feed.xml\n").unwrap();
        assert_eq!(url.as_str(), "https://example.com/feed.xml");
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(matches!(
            validate_feed_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_feed_url("ftp://example.com/feed"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_unparsable_rejected() {
        assert!(matches!(
            validate_feed_url("example.com/feed"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
        assert!(validate_feed_url("").is_err());
    }
}
