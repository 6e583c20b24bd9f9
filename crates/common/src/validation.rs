//! Validation utilities shared by request types.

use url::Url;

/// Longest URL accepted for stored links
pub const MAX_URL_LENGTH: usize = 2048;

/// Validate an absolute http(s) URL.
///
/// # Examples
///
/// ```
/// use travel_health_common::validation::validate_http_url;
///
/// assert!(validate_http_url("https://i.imgur.com/abc.jpg").is_ok());
/// assert!(validate_http_url("ftp://example.com/a.jpg").is_err());
/// assert!(validate_http_url("not a url").is_err());
/// ```
pub fn validate_http_url(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if value.len() > MAX_URL_LENGTH {
        return Err(format!(
            "URL cannot be longer than {} characters",
            MAX_URL_LENGTH
        ));
    }

    let parsed = Url::parse(value).map_err(|e| format!("Invalid URL: {}", e))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        "http" | "https" => Err("URL must include a host".to_string()),
        other => Err(format!(
            "URL scheme '{}' is not allowed (must be http or https)",
            other
        )),
    }
}

/// Returns true when the trimmed value is non-empty.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
