use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("Network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}", http_status_message(.status, .reason, .detail))]
    HttpStatus {
        status: u16,
        reason: String,
        detail: Option<String>,
    },

    #[error("Failed to parse response from {url}: {source} - Body: {snippet}")]
    Decode {
        url: String,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

fn http_status_message(status: &u16, reason: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("HTTP {} {}: {}", status, reason, detail),
        None => format!("HTTP {} {}", status, reason),
    }
}

impl ApiError {
    pub(crate) fn status(status: StatusCode, detail: Option<String>) -> Self {
        ApiError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            detail,
        }
    }

    pub(crate) fn decode(url: &str, body: &str, source: serde_json::Error) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            snippet: body.chars().take(200).collect(),
            source,
        }
    }

    /// Numeric status for `HttpStatus` failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied explanation, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::HttpStatus { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Pull a human readable explanation out of an error body.
///
/// JSON bodies yield their `error` field, falling back to `message`. Any other
/// non-blank body is used as is.
pub(crate) fn extract_server_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        for key in ["error", "message"] {
            match json.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                Some(Value::Null) | None => continue,
                Some(Value::String(_)) => continue,
                Some(other) => return Some(other.to_string()),
            }
        }
        match json {
            // JSON object without either field
            Value::Object(_) => return None,
            Value::String(s) => return Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            _ => {}
        }
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_field() {
        let detail = extract_server_detail(r#"{"error":"Product not found"}"#);
        assert_eq!(detail.as_deref(), Some("Product not found"));
    }

    #[test]
    fn test_extract_message_field_when_error_missing() {
        let detail = extract_server_detail(r#"{"message":"Quantity must be positive"}"#);
        assert_eq!(detail.as_deref(), Some("Quantity must be positive"));
    }

    #[test]
    fn test_error_takes_precedence_over_message() {
        let detail = extract_server_detail(r#"{"message":"generic","error":"specific"}"#);
        assert_eq!(detail.as_deref(), Some("specific"));
    }

    #[test]
    fn test_plain_text_body() {
        let detail = extract_server_detail("  Stock cannot go negative \n");
        assert_eq!(detail.as_deref(), Some("Stock cannot go negative"));
    }

    #[test]
    fn test_json_string_body_loses_quotes() {
        let detail = extract_server_detail(r#""Stock too low""#);
        assert_eq!(detail.as_deref(), Some("Stock too low"));
        assert!(extract_server_detail(r#""  ""#).is_none());
    }

    #[test]
    fn test_empty_and_fieldless_bodies() {
        assert!(extract_server_detail("").is_none());
        assert!(extract_server_detail("   ").is_none());
        assert!(extract_server_detail(r#"{"status":500,"path":"/api/sales"}"#).is_none());
    }

    #[test]
    fn test_status_message_format() {
        let err = ApiError::status(StatusCode::NOT_FOUND, Some("Product not found".to_string()));
        assert_eq!(err.to_string(), "HTTP 404 Not Found: Product not found");
        assert!(err.is_not_found());

        let bare = ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(bare.to_string(), "HTTP 500 Internal Server Error");
        assert_eq!(bare.detail(), None);
    }
}
