//! Error bodies returned by the backend.
//!
//! The backend answers rejected requests either with a JSON object carrying a
//! `message` or `error` field, or with a plain text body. The UI shows that
//! text verbatim.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract a human readable reason from a non-2xx response body.
///
/// Order: JSON `message`, JSON `error`, raw trimmed text. Returns `None` for
/// an empty body or a JSON object without either field.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
            return parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .or(parsed.error.filter(|e| !e.trim().is_empty()));
        }
    }

    Some(trimmed.to_string())
}

/// `true` for the statuses the backend uses to reject an expired or foreign session.
pub fn is_session_rejection(status: u16) -> bool {
    status == 401 || status == 403
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_wins() {
        let body = r#"{"message":"El lote tiene stock","error":"Bad Request"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("El lote tiene stock"));
    }

    #[test]
    fn test_error_field_fallback() {
        let body = r#"{"status":400,"error":"Bad Request"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Bad Request"));
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(
            extract_error_message("  Cliente no encontrado \n").as_deref(),
            Some("Cliente no encontrado")
        );
    }

    #[test]
    fn test_empty_and_fieldless_bodies() {
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("   "), None);
        assert_eq!(extract_error_message(r#"{"status":500}"#), None);
    }

    #[test]
    fn test_session_rejection_statuses() {
        assert!(is_session_rejection(401));
        assert!(is_session_rejection(403));
        assert!(!is_session_rejection(404));
        assert!(!is_session_rejection(500));
    }
}
