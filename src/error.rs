use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Upload resume")]
    MissingFile,

    #[error("No interview question to answer")]
    NoQuestion,

    #[error("Analysis in progress")]
    AnalysisPending,

    #[error("Could not read file: {0}")]
    FileRead(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<ClientError> for String {
    fn from(err: ClientError) -> Self {
        err.to_string()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Understands `{"error": "..."}`, `{"detail": "..."}` and the validation form
/// `{"detail": [{"msg": "..."}]}`. Falls back to the trimmed body text, and to
/// `None` when the body is empty.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        if let Some(Value::String(msg)) = map.get("error") {
            return Some(msg.clone());
        }
        match map.get("detail") {
            Some(Value::String(msg)) => return Some(msg.clone()),
            Some(Value::Array(items)) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !msgs.is_empty() {
                    return Some(msgs.join("; "));
                }
            }
            _ => {}
        }
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_preferred() {
        let body = r#"{"error": "Could not extract text from PDF"}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("Could not extract text from PDF")
        );
    }

    #[test]
    fn test_detail_string() {
        let body = r#"{"detail": "Not Found"}"#;
        assert_eq!(error_message_from_body(body).as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_detail_validation_list_joins_messages() {
        let body = r#"{"detail": [
            {"loc": ["body", "role"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "file"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("field required; field required")
        );
    }

    #[test]
    fn test_plain_text_body_is_returned_trimmed() {
        assert_eq!(
            error_message_from_body("  Internal Server Error\n").as_deref(),
            Some("Internal Server Error")
        );
    }

    #[test]
    fn test_empty_body_has_no_message() {
        assert_eq!(error_message_from_body("   "), None);
    }

    #[test]
    fn test_display_of_missing_file_matches_alert_text() {
        assert_eq!(ClientError::MissingFile.to_string(), "Upload resume");
        let as_string: String = ClientError::Server {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(as_string, "Server error (500): boom");
    }
}
