//! Classification of storage-service replies.
//!
//! Every reply is reduced to exactly one of three outcomes without discarding
//! the payload. The distinction between [`Outcome::NotFound`] and
//! [`Outcome::Error`] matters: a GET for an absent key is a successful
//! operation whose answer is "no such key", not a failure.

use reqwest::StatusCode;
use serde_json::Value;

/// Interpretation of a single storage-service reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success status; payload carried through untouched.
    Success(Value),
    /// Success status, but the payload explicitly marks the key as absent
    /// (`found: false`). GET-specific semantics.
    NotFound(Value),
    /// Non-success status. The message is the payload's `error` field when
    /// present, otherwise the caller-supplied per-operation fallback.
    Error(String),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Classify a parsed response body against its HTTP status.
///
/// Pure: no side effects, no payload loss. `fallback` is the operation's
/// generic error text, used when a failing reply carries no `error` field.
pub fn classify(status: StatusCode, body: Value, fallback: &str) -> Outcome {
    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map_or_else(|| fallback.to_string(), str::to_string);
        return Outcome::Error(message);
    }
    if body.get("found").and_then(Value::as_bool) == Some(false) {
        return Outcome::NotFound(body);
    }
    Outcome::Success(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_passes_payload_through() {
        let body = json!({"status": "ok", "key": "a", "value": "1"});
        let outcome = classify(StatusCode::OK, body.clone(), "PUT failed");
        assert_eq!(outcome, Outcome::Success(body));
    }

    #[test]
    fn test_found_false_is_not_found_not_error() {
        let body = json!({"found": false, "key": "missing"});
        let outcome = classify(StatusCode::OK, body.clone(), "GET failed");
        assert_eq!(outcome, Outcome::NotFound(body));
    }

    #[test]
    fn test_found_true_is_success() {
        let body = json!({"found": true, "key": "a", "value": "1"});
        assert!(matches!(
            classify(StatusCode::OK, body, "GET failed"),
            Outcome::Success(_)
        ));
    }

    #[test]
    fn test_failure_uses_embedded_error_text() {
        let body = json!({"error": "key and value are required"});
        let outcome = classify(StatusCode::BAD_REQUEST, body, "PUT failed");
        assert_eq!(
            outcome,
            Outcome::Error("key and value are required".to_string())
        );
    }

    #[test]
    fn test_failure_without_error_field_uses_fallback() {
        let outcome = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::Value::Null,
            "Stats request failed",
        );
        assert_eq!(outcome, Outcome::Error("Stats request failed".to_string()));
    }

    #[test]
    fn test_found_false_on_failure_status_is_still_error() {
        // A failing status wins over any body marker.
        let body = json!({"found": false});
        assert!(classify(StatusCode::BAD_GATEWAY, body, "GET failed").is_error());
    }
}
