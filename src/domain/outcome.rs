//! Operation outcomes
//!
//! Every remote operation reports either success with its decoded data, or
//! a failure carrying a diagnostic and (when a request was actually sent)
//! the response. "No request sent" and "request rejected" are therefore
//! distinguishable by `Failure::response`.

use serde::de::DeserializeOwned;
use std::fmt;

use super::replacement::ReplaceState;

/// Status code and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Best-effort human readable error message from the body
    ///
    /// JSON with a `message` field yields that field, other JSON is
    /// pretty-printed, anything else is returned raw.
    pub fn error_message(&self) -> String {
        if self.body.trim().is_empty() {
            return "<empty response body>".to_string();
        }
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(value) => match value.get("message").and_then(|m| m.as_str()) {
                Some(message) => message.to_string(),
                None => serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.body.clone()),
            },
            Err(_) => self.body.clone(),
        }
    }
}

/// Result of a single remote operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Succeeded { data: T, response: ApiResponse },
    Failed(Failure),
}

impl<T> Outcome<T> {
    pub fn succeeded(data: T, response: ApiResponse) -> Self {
        Self::Succeeded { data, response }
    }

    /// Blocked locally before any request was sent
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Failed(Failure {
            diagnostic: Diagnostic::Precondition(message.into()),
            response: None,
        })
    }

    /// Sent, but the server answered with an unexpected status
    pub fn rejected(response: ApiResponse) -> Self {
        Self::Failed(Failure {
            diagnostic: Diagnostic::Rejected {
                status: response.status,
                message: response.error_message(),
            },
            response: Some(response),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Succeeded { data, .. } => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Succeeded { data, .. } => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Succeeded { response, .. } => Some(response),
            Self::Failed(failure) => failure.response.as_ref(),
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// Why an operation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub diagnostic: Diagnostic,
    pub response: Option<ApiResponse>,
}

impl Failure {
    /// Fault absorbed by a best-effort batch
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::Fault(message.into()),
            response: None,
        }
    }

    pub fn needs_manual_recovery(&self) -> bool {
        matches!(self.diagnostic, Diagnostic::ManualRecovery(_))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Detected before any network call
    Precondition(String),
    /// Well-formed request answered with a non-success status
    Rejected { status: u16, message: String },
    /// Transport or I/O fault absorbed by a best-effort batch
    Fault(String),
    /// Remote state left inconsistent; operator must intervene
    ManualRecovery(RecoveryNotice),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition(message) => write!(f, "{}", message),
            Self::Rejected { status, message } => {
                write!(f, "HTTP status {}: {}", status, message)
            }
            Self::Fault(message) => write!(f, "aborted: {}", message),
            Self::ManualRecovery(notice) => fmt::Display::fmt(notice, f),
        }
    }
}

/// Remote objects left behind by an interrupted asset replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryNotice {
    /// Terminal state the replacement stopped in
    pub state: ReplaceState,
    pub target_name: String,
    pub temp_asset_id: u64,
    pub temp_name: String,
    pub old_asset_id: u64,
    /// Why the step failed (status and decoded message)
    pub cause: String,
}

impl RecoveryNotice {
    /// Manual step that restores a consistent release
    pub fn action(&self) -> String {
        match self.state {
            ReplaceState::DeleteFailed => format!(
                "delete asset {} ('{}') and rename asset {} ('{}') to '{}', \
                 or delete the uploaded asset {} to keep the old one",
                self.old_asset_id,
                self.target_name,
                self.temp_asset_id,
                self.temp_name,
                self.target_name,
                self.temp_asset_id,
            ),
            _ => format!(
                "rename asset {} ('{}') to '{}'",
                self.temp_asset_id, self.temp_name, self.target_name
            ),
        }
    }
}

impl fmt::Display for RecoveryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let situation = match self.state {
            ReplaceState::DeleteFailed => format!(
                "old asset {} ('{}') could not be deleted; uploaded asset {} ('{}') is orphaned",
                self.old_asset_id, self.target_name, self.temp_asset_id, self.temp_name
            ),
            _ => format!(
                "old asset {} was deleted but asset {} ('{}') could not be renamed; \
                 no asset is named '{}'",
                self.old_asset_id, self.temp_asset_id, self.temp_name, self.target_name
            ),
        };
        write!(
            f,
            "manual recovery required: {} ({}). To fix: {}",
            situation,
            self.cause,
            self.action()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_message() {
        let response = ApiResponse::new(422, r#"{"message":"Validation Failed"}"#);
        assert_eq!(response.error_message(), "Validation Failed");
    }

    #[test]
    fn test_error_message_json_without_message() {
        let response = ApiResponse::new(500, r#"{"error":"boom"}"#);
        let message = response.error_message();
        assert!(message.contains("\"error\""));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_error_message_raw_body() {
        let response = ApiResponse::new(502, "Bad Gateway");
        assert_eq!(response.error_message(), "Bad Gateway");
        assert_eq!(ApiResponse::new(404, "").error_message(), "<empty response body>");
    }

    #[test]
    fn test_precondition_has_no_response() {
        let outcome: Outcome<()> = Outcome::precondition("File does not exist: x");
        assert!(!outcome.is_success());
        assert!(outcome.response().is_none());
        assert!(matches!(
            outcome.failure().map(|f| &f.diagnostic),
            Some(Diagnostic::Precondition(_))
        ));
    }

    #[test]
    fn test_rejected_keeps_response() {
        let outcome: Outcome<()> =
            Outcome::rejected(ApiResponse::new(404, r#"{"message":"Not Found"}"#));
        assert_eq!(outcome.response().map(|r| r.status), Some(404));
        assert_eq!(
            outcome.failure().map(|f| f.to_string()),
            Some("HTTP status 404: Not Found".to_string())
        );
    }

    #[test]
    fn test_recovery_notice_names_orphan() {
        let notice = RecoveryNotice {
            state: ReplaceState::DeleteFailed,
            target_name: "tool.bin".to_string(),
            temp_asset_id: 9,
            temp_name: "abc-tool.bin".to_string(),
            old_asset_id: 5,
            cause: "HTTP status 500".to_string(),
        };
        let text = notice.to_string();
        assert!(text.contains("manual recovery required"));
        assert!(text.contains("asset 9 ('abc-tool.bin')"));
        assert!(notice.action().contains("delete asset 5"));

        let renamed = RecoveryNotice {
            state: ReplaceState::RenameFailed,
            ..notice
        };
        assert_eq!(
            renamed.action(),
            "rename asset 9 ('abc-tool.bin') to 'tool.bin'"
        );
    }
}
