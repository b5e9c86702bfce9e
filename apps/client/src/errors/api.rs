//! Typed outcomes of an authorized request that did not succeed.
//!
//! Every failure that can happen between "caller wants a resource" and
//! "caller has parsed data" resolves to exactly one of these variants.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::http::envelope::parse_error_body;

/// Why a request was refused as unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    /// No token was stored; the request was never sent.
    NoSession,
    /// The server answered 401 and the session was invalidated.
    Rejected,
}

impl Display for UnauthorizedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UnauthorizedReason::NoSession => write!(f, "no session"),
            UnauthorizedReason::Rejected => write!(f, "session rejected"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Session-ending: callers navigate to the login or not-authorized surface.
    #[error("Unauthorized: {0}")]
    Unauthorized(UnauthorizedReason),
    /// Operation-specific failure; the raw response body is kept verbatim.
    #[error("HTTP error {status}")]
    Http { status: u16, body: String },
    /// Transport failure or a success response that could not be parsed.
    #[error("Network error: {detail}")]
    Network { detail: String },
}

impl ApiError {
    pub fn unauthorized(reason: UnauthorizedReason) -> Self {
        Self::Unauthorized(reason)
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(UnauthorizedReason::Rejected) => Some(401),
            ApiError::Unauthorized(UnauthorizedReason::NoSession) => None,
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network { .. } => None,
        }
    }

    /// Human-readable message for inline display.
    ///
    /// HTTP failures prefer the server's error envelope message, then the raw
    /// body, then a generic status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(UnauthorizedReason::NoSession) => {
                "Missing authentication token".to_string()
            }
            ApiError::Unauthorized(UnauthorizedReason::Rejected) => {
                "Your session has expired. Please login again.".to_string()
            }
            ApiError::Http { status, body } => {
                if let Some(parsed) = parse_error_body(body) {
                    if !parsed.message.trim().is_empty() {
                        return parsed.message;
                    }
                }
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP error! status: {status}")
                } else {
                    trimmed.to_string()
                }
            }
            ApiError::Network { detail } => detail.clone(),
        }
    }

    /// Field-level validation errors carried by a server error envelope.
    ///
    /// Empty for anything other than an HTTP failure whose body has
    /// `error.details`.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            ApiError::Http { body, .. } => parse_error_body(body)
                .and_then(|parsed| parsed.details)
                .unwrap_or_default(),
            _ => BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, UnauthorizedReason};

    #[test]
    fn user_message_prefers_envelope_message() {
        let err = ApiError::http(
            404,
            r#"{"success":false,"error":{"code":"EVENT_NOT_FOUND","message":"Event not found"}}"#,
        );
        assert_eq!(err.user_message(), "Event not found");
    }

    #[test]
    fn user_message_falls_back_to_raw_body() {
        let err = ApiError::http(403, "Forbidden: Admin access required\n");
        assert_eq!(err.user_message(), "Forbidden: Admin access required");
    }

    #[test]
    fn user_message_for_empty_body_names_status() {
        let err = ApiError::http(500, "");
        assert_eq!(err.user_message(), "HTTP error! status: 500");
    }

    #[test]
    fn field_errors_come_from_details() {
        let err = ApiError::http(
            400,
            r#"{"success":false,"error":{"code":"VALIDATION_FAILED","message":"Validation failed","details":{"title":"Title is required","capacity":"Capacity must be a positive integer"}}}"#,
        );
        let fields = err.field_errors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["title"], "Title is required");
    }

    #[test]
    fn field_errors_empty_for_non_http() {
        assert!(ApiError::network("boom").field_errors().is_empty());
        assert!(ApiError::unauthorized(UnauthorizedReason::Rejected)
            .field_errors()
            .is_empty());
    }

    #[test]
    fn status_reflects_server_answer() {
        assert_eq!(
            ApiError::unauthorized(UnauthorizedReason::Rejected).status(),
            Some(401)
        );
        assert_eq!(
            ApiError::unauthorized(UnauthorizedReason::NoSession).status(),
            None
        );
        assert_eq!(ApiError::http(409, "").status(), Some(409));
    }
}
