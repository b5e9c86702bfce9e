use thiserror::Error;

/// Failure to decode a bearer token's structure. A token that fails here is
/// treated as absent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token: {reason}")]
    MalformedToken { reason: String },
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }
}
