use thiserror::Error;

/// Crate-level error for failures outside the typed request outcomes:
/// configuration, token storage, and unexpected internal states.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Storage error: {detail}")]
    Storage { detail: String },
    #[error("Invalid token: {detail}")]
    InvalidToken { detail: String },
    #[error("Invalid input: {detail}")]
    Input { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl ClientError {
    /// Stable code for log fields and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Config { .. } => "CONFIG_ERROR",
            ClientError::Storage { .. } => "STORAGE_ERROR",
            ClientError::InvalidToken { .. } => "INVALID_TOKEN",
            ClientError::Input { .. } => "INVALID_INPUT",
            ClientError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        Self::Storage {
            detail: detail.into(),
        }
    }

    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self::InvalidToken {
            detail: detail.into(),
        }
    }

    pub fn input(detail: impl Into<String>) -> Self {
        Self::Input {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::storage(format!("io error: {e}"))
    }
}

impl From<std::env::VarError> for ClientError {
    fn from(e: std::env::VarError) -> Self {
        ClientError::config(format!("env var error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ClientError::config("x").code(), "CONFIG_ERROR");
        assert_eq!(ClientError::storage("x").code(), "STORAGE_ERROR");
        assert_eq!(ClientError::invalid_token("x").code(), "INVALID_TOKEN");
        assert_eq!(ClientError::input("x").code(), "INVALID_INPUT");
        assert_eq!(ClientError::internal("x").code(), "INTERNAL");
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ClientError = io.into();
        assert!(matches!(err, ClientError::Storage { .. }));
        assert!(err.to_string().contains("denied"));
    }
}
