//! API Error Taxonomy
//!
//! Application-level rejections carry the server's reason and are shown to
//! the user verbatim; transport failures surface a generic message and keep
//! their detail in the console log.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced a response (network error, no window)
    #[error("network error: {0}")]
    Network(String),

    /// Server answered outside the 2xx range
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// Response body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(String),

    /// Server answered `{success: false}`; the payload is its reason
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// What the notification banner shows
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(reason) => reason.clone(),
            _ => "Request failed. Please try again.".to_string(),
        }
    }

    /// Transport failures are logged, rejections are not (the user already
    /// sees the full reason)
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reason_is_shown_verbatim() {
        let err = ApiError::Rejected("Permission denied".to_string());
        assert_eq!(err.user_message(), "Permission denied");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_failures_get_generic_message() {
        for err in [
            ApiError::Network("connection refused".to_string()),
            ApiError::Http { status: 502 },
            ApiError::Decode("expected object".to_string()),
        ] {
            assert_eq!(err.user_message(), "Request failed. Please try again.");
            assert!(err.is_transport());
        }
    }
}
