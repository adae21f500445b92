//! Gateway error taxonomy.
//!
//! Every backend failure is classified by the envelope status code so
//! callers branch on the variant instead of raw status numbers: forms show
//! [`GatewayError::Validation`] messages verbatim, list/detail views render
//! an empty state for [`GatewayError::NotFound`], and the session layer
//! treats [`GatewayError::Auth`] as "logged out" / "not permitted".

use thiserror::Error;

/// Errors that can occur when talking to the backend gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure (connect, timeout, TLS). Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Envelope status 400 — message is surfaced verbatim to forms.
    #[error("{0}")]
    Validation(String),

    /// Envelope status 401 or 403.
    #[error("not authorized ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Envelope status 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-ok envelope (500, 503, ...).
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Persisting or removing the stored auth token failed.
    #[error("token store error: {0}")]
    TokenStore(String),
}

impl GatewayError {
    /// Classify a failure envelope by its status code.
    #[must_use]
    pub fn from_envelope(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 | 403 => Self::Auth { status, message },
            404 => Self::NotFound(message),
            _ => Self::Backend { status, message },
        }
    }

    /// Whether this error means the caller lacks authentication or
    /// authorization (envelope 401/403).
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_status() {
        assert!(matches!(
            GatewayError::from_envelope(400, "Passwords do not match".into()),
            GatewayError::Validation(_)
        ));
        assert!(GatewayError::from_envelope(401, "no token".into()).is_auth());
        assert!(GatewayError::from_envelope(403, "forbidden".into()).is_auth());
        assert!(matches!(
            GatewayError::from_envelope(404, "no such task".into()),
            GatewayError::NotFound(_)
        ));
        assert!(matches!(
            GatewayError::from_envelope(503, "maintenance".into()),
            GatewayError::Backend { status: 503, .. }
        ));
    }

    #[test]
    fn validation_message_is_verbatim() {
        let err = GatewayError::from_envelope(400, "Passwords do not match".into());
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
