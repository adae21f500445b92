//! The uniform response envelope every backend endpoint speaks.
//!
//! ```text
//! Success: { ok: true,  status: 200|201|204, data: T }
//! Failure: { ok: false, status: 400|401|403|404|500|503, message: string }
//! ```
//!
//! Mapping the failure arm onto the error taxonomy lives in `deck-gateway`;
//! this type is pure wire shape.

use serde::Deserialize;

/// A decoded backend response, success or failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `ok: true` — carries the payload.
    Success { ok: bool, status: u16, data: T },
    /// `ok: false` — carries a human-readable message.
    Failure { ok: bool, status: u16, message: String },
}

impl<T> Envelope<T> {
    /// The `ok` discriminant as sent by the backend.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP-style status code embedded in the envelope.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    /// Extract the payload, discarding the envelope metadata.
    ///
    /// Returns `Err((status, message))` for the failure arm.
    pub fn into_data(self) -> Result<T, (u16, String)> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure {
                status, message, ..
            } => Err((status, message)),
        }
    }
}
