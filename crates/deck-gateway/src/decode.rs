//! Shared envelope decoding for gateway endpoints.
//!
//! Centralizes body reading, envelope parsing, and status-code
//! classification so individual endpoint modules stay focused on request
//! construction.

use deck_core::Envelope;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Read a response body and decode the uniform envelope into `T`.
///
/// Transport failures while reading the body map to
/// [`GatewayError::Transport`]; a body that is not a valid envelope maps to
/// [`GatewayError::Parse`]; a failure envelope is classified by status via
/// [`GatewayError::from_envelope`].
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
    let body = resp.text().await?;
    let envelope: Envelope<T> =
        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))?;
    envelope
        .into_data()
        .map_err(|(status, message)| GatewayError::from_envelope(status, message))
}

/// Like [`decode`], but keeps the whole envelope for endpoints where a
/// success arm can carry a non-2xx status (invite validation).
pub async fn decode_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<Envelope<T>, GatewayError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
}
