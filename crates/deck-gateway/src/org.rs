//! `/api/organization*` endpoints: creation, invites, invite acceptance.

use serde::Deserialize;

use crate::Gateway;
use crate::auth::TokenData;
use crate::decode::{decode, decode_envelope};
use crate::error::GatewayError;

/// Result of accepting an invite token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// The invite was bound to an existing account; a fresh session token
    /// was issued.
    Accepted { token: String },
    /// The invited email has no account yet. The caller should route to
    /// registration carrying this invite token (this arrives as an
    /// `ok: true, status: 404` envelope, not as a failure).
    RegisterFirst { invite_token: String },
}

/// Details of a pending invite, for pre-filling the registration form.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InviteDetails {
    pub organization_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AcceptPayload {
    Token {
        token: String,
    },
    RegisterFirst {
        r#type: String,
        #[serde(rename = "inviteToken")]
        invite_token: String,
    },
}

impl Gateway {
    /// Create an organization owned by `user_id`, optionally inviting a
    /// list of emails. Issues the owner's first session token for the new
    /// organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for rejected payloads.
    pub async fn create_organization(
        &self,
        user_id: &str,
        name: &str,
        invites: Option<&[String]>,
    ) -> Result<TokenData, GatewayError> {
        let payload = match invites {
            Some(invites) => serde_json::json!({
                "userId": user_id,
                "name": name,
                "invites": invites,
            }),
            None => serde_json::json!({ "userId": user_id, "name": name }),
        };
        let resp = self
            .post("/api/organization")
            .await
            .json(&payload)
            .send()
            .await?;
        decode(resp).await
    }

    /// Send invite emails for an existing organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn send_invites(
        &self,
        user_id: &str,
        organization_id: &str,
        invites: &[String],
    ) -> Result<(), GatewayError> {
        let path = format!(
            "/api/organization/invite?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self
            .post(&path)
            .await
            .json(&serde_json::json!({ "userId": user_id, "invites": invites }))
            .send()
            .await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }

    /// Accept an invite token.
    ///
    /// The backend answers one of two success shapes: a session token when
    /// the invited email already has an account, or an `ok: true,
    /// status: 404, type: "register-user-first"` payload when registration
    /// must happen first. The latter is a routing signal, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for a genuinely unknown token
    /// (failure envelope) and [`GatewayError::Parse`] for an unrecognized
    /// success payload.
    pub async fn accept_invite(&self, invite_token: &str) -> Result<InviteOutcome, GatewayError> {
        let path = format!(
            "/api/organization/accept-invite/{}",
            urlencoding::encode(invite_token)
        );
        let resp = self.post(&path).await.send().await?;
        let envelope = decode_envelope::<AcceptPayload>(resp).await?;
        let payload = envelope
            .into_data()
            .map_err(|(status, message)| GatewayError::from_envelope(status, message))?;
        match payload {
            AcceptPayload::Token { token } => Ok(InviteOutcome::Accepted { token }),
            AcceptPayload::RegisterFirst {
                r#type: kind,
                invite_token,
            } => {
                if kind == "register-user-first" {
                    Ok(InviteOutcome::RegisterFirst { invite_token })
                } else {
                    Err(GatewayError::Parse(format!(
                        "unrecognized accept-invite payload type: {kind}",
                    )))
                }
            }
        }
    }

    /// Validate an invite token and return the invited email and
    /// organization. `for_register` asks the backend to allow tokens whose
    /// email has no account yet (the signup pre-fill path).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for unknown or expired tokens.
    pub async fn validate_invite(
        &self,
        invite_token: &str,
        for_register: bool,
    ) -> Result<InviteDetails, GatewayError> {
        let mut path = format!(
            "/api/organization/validate-invite/{}",
            urlencoding::encode(invite_token)
        );
        if for_register {
            path.push_str("?register=true");
        }
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accept_payload_token_arm() {
        let payload: AcceptPayload = serde_json::from_str(r#"{"token":"fresh"}"#).unwrap();
        assert!(matches!(payload, AcceptPayload::Token { token } if token == "fresh"));
    }

    #[test]
    fn accept_payload_register_first_arm() {
        let payload: AcceptPayload = serde_json::from_str(
            r#"{"type":"register-user-first","message":"no account","inviteToken":"tok"}"#,
        )
        .unwrap();
        match payload {
            AcceptPayload::RegisterFirst {
                r#type,
                invite_token,
            } => {
                assert_eq!(r#type, "register-user-first");
                assert_eq!(invite_token, "tok");
            }
            AcceptPayload::Token { .. } => panic!("expected register-first arm"),
        }
    }

    #[test]
    fn invite_details_decode_camel_case() {
        let details: InviteDetails =
            serde_json::from_str(r#"{"organizationId":"org-a","email":"x@y.com"}"#).unwrap();
        assert_eq!(
            details,
            InviteDetails {
                organization_id: "org-a".into(),
                email: "x@y.com".into(),
            }
        );
    }
}
