//! Integration tests against a canned envelope-speaking backend.
//!
//! A `tiny_http` server on a random port answers each route with a fixture
//! envelope; the assertions cover request shape (paths, query scoping,
//! bearer header) and error classification.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use deck_config::BackendConfig;
use deck_gateway::{Gateway, GatewayError, InviteOutcome};
use pretty_assertions::assert_eq;

/// A one-route fixture backend. Returns the gateway pointed at it plus a
/// counter of requests served and a log of `Authorization` header values.
fn fixture_backend(
    status: u16,
    body: &'static str,
) -> (Gateway, Arc<AtomicUsize>, Arc<std::sync::Mutex<Vec<Option<String>>>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fixture server");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    let hits = Arc::new(AtomicUsize::new(0));
    let auth_headers = Arc::new(std::sync::Mutex::new(Vec::new()));

    let thread_hits = Arc::clone(&hits);
    let thread_auth = Arc::clone(&auth_headers);
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            thread_hits.fetch_add(1, Ordering::SeqCst);
            let auth = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string());
            thread_auth.lock().expect("auth log lock").push(auth);

            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });

    let gateway = Gateway::new(&BackendConfig {
        url: format!("http://127.0.0.1:{port}"),
        timeout_secs: 5,
    });
    (gateway, hits, auth_headers)
}

#[tokio::test]
async fn me_decodes_identity_with_memberships() {
    let (gateway, hits, _) = fixture_backend(
        200,
        r#"{"ok":true,"status":200,"data":{
            "id":"u1","email":"a@b.com",
            "memberships":[{"organizationId":"org-a","organizationName":"Acme",
                            "roleName":"administrator","isCurrent":true}]
        }}"#,
    );

    let identity = gateway.me().await.expect("identity");
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.current_org_id(), Some("org-a"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bearer_token_attached_once_set() {
    let (gateway, _, auth_headers) =
        fixture_backend(200, r#"{"ok":true,"status":200,"data":[]}"#);

    gateway.list_tasks("org-a").await.expect("unauthenticated list");
    gateway.set_token(Some("opaque123".into())).await;
    gateway.list_tasks("org-a").await.expect("authenticated list");

    let headers = auth_headers.lock().expect("auth log lock");
    assert_eq!(headers[0], None);
    assert_eq!(headers[1].as_deref(), Some("Bearer opaque123"));
}

#[tokio::test]
async fn forbidden_envelope_maps_to_auth_error() {
    let (gateway, _, _) =
        fixture_backend(200, r#"{"ok":false,"status":403,"message":"Forbidden"}"#);

    let err = gateway.list_roles("org-a").await.unwrap_err();
    assert!(matches!(err, GatewayError::Auth { status: 403, .. }));
}

#[tokio::test]
async fn missing_task_maps_to_not_found() {
    let (gateway, _, _) =
        fixture_backend(200, r#"{"ok":false,"status":404,"message":"no such task"}"#);

    let err = gateway.get_task("org-a", "t-missing").await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn accept_invite_register_first_is_not_an_error() {
    let (gateway, _, _) = fixture_backend(
        200,
        r#"{"ok":true,"status":404,"data":{
            "type":"register-user-first",
            "message":"register before accepting",
            "inviteToken":"tok"
        }}"#,
    );

    let outcome = gateway.accept_invite("tok").await.expect("routing signal");
    assert_eq!(
        outcome,
        InviteOutcome::RegisterFirst {
            invite_token: "tok".into()
        }
    );
}

#[tokio::test]
async fn accept_invite_issues_token_for_existing_account() {
    let (gateway, _, _) =
        fixture_backend(200, r#"{"ok":true,"status":200,"data":{"token":"fresh"}}"#);

    let outcome = gateway.accept_invite("tok").await.expect("accepted");
    assert_eq!(
        outcome,
        InviteOutcome::Accepted {
            token: "fresh".into()
        }
    );
}

#[tokio::test]
async fn non_envelope_body_is_a_parse_error() {
    let (gateway, _, _) = fixture_backend(502, "<html>bad gateway</html>");

    let err = gateway.list_users("org-a").await.unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on this port.
    let gateway = Gateway::new(&BackendConfig {
        url: "http://127.0.0.1:59999".into(),
        timeout_secs: 1,
    });

    let err = gateway.list_tasks("org-a").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
