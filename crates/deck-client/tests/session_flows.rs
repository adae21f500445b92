//! Session-level flows against a scripted envelope-speaking backend.
//!
//! Unlike the per-route gateway fixtures, this server holds a small route
//! table and a log of every request it served (method, path, body), so
//! the assertions can cover both outcomes and request shape.

use std::io::Read;
use std::sync::{Arc, Mutex};

use deck_client::{Decision, GatewayError, Session};
use deck_config::{BackendConfig, CacheConfig, DeckConfig};
use deck_gateway::InviteOutcome;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

struct ScriptedBackend {
    port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ScriptedBackend {
    /// Serve `routes` on a random port. Each entry is
    /// `(method, path prefix, response body)`; everything responds HTTP 200
    /// (envelope status carries the semantics) and unmatched requests get a
    /// failure envelope.
    fn start(routes: &'static [(&'static str, &'static str, &'static str)]) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind scripted server");
        let port = server.server_addr().to_ip().expect("ip addr").port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let path = request.url().to_string();
                log.lock().expect("request log lock").push(Recorded {
                    method: request.method().as_str().to_string(),
                    path: path.clone(),
                    body,
                });

                let reply = routes
                    .iter()
                    .find(|(method, prefix, _)| {
                        request.method().as_str() == *method && path.starts_with(prefix)
                    })
                    .map_or(
                        r#"{"ok":false,"status":404,"message":"unscripted route"}"#,
                        |(_, _, body)| *body,
                    );
                let response = tiny_http::Response::from_string(reply).with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("header"),
                );
                let _ = request.respond(response);
            }
        });

        Self { port, requests }
    }

    fn session(&self) -> Session {
        Session::new(&DeckConfig {
            backend: BackendConfig {
                url: format!("http://127.0.0.1:{}", self.port),
                timeout_secs: 5,
            },
            cache: CacheConfig::default(),
        })
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log lock").clone()
    }
}

const IDENTITY_ORG_A: &str = r#"{"ok":true,"status":200,"data":{
    "id":"u1","email":"a@b.com",
    "memberships":[{"organizationId":"org-a","organizationName":"Acme",
                    "roleName":"administrator","isCurrent":true}]
}}"#;

#[tokio::test]
async fn register_mismatch_never_touches_the_backend() {
    let backend = ScriptedBackend::start(&[]);
    let session = backend.session();

    let err = session
        .register("a@b.com", "hunter2", "hunter3")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
    assert_eq!(err.to_string(), "Passwords do not match");
    assert!(backend.recorded().is_empty());
}

#[tokio::test]
async fn signup_flow_sends_the_expected_organization_payload() {
    let backend = ScriptedBackend::start(&[
        (
            "POST",
            "/api/auth/register",
            r#"{"ok":true,"status":200,"data":{"userId":"u1"}}"#,
        ),
        (
            "POST",
            "/api/organization",
            r#"{"ok":true,"status":200,"data":{"token":"tok-1"}}"#,
        ),
    ]);
    let session = backend.session();

    let registered = session
        .register("a@b.com", "hunter2", "hunter2")
        .await
        .expect("registration");
    assert_eq!(registered.user_id, "u1");

    session
        .create_organization(&registered.user_id, "  Acme ", "x@y.com, z@w.com,")
        .await
        .expect("organization created");

    let requests = backend.recorded();
    let org_request = requests
        .iter()
        .find(|r| r.path == "/api/organization")
        .expect("organization request");
    assert_eq!(org_request.method, "POST");
    let payload: serde_json::Value =
        serde_json::from_str(&org_request.body).expect("json payload");
    assert_eq!(
        payload,
        serde_json::json!({
            "userId": "u1",
            "name": "Acme",
            "invites": ["x@y.com", "z@w.com"],
        })
    );
}

#[tokio::test]
async fn permission_decisions_resolve_once_and_reset_on_switch() {
    let backend = ScriptedBackend::start(&[
        ("POST", "/api/auth/me", IDENTITY_ORG_A),
        (
            "POST",
            "/api/auth/checkPermissions",
            r#"{"ok":true,"status":200,"data":true}"#,
        ),
        (
            "POST",
            "/api/auth/switch-organization",
            r#"{"ok":true,"status":200,"data":{"token":"tok-2"}}"#,
        ),
    ]);
    let session = backend.session();
    let actions = vec!["update".to_string()];
    let resources = vec!["task".to_string()];

    // Nothing resolved yet.
    assert_eq!(session.can_peek(&actions, &resources).await, Decision::Unknown);

    assert_eq!(session.can(&actions, &resources).await, Decision::Allowed);
    assert_eq!(session.can_peek(&actions, &resources).await, Decision::Allowed);

    // The second resolve is served from the gate.
    assert_eq!(session.can(&actions, &resources).await, Decision::Allowed);
    let checks = backend
        .recorded()
        .iter()
        .filter(|r| r.path == "/api/auth/checkPermissions")
        .count();
    assert_eq!(checks, 1);

    // Switching organizations is a cold restart of every decision.
    session
        .switch_organization("org-b")
        .await
        .expect("switched");
    assert_eq!(session.can_peek(&actions, &resources).await, Decision::Unknown);
}

#[tokio::test]
async fn identity_soft_fails_to_none_when_backend_is_unreachable() {
    // Nothing listens on this port.
    let session = Session::new(&DeckConfig {
        backend: BackendConfig {
            url: "http://127.0.0.1:59998".into(),
            timeout_secs: 1,
        },
        cache: CacheConfig::default(),
    });

    assert!(session.identity().await.is_none());
    assert!(session.current_org_id().await.is_none());

    // Without an organization scope nothing can have resolved: peeking is
    // Unknown, while an authoritative answer is Denied.
    let actions = vec!["read".to_string()];
    let resources = vec!["tasks".to_string()];
    assert_eq!(session.can_peek(&actions, &resources).await, Decision::Unknown);
    assert_eq!(session.can(&actions, &resources).await, Decision::Denied);
}

#[tokio::test]
async fn accept_invite_register_first_installs_no_token() {
    let backend = ScriptedBackend::start(&[(
        "POST",
        "/api/organization/accept-invite/",
        r#"{"ok":true,"status":404,"data":{
            "type":"register-user-first",
            "message":"register before accepting",
            "inviteToken":"inv-1"
        }}"#,
    )]);
    let session = backend.session();

    let outcome = session.accept_invite("inv-1").await.expect("routing signal");
    assert_eq!(
        outcome,
        InviteOutcome::RegisterFirst {
            invite_token: "inv-1".into()
        }
    );
    // Only the accept call itself went out; no token was installed, so no
    // follow-up requests happened.
    assert_eq!(backend.recorded().len(), 1);
}

#[tokio::test]
async fn cached_reads_share_one_fetch_across_handles() {
    let backend = ScriptedBackend::start(&[
        ("POST", "/api/auth/me", IDENTITY_ORG_A),
        (
            "GET",
            "/api/tasks",
            r#"{"ok":true,"status":200,"data":[{
                "id":"t1","title":"Ship it","description":"",
                "status":"PENDING","priority":"HIGH",
                "assigneeId":null,"createdById":"u1",
                "createdAt":"2026-01-05T09:30:00Z"
            }]}"#,
        ),
    ]);
    let session = backend.session();

    let first = session.tasks().all().await.expect("first read");
    let second = session.tasks().all().await.expect("second read");
    assert!(Arc::ptr_eq(&first, &second));

    let task_fetches = backend
        .recorded()
        .iter()
        .filter(|r| r.path.starts_with("/api/tasks"))
        .count();
    assert_eq!(task_fetches, 1);
    assert_eq!(first[0].title, "Ship it");
}
