use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tokio::sync::Notify;
use tower::ServiceExt;

use personapath_auth::TokenVerifier;
use personapath_auth::jwt::{claims_for, issue_token};
use personapath_bedrock::{
    BackendFuture, BackendRequest, BackendResponse, GenerationError, ReportBackend,
    ReportGenerator,
};
use personapath_server::middleware::auth::AuthUser;
use personapath_server::{AppState, app};
use personapath_storage::{MemoryBacking, ReportStore};

const SECRET: &[u8] = b"api-test-secret";

struct CannedBackend(Result<BackendResponse, GenerationError>);

impl ReportBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    fn complete<'a>(&'a self, _request: &'a BackendRequest) -> BackendFuture<'a> {
        let reply = self.0.clone();
        Box::pin(async move { reply })
    }
}

/// Holds the first call until released; later calls answer at once. The
/// reply's title names the call so results can be traced to their run.
struct GatedBackend {
    calls: AtomicUsize,
    gate: Notify,
}

impl ReportBackend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    fn complete<'a>(&'a self, _request: &'a BackendRequest) -> BackendFuture<'a> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if call == 0 {
                self.gate.notified().await;
            }
            let mut report = report_json();
            report["personality_type"]["title"] = json!(format!("CALL-{call}"));
            Ok(BackendResponse::text(report.to_string()))
        })
    }
}

fn report_json() -> Value {
    json!({
        "personality_type": { "title": "The Architect", "description": "Plans ahead." },
        "strengths": [{ "name": "Focus", "description": "Sees things through." }],
        "career_suggestions": [{ "role": "Engineer", "why_fit": "Loves systems." }],
        "fictional_match": { "character": "Hermione Granger", "universe": "Harry Potter", "reason": "Prepared for everything." }
    })
}

fn router_with(reply: Result<BackendResponse, GenerationError>) -> Router {
    router_over(Arc::new(CannedBackend(reply)))
}

fn router_over(backend: Arc<dyn ReportBackend>) -> Router {
    let generator = ReportGenerator::new(backend);
    let store = ReportStore::new(MemoryBacking::new());
    app(AppState::new(store, generator, TokenVerifier::new(SECRET)))
}

fn router() -> Router {
    router_with(Ok(BackendResponse::text(report_json().to_string())))
}

fn token(sub: &str, roles: &[&str]) -> String {
    issue_token(SECRET, &claims_for(sub, roles, 600)).unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, token, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Walk a session from Welcome through the last question, returning the
/// final advance response.
async fn finish_quiz(app: &Router, token: &str, name: &str) -> (StatusCode, Value) {
    send_json(app, Method::POST, "/session/start", Some(token), None).await;
    let (status, _) = send_json(
        app,
        Method::POST,
        "/session/profile",
        Some(token),
        Some(json!({ "name": name, "age": "29", "gender": "Female" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    loop {
        send_json(
            app,
            Method::POST,
            "/session/select",
            Some(token),
            Some(json!({ "option_id": "a" })),
        )
        .await;
        let (status, view) =
            send_json(app, Method::POST, "/session/advance", Some(token), None).await;
        if status != StatusCode::OK || view["stage"] != "quiz" {
            return (status, view);
        }
    }
}

async fn complete_quiz(app: &Router, token: &str) -> Value {
    let (status, view) = finish_quiz(app, token, "Ada").await;
    assert_eq!(status, StatusCode::OK);
    view
}

#[tokio::test]
async fn health_and_questions_are_public() {
    let app = router();
    let (status, body) = send_json(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_json(&app, Method::GET, "/questions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn session_routes_require_a_valid_token() {
    let app = router();
    let (status, _) = send_json(&app, Method::GET, "/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, Method::GET, "/session", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = issue_token(b"wrong-secret", &claims_for("user-1", &[], 600)).unwrap();
    let (status, _) = send_json(&app, Method::GET, "/session", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn new_session_starts_at_welcome() {
    let app = router();
    let token = token("user-1", &[]);
    let (status, view) = send_json(&app, Method::GET, "/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"], "welcome");
    assert!(view["report"].is_null());
}

#[tokio::test]
async fn full_flow_saves_report_and_accepts_feedback() {
    let app = router();
    let user = token("user-1", &[]);

    let view = complete_quiz(&app, &user).await;
    assert_eq!(view["stage"], "results");
    assert_eq!(view["report"]["fictional_match"]["character"], "Hermione Granger");
    let report_id = view["report_id"].as_str().unwrap().to_string();

    let (status, markdown) = send(&app, Method::GET, "/session/report", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    let markdown = String::from_utf8(markdown).unwrap();
    assert!(markdown.contains("The Architect"));

    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/reports/{report_id}/feedback"),
        Some(&user),
        Some(json!({ "rating": 4, "comment": "Spot on" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let admin = token("admin-1", &["admin"]);
    let (status, reports) =
        send_json(&app, Method::GET, "/admin/reports", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["id"], report_id.as_str());
    assert_eq!(reports[0]["user_profile"]["name"], "Ada");
    assert_eq!(reports[0]["feedback"]["rating"], 4);

    let (status, stats) = send_json(&app, Method::GET, "/admin/stats", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_reports"], 1);
    assert_eq!(stats["average_display"], "4.0");
}

#[tokio::test]
async fn malformed_report_lands_in_error_with_generic_message() {
    let mut partial = report_json();
    partial.as_object_mut().unwrap().remove("fictional_match");
    let app = router_with(Ok(BackendResponse::text(partial.to_string())));
    let user = token("user-1", &[]);

    let view = complete_quiz(&app, &user).await;
    assert_eq!(view["stage"], "error");
    assert_eq!(
        view["error_message"],
        "Something went wrong while analyzing your personality. Please try again."
    );

    let admin = token("admin-1", &["admin"]);
    let (_, stats) = send_json(&app, Method::GET, "/admin/stats", Some(&admin), None).await;
    assert_eq!(stats["total_reports"], 0);
    assert_eq!(stats["average_display"], "N/A");

    let (status, view) = send_json(&app, Method::POST, "/session/retake", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"], "welcome");
}

#[tokio::test]
async fn invalid_profile_is_a_bad_request() {
    let app = router();
    let user = token("user-1", &[]);
    send_json(&app, Method::POST, "/session/start", Some(&user), None).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/session/profile",
        Some(&user),
        Some(json!({ "name": "Ada", "age": "abc", "gender": "Female" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, view) = send_json(&app, Method::GET, "/session", Some(&user), None).await;
    assert_eq!(view["stage"], "details");
}

#[tokio::test]
async fn out_of_order_action_is_a_conflict() {
    let app = router();
    let user = token("user-1", &[]);

    let (status, body) =
        send_json(&app, Method::POST, "/session/advance", Some(&user), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["stage"], "welcome");
    assert_eq!(body["action"], "advance");
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let app = router();
    let user = token("user-1", &[]);

    for uri in ["/admin/reports", "/admin/stats", "/admin/export.csv"] {
        let (status, _) = send_json(&app, Method::GET, uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }

    let (status, _) = send_json(&app, Method::POST, "/session/admin", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = token("admin-1", &["admin"]);
    let (status, view) = send_json(&app, Method::POST, "/session/admin", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"], "admin");

    let (_, view) = send_json(&app, Method::DELETE, "/session/admin", Some(&admin), None).await;
    assert_eq!(view["stage"], "welcome");
}

#[tokio::test]
async fn export_is_csv_attachment() {
    let app = router();
    let user = token("user-1", &[]);
    complete_quiz(&app, &user).await;

    let admin = token("admin-1", &["admin"]);
    let (status, bytes) = send(&app, Method::GET, "/admin/export.csv", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Name,Age,Gender,Personality,Character,Rating,Comment")
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",Ada,29,Female,The Architect,Hermione Granger,,"));
}

#[tokio::test]
async fn feedback_on_someone_elses_report_is_forbidden() {
    let app = router();
    let owner = token("user-1", &[]);
    let view = complete_quiz(&app, &owner).await;
    let report_id = view["report_id"].as_str().unwrap().to_string();

    let other = token("user-2", &[]);
    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/reports/{report_id}/feedback"),
        Some(&other),
        Some(json!({ "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn out_of_range_rating_is_a_bad_request() {
    let app = router();
    let user = token("user-1", &[]);
    let view = complete_quiz(&app, &user).await;
    let report_id = view["report_id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/reports/{report_id}/feedback"),
        Some(&user),
        Some(json!({ "rating": 6, "comment": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sign_out_discards_the_session() {
    let app = router();
    let user = token("user-1", &[]);
    send_json(&app, Method::POST, "/session/start", Some(&user), None).await;

    let (status, _) = send_json(&app, Method::DELETE, "/session", Some(&user), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, view) = send_json(&app, Method::GET, "/session", Some(&user), None).await;
    assert_eq!(view["stage"], "welcome");
}

#[tokio::test]
async fn result_of_signed_out_run_never_reaches_the_next_run() {
    let backend = Arc::new(GatedBackend {
        calls: AtomicUsize::new(0),
        gate: Notify::new(),
    });
    let app = router_over(backend.clone());
    let user = token("user-1", &[]);

    let first = {
        let app = app.clone();
        let user = user.clone();
        tokio::spawn(async move { finish_quiz(&app, &user, "Ada").await })
    };
    while backend.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, _) = send_json(&app, Method::DELETE, "/session", Some(&user), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, view) = finish_quiz(&app, &user, "Grace").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"], "results");
    assert_eq!(view["report"]["personality_type"]["title"], "CALL-1");

    backend.gate.notify_one();
    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["stage"], "results");

    let (_, view) = send_json(&app, Method::GET, "/session", Some(&user), None).await;
    assert_eq!(view["profile"]["name"], "Grace");
    assert_eq!(view["report"]["personality_type"]["title"], "CALL-1");

    let admin = token("admin-1", &["admin"]);
    let (_, reports) = send_json(&app, Method::GET, "/admin/reports", Some(&admin), None).await;
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["user_profile"]["name"], "Grace");
    assert_eq!(reports[0]["report"]["personality_type"]["title"], "CALL-1");
}

#[tokio::test]
async fn ratings_outside_u8_are_validation_errors() {
    let app = router();
    let user = token("user-1", &[]);
    let view = complete_quiz(&app, &user).await;
    let report_id = view["report_id"].as_str().unwrap().to_string();

    for rating in [300, -1, 0] {
        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/reports/{report_id}/feedback"),
            Some(&user),
            Some(json!({ "rating": rating, "comment": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
        assert!(body["error"].as_str().unwrap().contains("rating"));
    }
}

#[tokio::test]
async fn authenticated_responses_carry_the_subject_for_auditing() {
    let app = router();
    let user = token("user-7", &[]);
    let request = Request::builder()
        .uri("/session")
        .header(header::AUTHORIZATION, format!("Bearer {user}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let audited = response.extensions().get::<AuthUser>().unwrap();
    assert_eq!(audited.0.subject, "user-7");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert!(response.extensions().get::<AuthUser>().is_none());
}
