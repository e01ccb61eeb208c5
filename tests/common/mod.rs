//! Shared test infrastructure for the web layer.
//!
//! # Fake Backend
//! - `start_backend()` - In-process attendance API on 127.0.0.1:0
//! - `test_app!` - The dashboard app wired to a backend, with cookie sessions
//! - Cookie and CSRF helpers for driving form posts

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServerHandle, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use fellowship_attendance::api::ApiClient;
use fellowship_attendance::config::AppConfig;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const SESSION_COOKIE: &str = "id";
pub const ACTIVE_SESSION_ID: &str = "s1";
/// A timestamp far enough back that nobody counts as recently seen.
pub const LONG_AGO: &str = "2024-01-07T10:00:00Z";

// ============================================================================
// FAKE BACKEND
// ============================================================================

/// State behind the fake attendance API. Every POST is recorded in `posts`.
#[derive(Default)]
pub struct FakeBackend {
    pub members: Vec<Value>,
    pub attendance: Vec<Value>,
    pub sessions: Vec<Value>,
    pub active: Option<String>,
    pub posts: Vec<(String, Value)>,
    next_id: usize,
}

impl FakeBackend {
    /// Three members and an active session "s1":
    /// - m1 Ada: present in s1, seen before
    /// - m2 Bola: one visit to an older session
    /// - m3 Chidi: no email, never attended
    pub fn seeded() -> Self {
        FakeBackend {
            members: vec![
                json!({"_id": "m1", "name": "Ada Obi", "email": "ada@example.com", "phone": "0801", "firstScanDate": LONG_AGO}),
                json!({"_id": "m2", "name": "Bola Ade", "email": "bola@example.com", "phone": "0802", "firstScanDate": LONG_AGO}),
                json!({"_id": "m3", "name": "Chidi Eze", "phone": "0803", "firstScanDate": LONG_AGO}),
            ],
            attendance: vec![
                json!({"_id": "r1", "memberId": "m1", "sessionId": "s0", "timestamp": LONG_AGO}),
                json!({"_id": "r2", "memberId": "m1", "sessionId": "s1", "timestamp": LONG_AGO}),
                json!({"_id": "r3", "memberId": "m2", "sessionId": "s0", "timestamp": LONG_AGO}),
            ],
            sessions: vec![
                json!({"_id": "s0", "name": "Sunday Service", "date": LONG_AGO}),
                json!({"_id": "s1", "name": "Bible Study", "date": LONG_AGO, "qrCodeImage": "data:image/png;base64,AAAA"}),
            ],
            active: Some(ACTIVE_SESSION_ID.to_string()),
            posts: Vec::new(),
            next_id: 100,
        }
    }

    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn session(&self, id: &str) -> Option<Value> {
        self.sessions.iter().find(|s| s["_id"] == id).cloned()
    }

    fn member_by_email(&self, email: &str) -> Option<Value> {
        self.members.iter().find(|m| m["email"] == email).cloned()
    }

    fn record(&mut self, member_id: &str, session_id: &str) {
        let id = self.new_id("r");
        self.attendance.push(json!({
            "_id": id,
            "memberId": member_id,
            "sessionId": session_id,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));
    }

    fn add_member(&mut self, body: &Value) -> String {
        let id = self.new_id("m");
        let mut member = json!({"_id": id, "firstScanDate": chrono::Utc::now().to_rfc3339()});
        for key in ["name", "email", "phone", "address"] {
            if let Some(v) = body.get(key) {
                member[key] = v.clone();
            }
        }
        self.members.push(member);
        id
    }

    pub fn posts_to(&self, path: &str) -> Vec<Value> {
        self.posts
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

type Shared = web::Data<Mutex<FakeBackend>>;

async fn list_members(state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    HttpResponse::Ok().json(json!({"members": state.members}))
}

async fn register_member(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.posts.push(("/api/members".into(), body.0.clone()));
    let id = state.add_member(&body);
    if let Some(session_id) = body.get("sessionId").and_then(Value::as_str) {
        state.record(&id, session_id);
    }
    HttpResponse::Created().json(json!({"message": "Member registered"}))
}

async fn current_attendance(state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    HttpResponse::Ok().json(&state.attendance)
}

async fn mark_attendance(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.posts.push(("/api/attendance".into(), body.0.clone()));
    let Some(email) = body.get("email").and_then(Value::as_str) else {
        return HttpResponse::BadRequest().json(json!({"error": "Email required"}));
    };
    let Some(member) = state.member_by_email(email) else {
        return HttpResponse::NotFound().json(json!({"error": "Member not found"}));
    };
    let session_id = body["sessionId"].as_str().unwrap_or_default().to_string();
    let member_id = member["_id"].as_str().unwrap_or_default().to_string();
    state.record(&member_id, &session_id);
    HttpResponse::Ok().json(json!({"message": "Attendance marked"}))
}

async fn list_sessions(state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    HttpResponse::Ok().json(json!({"sessions": state.sessions}))
}

async fn create_session(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.posts.push(("/api/sessions".into(), body.0.clone()));
    let id = state.new_id("s");
    let session = json!({"_id": id, "name": body["name"], "date": body["date"]});
    state.sessions.push(session.clone());
    state.active = Some(id);
    HttpResponse::Created().json(json!({"session": session}))
}

async fn active_session(state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    match state.active.as_deref().and_then(|id| state.session(id)) {
        Some(session) => HttpResponse::Ok().json(json!({"session": session})),
        None => HttpResponse::NotFound().json(json!({"error": "No active session"})),
    }
}

async fn get_session(state: Shared, path: web::Path<String>) -> HttpResponse {
    let state = state.lock().unwrap();
    match state.session(&path) {
        Some(session) => HttpResponse::Ok().json(json!({"session": session})),
        None => HttpResponse::NotFound().json(json!({"error": "Session not found"})),
    }
}

async fn scan(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    state.posts.push(("/api/scan".into(), body.0.clone()));
    let session_id = body["sessionId"].as_str().unwrap_or_default().to_string();
    if state.session(&session_id).is_none() {
        return HttpResponse::NotFound().json(json!({"error": "Session not found"}));
    }
    let existing = body
        .get("email")
        .and_then(Value::as_str)
        .and_then(|email| state.member_by_email(email));
    let member_id = match existing {
        Some(member) => member["_id"].as_str().unwrap_or_default().to_string(),
        None => state.add_member(&body),
    };
    state.record(&member_id, &session_id);
    HttpResponse::Ok().json(json!({"message": "Attendance recorded"}))
}

/// A running fake backend. Dropping it does not stop the server; call `stop`.
pub struct Backend {
    pub url: String,
    pub state: Arc<Mutex<FakeBackend>>,
    handle: ServerHandle,
}

impl Backend {
    pub fn posts_to(&self, path: &str) -> Vec<Value> {
        self.state.lock().unwrap().posts_to(path)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub async fn start_backend(state: FakeBackend) -> Backend {
    let state = Arc::new(Mutex::new(state));
    let data = web::Data::from(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/members", web::get().to(list_members))
            .route("/api/members", web::post().to(register_member))
            .route("/api/attendance/current", web::get().to(current_attendance))
            .route("/api/attendance", web::post().to(mark_attendance))
            .route("/api/sessions", web::get().to(list_sessions))
            .route("/api/sessions", web::post().to(create_session))
            .route("/api/sessions/active", web::get().to(active_session))
            .route("/api/sessions/{id}", web::get().to(get_session))
            .route("/api/scan", web::post().to(scan))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake backend");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    Backend {
        url: format!("http://{addr}"),
        state,
        handle,
    }
}

// ============================================================================
// APP SETUP
// ============================================================================

pub fn config_for(api_url: &str) -> AppConfig {
    AppConfig {
        api_url: api_url.to_string(),
        api_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    }
}

pub fn client_for(api_url: &str) -> ApiClient {
    ApiClient::new(api_url, Duration::from_secs(5)).expect("Failed to build API client")
}

/// An API URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind test port");
    let addr = listener.local_addr().expect("Failed to read test port");
    drop(listener);
    format!("http://{addr}")
}

/// Build the dashboard service against `$api_url`.
macro_rules! test_app {
    ($api_url:expr) => {{
        let config = $crate::common::config_for(&$api_url);
        let api = $crate::common::client_for(&$api_url);
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64][..]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new(config))
                .app_data(actix_web::web::Data::new(api))
                .configure(fellowship_attendance::handlers::configure)
                .default_service(actix_web::web::to(fellowship_attendance::handlers::not_found)),
        )
        .await
    }};
}

// ============================================================================
// BROWSER HELPERS
// ============================================================================

/// The session cookie set by `resp`, if it set one.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// Keep `jar` in step with the latest cookie, like a browser would.
pub fn remember_cookie<B>(jar: &mut Option<Cookie<'static>>, resp: &ServiceResponse<B>) {
    if let Some(cookie) = session_cookie(resp) {
        *jar = Some(cookie);
    }
}

/// First CSRF token embedded in a rendered page.
pub fn csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page has no CSRF field") + marker.len();
    let end = html[start..].find('"').expect("unterminated CSRF value");
    html[start..start + end].to_string()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Attach the browser's current cookie, if any, to `req`.
pub fn with_cookie(
    req: actix_web::test::TestRequest,
    jar: &Option<Cookie<'static>>,
) -> actix_web::test::TestRequest {
    match jar {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

pub fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).expect("response body is not UTF-8")
}
