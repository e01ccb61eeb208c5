use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{AttendanceRecord, Member, Session, attendance, ids, member};

const USER_AGENT: &str = concat!("fellowship-attendance/", env!("CARGO_PKG_VERSION"));

/// `POST /api/members` body. Registering with a session id also marks the
/// new member present in that session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub session_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// `POST /api/scan` body used by the public check-in page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub session_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkAttendance<'a> {
    session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Serialize)]
struct NewSession<'a> {
    name: &'a str,
    date: &'a str,
}

/// `{ message }` acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerMessage {
    pub message: Option<String>,
}

impl ServerMessage {
    fn from_body(body: &Value) -> Self {
        ServerMessage {
            message: body
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(String::from),
        }
    }

    pub fn or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// HTTP client for the attendance backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_body(response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_body(response).await
    }

    /// GET /api/members
    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        let body = self.get("/api/members").await?;
        Ok(member::list_from_envelope(body))
    }

    /// POST /api/members
    pub async fn register_member(&self, new_member: &NewMember) -> Result<ServerMessage, ApiError> {
        let body = self.post("/api/members", new_member).await?;
        Ok(ServerMessage::from_body(&body))
    }

    /// GET /api/attendance/current
    pub async fn current_attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        let body = self.get("/api/attendance/current").await?;
        Ok(attendance::list_from_body(body))
    }

    /// POST /api/attendance: check a known member in by email.
    pub async fn mark_attendance(
        &self,
        session_id: &str,
        email: Option<&str>,
    ) -> Result<ServerMessage, ApiError> {
        let body = self
            .post("/api/attendance", &MarkAttendance { session_id, email })
            .await?;
        Ok(ServerMessage::from_body(&body))
    }

    /// GET /api/sessions
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let body = self.get("/api/sessions").await?;
        Ok(Session::list_from_envelope(body))
    }

    /// POST /api/sessions
    pub async fn create_session(&self, name: &str, date: &str) -> Result<Session, ApiError> {
        let body = self.post("/api/sessions", &NewSession { name, date }).await?;
        Session::from_envelope(body)
            .ok_or_else(|| ApiError::Parse("created session has no id".to_string()))
    }

    /// GET /api/sessions/active: `None` when the backend has no active session.
    pub async fn active_session(&self) -> Result<Option<Session>, ApiError> {
        match self.get("/api/sessions/active").await {
            Ok(body) => Ok(Session::from_envelope(body)),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// GET /api/sessions/:id: `None` on 404 or for ids that cannot be a session.
    pub async fn get_session(&self, id: &str) -> Result<Option<Session>, ApiError> {
        if !ids::is_safe_path_id(id) {
            log::warn!("Refusing to look up session with malformed id {id:?}");
            return Ok(None);
        }
        match self.get(&format!("/api/sessions/{id}")).await {
            Ok(body) => Ok(Session::from_envelope(body)),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST /api/scan: self check-in; the backend registers unknown people.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ServerMessage, ApiError> {
        let body = self.post("/api/scan", request).await?;
        Ok(ServerMessage::from_body(&body))
    }
}

async fn read_body(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        log::warn!("Attendance API returned {}: {}", status.as_u16(), text.trim());
        return Err(ApiError::from_response(status.as_u16(), &text));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/members"), "http://localhost:5000/api/members");
    }

    #[test]
    fn request_bodies_use_camel_case_and_skip_missing() {
        let body = serde_json::to_value(NewMember {
            session_id: "s1".into(),
            name: "Ngozi".into(),
            phone: Some("0802".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"sessionId": "s1", "name": "Ngozi", "phone": "0802"}));

        let body = serde_json::to_value(ScanRequest {
            name: "Ngozi".into(),
            session_id: "s1".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"name": "Ngozi", "sessionId": "s1"}));
    }

    #[test]
    fn server_message_fallback() {
        let ack = ServerMessage::from_body(&json!({"message": "Marked"}));
        assert_eq!(ack.or("x"), "Marked");
        assert_eq!(ServerMessage::from_body(&Value::Null).or("x"), "x");
    }
}
