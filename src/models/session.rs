use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids;

/// One dated meeting instance for which attendance is tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSession")]
pub struct Session {
    pub id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    /// Backend-rendered QR image (data URL or link).
    pub qr_image: Option<String>,
    /// Backend-provided QR payload.
    pub qr_data: Option<String>,
}

#[derive(Deserialize)]
struct RawSession {
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, rename = "createdAt", alias = "created_at")]
    created_at: Option<Value>,
    #[serde(default, rename = "qrCodeImage")]
    qr_code_image: Option<Value>,
    #[serde(default, rename = "qrCode")]
    qr_code: Option<Value>,
    #[serde(default, rename = "qrData")]
    qr_data: Option<Value>,
}

impl From<RawSession> for Session {
    fn from(raw: RawSession) -> Self {
        Session {
            id: ids::pick_id(raw.mongo_id.as_ref(), raw.id.as_ref()),
            name: ids::text(raw.name),
            title: ids::text(raw.title),
            date: ids::text(raw.date),
            created_at: ids::text(raw.created_at),
            qr_image: ids::text(raw.qr_code_image).or_else(|| ids::text(raw.qr_code)),
            qr_data: ids::text(raw.qr_data),
        }
    }
}

impl Session {
    /// Name, then title, then id, then a dash.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| "—".to_string())
    }

    /// Human-readable start date, falling back to creation time.
    /// Unparseable dates are shown verbatim.
    pub fn date_display(&self) -> String {
        let raw = match self.date.as_deref().or(self.created_at.as_deref()) {
            Some(raw) => raw,
            None => return String::new(),
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.format("%a %-d %b %Y, %H:%M").to_string(),
            Err(_) => raw.to_string(),
        }
    }

    /// What the self check-in QR code encodes: the backend's payload if it
    /// supplied one, otherwise the scan endpoint for this session.
    pub fn qr_payload(&self, api_url: &str) -> String {
        if let Some(data) = &self.qr_data {
            return data.clone();
        }
        match &self.id {
            Some(id) => format!("{}/api/scan?session={}", api_url.trim_end_matches('/'), id),
            None => String::new(),
        }
    }

    /// Unwrap `{ session }` or a bare session. Null bodies, `{ session: null }`
    /// and sessions without an id all mean "no session".
    pub fn from_envelope(body: Value) -> Option<Session> {
        let inner = match body {
            Value::Object(mut map) if map.contains_key("session") => map.remove("session")?,
            Value::Object(map) => Value::Object(map),
            _ => return None,
        };
        if !inner.is_object() {
            return None;
        }
        let session: Session = serde_json::from_value(inner).ok()?;
        session.id.is_some().then_some(session)
    }

    /// Normalise `Session[]` or `{ sessions: [...] }`.
    pub fn list_from_envelope(body: Value) -> Vec<Session> {
        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("sessions") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        super::decode_each(items, "session")
    }
}
