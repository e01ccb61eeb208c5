use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids;

/// One member checked in once for one session.
///
/// Either reference may be unlinkable (missing, null, or a populated object
/// without an id). Such records are kept so they still count toward totals
/// where the other reference is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct AttendanceRecord {
    pub id: Option<String>,
    pub member_id: Option<String>,
    pub session_id: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "memberId", alias = "member_id")]
    member_id: Option<Value>,
    #[serde(default, rename = "sessionId", alias = "session_id")]
    session_id: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<Value>,
}

impl From<RawRecord> for AttendanceRecord {
    fn from(raw: RawRecord) -> Self {
        AttendanceRecord {
            id: ids::pick_id(raw.mongo_id.as_ref(), raw.id.as_ref()),
            member_id: raw.member_id.as_ref().and_then(ids::id_from_value),
            session_id: raw.session_id.as_ref().and_then(ids::id_from_value),
            timestamp: ids::text(raw.timestamp).or_else(|| ids::text(raw.created_at)),
        }
    }
}

impl AttendanceRecord {
    pub fn is_for_session(&self, session_id: &str) -> bool {
        self.session_id.as_deref() == Some(session_id)
    }
}

/// Decode the bare record array from `GET /api/attendance/current`.
pub fn list_from_body(body: Value) -> Vec<AttendanceRecord> {
    match body {
        Value::Array(items) => super::decode_each(items, "attendance record"),
        _ => Vec::new(),
    }
}

/// Number of records linked to `session_id`.
pub fn count_for_session(records: &[AttendanceRecord], session_id: &str) -> usize {
    records.iter().filter(|r| r.is_for_session(session_id)).count()
}
