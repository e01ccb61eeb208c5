use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids;

/// Maximum matches shown on the self check-in search.
pub const SELF_CHECKIN_RESULT_LIMIT: usize = 10;

/// A fellowship member as returned by `GET /api/members`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMember")]
pub struct Member {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub first_scan_date: Option<String>,
}

#[derive(Deserialize)]
struct RawMember {
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
    #[serde(default)]
    address: Option<Value>,
    #[serde(default, alias = "firstScanDate")]
    first_scan_date: Option<Value>,
}

impl From<RawMember> for Member {
    fn from(raw: RawMember) -> Self {
        Member {
            id: ids::pick_id(raw.mongo_id.as_ref(), raw.id.as_ref()),
            name: ids::text(raw.name).unwrap_or_default(),
            email: ids::text(raw.email),
            phone: ids::text(raw.phone),
            address: ids::text(raw.address),
            first_scan_date: ids::text(raw.first_scan_date),
        }
    }
}

impl Member {
    /// Email if known, otherwise phone. Used as the secondary line in lists.
    pub fn contact(&self) -> String {
        self.email
            .clone()
            .or_else(|| self.phone.clone())
            .unwrap_or_default()
    }

    /// Parsed `first_scan_date`. Accepts RFC 3339 text or epoch milliseconds;
    /// anything else is treated as absent.
    pub fn first_scan_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.first_scan_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let millis = raw.parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Staff search: case-insensitive substring match on name.
/// A blank query matches nothing.
pub fn search_by_name<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    members
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .collect()
}

/// Self check-in search: name or email, capped at `limit` results.
pub fn search_by_name_or_email<'a>(
    members: &'a [Member],
    query: &str,
    limit: usize,
) -> Vec<&'a Member> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&needle))
        })
        .take(limit)
        .collect()
}

pub fn find_by_id<'a>(members: &'a [Member], id: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.id.as_deref() == Some(id))
}

/// Normalise the `{ members: [...] }` envelope (a bare array is accepted too).
/// Entries that are not objects are dropped with a warning.
pub fn list_from_envelope(body: Value) -> Vec<Member> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("members") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    super::decode_each(items, "member")
}
