//! Attendance status classification.
//!
//! Colour-codes every member against the currently selected session. The
//! function is pure: the clock is passed in and malformed input degrades to
//! "not present / not counted" instead of failing.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::attendance::AttendanceRecord;
use super::member::Member;

/// A member whose first scan is younger than this is treated as new.
pub const FIRST_TIMER_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Present,
    New,
    #[serde(rename = "First Timer")]
    FirstTimer,
    Absent,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::New => "New",
            Status::FirstTimer => "First Timer",
            Status::Absent => "Absent",
        }
    }

    /// CSS modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Status::Present => "badge-present",
            Status::New => "badge-new",
            Status::FirstTimer => "badge-first-timer",
            Status::Absent => "badge-absent",
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Status::Present)
    }

    pub fn is_first_timer(&self) -> bool {
        matches!(self, Status::New | Status::FirstTimer)
    }
}

/// Result of one classification pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub statuses: HashMap<String, Status>,
    pub first_timer_count: usize,
    /// Member ids with a record for the selected session.
    pub present: HashSet<String>,
}

impl Classification {
    pub fn status_of(&self, member_id: &str) -> Option<Status> {
        self.statuses.get(member_id).copied()
    }

    /// Members on the roll classified present. Records for ids missing from
    /// the member list are not counted.
    pub fn present_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_present()).count()
    }
}

/// Classify every member.
///
/// Order of rules: present in the selected session, first scanned within
/// [`FIRST_TIMER_WINDOW_HOURS`], no records at all, exactly one record,
/// otherwise absent. Members without an id cannot be keyed and are skipped;
/// a repeated id is classified once.
pub fn classify(
    members: &[Member],
    records: &[AttendanceRecord],
    active_session_id: Option<&str>,
    now: DateTime<Utc>,
) -> Classification {
    let mut present = HashSet::new();
    let mut totals: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(member_id) = record.member_id.as_deref() else {
            continue;
        };
        *totals.entry(member_id).or_insert(0) += 1;
        if let Some(session_id) = active_session_id {
            if record.is_for_session(session_id) {
                present.insert(member_id.to_string());
            }
        }
    }

    let window = Duration::hours(FIRST_TIMER_WINDOW_HOURS);
    let mut statuses = HashMap::with_capacity(members.len());
    let mut first_timer_count = 0;

    for member in members {
        let Some(id) = member.id.as_deref() else {
            continue;
        };
        if statuses.contains_key(id) {
            log::warn!("Duplicate member id {id} in member list, keeping the first");
            continue;
        }
        let total = totals.get(id).copied().unwrap_or(0);
        let recently_joined = member
            .first_scan_at()
            .is_some_and(|first| now.signed_duration_since(first) < window);

        let status = if present.contains(id) {
            Status::Present
        } else if recently_joined || total == 0 {
            Status::New
        } else if total == 1 {
            Status::FirstTimer
        } else {
            Status::Absent
        };

        if status.is_first_timer() {
            first_timer_count += 1;
        }
        statuses.insert(id.to_string(), status);
    }

    Classification {
        statuses,
        first_timer_count,
        present,
    }
}
