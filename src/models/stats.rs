use std::collections::HashMap;

use super::attendance::{self, AttendanceRecord};
use super::classifier::Classification;
use super::member::Member;
use super::session::Session;

/// How many sessions the data overview lists.
pub const RECENT_SESSION_COUNT: usize = 5;

/// Quick stats card on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_members: usize,
    pub present_today: usize,
    pub first_timers: usize,
    pub absent: usize,
}

impl DashboardStats {
    pub fn from_classification(members: &[Member], classification: &Classification) -> Self {
        let total_members = members.len();
        let present_today = classification.present_count();
        DashboardStats {
            total_members,
            present_today,
            first_timers: classification.first_timer_count,
            absent: total_members.saturating_sub(present_today),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentSession {
    pub id: Option<String>,
    pub label: String,
    pub date_display: String,
    pub attendance_count: usize,
}

/// Aggregate numbers for the data page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataOverview {
    pub total_members: usize,
    pub total_attendance: usize,
    pub total_sessions: usize,
    pub average_attendance: usize,
    pub first_timers_ever: usize,
    pub return_rate: usize,
    pub recent_sessions: Vec<RecentSession>,
}

impl DataOverview {
    pub fn compute(members: &[Member], records: &[AttendanceRecord], sessions: &[Session]) -> Self {
        let total_members = members.len();
        let total_attendance = records.len();
        let total_sessions = sessions.len();

        let average_attendance = if total_sessions > 0 {
            (total_attendance as f64 / total_sessions as f64).round() as usize
        } else {
            0
        };

        let mut per_member: HashMap<&str, usize> = HashMap::new();
        for record in records {
            if let Some(id) = record.member_id.as_deref() {
                *per_member.entry(id).or_insert(0) += 1;
            }
        }
        let first_timers_ever = per_member.values().filter(|&&n| n == 1).count();

        let return_rate = if total_members > 0 {
            let returning = total_attendance.saturating_sub(first_timers_ever) as f64;
            (returning / total_members as f64 * 100.0).round() as usize
        } else {
            0
        };

        let recent_sessions = sessions
            .iter()
            .rev()
            .take(RECENT_SESSION_COUNT)
            .map(|s| RecentSession {
                id: s.id.clone(),
                label: s.label(),
                date_display: s.date_display(),
                attendance_count: s
                    .id
                    .as_deref()
                    .map(|id| attendance::count_for_session(records, id))
                    .unwrap_or(0),
            })
            .collect();

        DataOverview {
            total_members,
            total_attendance,
            total_sessions,
            average_attendance,
            first_timers_ever,
            return_rate,
            recent_sessions,
        }
    }
}
