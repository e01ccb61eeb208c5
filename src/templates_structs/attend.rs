use askama::Template;

use crate::models::Member;
use super::PageContext;
use super::dashboard::SessionCard;

/// A member as offered on the self check-in search.
pub struct MemberOption {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&Member> for MemberOption {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.clone().unwrap_or_default(),
            name: m.name.clone(),
            email: m.email.clone().unwrap_or_default(),
        }
    }
}

/// Values echoed back into the new-member form after a validation failure.
#[derive(Default)]
pub struct NewMemberFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Template)]
#[template(path = "attend.html")]
pub struct AttendTemplate {
    pub ctx: PageContext,
    pub session_id: String,
    pub session: Option<SessionCard>,
    /// "", "existing" or "new".
    pub mode: String,
    pub search_query: String,
    pub results: Vec<MemberOption>,
    pub selected: Option<MemberOption>,
    pub message: Option<String>,
    pub fields: NewMemberFields,
}

#[derive(Template)]
#[template(path = "attend_done.html")]
pub struct AttendDoneTemplate {
    pub ctx: PageContext,
    pub session_id: String,
    pub success: bool,
    pub message: String,
}
