use askama::Template;

use super::PageContext;

/// Row on the sessions page.
pub struct SessionListItem {
    pub id: String,
    pub label: String,
    pub date_display: String,
    pub attendance_count: usize,
    pub is_selected: bool,
}

#[derive(Template)]
#[template(path = "sessions.html")]
pub struct SessionsTemplate {
    pub ctx: PageContext,
    pub sessions: Vec<SessionListItem>,
}
