// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::browser::csrf;
use crate::browser::state::{self, Flash};
use crate::config::AppConfig;
use crate::models::Theme;

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<Flash>,
    pub csrf_token: String,
    pub theme: Theme,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, current_path: &str) -> Self {
        Self {
            app_name: config.app_name.clone(),
            flash: state::take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            theme: state::theme(session, config.theme),
            current_path: current_path.to_string(),
        }
    }

    /// Show `flash` on this render, replacing any pending one.
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

mod api;
mod attend;
mod dashboard;
mod data;
mod sessions;

pub use self::api::ApiErrorResponse;
pub use self::attend::{AttendDoneTemplate, AttendTemplate, MemberOption, NewMemberFields};
pub use self::dashboard::{DashboardTemplate, SessionCard, StatsView};
pub use self::data::DataTemplate;
pub use self::sessions::{SessionListItem, SessionsTemplate};
