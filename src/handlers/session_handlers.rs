use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::api::ApiClient;
use crate::browser::csrf;
use crate::browser::state::{self, Flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::attendance;
use crate::templates_structs::{PageContext, SessionListItem, SessionsTemplate};

use super::forms::{NewSessionForm, SelectSessionForm, non_blank};
use super::helpers::{current_session_id, redirect_with};

/// GET /sessions: every session with its attendance count.
pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut ctx = PageContext::build(&session, &config, "/sessions");
    let selected = current_session_id(&api, &session).await;

    let sessions = match tokio::try_join!(api.list_sessions(), api.current_attendance()) {
        Ok((sessions, records)) => sessions
            .iter()
            .rev()
            .filter_map(|s| {
                let id = s.id.clone()?;
                Some(SessionListItem {
                    attendance_count: attendance::count_for_session(&records, &id),
                    is_selected: selected.as_deref() == Some(id.as_str()),
                    label: s.label(),
                    date_display: s.date_display(),
                    id,
                })
            })
            .collect(),
        Err(e) => {
            log::error!("Could not load sessions: {e}");
            ctx = ctx.with_flash(Flash::error(e.user_message_or("Could not load sessions")));
            Vec::new()
        }
    };

    render(SessionsTemplate { ctx, sessions })
}

/// POST /sessions: start a new session and make it the current one.
pub async fn create(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<NewSessionForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(name) = non_blank(Some(form.name.as_str())) else {
        return Ok(redirect_with(&session, Flash::error("Session name is required"), "/"));
    };

    let date = Utc::now().to_rfc3339();
    let flash = match api.create_session(&name, &date).await {
        Ok(created) => {
            if let Some(id) = created.id.as_deref() {
                state::set_selected_session_id(&session, id);
            }
            log::info!("Created session {:?} ({name})", created.id);
            Flash::success(format!("Session \"{}\" started", created.label()))
        }
        Err(e) => {
            log::warn!("Session creation failed: {e}");
            Flash::error(e.user_message_or("Failed to create session"))
        }
    };
    Ok(redirect_with(&session, flash, "/"))
}

/// POST /sessions/select: switch the dashboard to an existing session.
pub async fn select(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<SelectSessionForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let flash = match api.get_session(form.session_id.trim()).await {
        Ok(Some(found)) => {
            if let Some(id) = found.id.as_deref() {
                state::set_selected_session_id(&session, id);
            }
            Flash::success(format!("Now tracking \"{}\"", found.label()))
        }
        Ok(None) => Flash::error("Session not found"),
        Err(e) => Flash::error(e.user_message_or("Failed to load session")),
    };
    Ok(redirect_with(&session, flash, "/"))
}
