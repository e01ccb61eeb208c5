use actix_session::Session;
use actix_web::HttpResponse;

use crate::api::{ApiClient, ApiError};
use crate::browser::state::{self, Flash};
use crate::models::{self, AttendanceRecord, Member};

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Flash `flash` and send the browser back to `location`.
pub fn redirect_with(session: &Session, flash: Flash, location: &str) -> HttpResponse {
    state::set_flash(session, flash);
    redirect(location)
}

/// Only same-site absolute paths are followed after a form post.
/// Browsers read `/\` like `//`, so both are refused.
pub fn safe_back(back: Option<&str>) -> &str {
    match back {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\") =>
        {
            path
        }
        _ => "/",
    }
}

/// The session this browser is working on: the one it selected, else the
/// backend's active session.
///
/// A selection the backend no longer knows is dropped. If the backend cannot
/// be reached the selected id is kept so check-ins can still be attempted.
pub async fn current_session(api: &ApiClient, session: &Session) -> Option<models::Session> {
    if let Some(id) = state::selected_session_id(session) {
        match api.get_session(&id).await {
            Ok(Some(found)) => return Some(found),
            Ok(None) => {
                log::info!("Selected session {id} no longer exists, clearing");
                state::clear_selected_session(session);
            }
            Err(e) => {
                log::warn!("Could not load selected session {id}: {e}");
                return Some(models::Session {
                    id: Some(id),
                    ..Default::default()
                });
            }
        }
    }

    match api.active_session().await {
        Ok(active) => active,
        Err(e) => {
            log::warn!("Could not load active session: {e}");
            None
        }
    }
}

pub async fn current_session_id(api: &ApiClient, session: &Session) -> Option<String> {
    current_session(api, session).await.and_then(|s| s.id)
}

/// Members and the attendance ledger, fetched concurrently.
pub async fn load_snapshot(
    api: &ApiClient,
) -> Result<(Vec<Member>, Vec<AttendanceRecord>), ApiError> {
    tokio::try_join!(api.list_members(), api.current_attendance())
}
