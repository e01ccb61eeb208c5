use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::browser::csrf;
use crate::browser::state::Flash;
use crate::errors::AppError;
use crate::models::member;

use super::forms::MarkPresentForm;
use super::helpers::{current_session_id, redirect_with};

/// POST /attendance/mark: check a listed member in to the current session.
pub async fn mark_present(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<MarkPresentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(session_id) = current_session_id(&api, &session).await else {
        return Ok(redirect_with(&session, Flash::error("No session"), "/"));
    };

    let members = match api.list_members().await {
        Ok(members) => members,
        Err(e) => {
            log::error!("Mark present: could not load members: {e}");
            return Ok(redirect_with(&session, Flash::error(e.user_message_or("Failed")), "/"));
        }
    };

    let Some(found) = member::find_by_id(&members, &form.member_id) else {
        return Ok(redirect_with(&session, Flash::error("Member not found"), "/"));
    };

    let flash = match api.mark_attendance(&session_id, found.email.as_deref()).await {
        Ok(ack) => {
            log::info!("Marked member {} present in session {session_id}", form.member_id);
            Flash::success(ack.or(&format!("{} marked present", found.name)))
        }
        Err(e) => {
            log::warn!("Mark present failed for member {}: {e}", form.member_id);
            Flash::error(e.user_message_or("Failed"))
        }
    };
    Ok(redirect_with(&session, flash, "/"))
}
