use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{classify, roll_call};
use crate::templates_structs::ApiErrorResponse;

use super::helpers::{current_session_id, load_snapshot};

/// GET /api/roll-call: `[{id, name, status}]` for the current session.
pub async fn roll_call(
    api: web::Data<ApiClient>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let session_id = current_session_id(&api, &session).await;

    match load_snapshot(&api).await {
        Ok((members, records)) => {
            let classification = classify(&members, &records, session_id.as_deref(), Utc::now());
            Ok(HttpResponse::Ok().json(roll_call::entries(&members, &classification)))
        }
        Err(e) => {
            log::error!("Roll call refresh failed: {e}");
            Ok(HttpResponse::BadGateway().json(ApiErrorResponse {
                error: e.user_message(),
            }))
        }
    }
}
