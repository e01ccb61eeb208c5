//! Public self check-in pages reached from the session QR code.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::{ApiClient, ScanRequest};
use crate::browser::csrf;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::{ids, member};
use crate::templates_structs::{
    AttendDoneTemplate, AttendTemplate, MemberOption, NewMemberFields, PageContext, SessionCard,
};

use super::forms::{ExistingCheckInForm, NewCheckInForm, non_blank};

const REQUIRED_FIELDS: &str = "Name, email, and phone required";

#[derive(Deserialize)]
pub struct AttendQuery {
    pub mode: Option<String>,
    pub q: Option<String>,
    pub member: Option<String>,
}

fn mode_of(raw: Option<&str>) -> &'static str {
    match raw {
        Some("existing") => "existing",
        Some("new") => "new",
        _ => "",
    }
}

fn checked_session_id(path: web::Path<String>) -> Result<String, AppError> {
    let session_id = path.into_inner();
    if ids::is_safe_path_id(&session_id) {
        Ok(session_id)
    } else {
        Err(AppError::NotFound)
    }
}

async fn session_card(api: &ApiClient, session_id: &str) -> Option<SessionCard> {
    match api.get_session(session_id).await {
        Ok(found) => found.map(|s| SessionCard::new(&s, api.base_url())),
        Err(e) => {
            log::warn!("Error fetching session {session_id}: {e}");
            None
        }
    }
}

/// GET /attend/{session_id}
pub async fn page(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    query: web::Query<AttendQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = checked_session_id(path)?;
    let ctx = PageContext::build(&session, &config, &format!("/attend/{session_id}"));
    let card = session_card(&api, &session_id).await;
    let mode = mode_of(query.mode.as_deref());
    let search_query = query.q.as_deref().unwrap_or("").trim().to_string();

    let mut results = Vec::new();
    let mut selected = None;
    let mut message = None;

    if mode == "existing" {
        match api.list_members().await {
            Ok(members) => {
                results = member::search_by_name_or_email(
                    &members,
                    &search_query,
                    member::SELF_CHECKIN_RESULT_LIMIT,
                )
                .into_iter()
                .map(MemberOption::from)
                .collect();
                selected = query
                    .member
                    .as_deref()
                    .and_then(|id| member::find_by_id(&members, id))
                    .map(MemberOption::from);
            }
            Err(e) => {
                log::error!("Error fetching members for check-in: {e}");
                message = Some("Error fetching members".to_string());
            }
        }
    }

    render(AttendTemplate {
        ctx,
        session_id,
        session: card,
        mode: mode.to_string(),
        search_query,
        results,
        selected,
        message,
        fields: NewMemberFields::default(),
    })
}

fn done(
    ctx: PageContext,
    session_id: String,
    success: bool,
    message: String,
) -> Result<HttpResponse, AppError> {
    render(AttendDoneTemplate {
        ctx,
        session_id,
        success,
        message,
    })
}

/// POST /attend/{session_id}/existing: check in a member picked from the search.
pub async fn check_in_existing(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<ExistingCheckInForm>,
) -> Result<HttpResponse, AppError> {
    let session_id = checked_session_id(path)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let ctx = PageContext::build(&session, &config, &format!("/attend/{session_id}"));

    let members = match api.list_members().await {
        Ok(members) => members,
        Err(e) => return done(ctx, session_id, false, e.user_message_or("Failed")),
    };
    let Some(found) = member::find_by_id(&members, &form.member_id) else {
        return done(ctx, session_id, false, "Member not found".to_string());
    };

    let request = ScanRequest {
        name: found.name.clone(),
        phone: found.phone.clone(),
        email: found.email.clone(),
        address: found.address.clone(),
        session_id: session_id.clone(),
    };
    match api.scan(&request).await {
        Ok(ack) => {
            log::info!("Self check-in for member {} in session {session_id}", form.member_id);
            done(ctx, session_id, true, ack.or("Attendance recorded!"))
        }
        Err(e) => done(ctx, session_id, false, e.user_message_or("Failed")),
    }
}

/// POST /attend/{session_id}/new: first-time visitor registers and checks in.
pub async fn check_in_new(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<NewCheckInForm>,
) -> Result<HttpResponse, AppError> {
    let session_id = checked_session_id(path)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let ctx = PageContext::build(&session, &config, &format!("/attend/{session_id}"));

    let name = non_blank(Some(form.name.as_str()));
    let email = non_blank(Some(form.email.as_str()));
    let phone = non_blank(Some(form.phone.as_str()));

    let (Some(name), Some(email), Some(phone)) = (name, email, phone) else {
        let card = session_card(&api, &session_id).await;
        return render(AttendTemplate {
            ctx,
            session_id,
            session: card,
            mode: "new".to_string(),
            search_query: String::new(),
            results: Vec::new(),
            selected: None,
            message: Some(REQUIRED_FIELDS.to_string()),
            fields: NewMemberFields {
                name: form.name.clone(),
                email: form.email.clone(),
                phone: form.phone.clone(),
                address: form.address.clone().unwrap_or_default(),
            },
        });
    };

    let request = ScanRequest {
        name,
        phone: Some(phone),
        email: Some(email),
        address: non_blank(form.address.as_deref()),
        session_id: session_id.clone(),
    };
    match api.scan(&request).await {
        Ok(ack) => done(ctx, session_id, true, ack.or("Registered and marked present!")),
        Err(e) => done(ctx, session_id, false, e.user_message_or("Failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_modes_fall_back_to_choice() {
        assert_eq!(mode_of(Some("existing")), "existing");
        assert_eq!(mode_of(Some("new")), "new");
        assert_eq!(mode_of(Some("admin")), "");
        assert_eq!(mode_of(None), "");
    }
}
