use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::{ApiClient, NewMember};
use crate::browser::csrf;
use crate::browser::state::Flash;
use crate::errors::AppError;

use super::forms::{QuickRegisterForm, RegisterForm, non_blank};
use super::helpers::{current_session_id, redirect_with};

const REGISTERED: &str = "Member registered and marked present successfully!";

/// Local checks for the full registration form. Returns the first problem.
pub fn validate_registration(name: &str, phone: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if phone.trim().is_empty() {
        return Err("Phone is required".to_string());
    }
    Ok(())
}

/// POST /members/register: register a new member and mark them present.
pub async fn register(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if let Err(msg) = validate_registration(&form.name, &form.phone) {
        return Ok(redirect_with(&session, Flash::error(msg), "/"));
    }

    let Some(session_id) = current_session_id(&api, &session).await else {
        return Ok(redirect_with(&session, Flash::error("No session"), "/"));
    };

    let name = form.name.trim().to_string();
    let new_member = NewMember {
        session_id,
        name: name.clone(),
        email: non_blank(form.email.as_deref()),
        phone: non_blank(Some(form.phone.as_str())),
        address: non_blank(form.address.as_deref()),
    };

    let flash = match api.register_member(&new_member).await {
        Ok(ack) => {
            log::info!("Registered member {name}");
            Flash::success(format!("{name}: {}", ack.or(REGISTERED)))
        }
        Err(e) => {
            log::warn!("Registration failed for {name}: {e}");
            Flash::error(e.user_message_or("Failed"))
        }
    };
    Ok(redirect_with(&session, flash, "/"))
}

/// POST /members/quick-register: register the searched-for name as is.
pub async fn quick_register(
    api: web::Data<ApiClient>,
    session: Session,
    form: web::Form<QuickRegisterForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(name) = non_blank(Some(form.name.as_str())) else {
        return Ok(redirect_with(&session, Flash::error("Name is required"), "/"));
    };
    let Some(session_id) = current_session_id(&api, &session).await else {
        return Ok(redirect_with(&session, Flash::error("No session"), "/"));
    };

    let new_member = NewMember {
        session_id,
        name: name.clone(),
        ..Default::default()
    };
    let flash = match api.register_member(&new_member).await {
        Ok(ack) => Flash::success(format!("{name}: {}", ack.or(REGISTERED))),
        Err(e) => Flash::error(e.user_message_or("Failed")),
    };
    Ok(redirect_with(&session, flash, "/"))
}
