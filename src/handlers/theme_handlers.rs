use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::browser::csrf;
use crate::browser::state;
use crate::config::AppConfig;
use crate::errors::AppError;

use super::forms::ThemeForm;
use super::helpers::{redirect, safe_back};

/// POST /theme: flip between light and dark for this browser.
pub async fn toggle(
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<ThemeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let next = state::theme(&session, config.theme).toggled();
    state::set_theme(&session, next);
    Ok(redirect(safe_back(form.back.as_deref())))
}
