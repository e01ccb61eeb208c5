use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::models::Theme;

const FLASH_KEY: &str = "flash";
const THEME_KEY: &str = "theme";
const SELECTED_SESSION_KEY: &str = "selected_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-shot notification shown as a dismissible toast on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }
}

pub fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(FLASH_KEY, &flash) {
        log::warn!("Could not store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let flash = session.get::<Flash>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// This browser's theme, or `default` if it never chose one.
pub fn theme(session: &Session, default: Theme) -> Theme {
    session
        .get::<String>(THEME_KEY)
        .unwrap_or(None)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

pub fn set_theme(session: &Session, theme: Theme) {
    if let Err(e) = session.insert(THEME_KEY, theme.as_str()) {
        log::warn!("Could not store theme: {e}");
    }
}

pub fn selected_session_id(session: &Session) -> Option<String> {
    session
        .get::<String>(SELECTED_SESSION_KEY)
        .unwrap_or(None)
        .filter(|id| !id.is_empty())
}

pub fn set_selected_session_id(session: &Session, id: &str) {
    if let Err(e) = session.insert(SELECTED_SESSION_KEY, id) {
        log::warn!("Could not store selected session: {e}");
    }
}

pub fn clear_selected_session(session: &Session) {
    session.remove(SELECTED_SESSION_KEY);
}
