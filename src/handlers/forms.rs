//! Form structures for the dashboard and check-in pages.
//!
//! Optional text inputs arrive as empty strings when left blank; use
//! [`non_blank`] before forwarding them to the backend.

#[derive(serde::Deserialize)]
pub struct MarkPresentForm {
    pub csrf_token: String,
    pub member_id: String,
}

#[derive(serde::Deserialize)]
pub struct RegisterForm {
    pub csrf_token: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct QuickRegisterForm {
    pub csrf_token: String,
    pub name: String,
}

#[derive(serde::Deserialize)]
pub struct NewSessionForm {
    pub csrf_token: String,
    pub name: String,
}

#[derive(serde::Deserialize)]
pub struct SelectSessionForm {
    pub csrf_token: String,
    pub session_id: String,
}

#[derive(serde::Deserialize)]
pub struct ExistingCheckInForm {
    pub csrf_token: String,
    pub member_id: String,
}

#[derive(serde::Deserialize)]
pub struct NewCheckInForm {
    pub csrf_token: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct ThemeForm {
    pub csrf_token: String,
    pub back: Option<String>,
}

/// Trimmed value, or `None` when blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  Hall 3 ")), Some("Hall 3".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn register_form_accepts_missing_optional_fields() {
        let form: RegisterForm =
            serde_urlencoded::from_str("csrf_token=t&name=Ada+Obi&phone=0801").unwrap();
        assert_eq!(form.name, "Ada Obi");
        assert!(form.email.is_none());
        assert!(form.address.is_none());

        let form: RegisterForm =
            serde_urlencoded::from_str("csrf_token=t&name=Ada&phone=0801&email=").unwrap();
        assert_eq!(non_blank(form.email.as_deref()), None);
    }

    #[test]
    fn check_in_form_requires_contact_fields() {
        let missing = serde_urlencoded::from_str::<NewCheckInForm>("csrf_token=t&name=Ada");
        assert!(missing.is_err());
    }
}
