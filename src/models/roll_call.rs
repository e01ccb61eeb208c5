use serde::{Serialize, Serializer};

use super::classifier::{Classification, Status};
use super::member::Member;

/// One line of the roll call or search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollCallEntry {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub contact: String,
    #[serde(skip)]
    pub initial: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: Option<Status>,
}

/// Label shown for members the classifier could not key.
pub const UNKEYED_LABEL: &str = "Registered";

/// JSON clients see the same label as the roll call page.
fn serialize_status<S: Serializer>(status: &Option<Status>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(status.map(|st| st.label()).unwrap_or(UNKEYED_LABEL))
}

impl RollCallEntry {
    pub fn new(member: &Member, classification: &Classification) -> Self {
        let id = member.id.clone().unwrap_or_default();
        let status = classification.status_of(&id);
        RollCallEntry {
            initial: member
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string()),
            id,
            name: member.name.clone(),
            contact: member.contact(),
            status,
        }
    }

    /// Members the classifier could not key show as merely registered.
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.label()).unwrap_or(UNKEYED_LABEL)
    }

    pub fn badge_class(&self) -> &'static str {
        self.status.map(|s| s.badge_class()).unwrap_or("badge-registered")
    }

    /// Present members and members without an id cannot be marked.
    pub fn can_mark_present(&self) -> bool {
        !self.id.is_empty() && !self.status.is_some_and(|s| s.is_present())
    }
}

pub fn entries<'a, I>(members: I, classification: &Classification) -> Vec<RollCallEntry>
where
    I: IntoIterator<Item = &'a Member>,
{
    members
        .into_iter()
        .map(|m| RollCallEntry::new(m, classification))
        .collect()
}
