pub mod attendance;
pub mod classifier;
pub mod ids;
pub mod member;
pub mod roll_call;
pub mod session;
pub mod stats;
pub mod theme;

pub use attendance::AttendanceRecord;
pub use classifier::{Classification, Status, classify};
pub use member::Member;
pub use session::Session;
pub use theme::Theme;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode each list element on its own so one malformed entry cannot sink
/// the whole response. Non-objects and undecodable entries are logged and dropped.
pub(crate) fn decode_each<T: DeserializeOwned>(items: Vec<Value>, kind: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| {
            if !item.is_object() {
                log::warn!("Skipping {kind}: expected an object, got {item}");
                return None;
            }
            match serde_json::from_value(item) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("Skipping undecodable {kind}: {e}");
                    None
                }
            }
        })
        .collect()
}
