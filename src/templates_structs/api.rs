use serde::Serialize;

/// Error body for JSON endpoints.
#[derive(Serialize, Debug, Clone)]
pub struct ApiErrorResponse {
    pub error: String,
}
