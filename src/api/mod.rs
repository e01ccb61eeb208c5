//! Typed access to the external attendance API.

pub mod client;
pub mod error;

pub use client::{ApiClient, NewMember, ScanRequest, ServerMessage};
pub use error::ApiError;
