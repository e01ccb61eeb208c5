//! Per-browser state kept in the signed cookie session.

pub mod csrf;
pub mod state;
