pub mod api;
pub mod browser;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod templates_structs;
