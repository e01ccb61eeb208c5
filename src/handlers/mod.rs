pub mod api;
pub mod attend_handlers;
pub mod attendance_handlers;
pub mod dashboard;
pub mod data_handlers;
pub mod forms;
pub mod helpers;
pub mod member_handlers;
pub mod session_handlers;
pub mod theme_handlers;

use actix_web::{HttpResponse, web};

/// Register every page and form route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::index))
        // Staff actions
        .route("/attendance/mark", web::post().to(attendance_handlers::mark_present))
        .route("/members/register", web::post().to(member_handlers::register))
        .route("/members/quick-register", web::post().to(member_handlers::quick_register))
        // Sessions
        .route("/sessions", web::get().to(session_handlers::list))
        .route("/sessions", web::post().to(session_handlers::create))
        .route("/sessions/select", web::post().to(session_handlers::select))
        .route("/data", web::get().to(data_handlers::index))
        // Public self check-in
        .route("/attend/{session_id}", web::get().to(attend_handlers::page))
        .route("/attend/{session_id}/existing", web::post().to(attend_handlers::check_in_existing))
        .route("/attend/{session_id}/new", web::post().to(attend_handlers::check_in_new))
        .route("/theme", web::post().to(theme_handlers::toggle))
        .route("/api/roll-call", web::get().to(api::roll_call));
}

/// Fallback for unknown paths.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}
