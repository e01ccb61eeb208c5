use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use fellowship_attendance::api::ApiClient;
use fellowship_attendance::config::{AppConfig, MIN_SESSION_KEY_LEN};
use fellowship_attendance::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    let api = ApiClient::new(&config.api_url, config.api_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Cookie signing key: persistent theme and session selection need SESSION_KEY
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need {}+), generating random key",
                val.len(),
                MIN_SESSION_KEY_LEN
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (browser state lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = config.bind_addr.clone();
    log::info!("Attendance API at {}", config.api_url);
    log::info!("Starting server at http://{bind_addr}");

    let config = web::Data::new(config);
    let api = web::Data::new(api);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(api.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
