use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::browser::state::Flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::stats::DataOverview;
use crate::templates_structs::{DataTemplate, PageContext};

/// GET /data: totals, averages and recent sessions.
pub async fn index(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut ctx = PageContext::build(&session, &config, "/data");

    let fetched = tokio::try_join!(
        api.list_members(),
        api.current_attendance(),
        api.list_sessions()
    );
    let overview = match fetched {
        Ok((members, records, sessions)) => DataOverview::compute(&members, &records, &sessions),
        Err(e) => {
            log::error!("Data overview refresh failed: {e}");
            ctx = ctx.with_flash(Flash::error(e.user_message_or("Could not load attendance data")));
            DataOverview::default()
        }
    };

    render(DataTemplate { ctx, overview })
}
