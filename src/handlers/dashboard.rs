use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::browser::state::Flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::stats::DashboardStats;
use crate::models::{classify, member, roll_call};
use crate::templates_structs::{DashboardTemplate, PageContext, SessionCard, StatsView};

use super::helpers::{current_session, load_snapshot};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
}

/// GET /: stats, QR card, roll call and member search.
pub async fn index(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let mut ctx = PageContext::build(&session, &config, "/");
    let search_query = query.q.as_deref().unwrap_or("").trim().to_string();

    let current = current_session(&api, &session).await;
    let session_id = current.as_ref().and_then(|s| s.id.clone());

    let (stats, roll_call, search_results, loaded) = match load_snapshot(&api).await {
        Ok((members, records)) => {
            let classification = classify(&members, &records, session_id.as_deref(), Utc::now());
            let stats = DashboardStats::from_classification(&members, &classification);
            let matches = member::search_by_name(&members, &search_query);
            (
                StatsView::from(stats),
                roll_call::entries(&members, &classification),
                roll_call::entries(matches, &classification),
                true,
            )
        }
        Err(e) => {
            log::error!("Stats refresh failed: {e}");
            ctx = ctx.with_flash(Flash::error(e.user_message_or("Could not load attendance data")));
            (StatsView::unavailable(), Vec::new(), Vec::new(), false)
        }
    };

    let offer_register = loaded && !search_query.is_empty() && search_results.is_empty();

    let tmpl = DashboardTemplate {
        ctx,
        stats,
        session: current.as_ref().map(|s| SessionCard::new(s, api.base_url())),
        roll_call,
        search_query,
        search_results,
        offer_register,
    };
    render(tmpl)
}
