use askama::Template;
use qrcode::QrCode;
use qrcode::render::svg;

use crate::models::Session;
use crate::models::roll_call::RollCallEntry;
use crate::models::stats::DashboardStats;
use super::PageContext;

/// Quick stats as displayed; `-` until data has loaded.
pub struct StatsView {
    pub total_members: String,
    pub present_today: String,
    pub first_timers: String,
    pub absent: String,
}

impl StatsView {
    pub fn unavailable() -> Self {
        let dash = || "-".to_string();
        Self {
            total_members: dash(),
            present_today: dash(),
            first_timers: dash(),
            absent: dash(),
        }
    }
}

impl From<DashboardStats> for StatsView {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_members: s.total_members.to_string(),
            present_today: s.present_today.to_string(),
            first_timers: s.first_timers.to_string(),
            absent: s.absent.to_string(),
        }
    }
}

/// The selected session with its QR code details.
pub struct SessionCard {
    pub id: String,
    pub label: String,
    pub date_display: String,
    pub qr_image: Option<String>,
    /// Inline SVG of `qr_payload`, drawn only when the backend sent no image.
    pub qr_svg: Option<String>,
    pub qr_payload: String,
}

/// Edge length of the rendered QR code in pixels.
const QR_SIZE: u32 = 200;

impl SessionCard {
    pub fn new(session: &Session, api_url: &str) -> Self {
        let qr_payload = session.qr_payload(api_url);
        let qr_svg = match session.qr_image {
            Some(_) => None,
            None => render_qr_svg(&qr_payload),
        };
        Self {
            id: session.id.clone().unwrap_or_default(),
            label: session.label(),
            date_display: session.date_display(),
            qr_image: session.qr_image.clone(),
            qr_svg,
            qr_payload,
        }
    }
}

/// Encode `payload` as an `<svg>` element ready to inline in HTML.
pub fn render_qr_svg(payload: &str) -> Option<String> {
    if payload.is_empty() {
        return None;
    }
    let code = match QrCode::new(payload.as_bytes()) {
        Ok(code) => code,
        Err(e) => {
            log::warn!("Could not encode QR payload {payload:?}: {e}");
            return None;
        }
    };
    let image = code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    // Drop the XML prolog; the element is embedded in an HTML page.
    let start = image.find("<svg")?;
    Some(image[start..].to_string())
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub stats: StatsView,
    pub session: Option<SessionCard>,
    pub roll_call: Vec<RollCallEntry>,
    pub search_query: String,
    pub search_results: Vec<RollCallEntry>,
    /// Search text with no match: offer to register it as a new member.
    pub offer_register: bool,
}
