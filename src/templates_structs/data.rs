use askama::Template;

use crate::models::stats::DataOverview;
use super::PageContext;

#[derive(Template)]
#[template(path = "data.html")]
pub struct DataTemplate {
    pub ctx: PageContext,
    pub overview: DataOverview,
}
