//! Event search action

use serde::Serialize;

use crate::common::{page_count, ApiResult, PageParams};
use crate::domains::events::actions::queries::EventView;
use crate::domains::events::models::EventWithOrganizer;
use crate::kernel::ServerDeps;

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub events: Vec<EventView>,
    pub pages: i64,
    pub total: i64,
}

/// Case-insensitive substring match against title, tags, or organizer name,
/// paginated.
pub async fn search_events(
    search_str: String,
    page: i64,
    limit: i64,
    deps: &ServerDeps,
) -> ApiResult<SearchResults> {
    let term = search_str.trim().to_string();
    let params = PageParams::new(page, limit)?;

    let (rows, total) = EventWithOrganizer::search(&term, params, &deps.db_pool).await?;

    Ok(SearchResults {
        events: rows.into_iter().map(EventView::from).collect(),
        pages: page_count(total, params.limit),
        total,
    })
}
