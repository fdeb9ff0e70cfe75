//! UI page route
//!
//! Renders the whole single-page view from current table state.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::api::parse_genre_filter;
use crate::render::{render_page, PageView};
use crate::AppState;

/// Query parameters carried by the page URL
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Genre filter selection ("All" or one of the fixed genre names)
    pub genre: Option<String>,
    /// Selected position for the edit/delete panel
    pub pos: Option<usize>,
    /// One-shot confirmation message carried across a redirect
    pub notice: Option<String>,
}

/// GET /
pub async fn serve_index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let store = state.store.read().await;

    let genre_filter = parse_genre_filter(query.genre.as_deref());

    // Clamp the selection so a stale index from before a delete can
    // never be rendered
    let selected_pos = if store.is_empty() {
        None
    } else {
        Some(query.pos.unwrap_or(0).min(store.len() - 1))
    };

    let view = PageView {
        store: &store,
        genre_filter,
        selected_pos,
        notice: query.notice.as_deref(),
    };

    Html(render_page(&view))
}
