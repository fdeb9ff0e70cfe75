//! Read-only derived views: per-title statistics and trend series

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::api::{genre_label, parse_genre_filter, GenreQuery};
use crate::stats::{title_stats, TitleStats};
use crate::store::Entry;
use crate::trend::{trend_series, TrendSeries};
use crate::AppState;

/// Statistics view response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub genre: String,
    pub total_titles: usize,
    pub titles: Vec<TitleStats>,
}

/// GET /api/stats
///
/// Per-title mean/max over the filtered table, in display order (mean
/// descending). Empty filtered table yields no rows.
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> Json<StatsResponse> {
    let store = state.store.read().await;
    let filter = parse_genre_filter(query.genre.as_deref());

    let filtered = store.filtered(filter);
    let rows: Vec<&Entry> = filtered.iter().map(|(_, e)| *e).collect();
    let titles = title_stats(&rows);

    Json(StatsResponse {
        genre: genre_label(filter),
        total_titles: titles.len(),
        titles,
    })
}

/// Trend view response
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub genre: String,
    pub total_series: usize,
    pub series: Vec<TrendSeries>,
}

/// GET /api/trends
///
/// One date-ascending series per title with at least two attempts in the
/// filtered table.
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> Json<TrendsResponse> {
    let store = state.store.read().await;
    let filter = parse_genre_filter(query.genre.as_deref());

    let filtered = store.filtered(filter);
    let rows: Vec<&Entry> = filtered.iter().map(|(_, e)| *e).collect();
    let series = trend_series(&rows);

    Json(TrendsResponse {
        genre: genre_label(filter),
        total_series: series.len(),
        series,
    })
}
