//! Entry mutation routes and the entries read API
//!
//! Mutations follow POST, redirect, GET: the handler takes the store
//! write lock for the whole read-mutate-persist cycle, then redirects
//! back to the page with a one-shot notice.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::{genre_label, parse_genre_filter, GenreQuery};
use crate::render::escape;
use crate::store::{Entry, EntryPatch, Genre};
use crate::{AppState, Error};

/// Form fields shared by create and update; the registered date is never
/// a form field
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub genre: String,
    pub score: i64,
    #[serde(default)]
    pub memo: String,
}

impl EntryForm {
    fn genre(&self) -> Genre {
        Genre::parse_lossy(&self.genre)
    }

    fn score(&self) -> u32 {
        self.score.clamp(0, 100) as u32
    }
}

/// POST /entries
///
/// An empty (or whitespace-only) title creates nothing: redirect back
/// with no success notice.
pub async fn create_entry(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, EntryError> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        return Ok(Redirect::to("/"));
    }

    let entry = Entry {
        title: title.clone(),
        genre: form.genre(),
        score: Some(form.score()),
        memo: form.memo,
        registered_date: Local::now().date_naive(),
    };

    let mut store = state.store.write().await;
    store.append(entry)?;

    Ok(Redirect::to(&format!(
        "/?notice={}",
        urlencoding::encode(&format!("Saved \"{}\"", title))
    )))
}

/// POST /entries/:pos/update
///
/// Overwrites title/genre/score/memo at the position; the registered
/// date is untouched.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(position): Path<usize>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, EntryError> {
    let patch = EntryPatch {
        title: form.title.trim().to_string(),
        genre: form.genre(),
        score: Some(form.score()),
        memo: form.memo,
    };

    let mut store = state.store.write().await;
    store.update(position, patch)?;

    Ok(Redirect::to(&format!("/?pos={}&notice=Updated", position)))
}

/// POST /entries/:pos/delete
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> Result<Redirect, EntryError> {
    let mut store = state.store.write().await;
    store.delete(position)?;

    Ok(Redirect::to("/?notice=Deleted"))
}

/// One row of the entries read API, with its current table position
#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub position: usize,
    pub title: String,
    pub genre: Genre,
    pub score: Option<u32>,
    pub memo: String,
    pub registered_date: NaiveDate,
}

/// Entries read API response
#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub genre: String,
    pub total_rows: usize,
    pub entries: Vec<EntryRow>,
}

/// GET /api/entries
///
/// Returns the rows matching the genre selection, original order and
/// table positions preserved.
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> Json<EntriesResponse> {
    let store = state.store.read().await;
    let filter = parse_genre_filter(query.genre.as_deref());

    let entries: Vec<EntryRow> = store
        .filtered(filter)
        .into_iter()
        .map(|(position, e)| EntryRow {
            position,
            title: e.title.clone(),
            genre: e.genre,
            score: e.score,
            memo: e.memo.clone(),
            registered_date: e.registered_date,
        })
        .collect();

    Json(EntriesResponse {
        genre: genre_label(filter),
        total_rows: entries.len(),
        entries,
    })
}

/// Entry mutation errors
#[derive(Debug)]
pub enum EntryError {
    /// Stale position from before a delete; rejected before any mutation
    OutOfRange { position: usize, len: usize },
    /// Persistence failure; the in-memory table is not rolled back
    Persistence(String),
}

impl From<Error> for EntryError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidPosition { position, len } => EntryError::OutOfRange { position, len },
            other => EntryError::Persistence(other.to_string()),
        }
    }
}

impl IntoResponse for EntryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            EntryError::OutOfRange { position, len } => (
                StatusCode::BAD_REQUEST,
                format!("Position {} is out of range (table has {} rows)", position, len),
            ),
            EntryError::Persistence(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to persist record table: {}", msg),
            ),
        };

        let body = Html(format!(
            "<!DOCTYPE html><html><body><h1>Error</h1><p>{}</p><p><a href=\"/\">Back</a></p></body></html>",
            escape(&message)
        ));

        (status, body).into_response()
    }
}
