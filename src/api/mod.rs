//! HTTP API handlers for ohako

pub mod buildinfo;
pub mod entries;
pub mod health;
pub mod stats;
pub mod ui;

pub use buildinfo::get_build_info;
pub use entries::{create_entry, delete_entry, list_entries, update_entry};
pub use health::health_routes;
pub use stats::{get_stats, get_trends};
pub use ui::serve_index;

use serde::Deserialize;

use crate::store::Genre;

/// Genre filter query parameter shared by the read APIs
#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    pub genre: Option<String>,
}

/// "All", absent, or unknown selections mean no filtering
pub(crate) fn parse_genre_filter(raw: Option<&str>) -> Option<Genre> {
    raw.filter(|g| *g != "All").and_then(Genre::parse)
}

/// Display label for the active filter
pub(crate) fn genre_label(filter: Option<Genre>) -> String {
    filter
        .map(|g| g.as_str().to_string())
        .unwrap_or_else(|| "All".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genre_filter() {
        assert_eq!(parse_genre_filter(None), None);
        assert_eq!(parse_genre_filter(Some("All")), None);
        assert_eq!(parse_genre_filter(Some("no-such-genre")), None);
        assert_eq!(parse_genre_filter(Some("J-POP")), Some(Genre::JPop));
    }

    #[test]
    fn test_genre_label() {
        assert_eq!(genre_label(None), "All");
        assert_eq!(genre_label(Some(Genre::Enka)), "Enka");
    }
}
