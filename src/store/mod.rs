//! Record store: the ordered table of karaoke attempts and its CSV mirror
//!
//! The in-memory table is authoritative between requests. Every mutation
//! rewrites the full file before success is reported, keeping disk and
//! memory byte-for-byte reconcilable at each response boundary.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

mod file;

/// Fixed genre set for attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "J-POP")]
    JPop,
    Rock,
    Anime,
    Enka,
    Western,
    Other,
}

impl Genre {
    /// All genres in form-selector order (J-POP is the default option)
    pub const ALL: [Genre; 6] = [
        Genre::JPop,
        Genre::Rock,
        Genre::Anime,
        Genre::Enka,
        Genre::Western,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::JPop => "J-POP",
            Genre::Rock => "Rock",
            Genre::Anime => "Anime",
            Genre::Enka => "Enka",
            Genre::Western => "Western",
            Genre::Other => "Other",
        }
    }

    /// Strict parse of one of the six fixed names
    pub fn parse(name: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.as_str() == name)
    }

    /// Coercing parse: unknown names map to Other, mirroring the score
    /// coercion recovery policy on load
    pub fn parse_lossy(name: &str) -> Genre {
        Genre::parse(name).unwrap_or(Genre::Other)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged karaoke attempt (one row of the table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub genre: Genre,
    /// None is the missing sentinel produced by load-time coercion of
    /// unparseable legacy score cells
    pub score: Option<u32>,
    pub memo: String,
    /// Stamped at creation, never edited afterwards
    pub registered_date: NaiveDate,
}

/// Replacement field values for an update; the registered date is not
/// part of a patch and is never touched by one
#[derive(Debug, Clone)]
pub struct EntryPatch {
    pub title: String,
    pub genre: Genre,
    pub score: Option<u32>,
    pub memo: String,
}

/// Ordered table of attempts, mirrored to a CSV file after every mutation
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    table: Vec<Entry>,
}

impl RecordStore {
    /// Read the persisted table if present; an absent file yields an
    /// empty table
    pub fn load(path: &Path) -> Result<RecordStore> {
        let table = if path.exists() {
            file::read_table(path)?
        } else {
            Vec::new()
        };

        Ok(RecordStore {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.table.get(position)
    }

    /// Append at the end and persist the full table
    pub fn append(&mut self, entry: Entry) -> Result<()> {
        self.table.push(entry);
        self.persist()
    }

    /// Overwrite title/genre/score/memo at `position` and persist.
    /// The registered date at that position is left untouched.
    pub fn update(&mut self, position: usize, patch: EntryPatch) -> Result<()> {
        self.check_position(position)?;

        let entry = &mut self.table[position];
        entry.title = patch.title;
        entry.genre = patch.genre;
        entry.score = patch.score;
        entry.memo = patch.memo;

        self.persist()
    }

    /// Remove the row at `position` and persist. Subsequent rows shift
    /// down by one; positions are not stable identifiers across deletes.
    pub fn delete(&mut self, position: usize) -> Result<Entry> {
        self.check_position(position)?;

        let removed = self.table.remove(position);
        self.persist()?;
        Ok(removed)
    }

    /// Rows matching the genre selection, with their original table
    /// positions; `None` selects the full table
    pub fn filtered(&self, genre: Option<Genre>) -> Vec<(usize, &Entry)> {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, entry)| genre.map_or(true, |g| entry.genre == g))
            .collect()
    }

    /// Distinct genres currently present in the table, alphabetically
    /// sorted by display name (filter selector options)
    pub fn present_genres(&self) -> Vec<Genre> {
        let mut genres: Vec<Genre> = Vec::new();
        for entry in &self.table {
            if !genres.contains(&entry.genre) {
                genres.push(entry.genre);
            }
        }
        genres.sort_by_key(|g| g.as_str());
        genres
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position < self.table.len() {
            Ok(())
        } else {
            Err(Error::InvalidPosition {
                position,
                len: self.table.len(),
            })
        }
    }

    fn persist(&self) -> Result<()> {
        file::write_table(&self.path, &self.table)
    }
}
