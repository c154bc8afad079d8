//! Metadata and content documents of notebooks and notes.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Cell;

/// A notebook's `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMeta {
    /// Human-readable display name.
    pub name: String,
}

/// A note's `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMeta {
    pub title: String,
    /// Creation time, epoch seconds.
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_at: i64,
    /// Last update time, epoch seconds.
    #[serde(default, deserialize_with = "optional_epoch_seconds")]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub uuid: String,
}

impl NoteMeta {
    /// Creation time in the local time zone.
    ///
    /// Returns `None` if the timestamp is out of range.
    pub fn created(&self) -> Option<DateTime<Local>> {
        local_datetime(self.created_at)
    }

    /// Update time in the local time zone, falling back to the creation time.
    pub fn updated(&self) -> Option<DateTime<Local>> {
        local_datetime(self.updated_at.unwrap_or(self.created_at))
    }

    /// Whether the note title marks it as an unpublished draft.
    ///
    /// An empty marker never matches.
    pub fn is_draft(&self, draft_marker: &str) -> bool {
        !draft_marker.is_empty() && self.title.starts_with(draft_marker)
    }
}

/// A note's `content.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

/// A note loaded from disk: both documents plus where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDocument {
    pub meta: NoteMeta,
    pub content: NoteContent,
}

impl NoteDocument {
    /// Title shown on the rendered page: the content title, else the metadata title.
    pub fn display_title(&self) -> &str {
        self.content.title.as_deref().unwrap_or(&self.meta.title)
    }

    /// The first cell, if it is a markdown/text cell.
    pub fn first_text_cell(&self) -> Option<&str> {
        self.content.cells.first().and_then(|c| c.text())
    }
}

fn local_datetime(secs: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(secs, 0).single()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Epoch {
    Int(i64),
    Float(f64),
}

impl From<Epoch> for i64 {
    fn from(epoch: Epoch) -> Self {
        match epoch {
            Epoch::Int(secs) => secs,
            Epoch::Float(secs) => secs.trunc() as i64,
        }
    }
}

fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Epoch::deserialize(deserializer).map(i64::from)
}

fn optional_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Epoch>::deserialize(deserializer).map(|e| e.map(i64::from))
}
