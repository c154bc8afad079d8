//! Destination records: where each note ends up.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::ContainerId;

/// Computed output location of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// Effective notebook folder name (after renames).
    pub group: String,
    /// Sanitized file-name stem.
    pub stem: String,
    /// Output file, `<output>/<group>/<date>-<stem>.<ext>`.
    pub path: PathBuf,
    /// Public URL of the post, `/<group>/<stem>`.
    pub url: String,
    /// Output directory for media, `<output>/resources/<year>`.
    pub media_dir: PathBuf,
    /// Public URL prefix for media, `/resources/<year>`.
    pub media_url: String,
}

impl Destination {
    /// Public URL of a media file copied for this note.
    pub fn media_file_url(&self, filename: &str) -> String {
        format!("{}/{}", self.media_url, filename)
    }
}

/// Lookup table from note identity to destination.
///
/// Built once by planning and read-only while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DestinationTable(BTreeMap<ContainerId, Destination>);

impl DestinationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, returning the one it replaced.
    pub fn insert(&mut self, id: ContainerId, destination: Destination) -> Option<Destination> {
        self.0.insert(id, destination)
    }

    pub fn get(&self, id: &ContainerId) -> Option<&Destination> {
        self.0.get(id)
    }

    /// Looks up a note by the string form of its identity.
    pub fn lookup(&self, id: &str) -> Option<&Destination> {
        self.0.get(&ContainerId::new(id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
