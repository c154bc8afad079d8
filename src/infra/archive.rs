//! Reading notebook and note documents from a Quiver library on disk.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{NoteContent, NoteDocument, NoteMeta, NotebookMeta};
use crate::infra::fs::{FsError, read_text};

/// Metadata file of notebooks and notes.
pub const META_FILE: &str = "meta.json";
/// Content file of notes.
pub const CONTENT_FILE: &str = "content.json";
/// Sub-directory of a note holding its media.
pub const RESOURCES_DIR: &str = "resources";

/// Errors reading a container's documents.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArchiveError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| ArchiveError::Parse {
        path: path.into(),
        source,
    })
}

/// Reads `meta.json` of a notebook directory.
pub fn read_notebook_meta(notebook_dir: &Path) -> Result<NotebookMeta, ArchiveError> {
    read_json(&notebook_dir.join(META_FILE))
}

/// Reads `meta.json` of a note directory.
pub fn read_note_meta(note_dir: &Path) -> Result<NoteMeta, ArchiveError> {
    read_json(&note_dir.join(META_FILE))
}

/// Reads `content.json` of a note directory.
pub fn read_note_content(note_dir: &Path) -> Result<NoteContent, ArchiveError> {
    read_json(&note_dir.join(CONTENT_FILE))
}

/// Reads both documents of a note.
pub fn read_note(note_dir: &Path) -> Result<NoteDocument, ArchiveError> {
    Ok(NoteDocument {
        meta: read_note_meta(note_dir)?,
        content: read_note_content(note_dir)?,
    })
}

/// Source path of a media file referenced by a note.
pub fn resource_path(note_dir: &Path, filename: &str) -> PathBuf {
    note_dir.join(RESOURCES_DIR).join(filename)
}
