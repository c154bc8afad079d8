//! Container kinds of a Quiver library and their identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Directory suffix of the root library container.
pub const LIBRARY_EXTENSION: &str = "qvlibrary";
/// Directory suffix of a notebook container.
pub const NOTEBOOK_EXTENSION: &str = "qvnotebook";
/// Directory suffix of a note container.
pub const NOTE_EXTENSION: &str = "qvnote";

/// Identity of the notebook Quiver uses for deleted notes.
const TRASH_ID: &str = "trash";

/// The kind of a container, recognised by the suffix of its directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Root library (`*.qvlibrary`), groups notebooks, has no metadata.
    Library,
    /// Notebook (`*.qvnotebook`), named group of notes.
    Notebook,
    /// Note (`*.qvnote`), leaf with metadata and content cells.
    Note,
    /// Anything else; ignored during discovery.
    Other,
}

impl ContainerKind {
    /// Classifies a path by its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiver2jekyll::domain::ContainerKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(ContainerKind::of(Path::new("Tech.qvnotebook")), ContainerKind::Notebook);
    /// assert_eq!(ContainerKind::of(Path::new("meta.json")), ContainerKind::Other);
    /// ```
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(LIBRARY_EXTENSION) => Self::Library,
            Some(NOTEBOOK_EXTENSION) => Self::Notebook,
            Some(NOTE_EXTENSION) => Self::Note,
            _ => Self::Other,
        }
    }
}

/// Stable identity of a notebook or note.
///
/// Quiver names container directories `<uuid>.<suffix>`, so the identity is
/// the directory stem. It is treated as an opaque string: special notebooks
/// such as `Inbox` and `Trash` use plain words instead of UUIDs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates an identity from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the identity from a container path (its file stem).
    ///
    /// Returns `None` if the path has no usable file stem.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(Self::new)
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved Trash notebook (case-insensitive).
    pub fn is_trash(&self) -> bool {
        self.0.eq_ignore_ascii_case(TRASH_ID)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId(\"{}\")", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
