//! Discovery: walks a Quiver library and collects publishable notes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{ContainerId, ContainerKind};
use crate::infra::fs::list_children;
use crate::infra::{ArchiveError, read_note_meta, read_notebook_meta};

/// Result of walking a container tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Note identity to note directory.
    pub notes: BTreeMap<ContainerId, PathBuf>,
    /// Notebook identity to display name.
    pub notebooks: BTreeMap<ContainerId, String>,
}

impl Discovery {
    /// Merges another subtree's results into this one.
    ///
    /// Identities are assumed unique; on collision the later entry wins.
    pub fn merge(mut self, other: Discovery) -> Self {
        for (id, path) in other.notes {
            if let Some(previous) = self.notes.insert(id.clone(), path) {
                warn!(note = %id, previous = %previous.display(), "duplicate note identity, keeping the later one");
            }
        }
        for (id, name) in other.notebooks {
            if let Some(previous) = self.notebooks.insert(id.clone(), name) {
                warn!(notebook = %id, %previous, "duplicate notebook identity, keeping the later one");
            }
        }
        self
    }

    /// Fills in display names of parent notebooks discovery never visited.
    ///
    /// That happens when the root itself is a single note. After this pass
    /// every note whose parent is a notebook has that notebook's name in
    /// [`Discovery::notebooks`].
    pub fn complete_notebook_names(mut self) -> Result<Self, ArchiveError> {
        let missing: Vec<(ContainerId, PathBuf)> = self
            .notes
            .values()
            .filter_map(|note_dir| parent_notebook(note_dir))
            .filter(|(id, _)| !self.notebooks.contains_key(id))
            .collect();

        for (id, dir) in missing {
            if self.notebooks.contains_key(&id) {
                continue;
            }
            let meta = read_notebook_meta(&dir)?;
            debug!(notebook = %id, name = %meta.name, "resolved notebook name");
            self.notebooks.insert(id, meta.name);
        }
        Ok(self)
    }
}

/// Parent notebook of a note directory, if the parent is a notebook.
pub(crate) fn parent_notebook(note_dir: &Path) -> Option<(ContainerId, PathBuf)> {
    let parent = note_dir.parent()?;
    if ContainerKind::of(parent) != ContainerKind::Notebook {
        return None;
    }
    ContainerId::from_path(parent).map(|id| (id, parent.to_path_buf()))
}

/// Walks the container tree rooted at `root`.
///
/// - Libraries are pure groupings: every child is walked.
/// - Notebooks record their display name; the `Trash` notebook is skipped
///   with everything in it.
/// - Notes whose title starts with `draft_marker` are skipped.
/// - Anything else, including plain files, is ignored.
///
/// A root that is not a directory yields an empty result.
///
/// # Errors
///
/// Returns an error if a notebook or note that is not skipped has missing or
/// malformed metadata.
pub fn discover(root: &Path, draft_marker: &str) -> Result<Discovery, ArchiveError> {
    if !root.is_dir() {
        return Ok(Discovery::default());
    }

    match ContainerKind::of(root) {
        ContainerKind::Library => discover_children(root, draft_marker),
        ContainerKind::Notebook => {
            let Some(id) = ContainerId::from_path(root) else {
                return Ok(Discovery::default());
            };
            if id.is_trash() {
                debug!(path = %root.display(), "skipping trash notebook");
                return Ok(Discovery::default());
            }

            let meta = read_notebook_meta(root)?;
            let mut own = Discovery::default();
            own.notebooks.insert(id, meta.name);

            Ok(own.merge(discover_children(root, draft_marker)?))
        }
        ContainerKind::Note => {
            let Some(id) = ContainerId::from_path(root) else {
                return Ok(Discovery::default());
            };

            let meta = read_note_meta(root)?;
            if meta.is_draft(draft_marker) {
                debug!(note = %id, title = %meta.title, "skipping draft");
                return Ok(Discovery::default());
            }

            debug!(note = %id, title = %meta.title, "discovered note");
            let mut own = Discovery::default();
            own.notes.insert(id, root.to_path_buf());
            Ok(own)
        }
        ContainerKind::Other => Ok(Discovery::default()),
    }
}

fn discover_children(dir: &Path, draft_marker: &str) -> Result<Discovery, ArchiveError> {
    list_children(dir)?
        .iter()
        .try_fold(Discovery::default(), |acc, child| -> Result<_, ArchiveError> {
            Ok(acc.merge(discover(child, draft_marker)?))
        })
}
