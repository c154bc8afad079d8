//! Destination planning: output path, URL and media location of every note.
//!
//! Planning finishes for all notes before any note is rendered, because
//! cross-note links need the complete [`DestinationTable`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ContainerId, Destination, DestinationTable, NoteDocument};
use crate::export::ConvertError;
use crate::export::directive;
use crate::export::discovery::{Discovery, parent_notebook};
use crate::infra::{read_note, sanitize, title_stem};

/// Folder used for notes that do not live in a notebook.
pub const UNGROUPED_NOTEBOOK: &str = "untitle_notebook";

/// Output directory (and URL segment) for copied media.
pub const RESOURCES_SEGMENT: &str = "resources";

/// Format of the generated posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// Markdown posts (`.md`)
    #[default]
    Markdown,
    /// HTML posts (`.html`), content converted from markdown
    Html,
}

impl TargetFormat {
    /// File extension of generated posts.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Markdown => "md",
            TargetFormat::Html => "html",
        }
    }
}

/// Inputs to destination planning.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    /// Root of the generated site.
    pub output_root: PathBuf,
    /// Notebook display name to replacement folder name.
    pub notebook_names: BTreeMap<String, String>,
    pub format: TargetFormat,
}

/// A note ready for rendering.
#[derive(Debug, Clone)]
pub struct PlannedNote {
    pub id: ContainerId,
    /// Source `.qvnote` directory.
    pub dir: PathBuf,
    pub document: NoteDocument,
}

/// Result of planning: the shared destination table plus loaded notes.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub destinations: DestinationTable,
    pub notes: Vec<PlannedNote>,
}

/// Plans the destination of every discovered note.
///
/// `discovery` should have gone through
/// [`Discovery::complete_notebook_names`]; notes whose parent notebook name
/// is still unknown are placed in [`UNGROUPED_NOTEBOOK`].
///
/// # Errors
///
/// Returns an error if a note's documents cannot be read or its creation
/// timestamp is out of range.
pub fn plan(discovery: &Discovery, options: &PlanOptions) -> Result<Plan, ConvertError> {
    let mut result = Plan::default();
    let mut claimed: HashMap<PathBuf, ContainerId> = HashMap::new();

    for (id, dir) in &discovery.notes {
        let document = read_note(dir)?;
        let group = group_name(id, dir, discovery, options);
        let destination = destination_for(id, &group, &document, options)?;

        debug!(note = %id, path = %destination.path.display(), url = %destination.url, "planned");
        if let Some(other) = claimed.insert(destination.path.clone(), id.clone()) {
            warn!(
                note = %id,
                other = %other,
                path = %destination.path.display(),
                "two notes share an output path; the later write wins"
            );
        }

        result.destinations.insert(id.clone(), destination);
        result.notes.push(PlannedNote {
            id: id.clone(),
            dir: dir.clone(),
            document,
        });
    }

    Ok(result)
}

/// Effective folder name of a note: its notebook's display name after renames.
fn group_name(id: &ContainerId, dir: &Path, discovery: &Discovery, options: &PlanOptions) -> String {
    let display_name = match parent_notebook(dir) {
        Some((notebook, _)) => match discovery.notebooks.get(&notebook) {
            Some(name) => name.as_str(),
            None => {
                warn!(note = %id, %notebook, "notebook name unknown, treating note as ungrouped");
                UNGROUPED_NOTEBOOK
            }
        },
        None => UNGROUPED_NOTEBOOK,
    };

    options
        .notebook_names
        .get(display_name)
        .cloned()
        .unwrap_or_else(|| display_name.to_string())
}

/// File-name stem of a note: the `{jkfn:...}` directive in its first
/// markdown/text cell if present, else the lower-cased title.
pub fn note_stem(document: &NoteDocument) -> String {
    match document.first_text_cell().and_then(directive::find_file_name) {
        Some(custom) => sanitize(custom),
        None => title_stem(&document.meta.title),
    }
}

/// Computes the destination record of one note in `group`.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidTimestamp`] if the creation time cannot be
/// represented in local time.
pub fn destination_for(
    id: &ContainerId,
    group: &str,
    document: &NoteDocument,
    options: &PlanOptions,
) -> Result<Destination, ConvertError> {
    let created = document
        .meta
        .created()
        .ok_or_else(|| ConvertError::InvalidTimestamp {
            note: id.clone(),
            timestamp: document.meta.created_at,
        })?;

    let stem = note_stem(document);
    let date = created.format("%Y-%m-%d");
    let year = created.format("%Y").to_string();

    let file_name = format!("{}-{}.{}", date, stem, options.format.extension());

    Ok(Destination {
        group: group.to_string(),
        path: options.output_root.join(group).join(file_name),
        url: format!("/{}/{}", group, stem),
        media_dir: options.output_root.join(RESOURCES_SEGMENT).join(&year),
        media_url: format!("/{}/{}", RESOURCES_SEGMENT, year),
        stem,
    })
}
