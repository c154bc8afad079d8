//! Whole-library conversion: discover, plan, then render every note.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{ContainerId, Destination};
use crate::export::ConvertError;
use crate::export::discovery::discover;
use crate::export::plan::{Plan, PlanOptions, PlannedNote, TargetFormat, plan};
use crate::export::render::{RenderedPost, render_post};
use crate::export::template::PostTemplate;
use crate::infra::archive::resource_path;
use crate::infra::fs::{copy_file, write_atomic};

/// Default prefix marking a note title as a draft.
pub const DEFAULT_DRAFT_MARKER: &str = "_";

/// Inputs to a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Library, notebook or note directory to convert.
    pub input: PathBuf,
    /// Notes whose title starts with this are skipped.
    pub draft_marker: String,
    pub plan: PlanOptions,
}

/// One written post.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedPost {
    pub id: ContainerId,
    pub path: PathBuf,
    pub url: String,
    pub resources: usize,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertSummary {
    pub notes_converted: usize,
    pub resources_copied: usize,
    pub note_links: usize,
    pub warnings: Vec<String>,
    pub posts: Vec<ConvertedPost>,
}

/// Discovers and plans every publishable note under `input`.
///
/// Nothing is written. The returned plan holds the complete destination
/// table.
///
/// # Errors
///
/// Returns an error if a container's documents cannot be read.
pub fn plan_library(input: &Path, draft_marker: &str, options: &PlanOptions) -> Result<Plan, ConvertError> {
    let discovery = discover(input, draft_marker)?.complete_notebook_names()?;
    debug!(
        notes = discovery.notes.len(),
        notebooks = discovery.notebooks.len(),
        "discovery finished"
    );
    plan(&discovery, options)
}

/// Converts a Quiver library into Jekyll posts.
///
/// Planning completes for all notes before the first post is rendered.
/// The first fatal error stops the run; posts already written stay.
///
/// # Errors
///
/// Returns an error for unreadable input, links to unknown notes, missing
/// media files, template failures or failed writes.
pub fn convert(options: &ConvertOptions, template: &PostTemplate) -> Result<ConvertSummary, ConvertError> {
    let plan = plan_library(&options.input, &options.draft_marker, &options.plan)?;
    write_plan(&plan, template, options.plan.format)
}

/// Renders and writes every note of a finished plan.
fn write_plan(plan: &Plan, template: &PostTemplate, format: TargetFormat) -> Result<ConvertSummary, ConvertError> {
    let mut summary = ConvertSummary::default();

    for note in &plan.notes {
        let destination = plan
            .destinations
            .get(&note.id)
            .ok_or_else(|| ConvertError::Unplanned { note: note.id.clone() })?;
        let post = render_post(note, destination, &plan.destinations, template, format)?;
        let copied = write_post(note, &post, destination)?;

        info!(
            note = %note.id,
            path = %destination.path.display(),
            resources = copied,
            "converted"
        );

        summary.notes_converted += 1;
        summary.resources_copied += copied;
        summary.note_links += post.note_links;
        summary.warnings.extend(post.warnings);
        summary.posts.push(ConvertedPost {
            id: note.id.clone(),
            path: destination.path.clone(),
            url: destination.url.clone(),
            resources: copied,
        });
    }

    Ok(summary)
}

/// Copies a post's media and writes the post file. Returns the number of
/// media files copied.
fn write_post(note: &PlannedNote, post: &RenderedPost, destination: &Destination) -> Result<usize, ConvertError> {
    for filename in &post.resources {
        let src = resource_path(&note.dir, filename);
        let dest = destination.media_dir.join(filename);
        let bytes = copy_file(&src, &dest)?;
        debug!(note = %note.id, file = %filename, bytes, "copied resource");
    }

    write_atomic(&destination.path, post.document.as_bytes())?;
    Ok(post.resources.len())
}
