//! Rendering a planned note into a post.

use std::collections::BTreeSet;

use crate::domain::{Cell, Destination, DestinationTable};
use crate::export::html::markdown_to_html;
use crate::export::links::rewrite_links;
use crate::export::plan::{PlannedNote, TargetFormat};
use crate::export::template::{PageFields, PostTemplate, format_tags};
use crate::export::{ConvertError, directive};

/// Body of a note with its links rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    pub text: String,
    /// Distinct media file names referenced by the note.
    pub resources: BTreeSet<String>,
    pub note_links: usize,
    pub warnings: Vec<String>,
}

/// A post ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    /// Full document, template applied.
    pub document: String,
    pub resources: BTreeSet<String>,
    pub note_links: usize,
    pub warnings: Vec<String>,
}

/// Renders a note's cells into one markdown body.
///
/// The `{jkfn:...}` directive is dropped from the first cell. Markdown and
/// text cells have their links rewritten; code cells become `~~~` fences,
/// LaTeX cells `$$` blocks, anything else is copied verbatim.
///
/// # Errors
///
/// Returns [`ConvertError::UnknownNoteLink`] for links to notes missing from
/// `table`.
pub fn render_content(
    note: &PlannedNote,
    own: &Destination,
    table: &DestinationTable,
) -> Result<RenderedContent, ConvertError> {
    let mut rendered = RenderedContent::default();

    for (index, cell) in note.document.content.cells.iter().enumerate() {
        match cell {
            Cell::Markdown(data) | Cell::Text(data) => {
                let data = if index == 0 {
                    directive::strip(data)
                } else {
                    data.clone()
                };
                let rewrite = rewrite_links(&data, &note.id, own, table)?;
                rendered.text.push('\n');
                rendered.text.push_str(&rewrite.text);
                rendered.text.push('\n');
                rendered.resources.extend(rewrite.resources);
                rendered.note_links += rewrite.note_links;
                rendered.warnings.extend(rewrite.warnings);
            }
            Cell::Code { language, data } => {
                rendered.text.push_str("\n~~~ ");
                rendered.text.push_str(language);
                rendered.text.push('\n');
                rendered.text.push_str(data);
                rendered.text.push_str("\n~~~\n");
            }
            Cell::Latex(data) => {
                rendered.text.push_str("\n$$\n");
                rendered.text.push_str(data);
                rendered.text.push_str("\n$$\n");
            }
            Cell::Other { data, .. } => {
                rendered.text.push('\n');
                rendered.text.push_str(data);
                rendered.text.push('\n');
            }
        }
    }

    Ok(rendered)
}

/// Renders a complete post: content, target format, then the template.
///
/// `own` is the note's entry in `table`.
///
/// # Errors
///
/// Returns an error for unknown note links, out-of-range timestamps or
/// template failures.
pub fn render_post(
    note: &PlannedNote,
    own: &Destination,
    table: &DestinationTable,
    template: &PostTemplate,
    format: TargetFormat,
) -> Result<RenderedPost, ConvertError> {
    let content = render_content(note, own, table)?;
    let body = match format {
        TargetFormat::Markdown => content.text,
        TargetFormat::Html => markdown_to_html(&content.text),
    };

    let meta = &note.document.meta;
    let invalid = || ConvertError::InvalidTimestamp {
        note: note.id.clone(),
        timestamp: meta.created_at,
    };
    let created = meta.created().ok_or_else(invalid)?;
    let updated = meta.updated().ok_or_else(invalid)?;

    let fields = PageFields {
        title: note.document.display_title(),
        content: &body,
        uuid: &meta.uuid,
        tags: format_tags(&meta.tags),
        tag_list: &meta.tags,
        created: created.format("%Y-%m-%d").to_string(),
        updated: updated.format("%Y-%m-%d").to_string(),
        url: &own.url,
    };

    Ok(RenderedPost {
        document: template.render(&fields)?,
        resources: content.resources,
        note_links: content.note_links,
        warnings: content.warnings,
    })
}
