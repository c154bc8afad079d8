//! Link rewriting for converted notes.
//!
//! Quiver references embedded media and other notes through reserved URL
//! schemes. A single forward scan finds every reference and builds the
//! rewritten text in one pass:
//!
//! - `(quiver-image-url/<file>)`, `(quiver-file-url/<file>)`: markdown
//!   image/link targets, optionally followed by a title (`(scheme/a.png "t")`)
//! - `src="quiver-image-url/<file>"`, `href="quiver-file-url/<file>"`: HTML
//!   attributes, single or double quoted
//! - `(quiver-note-url/<note-id>)`: a link to another note

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Component, Path};

use tracing::warn;

use crate::domain::{ContainerId, Destination, DestinationTable};
use crate::export::ConvertError;

/// Scheme of embedded images.
pub const IMAGE_SCHEME: &str = "quiver-image-url";
/// Scheme of attached files.
pub const FILE_SCHEME: &str = "quiver-file-url";
/// Scheme of links to other notes.
pub const NOTE_SCHEME: &str = "quiver-note-url";

const RESOURCE_SCHEMES: [&str; 2] = [IMAGE_SCHEME, FILE_SCHEME];
const ATTRIBUTES: [&str; 2] = ["src", "href"];

/// Surface syntax of a resource reference, kept when rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkForm {
    /// Markdown target `(scheme/file<suffix>)`; `suffix` holds an optional title.
    Paren { suffix: String },
    /// HTML attribute `name=<quote>scheme/file<quote>`.
    Attribute { name: &'static str, quote: char },
}

/// What a reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A media file in the note's `resources/` folder.
    Resource { filename: String, form: LinkForm },
    /// Another note, by identity.
    Note { id: String },
}

/// A reference found in markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte range of the whole reference.
    pub range: Range<usize>,
    pub target: LinkTarget,
}

/// Finds every Quiver reference in `text`, in order and non-overlapping.
///
/// A reference must close on the line it starts on.
pub fn scan(text: &str) -> Vec<LinkMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let found = match text.as_bytes()[pos] {
            b'(' => scan_paren(text, pos),
            b's' | b'h' => scan_attribute(text, pos),
            _ => None,
        };

        match found {
            Some(m) => {
                pos = m.range.end;
                matches.push(m);
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    matches
}

/// Returns the offset of `close` in `body` if it comes before the line ends.
fn close_on_line(body: &str, close: char) -> Option<usize> {
    let end = body.find(|c: char| c == close || c == '\n')?;
    body[end..].starts_with(close).then_some(end)
}

fn scan_paren(text: &str, start: usize) -> Option<LinkMatch> {
    let after = &text[start + 1..];
    let (scheme, body_start) = [IMAGE_SCHEME, FILE_SCHEME, NOTE_SCHEME]
        .into_iter()
        .find(|scheme| {
            after
                .strip_prefix(scheme)
                .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|scheme| (scheme, start + 1 + scheme.len() + 1))?;

    let body_len = close_on_line(&text[body_start..], ')')?;
    let body = &text[body_start..body_start + body_len];
    let range = start..body_start + body_len + 1;

    let target = if scheme == NOTE_SCHEME {
        LinkTarget::Note {
            id: body.to_string(),
        }
    } else {
        let split = body.find(char::is_whitespace).unwrap_or(body.len());
        LinkTarget::Resource {
            filename: body[..split].to_string(),
            form: LinkForm::Paren {
                suffix: body[split..].to_string(),
            },
        }
    };

    Some(LinkMatch { range, target })
}

fn scan_attribute(text: &str, start: usize) -> Option<LinkMatch> {
    let rest = &text[start..];
    let name = ATTRIBUTES
        .into_iter()
        .find(|name| rest.strip_prefix(name).is_some_and(|r| r.starts_with('=')))?;

    let quote_pos = start + name.len() + 1;
    let quote = text[quote_pos..]
        .chars()
        .next()
        .filter(|c| *c == '"' || *c == '\'')?;

    let value_start = quote_pos + 1;
    let value = &text[value_start..];
    let scheme = RESOURCE_SCHEMES.into_iter().find(|scheme| {
        value
            .strip_prefix(scheme)
            .is_some_and(|r| r.starts_with('/'))
    })?;

    let filename_start = value_start + scheme.len() + 1;
    let filename_len = close_on_line(&text[filename_start..], quote)?;

    Some(LinkMatch {
        range: start..filename_start + filename_len + 1,
        target: LinkTarget::Resource {
            filename: text[filename_start..filename_start + filename_len].to_string(),
            form: LinkForm::Attribute { name, quote },
        },
    })
}

/// Whether `name` is a single file name inside the note's `resources/`.
///
/// Empty names, absolute paths, `.`/`..` and anything with a separator are
/// rejected, so media is never read or written outside its directory.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Result of rewriting one block of markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRewrite {
    /// Text with every resolvable reference rewritten.
    pub text: String,
    /// Distinct media file names to copy into the note's media directory.
    pub resources: BTreeSet<String>,
    /// Number of rewritten links to other notes.
    pub note_links: usize,
    /// References left untouched because they were malformed.
    pub warnings: Vec<String>,
}

/// Rewrites the Quiver references in one markdown/text block of `note`.
///
/// Resource references point at `own`'s media URL afterwards; note
/// references point at the target note's public URL. Malformed resource
/// references (empty file name, or anything but a plain file name) are left
/// as they are and reported in
/// [`LinkRewrite::warnings`].
///
/// # Errors
///
/// Returns [`ConvertError::UnknownNoteLink`] if a note reference names a note
/// that is not in `table`.
pub fn rewrite_links(
    text: &str,
    note: &ContainerId,
    own: &Destination,
    table: &DestinationTable,
) -> Result<LinkRewrite, ConvertError> {
    let mut out = LinkRewrite {
        text: String::with_capacity(text.len()),
        ..LinkRewrite::default()
    };
    let mut cursor = 0;

    for m in scan(text) {
        out.text.push_str(&text[cursor..m.range.start]);
        let original = &text[m.range.clone()];
        cursor = m.range.end;

        match m.target {
            LinkTarget::Resource { filename, .. } if !is_plain_file_name(&filename) => {
                warn!(note = %note, link = original, "resource link without a plain file name, left unchanged");
                out.warnings.push(format!(
                    "note {}: resource link without a plain file name: {}",
                    note, original
                ));
                out.text.push_str(original);
            }
            LinkTarget::Resource { filename, form } => {
                let url = own.media_file_url(&filename);
                match form {
                    LinkForm::Paren { suffix } => {
                        out.text.push('(');
                        out.text.push_str(&url);
                        out.text.push_str(&suffix);
                        out.text.push(')');
                    }
                    LinkForm::Attribute { name, quote } => {
                        out.text.push_str(name);
                        out.text.push('=');
                        out.text.push(quote);
                        out.text.push_str(&url);
                        out.text.push(quote);
                    }
                }
                out.resources.insert(filename);
            }
            LinkTarget::Note { id } => {
                let target = table
                    .lookup(&id)
                    .ok_or_else(|| ConvertError::UnknownNoteLink {
                        note: note.clone(),
                        target: id.clone(),
                    })?;
                out.text.push('(');
                out.text.push_str(&target.url);
                out.text.push(')');
                out.note_links += 1;
            }
        }
    }

    out.text.push_str(&text[cursor..]);
    Ok(out)
}
