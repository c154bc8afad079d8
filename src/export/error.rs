//! Errors that abort a conversion run.

use thiserror::Error;

use crate::domain::ContainerId;
use crate::export::template::TemplateError;
use crate::infra::{ArchiveError, FsError};

/// A fatal conversion error.
///
/// Every variant names the offending note, link target or path.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("note {note} links to unknown note '{target}' (draft, trashed, or missing)")]
    UnknownNoteLink { note: ContainerId, target: String },

    #[error("note {note} has no planned destination")]
    Unplanned { note: ContainerId },

    #[error("note {note} has an invalid timestamp: {timestamp}")]
    InvalidTimestamp { note: ContainerId, timestamp: i64 },
}
