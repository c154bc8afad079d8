//! File I/O, library documents, file-name stems

pub mod archive;
pub mod fs;
mod slug;

pub use archive::{ArchiveError, read_note, read_note_meta, read_notebook_meta};
pub use fs::FsError;
pub use slug::{UNTITLED, sanitize, title_stem};
