//! File I/O for reading the library and writing posts, with atomic writes.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path has no parent directory: {path}")]
    NoParent { path: PathBuf },

    #[error("invalid UTF-8 in {path}")]
    InvalidEncoding { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            io::ErrorKind::InvalidData => FsError::InvalidEncoding { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Reads a UTF-8 text file. A leading byte order mark is dropped.
pub fn read_text(path: &Path) -> Result<String, FsError> {
    let content = std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))?;
    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}

/// Lists the direct children of a directory, sorted by file name.
///
/// Sorting keeps discovery order, and with it last-write-wins merging,
/// stable across runs and platforms.
pub fn list_children(dir: &Path) -> Result<Vec<PathBuf>, FsError> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map(|e| e.into_path()).map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.into());
                match e.into_io_error() {
                    Some(io) => FsError::from_io(&path, io),
                    None => FsError::Io {
                        path,
                        source: io::Error::other("filesystem loop"),
                    },
                }
            })
        })
        .collect()
}

/// Creates a directory and its parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))
}

/// Copies a file byte-for-byte, creating the destination directory if needed.
///
/// Returns the number of bytes copied.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, FsError> {
    let parent = dest
        .parent()
        .ok_or_else(|| FsError::NoParent { path: dest.into() })?;
    ensure_dir(parent)?;
    std::fs::copy(src, dest).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound if !src.exists() => FsError::NotFound { path: src.into() },
        _ => FsError::from_io(dest, e),
    })
}

/// Writes a file atomically, creating its parent directories.
///
/// Uses a temporary file in the target directory and an atomic rename so a
/// failed run never leaves a half-written post behind.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::NoParent { path: path.into() })?;
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(content).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}
