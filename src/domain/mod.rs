//! Core types: containers, notes, content cells, destination records

mod cell;
mod container;
mod destination;
mod note;

pub use cell::Cell;
pub use container::{
    ContainerId, ContainerKind, LIBRARY_EXTENSION, NOTE_EXTENSION, NOTEBOOK_EXTENSION,
};
pub use destination::{Destination, DestinationTable};
pub use note::{NoteContent, NoteDocument, NoteMeta, NotebookMeta};
