//! Test harness for CLI integration tests.
//!
//! Provides isolated Quiver libraries, programmatic note creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod note;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::Q2jCommand;
#[allow(unused_imports)]
pub use env::{LIBRARY_DIR, TestEnv};
#[allow(unused_imports)]
pub use note::{TestNote, local_noon};
