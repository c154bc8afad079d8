//! Conversion of a Quiver library into a Jekyll site.
//!
//! Runs in three phases: discovery, destination planning for every note,
//! then rendering with link rewriting and media copying.

mod convert;
pub mod directive;
pub mod discovery;
mod error;
mod html;
pub mod links;
pub mod plan;
pub mod render;
pub mod template;

pub use convert::{
    ConvertOptions, ConvertSummary, ConvertedPost, DEFAULT_DRAFT_MARKER, convert, plan_library,
};
pub use discovery::{Discovery, discover};
pub use error::ConvertError;
pub use html::markdown_to_html;
pub use plan::{Plan, PlanOptions, PlannedNote, TargetFormat, plan};
pub use template::{PostTemplate, TemplateError, TemplateSyntax};
