//! Markdown to HTML conversion for the HTML target format.

use pulldown_cmark::{Options, Parser, html};

/// Converts rendered post content to HTML.
///
/// Enables the extensions Quiver notes commonly use:
/// - Tables
/// - Footnotes
/// - Strikethrough
/// - Task lists
///
/// Raw HTML from text cells is passed through, so rewritten `src`/`href`
/// attributes survive.
///
/// # Example
///
/// ```
/// use quiver2jekyll::export::markdown_to_html;
///
/// let html = markdown_to_html("# Hello\n\n![a](/resources/2023/a.png)");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("src=\"/resources/2023/a.png\""));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
