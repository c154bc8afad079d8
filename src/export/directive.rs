//! The `{jkfn:<name>}` file-name directive.
//!
//! A note may pin its output file name by starting with a markdown cell that
//! contains `{jkfn:custom-name}`. The directive is metadata: it picks the
//! stem during planning and is removed from the rendered content.

use std::sync::LazyLock;

use regex::Regex;

// Single-line and non-greedy: the value ends at the first closing brace.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{jkfn:(.*?)\}").expect("directive pattern is valid"));

/// Returns the trimmed value of the first directive in `text`.
///
/// # Examples
///
/// ```
/// use quiver2jekyll::export::directive::find_file_name;
///
/// assert_eq!(find_file_name("{jkfn: my-post }\nbody"), Some("my-post"));
/// assert_eq!(find_file_name("no directive"), None);
/// ```
pub fn find_file_name(text: &str) -> Option<&str> {
    DIRECTIVE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Removes every directive from `text`.
pub fn strip(text: &str) -> String {
    DIRECTIVE_RE.replace_all(text, "").into_owned()
}
