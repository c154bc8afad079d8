//! File-name stems for converted posts.

/// Stem used when sanitizing leaves nothing.
pub const UNTITLED: &str = "untitled";

/// Converts a title or custom name into a URL-safe file-name stem.
///
/// - Replaces whitespace with underscores
/// - Replaces every other character outside `[A-Za-z0-9-_]` with a hyphen
/// - Trims leading/trailing hyphens and underscores
/// - Returns "untitled" for empty results
///
/// Case is preserved; callers lower-case titles themselves.
///
/// # Examples
///
/// ```
/// use quiver2jekyll::infra::sanitize;
///
/// assert_eq!(sanitize("Hello World"), "Hello_World");
/// assert_eq!(sanitize("C++ tips!"), "C--_tips");
/// assert_eq!(sanitize(""), "untitled");
/// ```
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                '_'
            } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == '-' || c == '_');
    if trimmed.is_empty() {
        return UNTITLED.to_string();
    }
    trimmed.to_string()
}

/// Stem derived from a note title: sanitized, then lower-cased.
pub fn title_stem(title: &str) -> String {
    sanitize(title).to_lowercase()
}
