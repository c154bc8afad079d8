//! Content cells of a note.

use serde::{Deserialize, Serialize};

/// A single typed block of note content.
///
/// Deserialized from the `{type, data, language}` objects in a note's
/// `content.json`. Unknown cell types are kept as [`Cell::Other`] and emitted
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCell", into = "RawCell")]
pub enum Cell {
    /// Markdown cell; links are rewritten.
    Markdown(String),
    /// Rich text cell; treated like markdown.
    Text(String),
    /// Code cell with its language tag.
    Code { language: String, data: String },
    /// LaTeX formula.
    Latex(String),
    /// Any other cell type, passed through.
    Other { kind: String, data: String },
}

impl Cell {
    /// Returns the text of a markdown/text cell.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Markdown(data) | Cell::Text(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawCell {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        match raw.kind.as_str() {
            "markdown" => Cell::Markdown(raw.data),
            "text" => Cell::Text(raw.data),
            "code" => Cell::Code {
                language: raw.language.unwrap_or_default(),
                data: raw.data,
            },
            "latex" => Cell::Latex(raw.data),
            _ => Cell::Other {
                kind: raw.kind,
                data: raw.data,
            },
        }
    }
}

impl From<Cell> for RawCell {
    fn from(cell: Cell) -> Self {
        let (kind, data, language) = match cell {
            Cell::Markdown(data) => ("markdown".to_string(), data, None),
            Cell::Text(data) => ("text".to_string(), data, None),
            Cell::Code { language, data } => ("code".to_string(), data, Some(language)),
            Cell::Latex(data) => ("latex".to_string(), data, None),
            Cell::Other { kind, data } => (kind, data, None),
        };
        RawCell {
            kind,
            data,
            language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Cell {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_known_cell_types() {
        assert_eq!(
            parse(r##"{"type":"markdown","data":"# Hi"}"##),
            Cell::Markdown("# Hi".into())
        );
        assert_eq!(
            parse(r#"{"type":"text","data":"<p>x</p>"}"#),
            Cell::Text("<p>x</p>".into())
        );
        assert_eq!(
            parse(r#"{"type":"code","language":"rust","data":"fn main() {}"}"#),
            Cell::Code {
                language: "rust".into(),
                data: "fn main() {}".into()
            }
        );
        assert_eq!(
            parse(r#"{"type":"latex","data":"e=mc^2"}"#),
            Cell::Latex("e=mc^2".into())
        );
    }

    #[test]
    fn unknown_type_is_other() {
        let cell = parse(r#"{"type":"diagram","data":"A->B"}"#);
        assert_eq!(
            cell,
            Cell::Other {
                kind: "diagram".into(),
                data: "A->B".into()
            }
        );
        assert_eq!(cell.text(), None);
    }

    #[test]
    fn code_without_language_defaults_to_empty() {
        let cell = parse(r#"{"type":"code","data":"ls"}"#);
        assert_eq!(
            cell,
            Cell::Code {
                language: String::new(),
                data: "ls".into()
            }
        );
    }

    #[test]
    fn text_accessors() {
        assert_eq!(Cell::Markdown("a".into()).text(), Some("a"));
        assert_eq!(Cell::Text("<b>a</b>".into()).text(), Some("<b>a</b>"));

        let code = Cell::Code {
            language: "sh".into(),
            data: "ls".into(),
        };
        assert_eq!(code.text(), None);
    }

    #[test]
    fn serializes_back_to_quiver_shape() {
        let cell = Cell::Code {
            language: "py".into(),
            data: "pass".into(),
        };
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(value["type"], "code");
        assert_eq!(value["language"], "py");
        assert_eq!(value["data"], "pass");
    }
}
