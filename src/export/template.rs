//! Post templates.
//!
//! A template receives a fixed record of fields ([`PageFields`]). Two
//! syntaxes are supported:
//!
//! - `placeholder` (default): `{title}`, `{content}`, `{uuid}`, `{tags}`,
//!   `{created}`, `{updated}`, `{url}` are substituted; every other brace,
//!   including unknown placeholders and Liquid tags, is left untouched.
//! - `jinja`: a minijinja template over the same fields plus `tag_list`.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::FsError;
use crate::infra::fs::read_text;

/// Built-in Jekyll post template in placeholder syntax.
pub const DEFAULT_POST_TEMPLATE: &str = r#"---
layout: post
title: "{title}"
date: {created}
last_modified_at: {updated}
uuid: {uuid}
tags: {tags}
---
{content}"#;

/// Built-in Jekyll post template in jinja syntax.
pub const DEFAULT_JINJA_POST_TEMPLATE: &str = r#"---
layout: post
title: "{{ title }}"
date: {{ created }}
last_modified_at: {{ updated }}
uuid: {{ uuid }}
tags:{% for tag in tag_list %}
 - {{ tag }}{% endfor %}
---
{{ content }}"#;

const TEMPLATE_NAME: &str = "post";

/// Errors loading or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("template error: {0}")]
    Jinja(#[from] minijinja::Error),
}

/// Template syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSyntax {
    /// `{name}` placeholders, unknown ones left as-is
    #[default]
    Placeholder,
    /// minijinja (`{{ name }}`)
    Jinja,
}

/// Fields available to a post template.
#[derive(Debug, Clone, Serialize)]
pub struct PageFields<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub uuid: &'a str,
    /// Tags as a newline-prefixed bulleted list.
    pub tags: String,
    /// Tags as a list (jinja only).
    pub tag_list: &'a [String],
    /// Creation date, `YYYY-MM-DD`.
    pub created: String,
    /// Last update date, `YYYY-MM-DD`.
    pub updated: String,
    /// Public URL of the post.
    pub url: &'a str,
}

impl PageFields<'_> {
    fn placeholder(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(self.title),
            "content" => Some(self.content),
            "uuid" => Some(self.uuid),
            "tags" => Some(&self.tags),
            "created" => Some(&self.created),
            "updated" => Some(&self.updated),
            "url" => Some(self.url),
            _ => None,
        }
    }
}

/// Renders tags as `"\n - tag"` per tag, keeping their order.
///
/// # Examples
///
/// ```
/// use quiver2jekyll::export::template::format_tags;
///
/// let tags = vec!["rust".to_string(), "notes".to_string()];
/// assert_eq!(format_tags(&tags), "\n - rust\n - notes");
/// ```
pub fn format_tags(tags: &[String]) -> String {
    tags.iter().map(|tag| format!("\n - {}", tag)).collect()
}

/// A loaded post template.
#[derive(Debug, Clone)]
pub struct PostTemplate {
    source: String,
    syntax: TemplateSyntax,
}

impl PostTemplate {
    /// Creates a template from source text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Jinja`] if a jinja template does not compile.
    pub fn new(source: impl Into<String>, syntax: TemplateSyntax) -> Result<Self, TemplateError> {
        let template = Self {
            source: source.into(),
            syntax,
        };
        if syntax == TemplateSyntax::Jinja {
            let mut env = Environment::new();
            env.add_template(TEMPLATE_NAME, &template.source)?;
        }
        Ok(template)
    }

    /// Loads a template file.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if the file cannot be read.
    pub fn load(path: &Path, syntax: TemplateSyntax) -> Result<Self, TemplateError> {
        let source = read_text(path).map_err(|source| TemplateError::Read {
            path: path.into(),
            source,
        })?;
        Self::new(source, syntax)
    }

    /// The built-in Jekyll post template for `syntax`.
    pub fn builtin(syntax: TemplateSyntax) -> Self {
        let source = match syntax {
            TemplateSyntax::Placeholder => DEFAULT_POST_TEMPLATE,
            TemplateSyntax::Jinja => DEFAULT_JINJA_POST_TEMPLATE,
        };
        Self {
            source: source.to_string(),
            syntax,
        }
    }

    pub fn syntax(&self) -> TemplateSyntax {
        self.syntax
    }

    /// Renders the template with `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Jinja`] if jinja rendering fails.
    pub fn render(&self, fields: &PageFields) -> Result<String, TemplateError> {
        match self.syntax {
            TemplateSyntax::Placeholder => Ok(substitute(&self.source, fields)),
            TemplateSyntax::Jinja => {
                let mut env = Environment::new();
                env.add_template(TEMPLATE_NAME, &self.source)?;
                let tmpl = env.get_template(TEMPLATE_NAME)?;
                Ok(tmpl.render(fields)?)
            }
        }
    }
}

/// Substitutes known `{name}` placeholders in one forward pass.
fn substitute(source: &str, fields: &PageFields) -> String {
    let mut out = String::with_capacity(source.len() + fields.content.len());
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after
            .find('}')
            .and_then(|close| fields.placeholder(&after[..close]).map(|v| (close, v)));

        match value {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
