//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::export::{DEFAULT_DRAFT_MARKER, TargetFormat, TemplateSyntax};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default Quiver library
    pub input: Option<PathBuf>,

    /// Default output root
    pub output: Option<PathBuf>,

    /// Post template file
    pub template: Option<PathBuf>,

    /// Syntax of the post template
    pub template_syntax: Option<TemplateSyntax>,

    /// Title prefix marking drafts
    pub draft_marker: Option<String>,

    /// Generated post format
    pub format: Option<TargetFormat>,

    /// Notebook display name to output folder name
    pub notebook_names: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from `path`, or the default config file location.
    ///
    /// Returns default config if the default file doesn't exist. An
    /// explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/quiver2jekyll/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quiver2jekyll")
            .join("config.toml")
    }

    /// Resolve the input directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `INPUT` argument
    /// 2. Config file `input` setting
    /// 3. Current working directory
    pub fn input(&self, cli_input: Option<&PathBuf>) -> PathBuf {
        cli_input
            .cloned()
            .or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the output root: CLI `--output`, config `output`, then `_site`.
    pub fn output(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("_site"))
    }

    pub fn template(&self, cli_template: Option<&PathBuf>) -> Option<PathBuf> {
        cli_template.cloned().or_else(|| self.template.clone())
    }

    pub fn template_syntax(&self, cli_syntax: Option<TemplateSyntax>) -> TemplateSyntax {
        cli_syntax.or(self.template_syntax).unwrap_or_default()
    }

    pub fn draft_marker(&self, cli_marker: Option<&str>) -> String {
        cli_marker
            .or(self.draft_marker.as_deref())
            .unwrap_or(DEFAULT_DRAFT_MARKER)
            .to_string()
    }

    pub fn format(&self, cli_format: Option<TargetFormat>) -> TargetFormat {
        cli_format.or(self.format).unwrap_or_default()
    }

    /// Notebook renames: config table overlaid with CLI `--rename` entries.
    pub fn notebook_names(&self, cli_renames: &[(String, String)]) -> BTreeMap<String, String> {
        let mut names = self.notebook_names.clone();
        names.extend(cli_renames.iter().cloned());
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_has_no_input() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.notebook_names.is_empty());
    }

    #[test]
    fn input_prefers_cli_arg() {
        let config = Config {
            input: Some(PathBuf::from("/config/Lib.qvlibrary")),
            ..Config::default()
        };
        let cli_input = PathBuf::from("/cli/Lib.qvlibrary");
        assert_eq!(
            config.input(Some(&cli_input)),
            PathBuf::from("/cli/Lib.qvlibrary")
        );
    }

    #[test]
    fn input_falls_back_to_config() {
        let config = Config {
            input: Some(PathBuf::from("/config/Lib.qvlibrary")),
            ..Config::default()
        };
        assert_eq!(config.input(None), PathBuf::from("/config/Lib.qvlibrary"));
    }

    #[test]
    fn input_falls_back_to_cwd() {
        let config = Config::default();
        assert_eq!(config.input(None), PathBuf::from("."));
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::default();
        assert_eq!(config.output(None), PathBuf::from("_site"));
        assert_eq!(config.draft_marker(None), "_");
        assert_eq!(config.format(None), TargetFormat::Markdown);
        assert_eq!(config.template_syntax(None), TemplateSyntax::Placeholder);
        assert!(config.template(None).is_none());
    }

    #[test]
    fn empty_cli_draft_marker_overrides_config() {
        let config = Config {
            draft_marker: Some("WIP".into()),
            ..Config::default()
        };
        assert_eq!(config.draft_marker(Some("")), "");
        assert_eq!(config.draft_marker(None), "WIP");
    }

    #[test]
    fn cli_renames_overlay_config_table() {
        let config = Config::parse(
            r#"
            [notebook_names]
            "Tech Notes" = "tech"
            "Life" = "life"
            "#,
        )
        .unwrap();

        let names = config.notebook_names(&[("Life".into(), "personal".into())]);

        assert_eq!(names.get("Tech Notes").map(String::as_str), Some("tech"));
        assert_eq!(names.get("Life").map(String::as_str), Some("personal"));
    }

    #[test]
    fn parses_full_config() {
        let config = Config::parse(
            r#"
            input = "/notes/Lib.qvlibrary"
            output = "/blog"
            template = "/blog/post.tpl"
            template_syntax = "jinja"
            draft_marker = "WIP "
            format = "html"
            "#,
        )
        .unwrap();

        assert_eq!(config.output(None), PathBuf::from("/blog"));
        assert_eq!(config.template_syntax(None), TemplateSyntax::Jinja);
        assert_eq!(config.format(None), TargetFormat::Html);
        assert_eq!(config.draft_marker(None), "WIP ");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Config::parse("format = \"pdf\"").is_err());
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/q2j.toml"))).unwrap_err();
        assert!(err.to_string().contains("q2j.toml"));
    }

    #[test]
    fn load_explicit_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "output = \"/srv/site\"").unwrap();

        let config = Config::load(Some(temp.path())).unwrap();

        assert_eq!(config.output(None), PathBuf::from("/srv/site"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("quiver2jekyll/config.toml"));
    }
}
