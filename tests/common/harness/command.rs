//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `quiver2jekyll` binary.
pub struct Q2jCommand {
    args: Vec<String>,
    home: Option<PathBuf>,
}

impl Q2jCommand {
    /// Creates a new command for the `quiver2jekyll` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            home: None,
        }
    }

    /// Points `HOME` and `XDG_CONFIG_HOME` at `path`.
    pub fn home(mut self, path: &Path) -> Self {
        self.home = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Adds a path argument.
    pub fn path(self, path: &Path) -> Self {
        self.args([path.to_string_lossy()])
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd =
            Command::cargo_bin("quiver2jekyll").expect("Failed to find quiver2jekyll binary");
        cmd.args(&self.args).env_remove("RUST_LOG");
        if let Some(home) = &self.home {
            cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures `convert INPUT -o OUTPUT`.
    pub fn convert(self, input: &Path, output: &Path) -> Self {
        self.args(["convert"]).path(input).args(["-o"]).path(output)
    }

    /// Configures `plan INPUT -o OUTPUT`.
    pub fn plan(self, input: &Path, output: &Path) -> Self {
        self.args(["plan"]).path(input).args(["-o"]).path(output)
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--cli-format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--cli-format", "json"])
    }

    /// Adds `--cli-format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--cli-format", "paths"])
    }
}

impl Default for Q2jCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        Q2jCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = Q2jCommand::new()
            .convert(Path::new("Lib.qvlibrary"), Path::new("site"))
            .format_json();
        assert_eq!(
            cmd.get_args(),
            ["convert", "Lib.qvlibrary", "-o", "site", "--cli-format", "json"]
        );
    }
}
