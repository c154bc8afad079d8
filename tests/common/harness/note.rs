//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Builder for creating `.qvnote` directories.
///
/// Defaults: created and updated 2023-05-01 at local noon, no tags, no
/// cells, no resources.
#[derive(Debug, Clone)]
pub struct TestNote {
    uuid: String,
    title: String,
    created_at: i64,
    updated_at: Option<i64>,
    tags: Vec<String>,
    content_title: Option<String>,
    cells: Vec<Value>,
    resources: Vec<(String, Vec<u8>)>,
}

/// Epoch seconds of local noon on the given date.
pub fn local_noon(y: i32, m: u32, d: u32) -> i64 {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("Unambiguous local time")
        .timestamp()
}

impl TestNote {
    /// Creates a new test note with the given identity and title.
    pub fn new(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        let created = local_noon(2023, 5, 1);
        Self {
            uuid: uuid.into(),
            title: title.into(),
            created_at: created,
            updated_at: Some(created),
            tags: Vec::new(),
            content_title: None,
            cells: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Sets the creation date (local noon).
    pub fn created(mut self, y: i32, m: u32, d: u32) -> Self {
        self.created_at = local_noon(y, m, d);
        self
    }

    /// Sets the update date (local noon).
    pub fn updated(mut self, y: i32, m: u32, d: u32) -> Self {
        self.updated_at = Some(local_noon(y, m, d));
        self
    }

    /// Removes `updated_at` from the metadata.
    pub fn no_updated(mut self) -> Self {
        self.updated_at = None;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the title stored in `content.json`.
    pub fn content_title(mut self, title: impl Into<String>) -> Self {
        self.content_title = Some(title.into());
        self
    }

    pub fn markdown(mut self, data: impl Into<String>) -> Self {
        self.cells.push(json!({"type": "markdown", "data": data.into()}));
        self
    }

    pub fn text(mut self, data: impl Into<String>) -> Self {
        self.cells.push(json!({"type": "text", "data": data.into()}));
        self
    }

    pub fn code(mut self, language: &str, data: impl Into<String>) -> Self {
        self.cells
            .push(json!({"type": "code", "language": language, "data": data.into()}));
        self
    }

    pub fn latex(mut self, data: impl Into<String>) -> Self {
        self.cells.push(json!({"type": "latex", "data": data.into()}));
        self
    }

    /// Adds a media file under `resources/`.
    pub fn resource(mut self, name: impl Into<String>, bytes: &[u8]) -> Self {
        self.resources.push((name.into(), bytes.to_vec()));
        self
    }

    /// Writes the note into `parent` and returns its directory.
    pub fn write_to(&self, parent: &Path) -> PathBuf {
        let dir = parent.join(format!("{}.qvnote", self.uuid));
        std::fs::create_dir_all(&dir).expect("Failed to create note dir");

        let mut meta = json!({
            "title": self.title,
            "created_at": self.created_at,
            "tags": self.tags,
            "uuid": self.uuid,
        });
        if let Some(updated) = self.updated_at {
            meta["updated_at"] = json!(updated);
        }
        std::fs::write(dir.join("meta.json"), meta.to_string()).expect("Failed to write meta");

        let content = json!({
            "title": self.content_title.as_deref().unwrap_or(&self.title),
            "cells": self.cells,
        });
        std::fs::write(dir.join("content.json"), content.to_string())
            .expect("Failed to write content");

        if !self.resources.is_empty() {
            let resources = dir.join("resources");
            std::fs::create_dir_all(&resources).expect("Failed to create resources dir");
            for (name, bytes) in &self.resources {
                std::fs::write(resources.join(name), bytes).expect("Failed to write resource");
            }
        }

        dir
    }
}
