//! Shared integration test helpers for layerterm.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::SettingsDir;
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

pub const GUID_BASE: &str = "{6f1c2a9e-0000-4000-8000-000000000001}";
pub const GUID_CHILD: &str = "{6f1c2a9e-0000-4000-8000-000000000002}";
pub const GUID_SIBLING: &str = "{6f1c2a9e-0000-4000-8000-000000000003}";

/// A temporary directory holding settings documents.
///
/// The directory is removed when this value is dropped, so keep it alive
/// until all file I/O in the test has completed.
pub struct SettingsDir {
    pub dir: TempDir,
}

impl SettingsDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `value` as pretty JSON to `name` inside the directory
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap())
            .expect("Failed to write settings document");
        path
    }

    /// Write raw text to `name` inside the directory
    pub fn write_text(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, text).expect("Failed to write settings document");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
