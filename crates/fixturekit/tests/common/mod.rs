//! Shared test utilities for fixturekit integration tests.
//!
//! `Workspace` is a throwaway project directory with helpers to lay out
//! source files and read them back.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use assert_fs::TempDir;

use fixturekit::config::StripperConfig;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let child = self.dir.child(relative);
        child.write_str(content).expect("Failed to write fixture file");
        child.path().to_path_buf()
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).expect("Failed to read file")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Stripper settings matching the built-in defaults.
pub fn default_stripper() -> StripperConfig {
    StripperConfig::default()
}
