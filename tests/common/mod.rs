//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Temporary directory holding CSV fixtures
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write `lines` as a CSV file and return its path
    pub fn csv(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&path, content).expect("write fixture");
        path
    }

    /// Files in the fixture directory whose name starts with `prefix`
    pub fn files_starting_with(&self, prefix: &str) -> Vec<PathBuf> {
        fs::read_dir(self.dir.path())
            .expect("read temp dir")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
            })
            .collect()
    }
}
