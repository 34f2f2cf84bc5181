//! Test utilities and fixtures for rom-minder tests.
//!
//! Builds throwaway collection trees under a tempdir so scanner/mover/CLI
//! tests can exercise real filesystem behavior.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Creates a temporary collection root containing the given files.
///
/// Paths are relative to the root (`"NES/Game (USA).nes"`), intermediate
/// directories are created, and each file gets small dummy contents. Keep
/// the `TempDir` alive for the duration of the test.
pub fn temp_collection(files: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = dir.path().to_path_buf();

    for rel in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, format!("rom bytes: {rel}")).expect("Failed to write fixture file");
    }

    (dir, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_collection_builds_nested_files() {
        let (_dir, root) = temp_collection(&["NES/Game (USA).nes", "GB/Sub/Deep (J).gb"]);
        assert!(root.join("NES/Game (USA).nes").is_file());
        assert!(root.join("GB/Sub/Deep (J).gb").is_file());
    }
}
