//! Directory-tree enumeration of candidate ROM files.
//!
//! The scanner walks a root with `walkdir`, keeps files whose extension is
//! on the configured whitelist (case-insensitive), and either prunes the
//! quarantine subtree (sort/census) or walks only the quarantine subtree
//! (remerge). It has no side effects and every scan is restartable.
//!
//! The extension whitelist and quarantine name are injected at construction
//! via [`ScanOptions`]; there is no shared mutable state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::model::RomFile;

/// Scanner construction parameters.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// ROM extensions to accept, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Name of the quarantine directory under the collection root.
    pub quarantine_dir: String,
}

impl ScanOptions {
    /// Options as configured (or defaulted) in the config file.
    pub fn from_config(config: &Config) -> Self {
        Self {
            extensions: config.scanner.extensions.clone(),
            quarantine_dir: config.library.quarantine_dir.clone(),
        }
    }
}

/// Walks collection or quarantine trees for ROM files.
pub struct Scanner {
    extensions: BTreeSet<String>,
    quarantine_dir: String,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        let extensions = options
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        Self {
            extensions,
            quarantine_dir: options.quarantine_dir,
        }
    }

    /// The configured quarantine directory name.
    pub fn quarantine_dir(&self) -> &str {
        &self.quarantine_dir
    }

    /// The quarantine directory under a given collection root.
    pub fn quarantine_root(&self, root: &Path) -> PathBuf {
        root.join(&self.quarantine_dir)
    }

    /// All candidate ROM files under the collection root, excluding the
    /// quarantine subtree entirely. Sorted by path for stable output.
    pub fn collection(&self, root: &Path) -> Vec<RomFile> {
        let quarantine = self.quarantine_root(root);
        self.walk(root, Some(&quarantine))
    }

    /// All candidate ROM files under the quarantine root, with paths
    /// relative to it. An absent quarantine directory yields no files.
    pub fn quarantine(&self, root: &Path) -> Vec<RomFile> {
        let quarantine = self.quarantine_root(root);
        if !quarantine.is_dir() {
            return Vec::new();
        }
        self.walk(&quarantine, None)
    }

    fn walk(&self, root: &Path, prune: Option<&Path>) -> Vec<RomFile> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| Some(entry.path()) != prune)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.has_rom_extension(entry.path()))
            .filter_map(|entry| RomFile::new(entry.path(), root))
            .collect()
    }

    fn has_rom_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }
}
