//! The plain-text run log.
//!
//! Every invocation accumulates its per-file decisions, aggregate counts,
//! and elapsed time into a [`RunLog`], which is printed to the console and
//! written to a log file in the collection root (or wherever `--log`
//! points). The log is a product artifact and deliberately separate from
//! `tracing` diagnostics.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// An append-only collection of report lines.
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a `---- TITLE ----` section header.
    pub fn section(&mut self, title: &str) {
        self.lines.push(format!("---- {title} ----"));
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append many lines.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    /// Render the whole log, one line per entry, trailing newline included.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(out, "{line}");
        }
        out
    }

    /// Write the log to a file, replacing any previous run's log.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|e| Error::log_write(path, e))
    }

    /// Print the log to stdout.
    pub fn print(&self) {
        print!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_joins_lines_with_trailing_newline() {
        let mut log = RunLog::new();
        log.push("=== report ===");
        log.section("SORT SUMMARY");
        log.blank();
        log.push("Total kept: 3");

        assert_eq!(
            log.render(),
            "=== report ===\n---- SORT SUMMARY ----\n\nTotal kept: 3\n"
        );
    }

    #[test]
    fn test_write_to_creates_the_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("rom_sort_log.txt");

        let mut log = RunLog::new();
        log.push("[KEEP] NES/Game (USA).nes  (detected=[en])");
        log.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[KEEP] NES/Game (USA).nes"));
    }

    #[test]
    fn test_write_to_replaces_previous_log() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("rom_sort_log.txt");
        std::fs::write(&path, "stale run\n").unwrap();

        let mut log = RunLog::new();
        log.push("fresh run");
        log.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("fresh run"));
    }

    #[test]
    fn test_write_to_unwritable_path_reports_the_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing dir/log.txt");

        let err = RunLog::new().write_to(&path).unwrap_err();
        assert!(err.to_string().contains("log.txt"));
    }
}
