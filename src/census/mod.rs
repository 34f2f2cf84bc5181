//! Read-only language census over the collection.
//!
//! Counts detected languages per top-level folder and globally. A file
//! contributes to every code it matches, so per-code totals can exceed the
//! number of files scanned. The census never mutates anything.

use std::collections::BTreeMap;

use crate::classifier::Classifier;
use crate::model::{LanguageCode, RomFile};
use crate::report::RunLog;

/// Census label for files sitting directly in the collection root.
const ROOT_BUCKET: &str = "(root)";

/// Aggregated language counts for one census run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CensusReport {
    /// Per-top-level-folder counts, keyed by folder name (files directly in
    /// the root bucket under [`ROOT_BUCKET`]).
    pub folders: BTreeMap<String, BTreeMap<LanguageCode, u64>>,
    /// Global counts across the whole collection.
    pub totals: BTreeMap<LanguageCode, u64>,
    /// Number of files scanned (not the sum of the counts).
    pub files_scanned: u64,
}

/// Classifies every scanned file and tallies the results.
pub fn take_census(classifier: &Classifier, files: &[RomFile]) -> CensusReport {
    let mut report = CensusReport::default();

    for file in files {
        let bucket = file
            .top_folder
            .clone()
            .unwrap_or_else(|| ROOT_BUCKET.to_string());
        let folder = report.folders.entry(bucket).or_default();

        for code in classifier.classify(file.stem()) {
            *folder.entry(code).or_default() += 1;
            *report.totals.entry(code).or_default() += 1;
        }
        report.files_scanned += 1;
    }

    report
}

impl CensusReport {
    /// Renders the census into the run log: one block per folder, then the
    /// global totals, counts ordered most-common-first.
    pub fn render(&self, log: &mut RunLog) {
        log.push("=== LANGUAGE SUMMARY ===");

        if self.folders.is_empty() {
            log.push("No ROMs found to analyze.");
            log.blank();
        } else {
            for (folder, counts) in &self.folders {
                log.push(format!("Folder: {folder}"));
                for (code, count) in most_common(counts) {
                    log.push(format!("  {}: {count}", code.as_str().to_uppercase()));
                }
                log.blank();
            }
        }

        log.push("TOTALS:");
        if self.totals.is_empty() {
            log.push("  (none)");
        } else {
            for (code, count) in most_common(&self.totals) {
                log.push(format!("  {}: {count}", code.as_str().to_uppercase()));
            }
        }
        log.push(format!("Files scanned: {}", self.files_scanned));
        log.blank();
    }
}

/// Counts ordered by descending count, then code, for stable output.
fn most_common(counts: &BTreeMap<LanguageCode, u64>) -> Vec<(LanguageCode, u64)> {
    let mut pairs: Vec<_> = counts.iter().map(|(c, n)| (*c, *n)).collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    pairs
}
