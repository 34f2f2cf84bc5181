//! CLI flag definitions and per-mode drivers.
//!
//! One flat flag interface covers the three modes: sort (default), remerge
//! (`--remerge`), and census (`--langs`, which overrides everything else).
//! Without `--move` every mode that could mutate the filesystem runs dry.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};

use crate::census;
use crate::classifier::Classifier;
use crate::config::{self, Config};
use crate::error::Error;
use crate::model::{Decision, KeepSet, LanguageCode, format_codes};
use crate::mover;
use crate::planner;
use crate::report::RunLog;
use crate::scanner::{ScanOptions, Scanner};

/// Sort, remerge, and analyze multi-system ROM libraries by language.
///
/// Default mode (no flags): sort report only (dry run), keeping English.
#[derive(Debug, Parser)]
#[command(name = "rom-minder", author, version, about, long_about = None)]
pub struct Cli {
    /// Collection root (defaults to the current directory)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Languages to KEEP (sort mode) or RESTORE (remerge mode). In remerge
    /// mode, `--keep` with zero codes restores every language. Ignored by
    /// --langs.
    #[arg(long, num_args = 0.., value_name = "CODE")]
    pub keep: Option<Vec<LanguageCode>>,

    /// Actually move files. Without this, it's all dry-run.
    #[arg(long = "move")]
    pub commit: bool,

    /// Undo sort: move ROMs from the quarantine directory back into their
    /// original folders.
    #[arg(long)]
    pub remerge: bool,

    /// (Only relevant with --remerge.) After remerge, delete any empty
    /// folders left in the quarantine directory.
    #[arg(long)]
    pub cleanup: bool,

    /// Report language counts per folder and in total. No moving, no
    /// sorting.
    #[arg(long)]
    pub langs: bool,

    /// Log file location (default: rom_sort_log.txt in the collection root)
    #[arg(long, value_name = "PATH", env = "ROM_MINDER_LOG")]
    pub log: Option<PathBuf>,
}

/// The resolved run mode. `--langs` beats `--remerge` beats sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sort,
    Remerge,
    Census,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Sort => "SORT",
            Mode::Remerge => "REMERGE",
            Mode::Census => "LANGS",
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.langs {
            Mode::Census
        } else if self.remerge {
            Mode::Remerge
        } else {
            Mode::Sort
        }
    }

    /// Resolves the effective keep-set for this run.
    pub fn keep_set(&self, config: &Config) -> KeepSet {
        let default = || KeepSet::codes(config.library.default_keep.iter().copied());
        match &self.keep {
            None => default(),
            Some(codes) if codes.is_empty() => match self.mode() {
                // Zero codes means "all languages" when restoring...
                Mode::Remerge | Mode::Census => KeepSet::All,
                // ...but in sort mode an empty keep is probably accidental.
                Mode::Sort => default(),
            },
            Some(codes) => KeepSet::codes(codes.iter().copied()),
        }
    }
}

/// Runs one full invocation: scan, plan, act, report, write the log.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load();

    let root = match cli.root.clone() {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(Error::NotADirectory(root).into());
    }

    let mode = cli.mode();
    let keep = cli.keep_set(&config);
    let scanner = Scanner::new(ScanOptions::from_config(&config));
    let classifier = Classifier::new();

    let started = Instant::now();
    let mut log = RunLog::new();
    write_header(&mut log, &root, &scanner, mode, &keep, &cli);

    match mode {
        Mode::Census => run_census(&scanner, &classifier, &root, &mut log),
        Mode::Remerge => {
            run_remerge(&scanner, &classifier, &keep, &root, cli.commit, &mut log);
            if cli.cleanup {
                run_cleanup(&scanner, &root, cli.commit, &mut log);
            }
        }
        Mode::Sort => run_sort(&scanner, &classifier, &keep, &root, cli.commit, &mut log),
    }

    log.section("RUNTIME");
    log.push(format!(
        "Time elapsed: {:.2} seconds",
        started.elapsed().as_secs_f64()
    ));
    log.push("====================================");

    let log_path = cli
        .log
        .clone()
        .unwrap_or_else(|| root.join(&config.library.log_file));
    let write_result = log.write_to(&log_path);

    log.print();
    write_result?;
    println!();
    println!("Log written to: {}", log_path.display());
    Ok(())
}

fn write_header(
    log: &mut RunLog,
    root: &Path,
    scanner: &Scanner,
    mode: Mode,
    keep: &KeepSet,
    cli: &Cli,
) {
    log.push("=== rom-minder report ===");
    log.push(format!(
        "Run at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    log.push(format!("Root dir: {}", root.display()));
    log.push(format!(
        "Quarantine dir: {}",
        scanner.quarantine_root(root).display()
    ));
    log.push(format!("Mode: {}", mode.as_str()));

    if mode == Mode::Census {
        log.push("Keep languages: (n/a for --langs)".to_string());
        log.push("Action: REPORT ONLY (LANGS STATS)".to_string());
    } else {
        log.push(format!("Keep languages: {}", keep.describe()));
        let action = if cli.commit { "(MOVE FILES)" } else { "(DRY RUN)" };
        log.push(format!("Action: {} {action}", mode.as_str()));
        let cleanup = if cli.cleanup && mode == Mode::Remerge {
            "yes"
        } else {
            "no"
        };
        log.push(format!("Cleanup requested: {cleanup}"));
    }
    log.blank();
}

/// Sort mode: quarantine everything whose language set misses the keep-set.
fn run_sort(
    scanner: &Scanner,
    classifier: &Classifier,
    keep: &KeepSet,
    root: &Path,
    commit: bool,
    log: &mut RunLog,
) {
    let files = scanner.collection(root);
    info!(files = files.len(), "sort scan complete");
    let planned = planner::plan_sort(classifier, keep, files);
    let quarantine_root = scanner.quarantine_root(root);

    let mut keep_entries = Vec::new();
    let mut move_entries = Vec::new();
    let mut error_entries = Vec::new();

    for plan in &planned {
        let rel = plan.file.rel_path.display();
        let detected = format_codes(&plan.langs);
        match plan.decision {
            Decision::Keep => {
                keep_entries.push(format!("[KEEP] {rel}  (detected={detected})"));
            }
            Decision::Move => {
                move_entries.push(format!(
                    "[MOVE] {rel}  ->  {}/{rel}  (detected={detected})",
                    scanner.quarantine_dir()
                ));
                if commit {
                    let dest = quarantine_root.join(&plan.file.rel_path);
                    if let Err(e) = mover::move_file(&plan.file.abs_path, &dest) {
                        error!("{e}");
                        error_entries.push(format!("[ERROR] {rel}: {e}"));
                    }
                }
            }
            Decision::Restore | Decision::Leave => unreachable!("remerge decision in sort plan"),
        }
    }

    let kept = keep_entries.len();
    let moved = move_entries.len() - error_entries.len();
    let errors = error_entries.len();

    log.section("KEPT FILES");
    log.extend(keep_entries);
    log.blank();
    log.section("MOVED (or WOULD MOVE) FILES");
    log.extend(move_entries);
    log.blank();
    if errors > 0 {
        log.section("ERRORS");
        log.extend(error_entries);
        log.blank();
    }
    log.section("SORT SUMMARY");
    log.push(format!("Total kept: {kept}"));
    log.push(format!("Total moved (or would move): {moved}"));
    if errors > 0 {
        log.push(format!("Total errors: {errors}"));
    }
}

/// Remerge mode: restore admitted files out of quarantine.
fn run_remerge(
    scanner: &Scanner,
    classifier: &Classifier,
    keep: &KeepSet,
    root: &Path,
    commit: bool,
    log: &mut RunLog,
) {
    let quarantine_root = scanner.quarantine_root(root);
    let quarantine_dir = scanner.quarantine_dir();

    if !quarantine_root.is_dir() {
        log.push(format!(
            "[INFO] No '{quarantine_dir}' folder found, nothing to remerge."
        ));
        log.section("REMERGE SUMMARY");
        log.push("Total moved back: 0".to_string());
        log.push("Total skipped: 0".to_string());
        return;
    }

    let files = scanner.quarantine(root);
    info!(files = files.len(), "remerge scan complete");
    let planned = planner::plan_remerge(classifier, keep, files);

    let mut remerge_entries = Vec::new();
    let mut skip_entries = Vec::new();
    let mut error_entries = Vec::new();

    for plan in &planned {
        let rel = plan.file.rel_path.display();
        let detected = format_codes(&plan.langs);
        match plan.decision {
            Decision::Restore => {
                remerge_entries.push(format!(
                    "[REMERGE] {quarantine_dir}/{rel} -> {rel}  (detected={detected})"
                ));
                if commit {
                    let dest = root.join(&plan.file.rel_path);
                    if let Err(e) = mover::move_file(&plan.file.abs_path, &dest) {
                        error!("{e}");
                        error_entries.push(format!("[ERROR] {quarantine_dir}/{rel}: {e}"));
                    }
                }
            }
            Decision::Leave => {
                skip_entries.push(format!(
                    "[SKIP] {quarantine_dir}/{rel}  (detected={detected})"
                ));
            }
            Decision::Keep | Decision::Move => unreachable!("sort decision in remerge plan"),
        }
    }

    let moved_back = remerge_entries.len() - error_entries.len();
    let skipped = skip_entries.len();
    let errors = error_entries.len();

    log.section("REMERGE MOVED (or WOULD MOVE)");
    log.extend(remerge_entries);
    log.blank();
    log.section("REMERGE SKIPPED");
    log.extend(skip_entries);
    log.blank();
    if errors > 0 {
        log.section("ERRORS");
        log.extend(error_entries);
        log.blank();
    }
    log.section("REMERGE SUMMARY");
    log.push(format!("Total moved back (or would move): {moved_back}"));
    log.push(format!("Total skipped: {skipped}"));
    if errors > 0 {
        log.push(format!("Total errors: {errors}"));
    }
}

/// Post-remerge pruning of empty quarantine subdirectories.
fn run_cleanup(scanner: &Scanner, root: &Path, commit: bool, log: &mut RunLog) {
    let quarantine_root = scanner.quarantine_root(root);
    log.blank();

    if !quarantine_root.is_dir() {
        log.push(format!(
            "[INFO] No '{}' folder found to clean.",
            scanner.quarantine_dir()
        ));
        return;
    }

    let display = |path: &Path| {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    };

    if commit {
        let removed = mover::remove_empty_dirs(&quarantine_root);
        log.section("CLEANUP");
        if removed.is_empty() {
            log.push("No empty directories were removed; none were empty.".to_string());
        } else {
            log.push(format!("Removed {} empty directories:", removed.len()));
            for dir in &removed {
                log.push(format!("  {}", display(dir)));
            }
        }
    } else {
        let removable = mover::find_removable_dirs(&quarantine_root);
        log.section("CLEANUP (DRY RUN)");
        if removable.is_empty() {
            log.push("No empty directories to remove.".to_string());
        } else {
            log.push(format!(
                "Would remove {} empty directories:",
                removable.len()
            ));
            for dir in &removable {
                log.push(format!("  {}", display(dir)));
            }
        }
    }
}

/// Census mode: read-only language statistics.
fn run_census(
    scanner: &Scanner,
    classifier: &Classifier,
    root: &Path,
    log: &mut RunLog,
) {
    let files = scanner.collection(root);
    info!(files = files.len(), "census scan complete");
    let report = census::take_census(classifier, &files);
    report.render(log);
}
