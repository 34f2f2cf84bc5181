//! File relocation and quarantine cleanup.
//!
//! Moves are structure-preserving: the destination is always the target
//! root joined with the file's relative path, so the quarantine tree
//! mirrors the collection tree and remerge is the exact inverse of sort.
//! An existing destination is never overwritten; the new arrival gets a
//! ` (n)` suffix before its extension instead.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Moves one file into place, creating intermediate directories and
/// disambiguating collisions. Returns the final destination, which differs
/// from `dest` only when a collision was resolved.
pub fn move_file(source: &Path, dest: &Path) -> Result<PathBuf> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::move_failed(source, e))?;
    }

    let final_dest = unique_destination(dest);

    // Rename first; fall back to copy + delete when the destination is on
    // another filesystem.
    if fs::rename(source, &final_dest).is_err() {
        fs::copy(source, &final_dest).map_err(|e| Error::move_failed(source, e))?;
        fs::remove_file(source).map_err(|e| Error::move_failed(source, e))?;
    }

    Ok(final_dest)
}

/// Picks a destination that does not collide with an existing file by
/// appending ` (1)`, ` (2)`, ... before the extension.
pub fn unique_destination(dest: &Path) -> PathBuf {
    if !dest.exists() {
        return dest.to_path_buf();
    }

    let parent = dest.parent().unwrap_or_else(|| Path::new(""));
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = dest.extension().map(|e| e.to_string_lossy().into_owned());

    let mut counter = 1u32;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem} ({counter}).{ext}"),
            None => format!("{stem} ({counter})"),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Removes empty directories under (never including) the quarantine root,
/// deepest first so that emptied parents qualify in the same pass.
/// Returns the removed paths; individual failures are skipped.
pub fn remove_empty_dirs(quarantine_root: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    if !quarantine_root.is_dir() {
        return removed;
    }

    for entry in WalkDir::new(quarantine_root)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if dir_is_empty(path) && fs::remove_dir(path).is_ok() {
            removed.push(path.to_path_buf());
        }
    }

    removed
}

/// Reports which directories under the quarantine root a commit-mode
/// cleanup would remove, without touching anything. A directory qualifies
/// when it contains nothing but other qualifying directories.
pub fn find_removable_dirs(quarantine_root: &Path) -> Vec<PathBuf> {
    let mut removable = Vec::new();
    if quarantine_root.is_dir() {
        // The root itself is never a candidate, so only its descendants are
        // collected.
        collect_removable(quarantine_root, &mut removable);
    }
    removable
}

/// Pushes qualifying subdirectories of `dir` (post-order) and reports
/// whether `dir` itself would end up empty.
fn collect_removable(dir: &Path, out: &mut Vec<PathBuf>) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    let mut would_be_empty = true;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if collect_removable(&path, out) {
                out.push(path);
            } else {
                would_be_empty = false;
            }
        } else {
            would_be_empty = false;
        }
    }
    would_be_empty
}

fn dir_is_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_move_file_creates_parents_and_moves() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("NES/Game (Japan).nes");
        let dest = temp.path().join("Moved ROMS/NES/Game (Japan).nes");
        write(&source, "rom bytes");

        let final_dest = move_file(&source, &dest).unwrap();

        assert_eq!(final_dest, dest);
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "rom bytes");
    }

    #[test]
    fn test_move_file_never_overwrites() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("incoming/Game.nes");
        let dest = temp.path().join("out/Game.nes");
        write(&source, "new");
        write(&dest, "old");

        let final_dest = move_file(&source, &dest).unwrap();

        assert_eq!(final_dest, temp.path().join("out/Game (1).nes"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
        assert_eq!(fs::read_to_string(&final_dest).unwrap(), "new");
    }

    #[test]
    fn test_unique_destination_increments_until_free() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("Game.nes"), "a");
        write(&temp.path().join("Game (1).nes"), "b");

        let candidate = unique_destination(&temp.path().join("Game.nes"));
        assert_eq!(candidate, temp.path().join("Game (2).nes"));
    }

    #[test]
    fn test_unique_destination_without_extension() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("GAMELIST"), "a");

        let candidate = unique_destination(&temp.path().join("GAMELIST"));
        assert_eq!(candidate, temp.path().join("GAMELIST (1)"));
    }

    #[test]
    fn test_move_file_missing_source_reports_the_path() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("gone.nes");
        let dest = temp.path().join("out/gone.nes");

        let err = move_file(&source, &dest).unwrap_err();
        assert!(err.to_string().contains("gone.nes"));
    }

    #[test]
    fn test_remove_empty_dirs_is_deepest_first_and_spares_root() {
        let temp = tempdir().unwrap();
        let quarantine = temp.path().join("Moved ROMS");
        fs::create_dir_all(quarantine.join("NES/Disc 1")).unwrap();
        fs::create_dir_all(quarantine.join("GB")).unwrap();
        write(&quarantine.join("SNES/Game.sfc"), "stay");

        let removed = remove_empty_dirs(&quarantine);

        // NES only became empty after Disc 1 went; both are gone.
        assert!(removed.contains(&quarantine.join("NES/Disc 1")));
        assert!(removed.contains(&quarantine.join("NES")));
        assert!(removed.contains(&quarantine.join("GB")));
        assert!(!quarantine.join("NES").exists());
        assert!(quarantine.join("SNES/Game.sfc").exists());
        assert!(quarantine.exists());
    }

    #[test]
    fn test_remove_empty_dirs_skips_non_empty() {
        let temp = tempdir().unwrap();
        let quarantine = temp.path().join("Moved ROMS");
        write(&quarantine.join("NES/Game.nes"), "stay");

        let removed = remove_empty_dirs(&quarantine);
        assert!(removed.is_empty());
        assert!(quarantine.join("NES/Game.nes").exists());
    }

    #[test]
    fn test_find_removable_dirs_simulates_without_deleting() {
        let temp = tempdir().unwrap();
        let quarantine = temp.path().join("Moved ROMS");
        fs::create_dir_all(quarantine.join("NES/Disc 1")).unwrap();
        write(&quarantine.join("SNES/Game.sfc"), "stay");

        let removable = find_removable_dirs(&quarantine);

        assert!(removable.contains(&quarantine.join("NES/Disc 1")));
        assert!(removable.contains(&quarantine.join("NES")));
        assert!(!removable.contains(&quarantine.join("SNES")));
        // Post-order: the child is listed before its parent.
        let child = removable
            .iter()
            .position(|p| p == &quarantine.join("NES/Disc 1"))
            .unwrap();
        let parent = removable
            .iter()
            .position(|p| p == &quarantine.join("NES"))
            .unwrap();
        assert!(child < parent);
        // Nothing was deleted.
        assert!(quarantine.join("NES/Disc 1").exists());
    }

    #[test]
    fn test_cleanup_on_missing_quarantine_is_a_no_op() {
        let temp = tempdir().unwrap();
        let quarantine = temp.path().join("Moved ROMS");
        assert!(remove_empty_dirs(&quarantine).is_empty());
        assert!(find_removable_dirs(&quarantine).is_empty());
    }
}
