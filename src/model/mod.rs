//! Core data models for the ROM collection.
//!
//! Defines the primary entities: [`RomFile`], [`LanguageCode`], [`KeepSet`],
//! and the per-file [`Decision`] the planner produces.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A language/region code detected from a ROM filename.
///
/// `Multi` marks multi-language dumps (`Multi5`, `M3`, ...), `Eu` marks a
/// European region tag with no explicit language word, and `Unknown` is the
/// total-classification fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Jp,
    Fr,
    De,
    It,
    Es,
    Pt,
    Ru,
    Ko,
    Zh,
    Multi,
    Eu,
    Unknown,
}

impl LanguageCode {
    /// Every code, in canonical order.
    pub const ALL: [LanguageCode; 13] = [
        LanguageCode::En,
        LanguageCode::Jp,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Es,
        LanguageCode::Pt,
        LanguageCode::Ru,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Multi,
        LanguageCode::Eu,
        LanguageCode::Unknown,
    ];

    /// Lowercase string form, as accepted by `--keep`.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Jp => "jp",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::It => "it",
            LanguageCode::Es => "es",
            LanguageCode::Pt => "pt",
            LanguageCode::Ru => "ru",
            LanguageCode::Ko => "ko",
            LanguageCode::Zh => "zh",
            LanguageCode::Multi => "multi",
            LanguageCode::Eu => "eu",
            LanguageCode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        LanguageCode::ALL
            .into_iter()
            .find(|code| code.as_str() == lower)
            .ok_or_else(|| Error::unknown_language(s))
    }
}

/// The set of detected codes for one file, ordered for stable log output.
pub type LanguageSet = BTreeSet<LanguageCode>;

/// Renders a language set as `[en, eu]` for log entries.
pub fn format_codes(codes: &LanguageSet) -> String {
    let joined = codes
        .iter()
        .map(|code| code.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

/// The languages a run treats as "should remain in place" (sort) or
/// "eligible for restore" (remerge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepSet {
    /// Every language is eligible. Only reachable in remerge mode, via a
    /// `--keep` with zero codes.
    All,
    /// An explicit set of codes.
    Codes(BTreeSet<LanguageCode>),
}

impl KeepSet {
    /// Builds an explicit keep-set from an iterator of codes.
    pub fn codes(iter: impl IntoIterator<Item = LanguageCode>) -> Self {
        KeepSet::Codes(iter.into_iter().collect())
    }

    /// Whether a file with the given detected set is admitted by this keep-set.
    pub fn admits(&self, langs: &LanguageSet) -> bool {
        match self {
            KeepSet::All => true,
            KeepSet::Codes(keep) => langs.iter().any(|code| keep.contains(code)),
        }
    }

    /// Human-readable form for the run log header.
    pub fn describe(&self) -> String {
        match self {
            KeepSet::All => "ALL".to_string(),
            KeepSet::Codes(keep) => keep
                .iter()
                .map(|code| code.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// A candidate ROM file produced by the scanner.
///
/// `rel_path` is relative to whichever root was scanned: the collection root
/// in sort/census mode, the quarantine root in remerge mode. The mirrored
/// relative path is what makes remerge the exact inverse of sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomFile {
    /// Path on disk, as produced by the walk.
    pub abs_path: PathBuf,
    /// Path relative to the scanned root.
    pub rel_path: PathBuf,
    /// First path component under the root, `None` for files sitting
    /// directly in the root.
    pub top_folder: Option<String>,
}

impl RomFile {
    /// Builds a `RomFile` from a scanned path and the root it was found
    /// under. Returns `None` when the path is not under the root.
    pub fn new(path: &Path, root: &Path) -> Option<Self> {
        let rel_path = path.strip_prefix(root).ok()?.to_path_buf();
        let mut components = rel_path.components();
        let first = components
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .map(str::to_string);
        // A lone filename has one component; only deeper paths have a folder.
        let top_folder = if components.next().is_some() {
            first
        } else {
            None
        };
        Some(Self {
            abs_path: path.to_path_buf(),
            rel_path,
            top_folder,
        })
    }

    /// Filename without extension; language detection runs on this alone.
    pub fn stem(&self) -> &str {
        self.abs_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Full filename, for log entries.
    pub fn file_name(&self) -> &str {
        self.abs_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

/// What the planner decided for one scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Sort mode: language set intersects the keep-set, file stays put.
    Keep,
    /// Sort mode: no intersection, file goes to quarantine.
    Move,
    /// Remerge mode: file returns to its original folder.
    Restore,
    /// Remerge mode: file stays in quarantine.
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_round_trip() {
        for code in LanguageCode::ALL {
            assert_eq!(code.as_str().parse::<LanguageCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_language_code_parse_is_case_insensitive() {
        assert_eq!("EN".parse::<LanguageCode>().unwrap(), LanguageCode::En);
        assert_eq!(
            "Multi".parse::<LanguageCode>().unwrap(),
            LanguageCode::Multi
        );
    }

    #[test]
    fn test_language_code_parse_rejects_garbage() {
        assert!("klingon".parse::<LanguageCode>().is_err());
        assert!("".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_format_codes_is_sorted_and_bracketed() {
        let set: LanguageSet = [LanguageCode::Eu, LanguageCode::En].into_iter().collect();
        assert_eq!(format_codes(&set), "[en, eu]");
        assert_eq!(format_codes(&LanguageSet::new()), "[]");
    }

    #[test]
    fn test_keep_set_admits_on_intersection() {
        let keep = KeepSet::codes([LanguageCode::En, LanguageCode::It]);
        let en_eu: LanguageSet = [LanguageCode::En, LanguageCode::Eu].into_iter().collect();
        let jp: LanguageSet = [LanguageCode::Jp].into_iter().collect();
        assert!(keep.admits(&en_eu));
        assert!(!keep.admits(&jp));
        assert!(KeepSet::All.admits(&jp));
    }

    #[test]
    fn test_keep_set_describe() {
        let keep = KeepSet::codes([LanguageCode::It, LanguageCode::En]);
        assert_eq!(keep.describe(), "en, it");
        assert_eq!(KeepSet::All.describe(), "ALL");
    }

    #[test]
    fn test_rom_file_relative_path_and_top_folder() {
        let root = Path::new("/collection");
        let file = RomFile::new(
            Path::new("/collection/NES/Games/Super Game (USA).nes"),
            root,
        )
        .unwrap();
        assert_eq!(
            file.rel_path,
            PathBuf::from("NES/Games/Super Game (USA).nes")
        );
        assert_eq!(file.top_folder.as_deref(), Some("NES"));
        assert_eq!(file.stem(), "Super Game (USA)");
        assert_eq!(file.file_name(), "Super Game (USA).nes");
    }

    #[test]
    fn test_rom_file_at_root_has_no_top_folder() {
        let root = Path::new("/collection");
        let file = RomFile::new(Path::new("/collection/Loose Game (Japan).gb"), root).unwrap();
        assert_eq!(file.top_folder, None);
        assert_eq!(file.rel_path, PathBuf::from("Loose Game (Japan).gb"));
    }

    #[test]
    fn test_rom_file_outside_root_is_rejected() {
        assert!(RomFile::new(Path::new("/elsewhere/x.nes"), Path::new("/collection")).is_none());
    }
}
