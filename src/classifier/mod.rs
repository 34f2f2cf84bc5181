//! Filename-based language detection.
//!
//! Classifies a ROM filename stem into a set of [`LanguageCode`]s using an
//! ordered list of case-insensitive patterns: No-Intro/GoodTools-style
//! region tags (`(USA)`, `(Japan)`, `(J)`), spelled-out language words
//! (`English`, `Français`, `Deutsch`), CJK/Cyrillic script markers, and
//! multi-language dump markers (`Multi5`, `M3`).
//!
//! Classification is total: when nothing matches, the result is the
//! singleton `{unknown}`. It is also purely a function of the stem, so sort
//! and remerge classify identically no matter where a file currently lives.

use regex::Regex;

use crate::model::{LanguageCode, LanguageSet};

/// One language with its recognizer patterns. A code is recorded when any
/// of its patterns matches the stem.
struct Rule {
    code: LanguageCode,
    patterns: Vec<Regex>,
}

/// Compiled classification rules.
///
/// Compile once and reuse; construction compiles every built-in pattern.
pub struct Classifier {
    rules: Vec<Rule>,
    /// European region marker (`EUR`, `Europe`, `EU`).
    eu_marker: Regex,
    /// Explicit English-language words. A European marker alone implies an
    /// unspecified-language European dump; paired with one of these words
    /// the dump is English and `eu` is not recorded.
    eu_veto: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        let rule = |code: LanguageCode, patterns: &[&str]| Rule {
            code,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
        };

        Self {
            rules: vec![
                rule(
                    LanguageCode::En,
                    &[
                        r"\b(USA|U)\b",
                        r"\b(En|Eng|English)\b",
                        r"\b(Europe)\b.*\b(En|Eng|English)\b",
                        r"\b(World)\b",
                        r"\b(USA,\s?Europe)\b.*\b(En)\b",
                    ],
                ),
                rule(LanguageCode::Jp, &[r"\b(JPN|Japan|J)\b", "日本語", "日文"]),
                rule(LanguageCode::Fr, &[r"\b(Fr|FRA|French|Francais|Français)\b"]),
                rule(LanguageCode::De, &[r"\b(De|Ger|German|Deutsch)\b"]),
                rule(
                    LanguageCode::Es,
                    &[r"\b(ES|Spa|Spanish|Español|Espanol|Castellano)\b"],
                ),
                rule(LanguageCode::It, &[r"\b(ITA|It|Italian|Italiano)\b"]),
                rule(LanguageCode::Pt, &[r"\b(PT|Portugu[eê]s|Brazil|BR)\b"]),
                rule(LanguageCode::Ru, &[r"\b(RU|Rus|Russian|Русский)\b"]),
                rule(
                    LanguageCode::Ko,
                    &[r"\b(KOR|Korea|Korean)\b", "한국어", "한글"],
                ),
                rule(
                    LanguageCode::Zh,
                    &[r"\b(CHN|China|Chinese)\b", "中文版", "中文", "汉化"],
                ),
                rule(LanguageCode::Multi, &[r"\b(Multi\s?\d+|M[0-9]+)\b"]),
            ],
            eu_marker: compile(r"\b(EUR|Europe|EU)\b"),
            eu_veto: compile(r"\b(En|Eng|English)\b"),
        }
    }

    /// Detects every language code present in a filename stem.
    ///
    /// Returns `{unknown}` when no pattern matches; never returns an empty
    /// set.
    pub fn classify(&self, stem: &str) -> LanguageSet {
        let mut detected = LanguageSet::new();

        for rule in &self.rules {
            if rule.patterns.iter().any(|p| p.is_match(stem)) {
                detected.insert(rule.code);
            }
        }

        if self.eu_marker.is_match(stem) && !self.eu_veto.is_match(stem) {
            detected.insert(LanguageCode::Eu);
        }

        if detected.is_empty() {
            detected.insert(LanguageCode::Unknown);
        }

        detected
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a built-in pattern, case-insensitively.
fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("built-in classifier pattern")
}
