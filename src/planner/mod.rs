//! Per-file decisions for sort and remerge runs.
//!
//! The planner joins scanner output with classifier output and a keep-set,
//! producing one [`Decision`] per file. Sort and remerge use the identical
//! classifier; only the keep-set semantics differ (remerge admits everything
//! when the keep-set is the `All` sentinel).
//!
//! `unknown` takes part in the intersection rule like any other code: an
//! untagged file is kept only when `unknown` is in the keep-set.

use crate::classifier::Classifier;
use crate::model::{Decision, KeepSet, LanguageSet, RomFile};

/// A scanned file with its detected languages and planned action.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub file: RomFile,
    pub langs: LanguageSet,
    pub decision: Decision,
}

/// Plans a sort run: files whose language set intersects the keep-set stay,
/// everything else is bound for quarantine.
pub fn plan_sort(
    classifier: &Classifier,
    keep: &KeepSet,
    files: Vec<RomFile>,
) -> Vec<PlannedFile> {
    files
        .into_iter()
        .map(|file| {
            let langs = classifier.classify(file.stem());
            let decision = if keep.admits(&langs) {
                Decision::Keep
            } else {
                Decision::Move
            };
            PlannedFile {
                file,
                langs,
                decision,
            }
        })
        .collect()
}

/// Plans a remerge run over quarantined files: admitted files are restored
/// to their mirrored collection path, the rest are left in place.
pub fn plan_remerge(
    classifier: &Classifier,
    keep: &KeepSet,
    files: Vec<RomFile>,
) -> Vec<PlannedFile> {
    files
        .into_iter()
        .map(|file| {
            let langs = classifier.classify(file.stem());
            let decision = if keep.admits(&langs) {
                Decision::Restore
            } else {
                Decision::Leave
            };
            PlannedFile {
                file,
                langs,
                decision,
            }
        })
        .collect()
}
