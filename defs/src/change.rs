use serde::Serialize;

use crate::manifest::{ManifestDocument, ObjectKey};

/// Classification of one difference between the two collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
}

/// One classified difference, produced once per run by the diff engine.
///
/// `before` is the target-side document and `after` the current-side one:
/// `Added` carries only `after`, `Removed` only `before`, `Modified` both
/// plus the unified line diff of their canonical forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub key: ObjectKey,
    pub status: ChangeStatus,
    pub before: Option<ManifestDocument>,
    pub after: Option<ManifestDocument>,
    pub textual_diff: Option<String>,
}

/// Added/removed/modified counts for a record list, as substituted into
/// report headers and footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffSummary {
    pub fn of(records: &[ChangeRecord]) -> Self {
        let mut summary = DiffSummary::default();
        for record in records {
            match record.status {
                ChangeStatus::Added => summary.added += 1,
                ChangeStatus::Removed => summary.removed += 1,
                ChangeStatus::Modified => summary.modified += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}
