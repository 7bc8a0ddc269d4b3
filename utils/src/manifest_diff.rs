use std::collections::HashMap;

use manidiff_defs::{ChangeRecord, ChangeStatus, ManifestDocument, ObjectKey};

use crate::manifest::canonical_yaml;
use crate::text_diff::unified_diff;

const DIFF_CONTEXT_LINES: usize = 3;

/// Classify every difference between `current` and `target`.
///
/// A key present only in `current` is `Added`, one present only in `target`
/// is `Removed`, and a key present in both with differing canonical forms is
/// `Modified`, carrying a unified diff oriented from target to current. Keys
/// whose canonical forms are byte-identical are excluded entirely, so only
/// actual differences surface. Records come back sorted ascending by key for
/// run-to-run reproducibility.
pub fn diff_collections(
    current: &HashMap<ObjectKey, ManifestDocument>,
    target: &HashMap<ObjectKey, ManifestDocument>,
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for (key, after) in current {
        match target.get(key) {
            None => records.push(ChangeRecord {
                key: key.clone(),
                status: ChangeStatus::Added,
                before: None,
                after: Some(after.clone()),
                textual_diff: None,
            }),
            Some(before) => {
                let before_text = canonical_yaml(before);
                let after_text = canonical_yaml(after);
                if before_text != after_text {
                    records.push(ChangeRecord {
                        key: key.clone(),
                        status: ChangeStatus::Modified,
                        before: Some(before.clone()),
                        after: Some(after.clone()),
                        textual_diff: Some(unified_diff(
                            &before_text,
                            &after_text,
                            "target",
                            "current",
                            DIFF_CONTEXT_LINES,
                        )),
                    });
                }
            }
        }
    }

    for (key, before) in target {
        if !current.contains_key(key) {
            records.push(ChangeRecord {
                key: key.clone(),
                status: ChangeStatus::Removed,
                before: Some(before.clone()),
                after: None,
                textual_diff: None,
            });
        }
    }

    records.sort_by_key(|record| record.key.to_string());
    records
}
