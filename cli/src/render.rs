use colored::Colorize;
use serde_json::json;

use manidiff_defs::{ChangeRecord, ChangeStatus, DiffSummary};

/// Plain-text rendering of the change-record list for the console fallback.
pub fn render_plain(records: &[ChangeRecord]) -> String {
    if records.is_empty() {
        return "No differences detected.\n".to_string();
    }
    let summary = DiffSummary::of(records);
    let mut out = format!(
        "{} changes: {} added, {} removed, {} modified\n\n",
        summary.total(),
        summary.added,
        summary.removed,
        summary.modified
    );
    for record in records {
        let tag = match record.status {
            ChangeStatus::Added => "added   ".green(),
            ChangeStatus::Removed => "removed ".red(),
            ChangeStatus::Modified => "modified".yellow(),
        };
        out.push_str(&format!("{} {}\n", tag, record.key));
        if let Some(diff) = &record.textual_diff {
            out.push_str(diff);
            out.push('\n');
        }
    }
    out
}

/// Machine-readable rendering of the change-record list, one entry per
/// record, for CI consumers.
pub fn render_json(records: &[ChangeRecord]) -> String {
    let entries: Vec<_> = records
        .iter()
        .map(|record| {
            json!({
                "apiVersion": record.key.api_version,
                "kind": record.key.kind,
                "namespace": record.key.namespace,
                "name": record.key.name,
                "status": record.status,
                "diff": record.textual_diff,
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manidiff_defs::{ManifestDocument, ManifestMetadata, ObjectKey};
    use pretty_assertions::assert_eq;

    fn record(name: &str, status: ChangeStatus) -> ChangeRecord {
        let doc = ManifestDocument {
            api_version: "v1".to_string(),
            kind: "Service".to_string(),
            metadata: ManifestMetadata {
                name: name.to_string(),
                namespace: None,
            },
            body: serde_yaml::Value::Null,
        };
        ChangeRecord {
            key: ObjectKey::for_document(&doc),
            status,
            before: None,
            after: None,
            textual_diff: matches!(status, ChangeStatus::Modified)
                .then(|| "--- target\n+++ current\n@@ -1,1 +1,1 @@\n-a\n+b\n".to_string()),
        }
    }

    #[test]
    fn test_plain_rendering_lists_every_record() {
        let records = vec![
            record("a", ChangeStatus::Added),
            record("b", ChangeStatus::Modified),
        ];
        let out = render_plain(&records);
        assert!(out.contains("2 changes: 1 added, 0 removed, 1 modified"));
        assert!(out.contains("v1/Service/default/a"));
        assert!(out.contains("v1/Service/default/b"));
        assert!(out.contains("-a\n+b"));
    }

    #[test]
    fn test_plain_rendering_of_empty_diff() {
        assert_eq!(render_plain(&[]), "No differences detected.\n");
    }

    #[test]
    fn test_json_rendering() {
        let records = vec![record("a", ChangeStatus::Added)];
        let out = render_json(&records);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "a");
        assert_eq!(parsed[0]["namespace"], "default");
        assert_eq!(parsed[0]["status"], "Added");
        assert_eq!(parsed[0]["diff"], serde_json::Value::Null);
    }
}
