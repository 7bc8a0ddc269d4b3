use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;

use manidiff_defs::{
    InvalidDocumentPolicy, ManifestDocument, ManifestMetadata, ObjectKey, ParseError,
};

/// Lines consisting solely of the document separator.
const SEPARATOR_PATTERN: &str = r"(?m)^---$";

#[derive(Deserialize)]
struct RawIdentity {
    #[serde(rename = "apiVersion")]
    api_version: Option<String>,
    kind: Option<String>,
    metadata: Option<RawMetadata>,
}

#[derive(Deserialize)]
struct RawMetadata {
    name: Option<String>,
    namespace: Option<String>,
}

/// Parse a multi-document input resource into a keyed collection.
///
/// The text is split on separator lines, empty fragments are discarded and
/// each remaining fragment is decoded independently. A later document with
/// the same key overwrites the earlier one; last-wins is deliberate, so one
/// resource always yields one document per identity.
///
/// Under [`InvalidDocumentPolicy::Fail`] the first invalid fragment aborts
/// the parse; under [`InvalidDocumentPolicy::Skip`] it is dropped with a
/// warning and the rest of the resource is still used.
pub fn parse_manifests(
    text: &str,
    policy: InvalidDocumentPolicy,
) -> Result<HashMap<ObjectKey, ManifestDocument>, ParseError> {
    let separator = Regex::new(SEPARATOR_PATTERN).expect("separator pattern is valid");
    let mut collection = HashMap::new();
    let mut index = 0;
    for fragment in separator.split(text) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        match parse_fragment(index, fragment) {
            Ok(doc) => {
                collection.insert(ObjectKey::for_document(&doc), doc);
            }
            Err(e) => match policy {
                InvalidDocumentPolicy::Fail => return Err(e),
                InvalidDocumentPolicy::Skip => {
                    log::warn!("skipping invalid document: {}", e);
                }
            },
        }
        index += 1;
    }
    Ok(collection)
}

fn parse_fragment(index: usize, fragment: &str) -> Result<ManifestDocument, ParseError> {
    let body: Value =
        serde_yaml::from_str(fragment).map_err(|e| ParseError::InvalidYaml(index, e))?;
    if !body.is_mapping() {
        return Err(ParseError::NotAMapping(index));
    }
    let raw: RawIdentity =
        serde_yaml::from_value(body.clone()).map_err(|e| ParseError::InvalidYaml(index, e))?;

    let api_version = required(raw.api_version, index, "apiVersion")?;
    let kind = required(raw.kind, index, "kind")?;
    let metadata = raw
        .metadata
        .ok_or(ParseError::MissingField(index, "metadata.name"))?;
    let name = required(metadata.name, index, "metadata.name")?;

    Ok(ManifestDocument {
        api_version,
        kind,
        metadata: ManifestMetadata {
            name,
            namespace: metadata.namespace,
        },
        body,
    })
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, ParseError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ParseError::MissingField(index, field))
}

/// Serialize a document to its canonical textual form: mapping keys sorted
/// lexicographically at every nesting level, so equal documents compare
/// byte-for-byte regardless of field order in the source.
pub fn canonical_yaml(doc: &ManifestDocument) -> String {
    let canonical = canonicalize(&doc.body);
    let rendered =
        serde_yaml::to_string(&canonical).expect("a decoded manifest always re-serializes");
    rendered
        .strip_prefix("---\n")
        .unwrap_or(&rendered)
        .to_string()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> = map
                .iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect();
            entries.sort_by_key(|(k, _)| sort_key(k));
            let mut sorted = serde_yaml::Mapping::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Mapping(sorted)
        }
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn sort_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: staging
spec:
  replicas: 2
"#;

    #[test]
    fn test_parse_single_document() {
        let collection = parse_manifests(DEPLOYMENT, InvalidDocumentPolicy::Fail).unwrap();
        assert_eq!(collection.len(), 1);
        let key = collection.keys().next().unwrap();
        assert_eq!(key.to_string(), "apps/v1/Deployment/staging/web");
    }

    #[test]
    fn test_parse_multidoc_with_empty_fragments() {
        let text = format!(
            "---\n{}---\n\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\n",
            DEPLOYMENT
        );
        let collection = parse_manifests(&text, InvalidDocumentPolicy::Fail).unwrap();
        assert_eq!(collection.len(), 2);
        assert!(collection
            .keys()
            .any(|k| k.to_string() == "v1/Service/default/web"));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let text = format!("{}---\n{}", DEPLOYMENT, DEPLOYMENT.replace("replicas: 2", "replicas: 5"));
        let collection = parse_manifests(&text, InvalidDocumentPolicy::Fail).unwrap();
        assert_eq!(collection.len(), 1);
        let doc = collection.values().next().unwrap();
        assert!(canonical_yaml(doc).contains("replicas: 5"));
    }

    #[test]
    fn test_invalid_yaml_fails_under_fail_policy() {
        let text = format!("{}---\nkey: [unclosed\n", DEPLOYMENT);
        let err = parse_manifests(&text, InvalidDocumentPolicy::Fail).unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml(1, _)));
    }

    #[test]
    fn test_invalid_yaml_skipped_under_skip_policy() {
        let text = format!("{}---\nkey: [unclosed\n", DEPLOYMENT);
        let collection = parse_manifests(&text, InvalidDocumentPolicy::Skip).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_missing_kind_is_rejected() {
        let text = "apiVersion: v1\nmetadata:\n  name: web\n";
        let err = parse_manifests(text, InvalidDocumentPolicy::Fail).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(0, "kind")));
    }

    #[test]
    fn test_empty_api_version_is_rejected() {
        let text = "apiVersion: ''\nkind: Service\nmetadata:\n  name: web\n";
        let err = parse_manifests(text, InvalidDocumentPolicy::Fail).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(0, "apiVersion")));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = parse_manifests("just a string", InvalidDocumentPolicy::Fail).unwrap_err();
        assert!(matches!(err, ParseError::NotAMapping(0)));
    }

    #[test]
    fn test_canonical_yaml_sorts_keys_at_every_level() {
        let text = "kind: Service\napiVersion: v1\nmetadata:\n  namespace: prod\n  name: web\n";
        let collection = parse_manifests(text, InvalidDocumentPolicy::Fail).unwrap();
        let doc = collection.values().next().unwrap();
        assert_eq!(
            canonical_yaml(doc),
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n  namespace: prod\n"
        );
    }

    #[test]
    fn test_canonical_yaml_is_order_insensitive() {
        let a = "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  port: 80\n";
        let b = "spec:\n  port: 80\nkind: Service\nmetadata:\n  name: web\napiVersion: v1\n";
        let docs_a = parse_manifests(a, InvalidDocumentPolicy::Fail).unwrap();
        let docs_b = parse_manifests(b, InvalidDocumentPolicy::Fail).unwrap();
        assert_eq!(
            canonical_yaml(docs_a.values().next().unwrap()),
            canonical_yaml(docs_b.values().next().unwrap())
        );
    }
}
