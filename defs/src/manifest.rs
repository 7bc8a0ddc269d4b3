use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace substituted into the object key when a manifest does not declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ManifestMetadata {
    pub name: String,
    pub namespace: Option<String>,
}

/// One decoded manifest document.
///
/// The identity fields are pulled out at the parse boundary; the full decoded
/// body is kept verbatim so canonical serialization and diffing see every
/// field, not just the ones we know about.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: ManifestMetadata,
    pub body: serde_yaml::Value,
}

/// Canonical identity of a manifest, used for matching across collections.
///
/// Renders as `{apiVersion}/{kind}/{namespace}/{name}`. The namespace is
/// already resolved here, so the key is always fully qualified.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ObjectKey {
    pub api_version: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    /// Derive the key for a parser-valid document. The [`DEFAULT_NAMESPACE`]
    /// substitution happens here, not at storage time.
    pub fn for_document(doc: &ManifestDocument) -> Self {
        ObjectKey {
            api_version: doc.api_version.clone(),
            kind: doc.kind.clone(),
            namespace: doc
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            name: doc.metadata.name.clone(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.api_version, self.kind, self.namespace, self.name
        )
    }
}
