mod logging;
mod manifest;
mod manifest_diff;
mod template;
mod text_diff;

pub use logging::setup_logging;
pub use manifest::{canonical_yaml, parse_manifests};
pub use manifest_diff::diff_collections;
pub use template::substitute;
pub use text_diff::unified_diff;
