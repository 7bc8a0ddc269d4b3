mod change;
mod config;
mod errors;
mod manifest;

pub use change::{ChangeRecord, ChangeStatus, DiffSummary};
pub use config::{
    InvalidDocumentPolicy, ReportConfig, DEFAULT_CONTINUATION_HEADER_TEMPLATE,
    DEFAULT_CONTINUATION_MARKER, DEFAULT_FOOTER_TEMPLATE, DEFAULT_HEADER_TEMPLATE,
    DEFAULT_MAX_SEGMENT_LENGTH, DEFAULT_SAFETY_BUFFER, DEFAULT_TITLE,
};
pub use errors::{ChannelError, ParseError};
pub use manifest::{ManifestDocument, ManifestMetadata, ObjectKey, DEFAULT_NAMESPACE};
