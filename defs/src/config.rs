pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 60_000;
pub const DEFAULT_SAFETY_BUFFER: usize = 100;
pub const DEFAULT_TITLE: &str = "Manifest diff";

pub const DEFAULT_HEADER_TEMPLATE: &str =
    "## {title}\n\n{subtitle}\n\n**{totalCount}** changes: {addedCount} added, {removedCount} removed, {modifiedCount} modified\n\n";
pub const DEFAULT_FOOTER_TEMPLATE: &str =
    "\n---\n_{addedCount} added, {removedCount} removed, {modifiedCount} modified ({totalCount} total)._\n";
pub const DEFAULT_CONTINUATION_HEADER_TEMPLATE: &str = "## {title} _(continued)_\n\n";
pub const DEFAULT_CONTINUATION_MARKER: &str = "\n_Continued in the next comment._\n";

/// What to do with an input fragment that fails to decode or lacks the
/// required identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidDocumentPolicy {
    /// Abort the whole parse on the first invalid fragment.
    #[default]
    Fail,
    /// Skip the fragment with a warning and keep going.
    Skip,
}

/// Report rendering and pagination options.
///
/// The templates recognize the placeholders `{totalCount}`, `{addedCount}`,
/// `{removedCount}`, `{modifiedCount}`, `{title}` and `{subtitle}`; anything
/// else is left verbatim.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Hard character bound for one report segment.
    pub max_segment_length: usize,
    /// Headroom reserved when checking whether a block still fits.
    pub safety_buffer: usize,
    pub title: String,
    pub subtitle: String,
    pub header_template: String,
    pub footer_template: String,
    pub continuation_header_template: String,
    pub continuation_marker: String,
    pub on_invalid_document: InvalidDocumentPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
            safety_buffer: DEFAULT_SAFETY_BUFFER,
            title: DEFAULT_TITLE.to_string(),
            subtitle: String::new(),
            header_template: DEFAULT_HEADER_TEMPLATE.to_string(),
            footer_template: DEFAULT_FOOTER_TEMPLATE.to_string(),
            continuation_header_template: DEFAULT_CONTINUATION_HEADER_TEMPLATE.to_string(),
            continuation_marker: DEFAULT_CONTINUATION_MARKER.to_string(),
            on_invalid_document: InvalidDocumentPolicy::default(),
        }
    }
}
