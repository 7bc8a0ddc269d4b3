/// One previously posted report segment, as enumerated from the channel.
#[derive(Debug, Clone)]
pub struct PriorSegment {
    pub id: u64,
    pub author_is_self: bool,
    pub body: String,
}

/// Where and as whom the GitHub channel posts.
///
/// Credentials are opaque to the diff core; this struct is threaded
/// explicitly through the orchestration layer rather than read from
/// ambient state.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Repository slug, `owner/name`.
    pub repository: String,
    /// Pull request whose discussion receives the report.
    pub pull_request: u64,
    pub token: String,
    /// API base URL; override for GitHub Enterprise installations.
    pub api_url: String,
}
