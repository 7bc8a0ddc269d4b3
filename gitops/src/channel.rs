use async_trait::async_trait;

use manidiff_defs::ChannelError;

use crate::defs::PriorSegment;

/// Delivery surface for report segments.
///
/// Implementations are invoked strictly sequentially; the orchestration
/// layer owns the channel connection for the duration of a run and never
/// issues concurrent calls against it.
#[async_trait]
pub trait ReportChannel {
    /// Enumerate previously posted segments, oldest first.
    async fn list_prior_segments(&self) -> Result<Vec<PriorSegment>, ChannelError>;

    /// Flag an earlier segment as outdated without deleting it.
    /// Best-effort and idempotent: marking an already-marked segment is a
    /// no-op.
    async fn mark_superseded(&self, prior: &PriorSegment) -> Result<(), ChannelError>;

    async fn post_segment(&self, body: &str) -> Result<(), ChannelError>;
}
