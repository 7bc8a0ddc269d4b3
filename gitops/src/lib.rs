mod channel;
mod defs;
mod github;
mod report;

pub use channel::ReportChannel;
pub use defs::{ChannelConfig, PriorSegment};
pub use github::{GitHubChannel, GITHUB_API_URL};
pub use report::{paginate, render_block};

use log::warn;
use manidiff_defs::ChannelError;

/// Supersede prior self-authored reports, then post the new segments
/// strictly in order.
///
/// The supersede phase is best-effort: a failure to list, or to mark any one
/// prior segment, is logged as a warning and never blocks the rest of the
/// marking loop or the posting of the new report. A posting failure
/// propagates immediately; already-posted segments stay in place and the
/// caller decides how to surface the report instead.
pub async fn publish_report(
    channel: &dyn ReportChannel,
    title: &str,
    segments: &[String],
) -> Result<(), ChannelError> {
    match channel.list_prior_segments().await {
        Ok(prior) => {
            for segment in prior
                .iter()
                .filter(|p| p.author_is_self && p.body.contains(title))
            {
                if let Err(e) = channel.mark_superseded(segment).await {
                    warn!("could not mark prior report segment as superseded: {}", e);
                }
            }
        }
        Err(e) => warn!("could not list prior report segments: {}", e),
    }

    for body in segments {
        channel.post_segment(body).await?;
    }
    Ok(())
}
