use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use manidiff_defs::ChannelError;

use crate::channel::ReportChannel;
use crate::defs::{ChannelConfig, PriorSegment};

const MANIDIFF_USER_AGENT: &str = "manidiff/gitops";
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Hidden marker prepended to a comment body when it has been superseded.
const SUPERSEDED_MARKER: &str = "<!-- manidiff:superseded -->";

/// Report channel backed by the GitHub issue-comments API: one report
/// segment per pull-request comment.
pub struct GitHubChannel {
    client: Client,
    config: ChannelConfig,
    login: String,
}

impl GitHubChannel {
    /// Build a client and resolve the authenticated login; prior comments
    /// are matched against it for self-authorship.
    pub async fn connect(config: ChannelConfig) -> Result<Self, ChannelError> {
        let client = Client::new();
        let url = format!("{}/user", config.api_url);
        let user: Value = send_json(with_headers(client.get(&url), &config.token))
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        let login = user["login"]
            .as_str()
            .ok_or_else(|| ChannelError::Connect("missing login in user info".to_string()))?
            .to_string();
        Ok(GitHubChannel {
            client,
            config,
            login,
        })
    }

    fn comments_url(&self) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.config.api_url, self.config.repository, self.config.pull_request
        )
    }

    fn comment_url(&self, id: u64) -> String {
        format!(
            "{}/repos/{}/issues/comments/{}",
            self.config.api_url, self.config.repository, id
        )
    }
}

fn with_headers(request: RequestBuilder, token: &str) -> RequestBuilder {
    request
        .header("User-Agent", MANIDIFF_USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .header("Authorization", format!("token {}", token))
}

async fn send_json(request: RequestBuilder) -> Result<Value, reqwest::Error> {
    request.send().await?.error_for_status()?.json().await
}

pub(crate) fn superseded_body(body: &str) -> String {
    format!(
        "{}\n<details>\n<summary>Superseded report</summary>\n\n{}\n\n</details>\n",
        SUPERSEDED_MARKER, body
    )
}

pub(crate) fn is_superseded(body: &str) -> bool {
    body.trim_start().starts_with(SUPERSEDED_MARKER)
}

#[async_trait]
impl ReportChannel for GitHubChannel {
    async fn list_prior_segments(&self) -> Result<Vec<PriorSegment>, ChannelError> {
        let comments: Value =
            send_json(with_headers(self.client.get(self.comments_url()), &self.config.token))
                .await
                .map_err(|e| ChannelError::List(e.to_string()))?;
        let comments = comments
            .as_array()
            .ok_or_else(|| ChannelError::List("expected a comment array".to_string()))?;

        let segments = comments
            .iter()
            .filter_map(|comment| {
                let id = comment["id"].as_u64()?;
                Some(PriorSegment {
                    id,
                    author_is_self: comment["user"]["login"].as_str() == Some(&self.login),
                    body: comment["body"].as_str().unwrap_or("").to_string(),
                })
            })
            .collect();
        Ok(segments)
    }

    async fn mark_superseded(&self, prior: &PriorSegment) -> Result<(), ChannelError> {
        if is_superseded(&prior.body) {
            return Ok(());
        }
        let body = json!({ "body": superseded_body(&prior.body) });
        send_json(
            with_headers(self.client.patch(self.comment_url(prior.id)), &self.config.token)
                .json(&body),
        )
        .await
        .map_err(|e| ChannelError::Mark(prior.id, e.to_string()))?;
        Ok(())
    }

    async fn post_segment(&self, body: &str) -> Result<(), ChannelError> {
        let payload = json!({ "body": body });
        send_json(
            with_headers(self.client.post(self.comments_url()), &self.config.token).json(&payload),
        )
        .await
        .map_err(|e| ChannelError::Post(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_superseded_body_wraps_in_details() {
        let wrapped = superseded_body("## Manifest diff\n\nbody");
        assert!(wrapped.starts_with(SUPERSEDED_MARKER));
        assert!(wrapped.contains("<details>"));
        assert!(wrapped.contains("## Manifest diff\n\nbody"));
    }

    #[test]
    fn test_superseded_detection_is_stable_under_rewrap() {
        let once = superseded_body("body");
        assert!(is_superseded(&once));
        // A marked body must not be wrapped again.
        assert_eq!(is_superseded("body"), false);
    }
}
