//! Outbound calls to the story-generation backend.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::BackendErrorBody,
    protocol::{story_route, StoryRequest, StoryResponse},
};
use tracing::debug;
use url::Url;

use crate::error::SubmissionFailure;

#[async_trait]
pub trait StoryBackend: Send + Sync {
    async fn continue_story(&self, request: &StoryRequest)
        -> Result<StoryResponse, SubmissionFailure>;
}

/// Posts turns as JSON to `<server_url>/story`.
#[derive(Debug, Clone)]
pub struct HttpStoryBackend {
    http: Client,
    endpoint: Url,
}

impl HttpStoryBackend {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: Client::new(),
            endpoint: story_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Joins the story route onto `server_url`, keeping any path prefix it has.
pub fn story_endpoint(server_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(server_url.trim())?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(story_route().trim_start_matches('/'))
}

#[async_trait]
impl StoryBackend for HttpStoryBackend {
    async fn continue_story(
        &self,
        request: &StoryRequest,
    ) -> Result<StoryResponse, SubmissionFailure> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(SubmissionFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<BackendErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) if body.trim().is_empty() => "no response body".to_string(),
                Err(_) => body,
            };
            return Err(SubmissionFailure::Status { status, message });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(SubmissionFailure::Transport)?;
        let story: StoryResponse = serde_json::from_slice(&bytes)
            .map_err(|err| SubmissionFailure::MalformedPayload(err.to_string()))?;
        debug!(
            endpoint = %self.endpoint,
            new_choices = story.new_choices().map_or(0, <[String]>::len),
            "story backend answered"
        );
        Ok(story)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
