//! services/reader/src/adapters/http_story.rs
//!
//! This module contains the adapter for the remote Story API.
//! It implements the `StoryService` port from the `core` crate over HTTP.

use crate::error::ReaderError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use story_reader_core::{
    domain::{FeedbackKind, Story, StoryCollection, StoryId},
    ports::{CollectionKind, PortError, PortResult, StoryService},
};
use tracing::debug;
use url::Url;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `StoryService` port using the Story API's REST endpoints.
#[derive(Clone)]
pub struct HttpStoryAdapter {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpStoryAdapter {
    /// Creates a new `HttpStoryAdapter` rooted at `base_url`.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReaderError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ReaderError::Internal(format!(
                "Story API URL '{}' cannot be used as a base",
                base_url
            )));
        }
        let client = Client::builder()
            .user_agent(concat!("story-reader/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("Story API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("api")
            .push("stories")
            .extend(segments);
        Ok(url)
    }

    /// Attaches credentials, sends the request and maps HTTP failures onto `PortError`.
    async fn send(&self, request: RequestBuilder) -> PortResult<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        debug!("{} answered {}", response.url(), status);
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(PortError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PortError::NotFound(response.url().path().to_string())),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(PortError::Unexpected(format!("status {} body {}", status, body)))
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> PortResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Failed to decode response: {}", e)))
    }
}

//=========================================================================================
// `StoryService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StoryService for HttpStoryAdapter {
    async fn get_story(&self, story_id: &StoryId) -> PortResult<Story> {
        let id = story_id.to_string();
        let url = self.endpoint(&[id.as_str()])?;
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn submit_feedback(&self, story_id: &StoryId, kind: FeedbackKind) -> PortResult<()> {
        let id = story_id.to_string();
        let url = self.endpoint(&[id.as_str(), kind.path_segment()])?;
        self.send(self.client.post(url)).await?;
        Ok(())
    }

    async fn list_collection(
        &self,
        kind: CollectionKind,
        limit: u32,
    ) -> PortResult<StoryCollection> {
        let url = self.endpoint(&[kind.path_segment()])?;
        let request = self.client.get(url).query(&[("limit", limit)]);
        let response = self.send(request).await?;
        Self::decode(response).await
    }
}
