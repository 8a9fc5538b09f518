//! Client for the remote analysis service's `POST /ask` route.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{AnswerPayload, AskRequest};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("analysis service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("analysis service returned HTTP {status}")]
    Status { status: u16 },
    #[error("analysis service returned a malformed answer: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("ask was not dispatched: {0}")]
    Dispatch(String),
}

#[async_trait]
pub trait AskService: Send + Sync {
    async fn ask(&self, request: &AskRequest) -> Result<AnswerPayload, AskError>;
}

#[derive(Debug, Clone)]
pub struct HttpAskService {
    http: Client,
    ask_url: Url,
}

impl HttpAskService {
    pub fn new(ask_url: Url, timeout: Option<Duration>) -> Result<Self, AskError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AskError::Client)?;
        Ok(Self { http, ask_url })
    }

    pub fn ask_url(&self) -> &Url {
        &self.ask_url
    }
}

#[async_trait]
impl AskService for HttpAskService {
    async fn ask(&self, request: &AskRequest) -> Result<AnswerPayload, AskError> {
        debug!(url = %self.ask_url, k = request.k, "posting ask");
        let res = self
            .http
            .post(self.ask_url.clone())
            .json(request)
            .send()
            .await
            .map_err(AskError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(AskError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await.map_err(AskError::Transport)?;
        serde_json::from_slice(&body).map_err(AskError::Decode)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
