//! HTTP GET collaborator
//!
//! Discovery only needs "fetch this URL, give me the body". The trait keeps
//! that seam injectable so tests never touch the network.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::discovery::DiscoveryConfig;

#[derive(Error, Debug)]
pub enum HttpError {
    /// Request never completed. Carries every cause in the chain.
    #[error("{0}")]
    Transport(String),

    /// Non-success status. The message is the response body, as browsers put
    /// the reason there.
    #[error("{body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError::Transport(error_chain(&err))
    }
}

/// `outer: cause: root cause`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Fetches a URL and resolves with the body text
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get_url(&self, url: &str) -> Result<String, HttpError>;
}

/// Default collaborator backed by reqwest
#[derive(Clone, Debug)]
pub struct ReqwestGetter {
    client: reqwest::Client,
}

impl ReqwestGetter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for ReqwestGetter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpGet for ReqwestGetter {
    async fn get_url(&self, url: &str) -> Result<String, HttpError> {
        let url = url::Url::parse(url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::info!("HTTP GET failed with: {}", status);
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(body)
    }
}
