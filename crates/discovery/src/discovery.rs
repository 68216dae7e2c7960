//! Discovery Orchestrator
//!
//! Fetch -> select -> WebSocket URL. Linear, no retries, no caching.
//! Every failure goes straight back to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::cdp::{accept_all, TargetFilter};
use crate::error::{DiscoveryError, Result};
use crate::events::{EventBus, TelemetrySink, TARGET_COUNT_EVENT};
use crate::fetcher::fetch_targets;
use crate::http::{HttpError, HttpGet, ReqwestGetter};
use crate::selector::select_target;

/// Discovery configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Per-request timeout for `/json`. None waits as long as the HTTP client does.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Anything that can turn an address and port into a debugger WebSocket URL
#[async_trait]
pub trait TargetDiscoveryStrategy: Send + Sync {
    async fn get_target_websocket_url(
        &self,
        address: &str,
        port: u16,
        filter: Option<TargetFilter>,
        target_url: Option<&str>,
    ) -> Result<String>;
}

/// Resolves debugger endpoints through the `/json` introspection endpoint
pub struct TargetDiscovery {
    http: Arc<dyn HttpGet>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl TargetDiscovery {
    pub fn new(config: &DiscoveryConfig) -> std::result::Result<Self, HttpError> {
        Ok(Self {
            http: Arc::new(ReqwestGetter::from_config(config)?),
            telemetry: Arc::new(EventBus::new()),
        })
    }

    /// Replace the HTTP collaborator
    pub fn with_http(mut self, http: Arc<dyn HttpGet>) -> Self {
        self.http = http;
        self
    }

    /// Replace the telemetry sink
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Find the WebSocket debugger URL of one target at `address:port`
    ///
    /// `filter` defaults to accepting every target. `target_url`, when given,
    /// restricts selection to targets whose URL matches it.
    pub async fn discover(
        &self,
        address: &str,
        port: u16,
        filter: Option<TargetFilter>,
        target_url: Option<&str>,
    ) -> Result<String> {
        let filter = filter.unwrap_or_else(accept_all);
        let targets = fetch_targets(self.http.as_ref(), address, port, &filter).await?;

        self.telemetry
            .report_event(TARGET_COUNT_EVENT, json!({ "numTargets": targets.len() }));
        if targets.is_empty() {
            return Err(DiscoveryError::NoTargets);
        }

        let target = select_target(&targets, target_url).into_result()?;
        tracing::debug!(
            "Attaching to target: {}",
            serde_json::to_string(target).unwrap_or_default()
        );

        // Without a hint the first target wins even if it is already claimed
        let ws_url = match target.web_socket_debugger_url.as_deref() {
            Some(ws) if !ws.is_empty() => ws.to_string(),
            _ => {
                return Err(DiscoveryError::TargetBusy {
                    url: target.url.clone(),
                })
            }
        };
        tracing::debug!("WebSocket Url: {}", ws_url);

        Ok(ws_url)
    }
}

impl Default for TargetDiscovery {
    fn default() -> Self {
        Self {
            http: Arc::new(ReqwestGetter::new()),
            telemetry: Arc::new(EventBus::new()),
        }
    }
}

#[async_trait]
impl TargetDiscoveryStrategy for TargetDiscovery {
    async fn get_target_websocket_url(
        &self,
        address: &str,
        port: u16,
        filter: Option<TargetFilter>,
        target_url: Option<&str>,
    ) -> Result<String> {
        self.discover(address, port, filter, target_url).await
    }
}

/// Discover with the default reqwest client and a throwaway event bus
pub async fn get_chrome_target_websocket_url(
    address: &str,
    port: u16,
    filter: Option<TargetFilter>,
    target_url: Option<&str>,
) -> Result<String> {
    TargetDiscovery::default()
        .discover(address, port, filter, target_url)
        .await
}
