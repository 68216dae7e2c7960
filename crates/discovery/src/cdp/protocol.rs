//! Target records as served by `GET /json`
//!
//! Keep them minimal - every field we don't read is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Target ID from Chrome
pub type TargetId = String;

/// Caller-supplied predicate deciding which targets are eligible
pub type TargetFilter = Arc<dyn Fn(&Target) -> bool + Send + Sync>;

/// Default filter: every target is eligible
pub fn accept_all() -> TargetFilter {
    Arc::new(|_| true)
}

/// One inspectable context (page, worker, service worker, ...)
///
/// Only `url` and `webSocketDebuggerUrl` are read. Everything else (id, type,
/// title, faviconUrl, ...) stays in `extra` exactly as the browser sent it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Target {
    #[serde(default)]
    pub url: String,

    /// Absent while another debugging client holds the target
    #[serde(
        rename = "webSocketDebuggerUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub web_socket_debugger_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Target {
    /// Create a bare target with just a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            web_socket_debugger_url: None,
            extra: Map::new(),
        }
    }

    pub fn with_websocket(mut self, ws_url: impl Into<String>) -> Self {
        self.web_socket_debugger_url = Some(ws_url.into());
        self
    }

    /// True when a debugger can still attach
    pub fn has_websocket(&self) -> bool {
        self.web_socket_debugger_url
            .as_deref()
            .is_some_and(|ws| !ws.is_empty())
    }

    /// A pass-through field, if the browser sent it as a string
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.field_str("id")
    }

    /// `page`, `iframe`, `service_worker`, ...
    pub fn target_type(&self) -> Option<&str> {
        self.field_str("type")
    }

    pub fn title(&self) -> Option<&str> {
        self.field_str("title")
    }
}
