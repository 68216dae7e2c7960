//! Target Fetcher - one GET against `/json`, parsed and normalised
//!
//! Loopback WebSocket URLs are rewritten to the queried address so a remote
//! caller can actually reach them.

use crate::cdp::{Target, TargetFilter};
use crate::error::{DiscoveryError, Result};
use crate::http::HttpGet;

const LOOPBACK_AUTHORITIES: [&str; 2] = ["//127.0.0.1", "//localhost"];

/// Introspection endpoint listing every target
pub fn targets_url(address: &str, port: u16) -> String {
    format!("http://{address}:{port}/json")
}

/// Fetch, normalise and filter the target list
pub async fn fetch_targets(
    http: &dyn HttpGet,
    address: &str,
    port: u16,
    filter: &TargetFilter,
) -> Result<Vec<Target>> {
    let url = targets_url(address, port);
    tracing::info!("Discovering targets via {}", url);

    let body = http
        .get_url(&url)
        .await
        .map_err(DiscoveryError::Connection)?;

    let targets = parse_targets(&body)?
        .into_iter()
        .map(|target| fix_remote_url(address, target))
        .filter(|target| filter(target))
        .collect();

    Ok(targets)
}

/// Parse a `/json` body. Anything but a JSON array of records is invalid.
pub fn parse_targets(body: &str) -> Result<Vec<Target>> {
    serde_json::from_str::<Vec<Target>>(body).map_err(|e| {
        tracing::debug!("Target list did not parse: {}", e);
        DiscoveryError::InvalidResponse {
            body: body.to_string(),
        }
    })
}

/// Point a loopback WebSocket URL at `remote_address`
pub fn fix_remote_url(remote_address: &str, mut target: Target) -> Target {
    if let Some(ws_url) = target.web_socket_debugger_url.as_mut() {
        let replacement = format!("//{remote_address}");
        for loopback in LOOPBACK_AUTHORITIES {
            *ws_url = ws_url.replacen(loopback, &replacement, 1);
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdp::accept_all;
    use crate::http::HttpError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct StaticGet {
        body: String,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpGet for StaticGet {
        async fn get_url(&self, url: &str) -> std::result::Result<String, HttpError> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    struct FailingGet;

    #[async_trait]
    impl HttpGet for FailingGet {
        async fn get_url(&self, _url: &str) -> std::result::Result<String, HttpError> {
            Err(HttpError::InvalidUrl("connection refused".to_string()))
        }
    }

    fn responder(body: &str) -> StaticGet {
        StaticGet {
            body: body.to_string(),
            requested: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_fix_remote_url_127() {
        let target = Target::new("a").with_websocket("ws://127.0.0.1:9222/devtools/page/1");
        let fixed = fix_remote_url("10.0.0.5", target);
        assert_eq!(
            fixed.web_socket_debugger_url.as_deref(),
            Some("ws://10.0.0.5:9222/devtools/page/1")
        );
    }

    #[test]
    fn test_fix_remote_url_localhost() {
        let target = Target::new("a").with_websocket("ws://localhost:9222/devtools/page/1?x=y");
        let fixed = fix_remote_url("10.0.0.5", target);
        assert_eq!(
            fixed.web_socket_debugger_url.as_deref(),
            Some("ws://10.0.0.5:9222/devtools/page/1?x=y")
        );
    }

    #[test]
    fn test_fix_remote_url_leaves_others_alone() {
        let target = Target::new("a").with_websocket("wss://devtools.example.com/page/1");
        let fixed = fix_remote_url("10.0.0.5", target.clone());
        assert_eq!(fixed, target);

        let bare = fix_remote_url("10.0.0.5", Target::new("b"));
        assert_eq!(bare.web_socket_debugger_url, None);
    }

    #[test]
    fn test_parse_accepts_non_string_opaque_fields() {
        let targets = parse_targets(
            r#"[
                {"id": 1, "url": "a", "webSocketDebuggerUrl": "ws://127.0.0.1:9229/x"},
                {"title": {"k": 1}, "url": "b"}
            ]"#,
        )
        .unwrap();

        assert_eq!(targets.len(), 2);
        let fixed = fix_remote_url("10.0.0.5", targets[0].clone());
        assert_eq!(fixed.web_socket_debugger_url.as_deref(), Some("ws://10.0.0.5:9229/x"));
        assert_eq!(targets[1].extra["title"]["k"], 1);
    }

    #[test]
    fn test_parse_rejects_non_arrays() {
        for body in [r#"{"foo":1}"#, "not json", ""] {
            match parse_targets(body) {
                Err(DiscoveryError::InvalidResponse { body: raw }) => assert_eq!(raw, body),
                other => panic!("Expected InvalidResponse, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_requests_json_endpoint() {
        let http = responder("[]");
        let targets = fetch_targets(&http, "192.168.1.20", 9229, &accept_all())
            .await
            .unwrap();

        assert!(targets.is_empty());
        assert_eq!(
            *http.requested.lock().unwrap(),
            vec!["http://192.168.1.20:9229/json".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_filters_after_rewrite_in_order() {
        let http = responder(
            r#"[
                {"type": "page", "url": "http://a/", "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/1"},
                {"type": "service_worker", "url": "http://a/sw.js", "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/2"},
                {"type": "page", "url": "http://b/", "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/3"}
            ]"#,
        );
        let pages: TargetFilter = Arc::new(|t: &Target| {
            t.target_type() == Some("page")
                && t.web_socket_debugger_url
                    .as_deref()
                    .is_some_and(|ws| ws.starts_with("ws://remote:"))
        });

        let targets = fetch_targets(&http, "remote", 9222, &pages).await.unwrap();
        let urls: Vec<_> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a/", "http://b/"]);
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        let err = fetch_targets(&FailingGet, "localhost", 9222, &accept_all())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::Connection(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
