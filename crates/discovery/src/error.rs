//! Error types for target discovery
//!
//! Flat hierarchy. Every failure reaches the caller; nothing is retried here.

use thiserror::Error;

use crate::http::HttpError;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Cannot connect to the target: {0}")]
    Connection(#[source] HttpError),

    #[error("Response from the target seems invalid: {body}")]
    InvalidResponse { body: String },

    #[error("Got a response from the target app, but no target pages found")]
    NoTargets,

    #[error("Can't find a target that matches: {hint}. Available pages: {}", json_list(.available))]
    TargetNotFound { hint: String, available: Vec<String> },

    #[error("Can't attach to this target that may have Chrome DevTools attached - {url}")]
    TargetBusy { url: String },
}

fn json_list(urls: &[String]) -> String {
    serde_json::to_string(urls).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_available_pages() {
        let err = DiscoveryError::TargetNotFound {
            hint: "http://localhost:3000".to_string(),
            available: vec!["about:blank".to_string(), "http://localhost:8080/".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Can't find a target that matches: http://localhost:3000. \
             Available pages: [\"about:blank\",\"http://localhost:8080/\"]"
        );
    }

    #[test]
    fn test_connection_carries_cause() {
        let err = DiscoveryError::Connection(HttpError::InvalidUrl("bad host".to_string()));
        assert!(err.to_string().starts_with("Cannot connect to the target: "));
        assert!(err.to_string().contains("bad host"));
    }
}
