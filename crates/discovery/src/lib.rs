//! CDP Target Discovery
//!
//! Resolves the WebSocket debugger URL of a Chromium-family browser running
//! with `--remote-debugging-port`, by asking its `/json` endpoint which
//! targets exist and picking one.
//!
//! ```text
//! GET http://{address}:{port}/json → Vec<Target> → rewrite loopback → filter → select → ws:// URL
//! ```
//!
//! Attaching to the returned URL is someone else's job.

pub mod cdp;
pub mod discovery;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod http;
pub mod matching;
pub mod selector;

pub use cdp::{accept_all, Target, TargetFilter};
pub use discovery::{
    get_chrome_target_websocket_url, DiscoveryConfig, TargetDiscovery, TargetDiscoveryStrategy,
};
pub use error::{DiscoveryError, Result};
pub use events::{EventBus, TelemetryEvent, TelemetrySink};
pub use http::{HttpError, HttpGet, ReqwestGetter};
pub use matching::get_matching_targets;
pub use selector::{select_target, Selection};
