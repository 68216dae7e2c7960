//! Telemetry - named events with a small JSON payload
//!
//! Design: fire-and-forget. Discovery never waits on, or fails because of, a sink.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

/// Event name reported after every successful fetch
pub const TARGET_COUNT_EVENT: &str = "targetCount";

/// A reported telemetry event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub name: String,
    pub properties: Value,
}

/// Anything that can receive telemetry
pub trait TelemetrySink: Send + Sync {
    fn report_event(&self, name: &str, properties: Value);
}

/// Simple event bus using tokio broadcast channel
pub struct EventBus {
    tx: broadcast::Sender<TelemetryEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1024);
        Self { tx }
    }

    /// Publish an event
    pub fn publish(&self, event: TelemetryEvent) {
        let _ = self.tx.send(event); // Ignore error if no subscribers
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for EventBus {
    fn report_event(&self, name: &str, properties: Value) {
        tracing::trace!("telemetry {}: {}", name, properties);
        self.publish(TelemetryEvent {
            name: name.to_string(),
            properties,
        });
    }
}
