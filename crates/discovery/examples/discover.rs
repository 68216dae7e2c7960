//! Discovery example - resolve the debugger URL of a running Chrome
//!
//! Start Chrome with `--remote-debugging-port=9222`, then:
//! `cargo run --example discover -- localhost 9222 [target-url]`

use cdp_discovery::{EventBus, Target, TargetDiscovery, TargetFilter};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "localhost".to_string());
    let port: u16 = args.next().as_deref().unwrap_or("9222").parse()?;
    let target_url = args.next();

    let discovery = TargetDiscovery::default();

    // Print telemetry as it happens
    let bus = Arc::new(EventBus::new());
    let mut event_rx = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            println!("Telemetry: {} {}", event.name, event.properties);
        }
    });
    let discovery = discovery.with_telemetry(bus);

    // Pages only - skip workers and extensions
    let pages: TargetFilter = Arc::new(|t: &Target| t.target_type() == Some("page"));

    let ws_url = discovery
        .discover(&address, port, Some(pages), target_url.as_deref())
        .await?;
    println!("WebSocket debugger URL: {}", ws_url);

    Ok(())
}
