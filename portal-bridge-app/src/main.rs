use std::sync::Arc;

use anyhow::Result;
use portal_bridge_core::CapabilityRegistry;
use portal_bridge_inspector::{ExplanationClient, InspectorConfig};
use portal_bridge_monitor::{StatusMonitor, SysfsProbe};
use portal_bridge_portals::{
    DiagnosticSequencer, DiagnosticsLog, MediaLink, PortalDispatcher, PortalTable,
};
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod repl;

use commands::AppContext;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = if Config::exists() {
        Config::load()?
    } else {
        // First run: drop a template config the user can edit.
        let config = Config::default();
        let _ = config.save();
        config
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║              Bridge Portals :: Nexus Terminal                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let registry = Arc::new(CapabilityRegistry::builtin());
    let log = Arc::new(DiagnosticsLog::new());
    let media = Arc::new(MediaLink::new());
    let dispatcher = Arc::new(PortalDispatcher::new(
        Arc::new(PortalTable::builtin()),
        Arc::clone(&log),
        Arc::clone(&media),
    ));
    let sequencer = Arc::new(DiagnosticSequencer::with_step_delay(
        Arc::clone(&dispatcher),
        Arc::clone(&registry),
        Arc::clone(&log),
        Duration::from_millis(config.sequencer_step_delay_ms),
    ));

    let monitor = Arc::new(StatusMonitor::new(Arc::new(SysfsProbe::new())));
    monitor.start();

    tracing::info!(capabilities = registry.len(), "portal bridge initialized");

    let inspector = Arc::new(ExplanationClient::new(InspectorConfig {
        endpoint: config.inspector_endpoint(),
        model: config.inspector_model(),
        api_key: config.api_key(),
    }));

    let ctx = AppContext {
        registry,
        log,
        dispatcher,
        sequencer,
        monitor: Arc::clone(&monitor),
        inspector,
    };
    let result = repl::run(ctx).await;

    monitor.stop();
    result
}
