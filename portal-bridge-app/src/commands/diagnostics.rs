use portal_bridge_core::Severity;

use super::AppContext;

/// Run the full catalog smoke test, one portal at a time.
pub async fn run_all(ctx: &AppContext) {
    if ctx.sequencer.is_running() {
        println!("Diagnostic already running.");
        return;
    }
    ctx.sequencer.run_all().await;
    println!(
        "✅ Diagnostic pass finished over {} portals.",
        ctx.registry.len()
    );
}

/// Render the console, newest first, with severity styling derived from
/// the entry text.
pub fn show_log(ctx: &AppContext) {
    let entries = ctx.log.entries();
    if entries.is_empty() {
        println!("Awaiting kernel interface telemetry...");
        return;
    }
    for entry in entries {
        let stamp = entry
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S");
        match entry.severity() {
            Severity::Error => println!("[{stamp}] ✗ {}", entry.text),
            Severity::Marker => println!("[{stamp}] ── {}", entry.text),
            Severity::Normal => println!("[{stamp}] • {}", entry.text),
        }
    }
}

pub fn clear(ctx: &AppContext) {
    ctx.log.clear();
    println!("Log purged.");
}
