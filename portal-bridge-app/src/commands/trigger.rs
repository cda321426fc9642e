use portal_bridge_core::Outcome;

use super::AppContext;

/// Fire one portal and echo its outcome inline. The dispatcher records the
/// same result in the diagnostics log.
pub async fn trigger(ctx: &AppContext, id: &str) {
    if ctx.registry.get(id).is_none() {
        println!("(unlisted id; the dispatcher is permissive and will fire a no-op)");
    }
    let outcome = ctx.dispatcher.dispatch(id).await;
    match &outcome {
        Outcome::Success(message) => println!("✅ {message}"),
        Outcome::Unsupported(message) => println!("⚠️  {message}"),
        Outcome::Denied(message) => println!("🚫 {message}"),
        Outcome::Failed(message) => println!("❌ {message}"),
        Outcome::Cancelled => println!("· dialog dismissed"),
    }
}

/// Tear down the live capture link, if one is held.
pub fn kill(ctx: &AppContext) {
    match ctx.dispatcher.release_media() {
        Some(kind) => println!("✅ {} link terminated.", kind.portal_name()),
        None => println!("No live capture link."),
    }
}
