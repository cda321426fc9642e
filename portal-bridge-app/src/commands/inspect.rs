use super::AppContext;

/// Ask the inspector to explain a portal (the active one by default).
pub async fn explain(ctx: &AppContext, id: Option<&str>) {
    let target = match id.map(str::to_string).or_else(|| ctx.dispatcher.active_portal()) {
        Some(target) => target,
        None => {
            println!("Select a portal feature to analyze the system bridge.");
            return;
        }
    };
    println!("Analyzing bridge: {}", target.to_uppercase());
    let text = ctx.inspector.explain(&target).await;
    println!("{text}");
}

/// Free-form question to the portal expert.
pub async fn chat(ctx: &AppContext, message: &str) {
    let text = ctx.inspector.chat(message).await;
    println!("{text}");
}
