//! REPL surface: one command per line, standing in for the original's
//! click-driven card grid.

use std::io::{self, Write};

use anyhow::Result;

use crate::commands::{self, AppContext};

pub async fn run(ctx: AppContext) -> Result<()> {
    print_help();
    println!();

    loop {
        print!("portal> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "exit" | "quit" => break,
            "help" => print_help(),
            "list" => print_catalog(&ctx),
            "trigger" if !rest.is_empty() => commands::trigger::trigger(&ctx, rest).await,
            "trigger" => println!("Usage: trigger <id>"),
            "all" => commands::diagnostics::run_all(&ctx).await,
            "kill" => commands::trigger::kill(&ctx),
            "log" => commands::diagnostics::show_log(&ctx),
            "clear" => commands::diagnostics::clear(&ctx),
            "status" => commands::status::show(&ctx),
            "explain" => {
                commands::inspect::explain(&ctx, (!rest.is_empty()).then_some(rest)).await
            }
            "chat" if !rest.is_empty() => commands::inspect::chat(&ctx, rest).await,
            "chat" => println!("Usage: chat <message>"),
            // A bare capability id triggers its portal, like clicking the
            // card.
            other => commands::trigger::trigger(&ctx, other).await,
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  list               show the portal catalog");
    println!("  trigger <id>       fire one portal (or just type the id)");
    println!("  all                run the full system diagnostic");
    println!("  kill               terminate the live capture link");
    println!("  log                show the diagnostics console");
    println!("  clear              purge the diagnostics console");
    println!("  status             online / battery / memory readout");
    println!("  explain [id]       AI explanation of a portal bridge");
    println!("  chat <message>     ask the portal expert");
    println!("  exit               leave");
}

fn print_catalog(ctx: &AppContext) {
    for capability in ctx.registry.list() {
        println!(
            "  {:<14} {:<20} {}",
            capability.id, capability.name, capability.description
        );
    }
}
