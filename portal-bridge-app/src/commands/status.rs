use super::AppContext;

/// Online/battery/memory readout. Absent signals render as `--`, never as
/// a fabricated zero.
pub fn show(ctx: &AppContext) {
    let status = ctx.monitor.snapshot();
    let link = if status.online {
        "SYSTEM_LOCKED"
    } else {
        "LINK_SEVERED"
    };
    let battery = match status.battery {
        Some(battery) => {
            let charge_mark = if battery.charging { " ⚡" } else { "" };
            format!("{}%{charge_mark}", battery.level)
        }
        None => "--".to_string(),
    };
    let memory = match status.memory_gb {
        Some(memory_gb) => format!("{memory_gb}GB"),
        None => "--".to_string(),
    };
    println!("{link} | Battery: {battery} | RAM: {memory}");
}
