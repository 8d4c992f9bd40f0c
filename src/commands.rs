use std::io::Write;

use tickdown_core::{AppConfigExt, Countdown, Level, TimerId};

use crate::bar;
use crate::context::CliContext;

const DEFAULT_LABEL: &str = "timer";

/// Start a countdown from an explicit length or a level preset
pub async fn start_timer(
    ctx: &CliContext,
    seconds: Option<i64>,
    level: Option<Level>,
    label: Option<String>,
) -> Result<(), String> {
    let (countdown, default_label, width) = {
        let config = ctx.config.read().await;
        let width = config.bar_width;
        match (seconds, level) {
            (Some(seconds), None) => (
                Countdown::new(seconds).period(config.tick_period()),
                DEFAULT_LABEL.to_string(),
                width,
            ),
            (None, Some(level)) => (config.countdown_for(level), level.to_string(), width),
            _ => return Err("error: pass exactly one of --seconds or --level\n".to_string()),
        }
    };
    let label = label.unwrap_or(default_label);
    let done_text = done_message(&label, level);
    let total = countdown.seconds();

    let tick_label = label.clone();
    let countdown = countdown
        .on_tick(move |remaining| {
            println!("{}", bar::render(&tick_label, remaining, total, width));
        })
        .on_done(move || println!("{done_text}"));

    let id = ctx
        .timers
        .lock()
        .await
        .start(label.clone(), countdown)
        .map_err(|e| e.to_string())?;

    println!("started {id} '{label}' ({total}s)");
    Ok(())
}

/// Line printed when a countdown runs out. Level timers point at the next level.
fn done_message(label: &str, level: Option<Level>) -> String {
    match level.and_then(Level::next) {
        Some(next) => format!("{label}: time's up (next level: {next})"),
        None => format!("{label}: time's up"),
    }
}

pub async fn list_timers(ctx: &CliContext) {
    let entries = ctx.timers.lock().await.entries();
    if entries.is_empty() {
        println!("No timers");
        return;
    }

    println!(
        "{:<6} {:<20} {:<10} {:>10} Started",
        "Id", "Label", "State", "Remaining"
    );
    println!("{}", "-".repeat(60));

    for entry in entries {
        println!(
            "{:<6} {:<20} {:<10} {:>10} {}",
            entry.id.to_string(),
            entry.label,
            entry.state.as_str(),
            format!("{}/{}", entry.remaining.max(0), entry.seconds),
            entry.started_at.format("%H:%M:%S"),
        );
    }
}

pub async fn cancel_timer(ctx: &CliContext, id: u64) {
    let id = TimerId(id);
    if ctx.timers.lock().await.cancel(id) {
        println!("cancelled {id}");
    } else {
        println!("no running timer {id}");
    }
}

pub async fn cancel_all(ctx: &CliContext) {
    let stopped = ctx.timers.lock().await.cancel_all();
    println!("cancelled {stopped} timer(s)");
}

pub async fn prune_timers(ctx: &CliContext) {
    let removed = ctx.timers.lock().await.prune();
    println!("removed {removed} finished timer(s)");
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("tick period: {}ms", config.tick_period_ms);
    println!("bar width:   {}", config.bar_width);
    println!("{:<8} {:>10} {:>10}", "Level", "Seconds", "Questions");
    for level in Level::ALL {
        let limits = config.limits(level);
        println!(
            "{:<8} {:>10} {:>10}",
            level.as_str(),
            limits.time_limit_secs,
            limits.question_count
        );
    }
}

/// Update the tick period for timers started from now on and persist it
pub async fn set_period(ctx: &CliContext, ms: u64) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    config.tick_period_ms = ms.max(1);
    let saved = match &ctx.config_path {
        Some(path) => config.save_to(path),
        None => config.save(),
    };
    saved.map_err(|e| format!("error: {e}\n"))?;
    println!("tick period set to {}ms", config.tick_period_ms);
    Ok(())
}

pub async fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.timers.lock().await.cancel_all();
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
