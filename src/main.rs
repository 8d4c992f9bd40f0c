use clap::{Parser, Subcommand};
use std::io::Write;

use tickdown::CliContext;
use tickdown::commands;
use tickdown::logging;
use tickdown::readline;
use tickdown_core::Level;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "countdown timers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a countdown of N seconds or for a level preset
    Start {
        #[arg(short, long, allow_negative_numbers = true, conflicts_with = "level")]
        seconds: Option<i64>,
        #[arg(short = 'L', long)]
        level: Option<Level>,
        #[arg(short, long)]
        label: Option<String>,
    },
    List,
    Cancel {
        #[arg(short, long)]
        id: u64,
    },
    CancelAll,
    Prune,
    Config,
    SetPeriod {
        #[arg(short, long)]
        ms: u64,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tickdown".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Start {
            seconds,
            level,
            label,
        }) => commands::start_timer(ctx, seconds, level, label).await?,
        Some(Commands::List) => commands::list_timers(ctx).await,
        Some(Commands::Cancel { id }) => commands::cancel_timer(ctx, id).await,
        Some(Commands::CancelAll) => commands::cancel_all(ctx).await,
        Some(Commands::Prune) => commands::prune_timers(ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SetPeriod { ms }) => commands::set_period(ctx, ms).await?,
        Some(Commands::Exit) => {
            commands::exit(ctx).await?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
