//! tapline CLI - Keg consumption pace tracking and depletion forecasting.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tapline_lib::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tapline")]
#[command(about = "Keg consumption pace tracking and depletion forecasting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict when a barrel runs dry
    Predict {
        /// Path to the ledger JSON file
        #[arg(short, long)]
        ledger: PathBuf,

        /// Barrel id to report on. Defaults to the lowest-order barrel with beer left.
        #[arg(short, long)]
        barrel: Option<String>,

        /// Pick the barrel by order number instead of id
        #[arg(long, conflicts_with = "barrel")]
        order: Option<u32>,

        /// Report instant (RFC 3339, e.g. 2024-09-21T21:00:00Z). Defaults to now.
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Event-wide drinking pace and session metrics
    Pace {
        /// Path to the ledger JSON file
        #[arg(short, long)]
        ledger: PathBuf,

        /// Event id to report on. Required when the ledger spans several events.
        #[arg(short, long)]
        event: Option<String>,

        /// Report instant (RFC 3339). Defaults to now.
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the barrels in a ledger
    Barrels {
        /// Path to the ledger JSON file
        #[arg(short, long)]
        ledger: PathBuf,
    },

    /// Show the session breakdown for an event
    Sessions {
        /// Path to the ledger JSON file
        #[arg(short, long)]
        ledger: PathBuf,

        /// Event id to report on. Required when the ledger spans several events.
        #[arg(short, long)]
        event: Option<String>,

        /// Report instant (RFC 3339). Defaults to now.
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Pace policy overrides. Unset flags fall back to the ledger's embedded
/// policy, then to the defaults.
#[derive(clap::Args)]
pub(crate) struct PolicyArgs {
    /// Rolling window length in minutes
    #[arg(long)]
    window_minutes: Option<i64>,

    /// Minimum drinks inside the window before the rolling pace is trusted
    #[arg(long)]
    min_consumed: Option<u32>,

    /// Minimum window coverage in minutes before the rolling pace is trusted
    #[arg(long)]
    min_elapsed_minutes: Option<i64>,

    /// Pause length in minutes that splits drinking sessions
    #[arg(long)]
    sleep_gap_minutes: Option<i64>,
}

impl PolicyArgs {
    /// Applies the flag overrides on top of the ledger's embedded policy.
    pub(crate) fn resolve(&self, embedded: Option<PacePolicy>) -> PacePolicy {
        let mut policy = embedded.unwrap_or_default();
        if let Some(minutes) = self.window_minutes {
            policy.window_minutes = minutes;
        }
        if let Some(consumed) = self.min_consumed {
            policy.min_consumed = consumed;
        }
        if let Some(minutes) = self.min_elapsed_minutes {
            policy.min_elapsed_minutes = minutes;
        }
        if let Some(minutes) = self.sleep_gap_minutes {
            policy.sleep_gap_minutes = minutes;
        }
        policy
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Predict {
            ledger,
            barrel,
            order,
            at,
            policy,
            format,
            output,
        } => {
            commands::predict::predict(
                &ledger,
                barrel.as_deref(),
                order,
                at.as_deref(),
                &policy,
                format,
                output.as_deref(),
            )
            .await
        }
        Commands::Pace {
            ledger,
            event,
            at,
            policy,
            format,
            output,
        } => {
            commands::pace::pace(
                &ledger,
                event.as_deref(),
                at.as_deref(),
                &policy,
                format,
                output.as_deref(),
            )
            .await
        }
        Commands::Barrels { ledger } => commands::barrels::list_barrels(&ledger).await,
        Commands::Sessions {
            ledger,
            event,
            at,
            policy,
        } => commands::sessions::sessions(&ledger, event.as_deref(), at.as_deref(), &policy).await,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
