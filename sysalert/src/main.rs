//! sysalert
//!
//! Emails an alert when disk usage on the configured path exceeds the
//! configured percentage. Exits non-zero on any configuration, query or
//! delivery failure.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sysalert::info::partitions::{list_partitions, render_partitions};
use sysalert::init::{init_tracing, LogFormat};
use sysalert::{AlertConfig, CheckOptions, CheckOutcome, Notifier, PlatformProvider, SmtpMailer};

#[derive(Parser)]
#[command(name = "sysalert")]
#[command(about = "Email an alert when disk usage crosses a threshold")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: search ./, /etc/sysalert/, ~/.sysalert/)
    #[arg(long, short, global = true, env = "SYSALERT_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log format on stderr
    #[arg(
        long,
        global = true,
        value_enum,
        ignore_case = true,
        env = "LOG_FORMAT",
        default_value_t = LogFormat::Text
    )]
    log_format: LogFormat,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the configured path and alert if over threshold (default)
    Check {
        /// Print the alert message instead of sending it
        #[arg(long)]
        dry_run: bool,
        /// Send the alert even when usage is below the threshold
        #[arg(long)]
        force: bool,
    },
    /// List mounted filesystems
    Partitions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Check {
        dry_run: false,
        force: false,
    }) {
        Commands::Check { dry_run, force } => {
            run_check(cli.config, cli.json, CheckOptions { dry_run, force }).await?;
        }
        Commands::Partitions => {
            let partitions = list_partitions();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&partitions)?);
            } else {
                print!("{}", render_partitions(&partitions));
            }
        }
    }

    Ok(())
}

async fn run_check(config: Option<PathBuf>, json: bool, options: CheckOptions) -> Result<()> {
    let config = AlertConfig::load(config.as_deref()).context("failed to load configuration")?;
    let provider = PlatformProvider::default();
    let mailer = SmtpMailer::new(&config.smtp);
    let notifier = Notifier::new(&config, &provider, &mailer);

    let checked = notifier.check().context("disk check failed")?;

    // Report before sending so a delivery failure still shows the figures
    if json {
        println!("{}", serde_json::to_string_pretty(&checked.summary)?);
    } else {
        println!("{}", checked.summary.render());
    }

    let outcome = notifier
        .notify(checked, options)
        .await
        .context("failed to send disk alert")?;

    if let CheckOutcome::DryRun { raw_message, .. } = &outcome {
        println!("{}", raw_message);
    }

    Ok(())
}
