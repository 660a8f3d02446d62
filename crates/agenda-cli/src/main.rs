//! agenda-ics entry point.

use std::process::ExitCode;

use agenda_core::{TracingConfig, init_tracing};
use clap::Parser;

use agenda_cli::cli::{Cli, Command, ConfigAction};
use agenda_cli::commands;
use agenda_cli::config::AgendaConfig;
use agenda_cli::error::{AppError, AppResult};
use agenda_cli::pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cron()
    };
    if let Err(e) = init_tracing(tracing_config.with_format(cli.log_format)) {
        eprintln!("error: {}", AppError::from(e));
        return ExitCode::FAILURE;
    }

    // Fetch and write failures are logged by the pipeline and do not change
    // the exit status; only unusable configuration does.
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = match cli.config {
        Some(ref path) => AgendaConfig::load_from(path)?,
        None => AgendaConfig::load()?,
    };
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
        None if cli.dry_run => {
            let records = pipeline::scrape(&config).await?;
            let json = serde_json::to_string_pretty(&records).map_err(std::io::Error::from)?;
            println!("{}", json);
            Ok(())
        }
        None => {
            config.validate()?;
            pipeline::run(&config).await?;
            Ok(())
        }
    }
}
