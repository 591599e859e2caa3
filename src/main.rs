//! Intake CLI - Walk patients through branching intake questionnaires

use clap::Parser;
use intake::cli::{Cli, Commands, Context};
use intake::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so they don't mix with prompts
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> intake::Result<()> {
    let context = || Context::load(cli.data_dir.as_deref(), cli.dry_run);

    match cli.command {
        Some(Commands::Flows { json }) => {
            intake::cli::commands::flows::run(&context()?, json).await
        }
        Some(Commands::Run { flow_id, mode }) => {
            intake::cli::commands::run::run(&context()?, &flow_id, mode).await
        }
        Some(Commands::Tasks { action }) => {
            intake::cli::commands::tasks::run(&context()?, action).await
        }
        Some(Commands::Mode { mode }) => intake::cli::commands::mode::run(&context()?, mode).await,
        Some(Commands::Validate { file }) => intake::cli::commands::validate::run(&file).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
