//! # wht CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

use wht_engine::{total_withholding, CalculatorRegistry};

/// Withholding tax calculator.
///
/// Applies the settings of a withholding definition to a financial document
/// and reports what was withheld.
#[derive(Parser, Debug)]
#[command(name = "wht", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Apply a withholding configuration to a document.
    Run(wht_cli::run::RunArgs),
    /// List registered calculator handlers.
    Handlers(wht_cli::handlers::HandlersArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let outcomes = wht_cli::run::run_withholding(&args)?;
            let total = total_withholding(&outcomes)?;
            tracing::info!(
                total = %total,
                outcomes = outcomes.len(),
                "run complete"
            );
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        Commands::Handlers(args) => {
            let registry = CalculatorRegistry::with_defaults();
            println!("{}", wht_cli::handlers::list_handlers(&registry, &args)?);
        }
    }

    Ok(())
}
