use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod definitions;
mod matching;
mod parsing;
mod results;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("star_solver=debug,info")
    } else {
        EnvFilter::new("star_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Call(args) => {
            cli::call::run(&args, cli.format, cli.verbose)?;
        }
        cli::Commands::Definitions(args) => {
            cli::definitions::run(&args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
