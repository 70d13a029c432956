mod cli;
mod commands;
mod config;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_level);
    let config = config::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Sdl(args) => commands::schema::sdl(&args.model, &config)?,
        Commands::Fields(args) => commands::schema::fields(&args.model, &config)?,
        Commands::Query(args) => {
            commands::query::execute(&args.model, args.data.as_deref(), &args.query, &config)
                .await?;
        }
    }
    Ok(())
}
