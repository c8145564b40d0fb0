use clap::Parser;

mod cli;
mod config;
mod error;
mod output;
mod pipeline;
mod planner;
mod prompts;
mod provider;
mod server;
mod telemetry;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values in the process environment win over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The server reports requests at info; one-shot commands stay quiet unless --verbose
    let level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    telemetry::init_logging(cli.global.verbose, level);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(&cli.global, args).await,
        Commands::Generate(args) => cli::generate::execute(&cli.global, args).await,
        Commands::Plan(args) => cli::plan::execute(&cli.global, args).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
