use clap::Parser;

use crypto_monitor::cli::{self, output, CheckCommand, Cli, Commands};
use crypto_monitor::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Check(CheckCommand::Config(arg)) => cli::check::execute_config(&arg.config),
        Commands::Check(CheckCommand::Telegram(arg)) => {
            cli::check::execute_telegram(&arg.config).await
        }
        Commands::Check(CheckCommand::Watchlist(arg)) => {
            cli::check::execute_watchlist(&arg.config).await
        }
        Commands::Analyze(args) => cli::analyze::execute(args).await,
    }
}
