use anyhow::Result;
use clap::Parser;

use app_checker::app::App;
use app_checker::cli::{self, Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(&cli);

    match cli.command {
        Some(Commands::Check { app, roles }) => App::check(&app, roles).await,
        Some(Commands::Config) => App::config(),
        None => App::run().await,
    }
}
