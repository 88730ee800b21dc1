use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "app-checker",
    version,
    about = "Browse local app folders and check them against their Confluence pages"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the responsible person for every app folder matching APP
    Check {
        /// App number (or part of the folder name) to search for
        app: String,

        /// Role label to search for; repeat to try several in order
        #[arg(long = "role", value_name = "LABEL")]
        roles: Vec<String>,
    },
    /// Show the resolved configuration
    Config,
}

pub fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "app_checker=warn",
        1 => "app_checker=debug",
        _ => "app_checker=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
