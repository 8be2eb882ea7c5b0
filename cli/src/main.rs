mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use env_utils::setup_logging;

#[derive(Parser)]
#[command(name = "farm")]
#[command(about = "Provision and tear down bot farms")]
#[command(version)]
struct Cli {
    /// Log progress at info level for every command
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new bot farm and print its configuration record
    Deploy {
        /// Farm name, used as the resource group and resource name prefix
        #[arg(short, long)]
        name: String,

        /// Public address the bot messaging endpoint is served from, e.g. https://bots.example.com
        #[arg(short, long)]
        proxy_address: String,

        /// Region to deploy to (overrides CLOUD_LOCATION)
        #[arg(short, long)]
        location: Option<String>,

        /// Write the record to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the subscriptions available to the configured account
    Subscriptions,

    /// Delete a bot farm's resource group and everything in it
    Teardown {
        /// Farm name given at deploy time
        #[arg(short, long)]
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Print the knowledge-base search index definition
    SearchSchema {
        /// Index name
        #[arg(short, long)]
        index: Option<String>,
    },
}

impl Commands {
    /// Commands that talk to the cloud for minutes and should report each step.
    fn shows_progress(&self) -> bool {
        matches!(self, Commands::Deploy { .. } | Commands::Teardown { .. })
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose || cli.command.shows_progress()) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let result = match cli.command {
        Commands::Deploy {
            name,
            proxy_address,
            location,
            output,
        } => commands::handle_deploy(&name, &proxy_address, location, output.as_deref()).await,
        Commands::Subscriptions => commands::handle_subscriptions().await,
        Commands::Teardown { name, yes } => commands::handle_teardown(&name, yes).await,
        Commands::SearchSchema { index } => commands::handle_search_schema(index.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}
