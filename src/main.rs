//! vaultctl - CLI for the Symbiotic vault SDK

use anyhow::Result;
use clap::{Parser, Subcommand};

use symbiotic_vault_sdk::cli::commands;
use symbiotic_vault_sdk::config::ClientConfig;

/// CLI for Symbiotic restaking vaults, EigenLayer vaults and SuperVaults
#[derive(Parser)]
#[command(name = "vaultctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a vault address and print its variant
    Classify {
        /// Vault address
        vault: String,
    },

    /// Resolve and print a vault's dependent contract addresses
    Resolve {
        /// Vault address
        vault: String,
    },

    /// Print a vault overview (asset, totals, limits, epochs, slashing)
    Info {
        /// Vault address
        vault: String,
    },

    /// Deposit assets into a vault
    Deposit {
        /// Vault address
        vault: String,

        /// Amount in the asset's smallest unit
        amount: String,

        /// Receiver of the shares (defaults to the signer)
        #[arg(long)]
        receiver: Option<String>,
    },

    /// Withdraw assets from a vault
    Withdraw {
        /// Vault address
        vault: String,

        /// Amount in the asset's smallest unit
        amount: String,

        /// Receiver of the assets (defaults to the signer)
        #[arg(long)]
        receiver: Option<String>,
    },

    /// Validate, store and set vault metadata from a JSON file
    SetMetadata {
        /// Vault address
        vault: String,

        /// Path to a metadata JSON file
        file: String,
    },

    /// Show current configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symbiotic_vault_sdk=info".parse()?),
        )
        .with_target(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = ClientConfig::load(&cli.config)?;

    match cli.command {
        Commands::Classify { vault } => commands::classify(&config, &vault).await,
        Commands::Resolve { vault } => commands::resolve(&config, &vault).await,
        Commands::Info { vault } => commands::info(&config, &vault).await,
        Commands::Deposit {
            vault,
            amount,
            receiver,
        } => commands::deposit(&config, &vault, &amount, receiver.as_deref()).await,
        Commands::Withdraw {
            vault,
            amount,
            receiver,
        } => commands::withdraw(&config, &vault, &amount, receiver.as_deref()).await,
        Commands::SetMetadata { vault, file } => {
            commands::set_metadata(&config, &vault, &file).await
        }
        Commands::Config => commands::show_config(&config),
    }
}
