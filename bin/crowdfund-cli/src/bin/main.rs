//! CLI for the Crowdfund and IERC20 interface descriptors.
//!
//! Offline commands work on the built-in descriptors:
//! - `abi`, `validate`, `selectors`: inspect the descriptors
//! - `encode`, `decode-*`: encode calls, decode outputs, logs and reverts
//!
//! `count` and `token` read from a deployment given by the config file.

use clap::{Parser, Subcommand};
use crowdfund_cli::{commands, config::Config};
use tracing::info;

#[derive(Parser)]
#[command(name = "crowdfund-abi")]
#[command(about = "Encode and decode Crowdfund contract calls")]
struct Cli {
    /// Path to the configuration file (only read by on-chain commands)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the RPC url from the configuration file
    #[arg(long, env = "CROWDFUND_RPC_URL")]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the JSON ABI of a contract
    Abi { contract: String },

    /// Check the structure of all built-in descriptors
    Validate,

    /// List function/error selectors and event topics
    Selectors { contract: String },

    /// Encode a function call
    Encode {
        contract: String,
        function: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Decode the return data of a function
    DecodeOutput {
        contract: String,
        function: String,
        data: String,
    },

    /// Decode calldata
    DecodeCall { contract: String, data: String },

    /// Decode a log record
    DecodeLog {
        contract: String,
        /// Log topics, signature topic first
        #[arg(long = "topic", required = true)]
        topics: Vec<String>,
        /// Log data
        #[arg(long, default_value = "0x")]
        data: String,
    },

    /// Name the error carried by revert data
    DecodeRevert { contract: String, data: String },

    /// Query the number of launched campaigns
    Count,

    /// Query the pledge token address
    Token,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Abi { contract } => commands::abi(&contract)?,
        Command::Validate => commands::validate()?,
        Command::Selectors { contract } => commands::selectors(&contract)?,
        Command::Encode {
            contract,
            function,
            args,
        } => commands::encode(&contract, &function, &args)?,
        Command::DecodeOutput {
            contract,
            function,
            data,
        } => commands::decode_output(&contract, &function, &data)?,
        Command::DecodeCall { contract, data } => commands::decode_call(&contract, &data)?,
        Command::DecodeLog {
            contract,
            topics,
            data,
        } => commands::decode_log(&contract, &topics, &data)?,
        Command::DecodeRevert { contract, data } => commands::decode_revert(&contract, &data)?,
        Command::Count => commands::count(&load_config(&cli.config, cli.rpc_url)?).await?,
        Command::Token => commands::token(&load_config(&cli.config, cli.rpc_url)?).await?,
    };

    println!("{output}");

    Ok(())
}

fn load_config(path: &str, rpc_url: Option<String>) -> eyre::Result<Config> {
    info!("Loading config: {}", path);
    let mut config = Config::from_file(path)?;

    // Override rpc url from CLI flag
    if let Some(rpc_url) = rpc_url {
        config.rpc_url = rpc_url;
    }

    info!("Loaded config:");
    info!("  RPC URL: {}", config.rpc_url);
    info!("  Network: {:?}", config.deployment.network);
    info!("  Chain ID: {}", config.deployment.chain_id);
    info!("  Crowdfund: {}", config.deployment.crowdfund);
    info!("  Token: {}", config.deployment.token);

    Ok(config)
}
