//! CLI Command Handlers
//!
//! Implementation of the `lookup` and `derive` commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::adapters::json_rpc::{JsonRpcAccountFetcher, JsonRpcConfig};
use crate::adapters::solana::SolanaAccountFetcher;
use crate::application::TokenLookup;
use crate::config::{load_config, Config, FetchMode};
use crate::domain::{derive_metadata_address, parse_address, FetchResult};

/// Mintscope - Solana token mint and metadata lookup
#[derive(Parser, Debug)]
#[command(
    name = "mintscope",
    version = env!("CARGO_PKG_VERSION"),
    about = "Solana token mint and metadata lookup",
    long_about = "Mintscope fetches a token's mint account and its Metaplex metadata \
                  account in one batched RPC call, falling back to Token-2022 \
                  embedded metadata when no metadata account exists."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch mint and metadata for a token
    Lookup(LookupCmd),

    /// Print the metadata account address for a mint (offline)
    Derive(DeriveCmd),
}

/// Fetch mint and metadata
#[derive(Parser, Debug)]
pub struct LookupCmd {
    /// Mint address (base58)
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override RPC URL
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Override fetch mode: raw or parsed
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<FetchMode>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Derive the metadata PDA
#[derive(Parser, Debug)]
pub struct DeriveCmd {
    /// Mint address (base58)
    #[arg(value_name = "MINT")]
    pub mint: String,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Lookup(cmd) => {
            let config = resolve_config(cmd.config.as_deref())?;
            init_logging(app.verbose, app.debug, &config.logging.level)?;
            lookup_command(cmd, config).await
        }
        Command::Derive(cmd) => {
            init_logging(app.verbose, app.debug, "warn")?;
            derive_command(cmd)
        }
    }
}

/// Initialize logging system
///
/// `RUST_LOG` wins over everything; then `--debug`, `--verbose`, and finally
/// the configured level.
fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        configured
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load the config file if one was given, otherwise use defaults
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => Ok(Config::default()),
    }
}

async fn lookup_command(cmd: LookupCmd, config: Config) -> Result<()> {
    let rpc = &config.rpc;
    let rpc_url = cmd.rpc_url.clone().unwrap_or_else(|| rpc.get_rpc_url());
    let mode = cmd.mode.unwrap_or(rpc.mode);

    tracing::info!("Looking up {} via {} ({:?} mode)", cmd.mint, rpc_url, mode);

    let lookup = match mode {
        FetchMode::Raw => TokenLookup::new(SolanaAccountFetcher::with_options(
            rpc_url,
            rpc.commitment_config()?,
            rpc.timeout(),
            rpc.retry_policy(),
        )),
        FetchMode::Parsed => {
            let fetcher = JsonRpcAccountFetcher::with_config(JsonRpcConfig {
                rpc_url,
                commitment: rpc.commitment.clone(),
                timeout: rpc.timeout(),
                retry: rpc.retry_policy(),
            })
            .context("Failed to create JSON-RPC client")?;
            TokenLookup::new(fetcher)
        }
    };

    let result = lookup
        .fetch(&cmd.mint)
        .await
        .with_context(|| format!("Lookup failed for {}", cmd.mint))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn derive_command(cmd: DeriveCmd) -> Result<()> {
    let mint = parse_address(&cmd.mint)?;
    let metadata = derive_metadata_address(&mint)?;
    println!("{}", metadata);
    Ok(())
}

fn print_result(result: &FetchResult) {
    let mint = &result.mint;
    let metadata = &result.metadata;
    let or_none = |value: Option<String>| value.unwrap_or_else(|| "none".to_string());

    println!("Mint:              {}", result.mint_address);
    println!("  Program:         {:?} (Token-2022: {})", result.token_program, result.is_token22);
    println!(
        "  Supply:          {} ({} adjusted)",
        mint.supply,
        mint.supply_adjusted()
    );
    println!("  Decimals:        {}", mint.decimals);
    println!("  Initialized:     {}", mint.is_initialized);
    println!(
        "  Mint authority:  {}",
        or_none(mint.mint_authority.map(|p| p.to_string()))
    );
    println!(
        "  Freeze authority: {}",
        or_none(mint.freeze_authority.map(|p| p.to_string()))
    );
    if !mint.extensions().is_empty() {
        let kinds: Vec<&str> = mint.extensions().iter().map(|e| e.kind()).collect();
        println!("  Extensions:      {}", kinds.join(", "));
    }

    println!("Metadata:          {}", result.metadata_address);
    println!("  Source:          {:?}", result.metadata_source);
    println!("  Name:            {}", metadata.name);
    println!("  Symbol:          {}", metadata.symbol);
    println!("  URI:             {}", metadata.uri);
    println!(
        "  Update authority: {}",
        or_none(metadata.update_authority.map(|p| p.to_string()))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliApp::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_with_overrides() {
        let app = CliApp::try_parse_from([
            "mintscope",
            "--verbose",
            "lookup",
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "--mode",
            "parsed",
            "--rpc-url",
            "https://rpc.example.com",
            "--json",
        ])
        .unwrap();

        assert!(app.verbose);
        match app.command {
            Command::Lookup(cmd) => {
                assert_eq!(cmd.mint, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
                assert_eq!(cmd.mode, Some(FetchMode::Parsed));
                assert_eq!(cmd.rpc_url.as_deref(), Some("https://rpc.example.com"));
                assert!(cmd.config.is_none());
                assert!(cmd.json);
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let result = CliApp::try_parse_from(["mintscope", "lookup", "So11111111111111111111111111111111111111112", "--mode", "grpc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_derive() {
        let app = CliApp::try_parse_from([
            "mintscope",
            "derive",
            "6p6xgHyF7AeE6TZkSmFsko444wqoP15icUSqi2jfGiPN",
        ])
        .unwrap();
        assert!(matches!(app.command, Command::Derive(_)));
    }

    #[test]
    fn test_resolve_config_defaults_without_path() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config.rpc.mode, FetchMode::Raw);
    }

    #[test]
    fn test_resolve_config_missing_file() {
        assert!(resolve_config(Some(Path::new("/nonexistent/mintscope.toml"))).is_err());
    }
}
