//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Solana: `RpcClient` fetcher, raw account bytes
//! - JSON-RPC: reqwest fetcher, `jsonParsed` accounts
//! - Retry: Backoff policy shared by both fetchers
//! - CLI: Command-line interface handlers

pub mod solana;
pub mod json_rpc;
pub mod retry;
pub mod cli;

pub use solana::SolanaAccountFetcher;
pub use json_rpc::{JsonRpcAccountFetcher, JsonRpcConfig};
pub use retry::RetryPolicy;
pub use cli::CliApp;
