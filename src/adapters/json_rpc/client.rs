//! JSON-RPC Account Client
//!
//! Fetches accounts from Solana RPC using `getMultipleAccounts` with jsonParsed encoding.
//! Mints come back already parsed (including Token-2022 extensions); accounts the
//! node cannot parse, such as Metaplex metadata, come back as base64.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;

use super::types::MultipleAccountsResponse;
use crate::adapters::retry::RetryPolicy;
use crate::ports::{AccountFetcher, FetchError, RawAccount};

/// Configuration for the JsonRpcAccountFetcher
#[derive(Debug, Clone)]
pub struct JsonRpcConfig {
    /// Solana RPC endpoint URL
    pub rpc_url: String,
    /// Commitment level sent with every request
    pub commitment: String,
    /// Request timeout
    pub timeout: Duration,
    /// Backoff for rate limits, 5xx and transport failures
    pub retry: RetryPolicy,
}

impl Default for JsonRpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl JsonRpcConfig {
    /// Create config with a custom RPC URL
    pub fn with_rpc_url(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }
}

/// Pre-parsed account fetcher over raw JSON-RPC
#[derive(Debug, Clone)]
pub struct JsonRpcAccountFetcher {
    config: JsonRpcConfig,
    http: Client,
}

impl JsonRpcAccountFetcher {
    /// Create a new fetcher with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(JsonRpcConfig::default())
    }

    /// Create a new fetcher with custom configuration
    pub fn with_config(config: JsonRpcConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Get the configured RPC URL
    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    fn request_body(&self, addresses: &[Pubkey]) -> serde_json::Value {
        let keys: Vec<String> = addresses.iter().map(|a| a.to_string()).collect();
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getMultipleAccounts",
            "params": [
                keys,
                {
                    "encoding": "jsonParsed",
                    "commitment": self.config.commitment
                }
            ]
        })
    }

    /// One POST, with HTTP status mapped onto retryable errors
    async fn post(&self, body: &serde_json::Value) -> Result<MultipleAccountsResponse, FetchError> {
        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        check_status(response.status())?;

        response
            .json()
            .await
            .map_err(|e| FetchError::ParseError(format!("Failed to parse JSON: {}", e)))
    }
}

/// Map a non-success HTTP status onto a retryable or permanent error
fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(FetchError::RateLimited)
    } else if status.is_server_error() {
        Err(FetchError::ServerError(status.as_u16()))
    } else if !status.is_success() {
        Err(FetchError::HttpStatus(status.as_u16()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl AccountFetcher for JsonRpcAccountFetcher {
    async fn fetch_many(&self, addresses: &[Pubkey]) -> Result<Vec<RawAccount>, FetchError> {
        let body = self.request_body(addresses);
        let response = self
            .config
            .retry
            .run("getMultipleAccounts", || self.post(&body))
            .await?;

        response.into_raw_accounts(addresses)
    }
}
