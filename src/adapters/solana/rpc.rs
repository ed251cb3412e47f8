use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_request::RpcError;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::retry::RetryPolicy;
use crate::ports::{AccountFetcher, AccountPayload, FetchError, RawAccount};

/// Raw-bytes account fetcher over the Solana RPC client
///
/// Issues one `getMultipleAccounts` call per batch with base64 payloads;
/// layouts are decoded downstream.
#[derive(Clone)]
pub struct SolanaAccountFetcher {
    client: Arc<RpcClient>,
    retry: RetryPolicy,
}

impl SolanaAccountFetcher {
    /// Create a new fetcher with confirmed commitment and default retries
    pub fn new(rpc_url: String) -> Self {
        Self::with_options(
            rpc_url,
            CommitmentConfig::confirmed(),
            Duration::from_secs(30),
            RetryPolicy::default(),
        )
    }

    pub fn with_options(
        rpc_url: String,
        commitment: CommitmentConfig,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        let client = Arc::new(RpcClient::new_with_timeout_and_commitment(
            rpc_url, timeout, commitment,
        ));
        Self { client, retry }
    }

    /// Get the configured RPC URL
    pub fn rpc_url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl AccountFetcher for SolanaAccountFetcher {
    async fn fetch_many(&self, addresses: &[Pubkey]) -> Result<Vec<RawAccount>, FetchError> {
        let keys = addresses.to_vec();

        let accounts = self
            .retry
            .run("getMultipleAccounts", || {
                let client = Arc::clone(&self.client);
                let keys = keys.clone();
                async move {
                    // Spawn blocking to make sync RPC call async-compatible
                    tokio::task::spawn_blocking(move || {
                        client
                            .get_multiple_accounts_with_commitment(&keys, client.commitment())
                            .map_err(classify_client_error)
                    })
                    .await
                    .map_err(|e| FetchError::Transport(format!("Task join error: {}", e)))?
                }
            })
            .await?;

        tracing::debug!(
            slot = accounts.context.slot,
            requested = addresses.len(),
            "getMultipleAccounts returned"
        );

        into_raw_accounts(addresses, accounts.value)
    }
}

/// Pair each requested address with its (possibly missing) account
fn into_raw_accounts(
    addresses: &[Pubkey],
    accounts: Vec<Option<Account>>,
) -> Result<Vec<RawAccount>, FetchError> {
    if accounts.len() != addresses.len() {
        return Err(FetchError::ResponseLength {
            expected: addresses.len(),
            actual: accounts.len(),
        });
    }

    Ok(addresses
        .iter()
        .zip(accounts)
        .map(|(address, account)| match account {
            Some(account) => {
                RawAccount::new(*address, account.owner, AccountPayload::Bytes(account.data))
            }
            None => RawAccount::missing(*address),
        })
        .collect())
}

fn classify_client_error(error: ClientError) -> FetchError {
    match error.kind() {
        ClientErrorKind::Reqwest(e) => match e.status() {
            Some(status) if status.as_u16() == 429 => FetchError::RateLimited,
            Some(status) if status.is_server_error() => FetchError::ServerError(status.as_u16()),
            Some(status) if !status.is_success() => FetchError::HttpStatus(status.as_u16()),
            _ => FetchError::Transport(error.to_string()),
        },
        ClientErrorKind::Io(_) => FetchError::Transport(error.to_string()),
        ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
            FetchError::Rpc {
                code: *code,
                message: message.clone(),
            }
        }
        _ => FetchError::ParseError(error.to_string()),
    }
}
