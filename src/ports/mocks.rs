use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use super::accounts::{AccountBody, AccountFetcher, AccountPayload, FetchError, RawAccount};

/// In-memory account store that records every batch it is asked for
#[derive(Debug, Default, Clone)]
pub struct StaticAccountFetcher {
    accounts: Arc<Mutex<HashMap<Pubkey, AccountBody>>>,
    calls: Arc<Mutex<Vec<Vec<Pubkey>>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl StaticAccountFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to store raw bytes at an address
    pub fn with_bytes(self, address: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        self.with_payload(address, owner, AccountPayload::Bytes(data))
    }

    /// Builder method to store any payload at an address
    pub fn with_payload(self, address: Pubkey, owner: Pubkey, payload: AccountPayload) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(address, AccountBody { owner, payload });
        self
    }

    /// Builder method to make every fetch fail with a transport error
    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all recorded batches
    pub fn get_calls(&self) -> Vec<Vec<Pubkey>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountFetcher for StaticAccountFetcher {
    async fn fetch_many(&self, addresses: &[Pubkey]) -> Result<Vec<RawAccount>, FetchError> {
        self.calls.lock().unwrap().push(addresses.to_vec());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(FetchError::Transport(message));
        }

        let accounts = self.accounts.lock().unwrap();
        Ok(addresses
            .iter()
            .map(|address| RawAccount {
                address: *address,
                body: accounts.get(address).cloned(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher_preserves_order() {
        let present = Pubkey::new_unique();
        let absent = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let fetcher = StaticAccountFetcher::new().with_bytes(present, owner, vec![1, 2, 3]);

        let accounts = fetcher.fetch_many(&[absent, present]).await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].address, absent);
        assert!(!accounts[0].exists());
        assert_eq!(accounts[1].address, present);
        assert_eq!(accounts[1].body.as_ref().unwrap().owner, owner);

        assert_eq!(fetcher.get_calls(), vec![vec![absent, present]]);
    }

    #[tokio::test]
    async fn test_static_fetcher_failure() {
        let fetcher = StaticAccountFetcher::new().with_failure("connection refused");
        let result = fetcher.fetch_many(&[Pubkey::new_unique()]).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
        assert_eq!(fetcher.get_calls().len(), 1);
    }
}
