use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::domain::{decode_metadata, decode_mint, DecodeError, MetadataRecord, MintRecord};

/// Account fetch error type
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rate limited, try again later")]
    RateLimited,

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Request rejected: HTTP {0}")]
    HttpStatus(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Expected {expected} accounts in response, got {actual}")]
    ResponseLength { expected: usize, actual: usize },
}

impl FetchError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Transport(_) | FetchError::RateLimited | FetchError::ServerError(_)
        )
    }
}

/// Account data as delivered by a fetcher
#[derive(Debug, Clone, PartialEq)]
pub enum AccountPayload {
    /// Undecoded account bytes
    Bytes(Vec<u8>),
    /// Mint already decoded by the backend (`jsonParsed`)
    ParsedMint(MintRecord),
    /// Parsed by the backend into a shape this crate does not consume
    ParsedOther { program: String, kind: String },
}

impl AccountPayload {
    pub fn to_mint(&self) -> Result<MintRecord, DecodeError> {
        match self {
            AccountPayload::Bytes(data) => decode_mint(data),
            AccountPayload::ParsedMint(mint) => Ok(mint.clone()),
            AccountPayload::ParsedOther { program, kind } => Err(DecodeError::UnexpectedPayload(
                format!("{} account '{}' is not a mint", program, kind),
            )),
        }
    }

    pub fn to_metadata(&self) -> Result<MetadataRecord, DecodeError> {
        match self {
            AccountPayload::Bytes(data) => decode_metadata(data),
            AccountPayload::ParsedMint(_) => Err(DecodeError::UnexpectedPayload(
                "expected metadata account bytes, got a mint".to_string(),
            )),
            AccountPayload::ParsedOther { program, kind } => Err(DecodeError::UnexpectedPayload(
                format!("expected metadata account bytes, got {} '{}'", program, kind),
            )),
        }
    }
}

/// Contents of an existing account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBody {
    pub owner: Pubkey,
    pub payload: AccountPayload,
}

/// One fetched slot; `body` is `None` when the account does not exist
#[derive(Debug, Clone, PartialEq)]
pub struct RawAccount {
    pub address: Pubkey,
    pub body: Option<AccountBody>,
}

impl RawAccount {
    pub fn new(address: Pubkey, owner: Pubkey, payload: AccountPayload) -> Self {
        Self {
            address,
            body: Some(AccountBody { owner, payload }),
        }
    }

    pub fn missing(address: Pubkey) -> Self {
        Self {
            address,
            body: None,
        }
    }

    pub fn exists(&self) -> bool {
        self.body.is_some()
    }
}

/// Batched account lookup
///
/// Implementations must issue a single request for the whole list and return
/// exactly one `RawAccount` per address, in input order. A missing account is
/// not an error at this layer.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    async fn fetch_many(&self, addresses: &[Pubkey]) -> Result<Vec<RawAccount>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::RateLimited.is_transient());
        assert!(FetchError::ServerError(502).is_transient());
        assert!(FetchError::Transport("connection reset".into()).is_transient());
        assert!(!FetchError::ParseError("bad json".into()).is_transient());
        assert!(!FetchError::HttpStatus(401).is_transient());
        assert!(!FetchError::Rpc {
            code: -32602,
            message: "Invalid params".into()
        }
        .is_transient());
    }

    #[test]
    fn test_raw_account_existence() {
        let address = Pubkey::new_unique();
        assert!(!RawAccount::missing(address).exists());
        assert!(RawAccount::new(address, Pubkey::new_unique(), AccountPayload::Bytes(vec![])).exists());
    }

    #[test]
    fn test_parsed_other_is_not_a_mint() {
        let payload = AccountPayload::ParsedOther {
            program: "spl-token".into(),
            kind: "account".into(),
        };
        assert!(matches!(
            payload.to_mint(),
            Err(DecodeError::UnexpectedPayload(_))
        ));
    }

    #[test]
    fn test_parsed_mint_is_not_metadata() {
        let mint = MintRecord {
            mint_authority: None,
            supply: 1,
            decimals: 0,
            is_initialized: true,
            freeze_authority: None,
            extensions: None,
        };
        let payload = AccountPayload::ParsedMint(mint.clone());
        assert_eq!(payload.to_mint().unwrap(), mint);
        assert!(payload.to_metadata().is_err());
    }
}
