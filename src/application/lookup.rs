//! Token Lookup
//!
//! Resolves a mint address into its mint record and metadata:
//! derive the metadata PDA, fetch mint and PDA in one batch, decode, then
//! pick metadata from the standalone account, the Token-2022 extension, or
//! the empty placeholder, in that order.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::domain::{
    derive_metadata_address, find_token_metadata, parse_address, AddressError, DecodeError,
    FetchResult, MetadataRecord, MetadataSource, MintRecord, TokenProgram, METADATA_PROGRAM_ID,
};
use crate::ports::{AccountBody, AccountFetcher, FetchError};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid input: {0}")]
    InvalidInput(AddressError),

    #[error("Metadata address derivation failed: {0}")]
    Derivation(AddressError),

    #[error("Mint account not found: {0}")]
    NotFound(Pubkey),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Mint and metadata lookup over any `AccountFetcher`
#[derive(Clone)]
pub struct TokenLookup {
    fetcher: Arc<dyn AccountFetcher>,
}

impl TokenLookup {
    pub fn new<F: AccountFetcher + 'static>(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Look up a mint given as a base58 string.
    ///
    /// Fails with `InvalidInput` before any network access if the string is
    /// not a 32-byte address.
    pub async fn fetch(&self, mint: &str) -> Result<FetchResult, LookupError> {
        let mint_address = parse_address(mint).map_err(LookupError::InvalidInput)?;
        self.fetch_address(&mint_address).await
    }

    pub async fn fetch_address(&self, mint_address: &Pubkey) -> Result<FetchResult, LookupError> {
        let metadata_address =
            derive_metadata_address(mint_address).map_err(LookupError::Derivation)?;
        tracing::debug!(mint = %mint_address, metadata = %metadata_address, "derived metadata address");

        let mut accounts = self
            .fetcher
            .fetch_many(&[*mint_address, metadata_address])
            .await?;

        if accounts.len() != 2 {
            return Err(FetchError::ResponseLength {
                expected: 2,
                actual: accounts.len(),
            }
            .into());
        }
        let metadata_account = accounts.pop().and_then(|account| account.body);
        let mint_account = accounts
            .pop()
            .and_then(|account| account.body)
            .ok_or(LookupError::NotFound(*mint_address))?;

        let mint = mint_account.payload.to_mint()?;

        let token_program = TokenProgram::from_owner(&mint_account.owner);
        if token_program == TokenProgram::Unknown {
            tracing::warn!(
                "Mint {} is owned by unexpected program {}",
                mint_address,
                mint_account.owner
            );
        }

        let (metadata, metadata_source) =
            resolve_metadata(&metadata_address, metadata_account.as_ref(), &mint)?;
        tracing::debug!(mint = %mint_address, source = ?metadata_source, "resolved metadata");

        Ok(FetchResult {
            mint_address: *mint_address,
            metadata_address,
            mint,
            metadata,
            metadata_source,
            token_program,
            is_token22: token_program.is_token22(),
        })
    }
}

/// Standalone account > Token-2022 extension > placeholder
fn resolve_metadata(
    metadata_address: &Pubkey,
    metadata_account: Option<&AccountBody>,
    mint: &MintRecord,
) -> Result<(MetadataRecord, MetadataSource), LookupError> {
    if let Some(account) = metadata_account {
        if account.owner == METADATA_PROGRAM_ID {
            return Ok((account.payload.to_metadata()?, MetadataSource::Account));
        }
        tracing::warn!(
            "Ignoring metadata account {} owned by {} instead of the metadata program",
            metadata_address,
            account.owner
        );
    }

    if let Some(extension) = find_token_metadata(mint.extensions()) {
        return Ok((extension.to_record(), MetadataSource::Extension));
    }

    Ok((MetadataRecord::placeholder(), MetadataSource::Placeholder))
}
