//! Assembled lookup result for one token

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::known_programs::TokenProgram;
use super::metadata::MetadataRecord;
use super::mint::MintRecord;
use super::serde_fmt;

/// Where the metadata in a `FetchResult` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataSource {
    /// Standalone Metaplex metadata account
    Account,
    /// Token-2022 `TokenMetadata` extension on the mint
    Extension,
    /// Neither exists; metadata is the empty placeholder
    Placeholder,
}

/// Mint plus resolved metadata for one token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    #[serde(serialize_with = "serde_fmt::pubkey")]
    pub mint_address: Pubkey,
    #[serde(serialize_with = "serde_fmt::pubkey")]
    pub metadata_address: Pubkey,
    pub mint: MintRecord,
    pub metadata: MetadataRecord,
    pub metadata_source: MetadataSource,
    pub token_program: TokenProgram,
    #[serde(rename = "isToken22")]
    pub is_token22: bool,
}
