//! Token metadata record and the Metaplex metadata account layout
//!
//! Metadata account layout (borsh, only the leading fields are read):
//! - key (u8, must be `MetadataV1` = 4)
//! - update_authority (Pubkey, 32 bytes)
//! - mint (Pubkey, 32 bytes) - discarded
//! - name, symbol, uri (u32 little-endian length prefix + UTF-8)
//!
//! Everything after `uri` (seller fee, creators, collection, ...) is ignored.

use borsh::BorshDeserialize;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::decode::{borsh_prefix, DecodeError};
use super::serde_fmt;

/// Metaplex account discriminant for a v1 metadata account
pub const METADATA_V1_KEY: u8 = 4;

const LAYOUT: &str = "metadata account";

/// Human-readable token metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// `None` renders as `""` in JSON output
    #[serde(serialize_with = "serde_fmt::option_pubkey_or_empty")]
    pub update_authority: Option<Pubkey>,
}

impl MetadataRecord {
    /// All-empty record used when a token has no metadata anywhere
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

#[derive(BorshDeserialize)]
#[cfg_attr(test, derive(borsh::BorshSerialize))]
struct MetadataAccountLayout {
    key: u8,
    update_authority: [u8; 32],
    _mint: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
}

/// Decode a standalone Metaplex metadata account
pub fn decode_metadata(data: &[u8]) -> Result<MetadataRecord, DecodeError> {
    let layout: MetadataAccountLayout = borsh_prefix(LAYOUT, data)?;

    if layout.key != METADATA_V1_KEY {
        return Err(DecodeError::InvalidMetadataKey {
            expected: METADATA_V1_KEY,
            actual: layout.key,
        });
    }

    Ok(MetadataRecord {
        name: trim_padding(layout.name),
        symbol: trim_padding(layout.symbol),
        uri: trim_padding(layout.uri),
        update_authority: Some(Pubkey::new_from_array(layout.update_authority)),
    })
}

/// Metaplex pads fixed-capacity strings with NUL bytes
fn trim_padding(value: String) -> String {
    match value.find('\0') {
        Some(end) => value[..end].to_string(),
        None => value,
    }
}
