//! Mint account record and layout decoding
//!
//! Standard Mint Account Layout (first 82 bytes):
//! - Offset 0-3:   mint_authority_option (u32: 0=None, 1=Some)
//! - Offset 4-35:  mint_authority (Pubkey, 32 bytes) - zero-filled if option=0
//! - Offset 36-43: supply (u64)
//! - Offset 44:    decimals (u8)
//! - Offset 45:    is_initialized (bool)
//! - Offset 46-49: freeze_authority_option (u32: 0=None, 1=Some)
//! - Offset 50-81: freeze_authority (Pubkey, 32 bytes) - zero-filled if option=0
//!
//! Token-2022 mints carry extension data after byte 82 (see `extensions`).

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::decode::{require_len, DecodeError};
use super::extensions::{parse_mint_extensions, MintExtension};
use super::serde_fmt;

/// Base mint account size (standard fields)
pub const MINT_BASE_SIZE: usize = 82;

const LAYOUT: &str = "mint";
const OPTION_TAG_LEN: usize = 4;
const PUBKEY_LEN: usize = 32;

/// Decoded mint account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRecord {
    #[serde(serialize_with = "serde_fmt::option_pubkey")]
    pub mint_authority: Option<Pubkey>,
    /// Base units; serialized as a decimal string
    #[serde(serialize_with = "serde_fmt::u64_string")]
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    #[serde(serialize_with = "serde_fmt::option_pubkey")]
    pub freeze_authority: Option<Pubkey>,
    pub extensions: Option<Vec<MintExtension>>,
}

impl MintRecord {
    /// Extension list, empty for mints without extension data
    pub fn extensions(&self) -> &[MintExtension] {
        self.extensions.as_deref().unwrap_or_default()
    }

    /// Supply in human-readable units (adjusted for decimals)
    pub fn supply_adjusted(&self) -> f64 {
        self.supply as f64 / 10f64.powi(self.decimals as i32)
    }
}

/// Decode a `u32`-tagged optional address (`COption<Pubkey>`).
///
/// The 32 address bytes are always present; with tag 0 they are skipped.
pub fn decode_optional_pubkey(
    field: &'static str,
    data: &[u8],
) -> Result<Option<Pubkey>, DecodeError> {
    require_len(field, data, OPTION_TAG_LEN + PUBKEY_LEN)?;

    let tag = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    match tag {
        0 => Ok(None),
        1 => {
            let mut bytes = [0u8; PUBKEY_LEN];
            bytes.copy_from_slice(&data[OPTION_TAG_LEN..OPTION_TAG_LEN + PUBKEY_LEN]);
            Ok(Some(Pubkey::new_from_array(bytes)))
        }
        tag => Err(DecodeError::InvalidOptionTag { field, tag }),
    }
}

fn decode_bool(field: &'static str, value: u8) -> Result<bool, DecodeError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(DecodeError::InvalidBool { field, value }),
    }
}

/// Decode a mint account from raw bytes, including any Token-2022 extensions
///
/// Errors come from the base layout only. Extension data with broken TLV
/// framing is logged and leaves `extensions` as `None`.
pub fn decode_mint(data: &[u8]) -> Result<MintRecord, DecodeError> {
    require_len(LAYOUT, data, MINT_BASE_SIZE)?;

    let mint_authority = decode_optional_pubkey("mint_authority", &data[0..36])?;

    let mut supply = [0u8; 8];
    supply.copy_from_slice(&data[36..44]);
    let supply = u64::from_le_bytes(supply);

    let decimals = data[44];
    let is_initialized = decode_bool("is_initialized", data[45])?;
    let freeze_authority = decode_optional_pubkey("freeze_authority", &data[46..82])?;

    // Only the 82-byte base layout is mandatory
    let extensions = parse_mint_extensions(data).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable mint extension data: {}", e);
        None
    });

    Ok(MintRecord {
        mint_authority,
        supply,
        decimals,
        is_initialized,
        freeze_authority,
        extensions,
    })
}
