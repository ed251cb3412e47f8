//! Token-2022 Extension Parsing
//!
//! Parses the TLV (Type-Length-Value) region that Token-2022 appends to a mint.
//!
//! Extended Mint Account Layout:
//! - Offset 0-81:    base mint fields (see `mint`)
//! - Offset 82-164:  zero padding up to the token account size
//! - Offset 165:     account type (1 = Mint, 2 = Account)
//! - Offset 166-...: TLV entries, each `type (u16) | length (u16) | value`
//!
//! Only `TokenMetadata` and `MetadataPointer` are decoded; every other
//! extension keeps its tag and nothing else.

use borsh::BorshDeserialize;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use super::decode::{borsh_prefix, require_len, DecodeError};
use super::metadata::MetadataRecord;
use super::mint::MINT_BASE_SIZE;
use super::serde_fmt;

/// Account type discriminator offset for Token-2022
pub const ACCOUNT_TYPE_OFFSET: usize = 165;
/// First TLV entry offset
pub const TLV_START_OFFSET: usize = ACCOUNT_TYPE_OFFSET + 1;
/// Account type value marking a mint
pub const ACCOUNT_TYPE_MINT: u8 = 1;

const TLV_HEADER_LEN: usize = 4;

/// Token-2022 extension types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExtensionType {
    Uninitialized = 0,
    TransferFeeConfig = 1,
    TransferFeeAmount = 2,
    MintCloseAuthority = 3,
    ConfidentialTransferMint = 4,
    ConfidentialTransferAccount = 5,
    DefaultAccountState = 6,
    ImmutableOwner = 7,
    MemoTransfer = 8,
    NonTransferable = 9,
    InterestBearingConfig = 10,
    CpiGuard = 11,
    PermanentDelegate = 12,
    NonTransferableAccount = 13,
    TransferHook = 14,
    TransferHookAccount = 15,
    ConfidentialTransferFeeConfig = 16,
    ConfidentialTransferFeeAmount = 17,
    MetadataPointer = 18,
    TokenMetadata = 19,
    GroupPointer = 20,
    TokenGroup = 21,
    GroupMemberPointer = 22,
    TokenGroupMember = 23,
    ConfidentialMintBurn = 24,
    ScaledUiAmountConfig = 25,
    Pausable = 26,
    PausableAccount = 27,
    Unknown(u16),
}

impl From<u16> for ExtensionType {
    fn from(value: u16) -> Self {
        match value {
            0 => ExtensionType::Uninitialized,
            1 => ExtensionType::TransferFeeConfig,
            2 => ExtensionType::TransferFeeAmount,
            3 => ExtensionType::MintCloseAuthority,
            4 => ExtensionType::ConfidentialTransferMint,
            5 => ExtensionType::ConfidentialTransferAccount,
            6 => ExtensionType::DefaultAccountState,
            7 => ExtensionType::ImmutableOwner,
            8 => ExtensionType::MemoTransfer,
            9 => ExtensionType::NonTransferable,
            10 => ExtensionType::InterestBearingConfig,
            11 => ExtensionType::CpiGuard,
            12 => ExtensionType::PermanentDelegate,
            13 => ExtensionType::NonTransferableAccount,
            14 => ExtensionType::TransferHook,
            15 => ExtensionType::TransferHookAccount,
            16 => ExtensionType::ConfidentialTransferFeeConfig,
            17 => ExtensionType::ConfidentialTransferFeeAmount,
            18 => ExtensionType::MetadataPointer,
            19 => ExtensionType::TokenMetadata,
            20 => ExtensionType::GroupPointer,
            21 => ExtensionType::TokenGroup,
            22 => ExtensionType::GroupMemberPointer,
            23 => ExtensionType::TokenGroupMember,
            24 => ExtensionType::ConfidentialMintBurn,
            25 => ExtensionType::ScaledUiAmountConfig,
            26 => ExtensionType::Pausable,
            27 => ExtensionType::PausableAccount,
            other => ExtensionType::Unknown(other),
        }
    }
}

impl ExtensionType {
    /// Tag name, matching the RPC node's `jsonParsed` extension names
    pub fn name(&self) -> &'static str {
        match self {
            ExtensionType::Uninitialized => "uninitialized",
            ExtensionType::TransferFeeConfig => "transferFeeConfig",
            ExtensionType::TransferFeeAmount => "transferFeeAmount",
            ExtensionType::MintCloseAuthority => "mintCloseAuthority",
            ExtensionType::ConfidentialTransferMint => "confidentialTransferMint",
            ExtensionType::ConfidentialTransferAccount => "confidentialTransferAccount",
            ExtensionType::DefaultAccountState => "defaultAccountState",
            ExtensionType::ImmutableOwner => "immutableOwner",
            ExtensionType::MemoTransfer => "memoTransfer",
            ExtensionType::NonTransferable => "nonTransferable",
            ExtensionType::InterestBearingConfig => "interestBearingConfig",
            ExtensionType::CpiGuard => "cpiGuard",
            ExtensionType::PermanentDelegate => "permanentDelegate",
            ExtensionType::NonTransferableAccount => "nonTransferableAccount",
            ExtensionType::TransferHook => "transferHook",
            ExtensionType::TransferHookAccount => "transferHookAccount",
            ExtensionType::ConfidentialTransferFeeConfig => "confidentialTransferFeeConfig",
            ExtensionType::ConfidentialTransferFeeAmount => "confidentialTransferFeeAmount",
            ExtensionType::MetadataPointer => "metadataPointer",
            ExtensionType::TokenMetadata => "tokenMetadata",
            ExtensionType::GroupPointer => "groupPointer",
            ExtensionType::TokenGroup => "tokenGroup",
            ExtensionType::GroupMemberPointer => "groupMemberPointer",
            ExtensionType::TokenGroupMember => "tokenGroupMember",
            ExtensionType::ConfidentialMintBurn => "confidentialMintBurn",
            ExtensionType::ScaledUiAmountConfig => "scaledUiAmountConfig",
            ExtensionType::Pausable => "pausableConfig",
            ExtensionType::PausableAccount => "pausableAccount",
            ExtensionType::Unknown(_) => "unparseableExtension",
        }
    }
}

/// Metadata stored directly inside a Token-2022 mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataExtension {
    #[serde(serialize_with = "serde_fmt::option_pubkey")]
    pub update_authority: Option<Pubkey>,
    #[serde(serialize_with = "serde_fmt::pubkey")]
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub additional_metadata: Vec<(String, String)>,
}

impl TokenMetadataExtension {
    /// The four fields a standalone metadata account would carry
    pub fn to_record(&self) -> MetadataRecord {
        MetadataRecord {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone(),
            update_authority: self.update_authority,
        }
    }
}

/// One entry of a mint's extension list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "extension", rename_all = "camelCase")]
pub enum MintExtension {
    TokenMetadata(TokenMetadataExtension),
    #[serde(rename_all = "camelCase")]
    MetadataPointer {
        #[serde(serialize_with = "serde_fmt::option_pubkey")]
        authority: Option<Pubkey>,
        #[serde(serialize_with = "serde_fmt::option_pubkey")]
        metadata_address: Option<Pubkey>,
    },
    /// Any extension this crate does not decode, tag preserved
    Other { kind: String },
}

impl MintExtension {
    pub fn kind(&self) -> &str {
        match self {
            MintExtension::TokenMetadata(_) => ExtensionType::TokenMetadata.name(),
            MintExtension::MetadataPointer { .. } => ExtensionType::MetadataPointer.name(),
            MintExtension::Other { kind } => kind,
        }
    }
}

#[derive(BorshDeserialize)]
#[cfg_attr(test, derive(borsh::BorshSerialize))]
struct TokenMetadataLayout {
    update_authority: [u8; 32],
    mint: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
    additional_metadata: Vec<(String, String)>,
}

#[derive(BorshDeserialize)]
struct MetadataPointerLayout {
    authority: [u8; 32],
    metadata_address: [u8; 32],
}

/// Token-2022 stores optional addresses as all-zero when unset
fn non_zero(bytes: [u8; 32]) -> Option<Pubkey> {
    let pubkey = Pubkey::new_from_array(bytes);
    (pubkey != Pubkey::default()).then_some(pubkey)
}

fn decode_extension(extension_type: ExtensionType, value: &[u8]) -> Result<MintExtension, DecodeError> {
    let extension = match extension_type {
        ExtensionType::TokenMetadata => {
            let layout: TokenMetadataLayout = borsh_prefix("token metadata extension", value)?;
            MintExtension::TokenMetadata(TokenMetadataExtension {
                update_authority: non_zero(layout.update_authority),
                mint: Pubkey::new_from_array(layout.mint),
                name: layout.name,
                symbol: layout.symbol,
                uri: layout.uri,
                additional_metadata: layout.additional_metadata,
            })
        }
        ExtensionType::MetadataPointer => {
            let layout: MetadataPointerLayout = borsh_prefix("metadata pointer extension", value)?;
            MintExtension::MetadataPointer {
                authority: non_zero(layout.authority),
                metadata_address: non_zero(layout.metadata_address),
            }
        }
        other => MintExtension::Other {
            kind: other.name().to_string(),
        },
    };
    Ok(extension)
}

/// Parse Token-2022 extensions from raw mint account data
///
/// Returns `None` for a plain 82-byte mint. Anything longer must carry the
/// mint account type at offset 165. A TLV entry whose value does not decode
/// is kept as `Other` with its tag; only a broken TLV framing is an error.
pub fn parse_mint_extensions(mint_data: &[u8]) -> Result<Option<Vec<MintExtension>>, DecodeError> {
    if mint_data.len() <= MINT_BASE_SIZE {
        return Ok(None);
    }

    require_len("extended mint", mint_data, TLV_START_OFFSET)?;

    let account_type = mint_data[ACCOUNT_TYPE_OFFSET];
    if account_type != ACCOUNT_TYPE_MINT {
        return Err(DecodeError::NotMintAccount { account_type });
    }

    let mut extensions = Vec::new();
    let mut offset = TLV_START_OFFSET;

    while offset + TLV_HEADER_LEN <= mint_data.len() {
        let ext_type_raw = u16::from_le_bytes([mint_data[offset], mint_data[offset + 1]]);
        let ext_length = u16::from_le_bytes([mint_data[offset + 2], mint_data[offset + 3]]) as usize;

        // Zeroed tail of a reallocated account
        if ext_type_raw == 0 {
            break;
        }

        let value_start = offset + TLV_HEADER_LEN;
        let available = mint_data.len() - value_start;
        if ext_length > available {
            return Err(DecodeError::ExtensionOverrun {
                extension_type: ext_type_raw,
                offset,
                length: ext_length,
                available,
            });
        }

        let value = &mint_data[value_start..value_start + ext_length];
        let extension_type = ExtensionType::from(ext_type_raw);
        let extension = decode_extension(extension_type, value).unwrap_or_else(|e| {
            tracing::warn!("Keeping undecodable {} extension as opaque: {}", extension_type.name(), e);
            MintExtension::Other {
                kind: extension_type.name().to_string(),
            }
        });
        extensions.push(extension);

        offset = value_start + ext_length;
    }

    Ok(Some(extensions))
}

/// First `TokenMetadata` entry of an extension list, if any
pub fn find_token_metadata(extensions: &[MintExtension]) -> Option<&TokenMetadataExtension> {
    extensions.iter().find_map(|extension| match extension {
        MintExtension::TokenMetadata(metadata) => Some(metadata),
        _ => None,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Append one TLV entry
    pub(crate) fn push_tlv(data: &mut Vec<u8>, extension_type: u16, value: &[u8]) {
        data.extend_from_slice(&extension_type.to_le_bytes());
        data.extend_from_slice(&(value.len() as u16).to_le_bytes());
        data.extend_from_slice(value);
    }

    /// Borsh-encoded TokenMetadata extension value
    pub(crate) fn token_metadata_value(
        update_authority: Option<&Pubkey>,
        mint: &Pubkey,
        name: &str,
        symbol: &str,
        uri: &str,
    ) -> Vec<u8> {
        let layout = TokenMetadataLayout {
            update_authority: update_authority.map(|p| p.to_bytes()).unwrap_or_default(),
            mint: mint.to_bytes(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
            additional_metadata: vec![("website".to_string(), "https://example.com".to_string())],
        };
        borsh::to_vec(&layout).unwrap()
    }

    /// Base mint bytes padded to the account type byte, then `Mint`
    pub(crate) fn extended_mint_header(base: &[u8]) -> Vec<u8> {
        let mut data = base.to_vec();
        data.resize(ACCOUNT_TYPE_OFFSET, 0);
        data.push(ACCOUNT_TYPE_MINT);
        data
    }

    #[test]
    fn test_plain_mint_has_no_extensions() {
        let data = vec![0u8; MINT_BASE_SIZE];
        assert_eq!(parse_mint_extensions(&data).unwrap(), None);
    }

    #[test]
    fn test_extended_mint_without_entries() {
        let data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        assert_eq!(parse_mint_extensions(&data).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_parse_token_metadata_extension() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(
            &mut data,
            19,
            &token_metadata_value(Some(&authority), &mint, "Pyth", "PYTH", "https://pyth.network/token.json"),
        );

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        assert_eq!(extensions.len(), 1);

        let metadata = find_token_metadata(&extensions).unwrap();
        assert_eq!(metadata.mint, mint);
        assert_eq!(metadata.update_authority, Some(authority));
        assert_eq!(metadata.name, "Pyth");
        assert_eq!(metadata.symbol, "PYTH");
        assert_eq!(metadata.uri, "https://pyth.network/token.json");
        assert_eq!(metadata.additional_metadata.len(), 1);
    }

    #[test]
    fn test_zero_update_authority_is_none() {
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(
            &mut data,
            19,
            &token_metadata_value(None, &Pubkey::new_unique(), "Frozen", "FRZ", "ipfs://x"),
        );

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        let record = find_token_metadata(&extensions).unwrap().to_record();
        assert!(record.update_authority.is_none());
        assert_eq!(record.name, "Frozen");
    }

    #[test]
    fn test_parse_metadata_pointer_and_unknown_entries() {
        let mint = Pubkey::new_unique();
        let mut pointer = Vec::new();
        pointer.extend_from_slice(&[0u8; 32]);
        pointer.extend_from_slice(mint.as_ref());

        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(&mut data, 3, &[9u8; 32]); // MintCloseAuthority
        push_tlv(&mut data, 18, &pointer);
        push_tlv(&mut data, 4242, &[1, 2, 3]);

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        assert_eq!(extensions.len(), 3);
        assert_eq!(extensions[0].kind(), "mintCloseAuthority");
        assert_eq!(
            extensions[1],
            MintExtension::MetadataPointer {
                authority: None,
                metadata_address: Some(mint),
            }
        );
        assert_eq!(extensions[2].kind(), "unparseableExtension");
        assert!(find_token_metadata(&extensions).is_none());
    }

    #[test]
    fn test_first_token_metadata_wins() {
        let mint = Pubkey::new_unique();
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(&mut data, 19, &token_metadata_value(None, &mint, "First", "ONE", "https://one"));
        push_tlv(&mut data, 19, &token_metadata_value(None, &mint, "Second", "TWO", "https://two"));

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        assert_eq!(find_token_metadata(&extensions).unwrap().name, "First");
    }

    #[test]
    fn test_zeroed_tail_stops_parsing() {
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(&mut data, 7, &[]);
        data.extend_from_slice(&[0u8; 16]);

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].kind(), "immutableOwner");
    }

    #[test]
    fn test_undecodable_token_metadata_kept_as_other() {
        let mint = Pubkey::new_unique();
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        push_tlv(&mut data, 19, &[0u8; 10]);
        push_tlv(&mut data, 18, &[0u8; 5]);
        push_tlv(&mut data, 19, &token_metadata_value(None, &mint, "Later", "LTR", "https://later"));

        let extensions = parse_mint_extensions(&data).unwrap().unwrap();
        assert_eq!(extensions.len(), 3);
        assert_eq!(
            extensions[0],
            MintExtension::Other {
                kind: "tokenMetadata".to_string()
            }
        );
        assert_eq!(extensions[1].kind(), "metadataPointer");
        assert!(matches!(extensions[1], MintExtension::Other { .. }));
        assert_eq!(find_token_metadata(&extensions).unwrap().name, "Later");
    }

    #[test]
    fn test_extension_length_overrun() {
        let mut data = extended_mint_header(&[0u8; MINT_BASE_SIZE]);
        data.extend_from_slice(&19u16.to_le_bytes());
        data.extend_from_slice(&500u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 10]);

        let err = parse_mint_extensions(&data).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::ExtensionOverrun {
                extension_type: 19,
                length: 500,
                available: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_token_account_type_rejected() {
        let mut data = vec![0u8; ACCOUNT_TYPE_OFFSET];
        data.push(2); // Account, not Mint

        let err = parse_mint_extensions(&data).unwrap_err();
        assert!(matches!(err, DecodeError::NotMintAccount { account_type: 2 }));
    }

    #[test]
    fn test_partial_padding_is_too_short() {
        let data = vec![0u8; 120];
        assert!(matches!(
            parse_mint_extensions(&data),
            Err(DecodeError::DataTooShort { .. })
        ));
    }

    #[test]
    fn test_extension_type_from_u16() {
        assert_eq!(ExtensionType::from(18), ExtensionType::MetadataPointer);
        assert_eq!(ExtensionType::from(19), ExtensionType::TokenMetadata);
        assert_eq!(ExtensionType::from(9999), ExtensionType::Unknown(9999));
    }

    #[test]
    fn test_extension_serializes_with_tag() {
        let extension = MintExtension::Other {
            kind: "transferHook".to_string(),
        };
        let json = serde_json::to_value(&extension).unwrap();
        assert_eq!(json["extension"], "other");
        assert_eq!(json["kind"], "transferHook");
    }
}
