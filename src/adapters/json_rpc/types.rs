//! JSON-RPC Types
//!
//! Response shapes for `getMultipleAccounts` with `jsonParsed` encoding, and
//! the adapter that turns a parsed mint into a `MintRecord`.

use base64::Engine;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::domain::{MintExtension, MintRecord, TokenMetadataExtension};
use crate::ports::{AccountPayload, FetchError, RawAccount};

/// Solana RPC response for getMultipleAccounts
#[derive(Debug, Clone, Deserialize)]
pub struct MultipleAccountsResponse {
    pub jsonrpc: String,
    pub id: u64,
    pub result: Option<MultipleAccountsResult>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MultipleAccountsResult {
    pub context: RpcContext,
    pub value: Vec<Option<AccountInfoValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfoValue {
    pub data: AccountData,
    pub executable: bool,
    pub lamports: u64,
    pub owner: String,
    #[serde(rename = "rentEpoch", default)]
    pub rent_epoch: u64,
    #[serde(default)]
    pub space: Option<u64>,
}

/// Parsed JSON when the node understands the owner program, `[data, encoding]` otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Parsed(ParsedAccountData),
    Raw(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub parsed: ParsedInfo,
    pub program: String,
    pub space: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedInfo {
    pub info: serde_json::Value,
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Mint account information from the SPL Token / Token-2022 parsers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfo {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub supply: String,
    pub decimals: u8,
    pub is_initialized: bool,
    #[serde(default)]
    pub extensions: Option<Vec<ParsedExtension>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedExtension {
    pub extension: String,
    #[serde(default)]
    pub state: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadataState {
    pub update_authority: Option<String>,
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    #[serde(default)]
    pub additional_metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPointerState {
    pub authority: Option<String>,
    pub metadata_address: Option<String>,
}

const TOKEN_PARSER_PROGRAMS: &[&str] = &["spl-token", "spl-token-2022"];

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey, FetchError> {
    Pubkey::from_str(value)
        .map_err(|e| FetchError::ParseError(format!("Invalid {} '{}': {}", field, value, e)))
}

fn parse_optional_pubkey(field: &str, value: Option<&str>) -> Result<Option<Pubkey>, FetchError> {
    value.map(|v| parse_pubkey(field, v)).transpose()
}

impl MintInfo {
    /// Convert the node's parsed mint into the shared record
    pub fn into_record(self) -> Result<MintRecord, FetchError> {
        let supply: u64 = self.supply.parse().map_err(|e| {
            FetchError::ParseError(format!("Failed to parse supply: {}", e))
        })?;

        let extensions = self
            .extensions
            .map(|list| {
                list.into_iter()
                    .map(ParsedExtension::into_extension)
                    .collect::<Result<Vec<_>, FetchError>>()
            })
            .transpose()?;

        Ok(MintRecord {
            mint_authority: parse_optional_pubkey("mintAuthority", self.mint_authority.as_deref())?,
            supply,
            decimals: self.decimals,
            is_initialized: self.is_initialized,
            freeze_authority: parse_optional_pubkey(
                "freezeAuthority",
                self.freeze_authority.as_deref(),
            )?,
            extensions,
        })
    }
}

impl ParsedExtension {
    pub fn into_extension(self) -> Result<MintExtension, FetchError> {
        match self.extension.as_str() {
            "tokenMetadata" => {
                let state: TokenMetadataState = serde_json::from_value(self.state).map_err(|e| {
                    FetchError::ParseError(format!("Invalid tokenMetadata state: {}", e))
                })?;
                Ok(MintExtension::TokenMetadata(TokenMetadataExtension {
                    update_authority: parse_optional_pubkey(
                        "updateAuthority",
                        state.update_authority.as_deref(),
                    )?,
                    mint: parse_pubkey("mint", &state.mint)?,
                    name: state.name,
                    symbol: state.symbol,
                    uri: state.uri,
                    additional_metadata: state.additional_metadata,
                }))
            }
            "metadataPointer" => {
                let state: MetadataPointerState =
                    serde_json::from_value(self.state).map_err(|e| {
                        FetchError::ParseError(format!("Invalid metadataPointer state: {}", e))
                    })?;
                Ok(MintExtension::MetadataPointer {
                    authority: parse_optional_pubkey("authority", state.authority.as_deref())?,
                    metadata_address: parse_optional_pubkey(
                        "metadataAddress",
                        state.metadata_address.as_deref(),
                    )?,
                })
            }
            _ => Ok(MintExtension::Other {
                kind: self.extension,
            }),
        }
    }
}

impl AccountData {
    /// Convert to a payload: parsed mints become records, raw data is decoded from base64
    pub fn into_payload(self) -> Result<AccountPayload, FetchError> {
        match self {
            AccountData::Parsed(parsed) => {
                let is_token_program = TOKEN_PARSER_PROGRAMS.contains(&parsed.program.as_str());
                if is_token_program && parsed.parsed.account_type == "mint" {
                    let info: MintInfo = serde_json::from_value(parsed.parsed.info).map_err(|e| {
                        FetchError::ParseError(format!("Invalid parsed mint: {}", e))
                    })?;
                    Ok(AccountPayload::ParsedMint(info.into_record()?))
                } else {
                    Ok(AccountPayload::ParsedOther {
                        program: parsed.program,
                        kind: parsed.parsed.account_type,
                    })
                }
            }
            AccountData::Raw(parts) => match parts.as_slice() {
                [data, encoding] if encoding == "base64" => base64::engine::general_purpose::STANDARD
                    .decode(data)
                    .map(AccountPayload::Bytes)
                    .map_err(|e| FetchError::ParseError(format!("Invalid base64 data: {}", e))),
                _ => Err(FetchError::ParseError(format!(
                    "Unsupported raw account encoding: {:?}",
                    parts.get(1)
                ))),
            },
        }
    }
}

impl MultipleAccountsResponse {
    /// Pair each requested address with its converted account
    pub fn into_raw_accounts(self, addresses: &[Pubkey]) -> Result<Vec<RawAccount>, FetchError> {
        if let Some(error) = self.error {
            return Err(FetchError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = self
            .result
            .ok_or_else(|| FetchError::ParseError("No result in response".into()))?;

        tracing::debug!(slot = result.context.slot, "getMultipleAccounts returned");

        if result.value.len() != addresses.len() {
            return Err(FetchError::ResponseLength {
                expected: addresses.len(),
                actual: result.value.len(),
            });
        }

        addresses
            .iter()
            .zip(result.value)
            .map(|(address, value)| match value {
                Some(value) => {
                    let owner = parse_pubkey("owner", &value.owner)?;
                    Ok(RawAccount::new(*address, owner, value.data.into_payload()?))
                }
                None => Ok(RawAccount::missing(*address)),
            })
            .collect()
    }
}
