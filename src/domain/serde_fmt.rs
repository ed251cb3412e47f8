//! Serialization helpers for JSON output
//!
//! Addresses render as base58 strings and `u64` amounts as decimal strings
//! so downstream JSON consumers never lose precision.

use serde::Serializer;
use solana_sdk::pubkey::Pubkey;

pub fn pubkey<S: Serializer>(value: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn option_pubkey<S: Serializer>(
    value: &Option<Pubkey>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(pubkey) => serializer.collect_str(pubkey),
        None => serializer.serialize_none(),
    }
}

/// Absent authority renders as an empty string instead of `null`
pub fn option_pubkey_or_empty<S: Serializer>(
    value: &Option<Pubkey>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(pubkey) => serializer.collect_str(pubkey),
        None => serializer.serialize_str(""),
    }
}

pub fn u64_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
