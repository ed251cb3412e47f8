//! Account decoding errors shared by the mint, extension and metadata layouts

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{layout} data too short: expected {expected} bytes, got {actual}")]
    DataTooShort {
        layout: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid option discriminant {tag} for {field} (expected 0 or 1)")]
    InvalidOptionTag { field: &'static str, tag: u32 },

    #[error("Invalid boolean byte {value} for {field}")]
    InvalidBool { field: &'static str, value: u8 },

    #[error("Unexpected metadata key {actual} (expected {expected})")]
    InvalidMetadataKey { expected: u8, actual: u8 },

    #[error("Not a mint account: Token-2022 account type {account_type}")]
    NotMintAccount { account_type: u8 },

    #[error("Extension {extension_type} at offset {offset} declares {length} bytes, only {available} remain")]
    ExtensionOverrun {
        extension_type: u16,
        offset: usize,
        length: usize,
        available: usize,
    },

    #[error("Malformed {layout}: {source}")]
    Malformed {
        layout: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected account payload: {0}")]
    UnexpectedPayload(String),
}

/// Fail with `DataTooShort` unless `data` holds at least `expected` bytes
pub(crate) fn require_len(
    layout: &'static str,
    data: &[u8],
    expected: usize,
) -> Result<(), DecodeError> {
    if data.len() < expected {
        return Err(DecodeError::DataTooShort {
            layout,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Decode a borsh value from the front of `data`, ignoring trailing bytes
pub(crate) fn borsh_prefix<T: borsh::BorshDeserialize>(
    layout: &'static str,
    data: &[u8],
) -> Result<T, DecodeError> {
    let mut cursor = data;
    T::deserialize(&mut cursor).map_err(|source| DecodeError::Malformed { layout, source })
}
