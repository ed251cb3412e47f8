//! Domain Layer - Pure token lookup logic
//!
//! No I/O happens here. Account bytes come in through the ports layer and
//! leave as typed records.
//!
//! - `known_programs`: Metadata and token program IDs
//! - `address`: Address parsing and metadata PDA derivation
//! - `mint`: Mint account layout
//! - `extensions`: Token-2022 TLV extensions
//! - `metadata`: Metaplex metadata account layout
//! - `token`: Assembled lookup result

pub mod address;
pub mod decode;
pub mod extensions;
pub mod known_programs;
pub mod metadata;
pub mod mint;
pub mod token;
mod serde_fmt;

pub use address::{derive_metadata_address, derive_program_address, parse_address, AddressError};
pub use decode::DecodeError;
pub use extensions::{
    find_token_metadata, parse_mint_extensions, ExtensionType, MintExtension,
    TokenMetadataExtension,
};
pub use known_programs::{
    TokenProgram, METADATA_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use metadata::{decode_metadata, MetadataRecord};
pub use mint::{decode_mint, decode_optional_pubkey, MintRecord, MINT_BASE_SIZE};
pub use token::{FetchResult, MetadataSource};
