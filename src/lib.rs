//! Mintscope - Solana token mint and metadata lookup
//!
//! Resolves a mint address into its decoded mint account and its metadata,
//! taken from the Metaplex metadata account, the Token-2022 `tokenMetadata`
//! extension, or an empty placeholder, in that order.
//!
//! # Modules
//!
//! - `domain`: Address derivation and account layouts (mint, extensions, metadata)
//! - `ports`: Trait abstractions (AccountFetcher)
//! - `adapters`: External implementations (Solana RPC, JSON-RPC, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Token lookup use case

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;

pub use application::{LookupError, TokenLookup};
pub use domain::{FetchResult, MetadataRecord, MetadataSource, MintRecord};
