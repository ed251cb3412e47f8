//! Ports Layer - Trait definitions for external dependencies
//!
//! The only external dependency of a token lookup is the ledger's account
//! store, abstracted as `AccountFetcher`. Adapters implement it for a raw
//! Solana RPC client and for a `jsonParsed` JSON-RPC backend.

pub mod accounts;
pub mod mocks;

pub use accounts::{AccountBody, AccountFetcher, AccountPayload, FetchError, RawAccount};
pub use mocks::StaticAccountFetcher;
