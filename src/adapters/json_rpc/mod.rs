//! JSON-RPC Adapter (pre-parsed mode)
//!
//! Fetches accounts through `getMultipleAccounts` with `jsonParsed` encoding:
//! - Mint accounts arrive already decoded, extension list included
//! - Anything the node cannot parse arrives as base64 and is decoded locally
//!
//! # Example
//!
//! ```rust,ignore
//! use mintscope::adapters::json_rpc::JsonRpcAccountFetcher;
//! use mintscope::application::TokenLookup;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lookup = TokenLookup::new(JsonRpcAccountFetcher::new()?);
//!     let token = lookup.fetch("2b1kV6DkPAnxd5ixfnxCpjxmKwqjjaYmCZfHsFu24GXo").await?;
//!     println!("{} ({})", token.metadata.name, token.metadata.symbol);
//!     Ok(())
//! }
//! ```

mod client;
mod types;

pub use client::{JsonRpcAccountFetcher, JsonRpcConfig};
pub use types::MultipleAccountsResponse;
