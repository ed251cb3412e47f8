//! Application Layer - Use cases over the ports
//!
//! - `lookup`: Token mint and metadata lookup

pub mod lookup;

pub use lookup::{LookupError, TokenLookup};
