pub mod rpc;

pub use rpc::SolanaAccountFetcher;
