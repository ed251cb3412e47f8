//! Mintscope - Solana token mint and metadata lookup

use anyhow::Result;
use mintscope::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (SOLANA_RPC_URL may live there)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
