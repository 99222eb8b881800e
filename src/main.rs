use anyhow::Result;
use meetme::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
