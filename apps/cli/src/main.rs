//! taxsubset CLI — Google Product Taxonomy subset extractor.
//!
//! Fetches the taxonomy, filters it to the curated electronics branches,
//! and writes the subset JSON consumed by the storefront.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
