//! Job carousel CLI — inspect the job feed behind the embedded carousel.
//!
//! Fetches the published job sheet, runs it through the same ingestion
//! pipeline the carousel uses, and prints the resulting feed.

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
