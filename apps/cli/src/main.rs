//! PlainRead CLI: translate academic papers into plain language.
//!
//! Reads text or HTML documents, rewrites jargon, extracts findings and
//! methods, applies accessibility modules, and writes JSON + HTML reports.

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
