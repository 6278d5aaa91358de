//! Galaxy CLI, the knowledge-graph generator for a markdown content tree.
//!
//! Reads `src/content`, resolves cross-references between documents, and
//! writes `public/galaxy-data.json` for the graph visualization.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
