//! html2ipynb CLI: rebuild `.ipynb` notebooks from their HTML exports.
//!
//! Reads notebook-to-HTML exports, recovers cells, source text and execution
//! counts from the markup, and writes a notebook next to each input.

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
