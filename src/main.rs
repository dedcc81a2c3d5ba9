//! CLI entry point for the pipe puzzle solver

use clap::Parser;
use hexpipes::io::cli::{Cli, FileProcessor};

fn main() -> hexpipes::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
