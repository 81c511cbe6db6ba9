//! CLI entry point for decomposition and segmentation

use clap::Parser;
use permcut::io::cli::{Cli, run};

fn main() -> permcut::Result<()> {
    run(Cli::parse())
}
