//! CLI entry point for the photomosaic assembler

use chromatile::io::cli::{Cli, MosaicRunner};
use chromatile::io::logging;
use clap::Parser;

#[tokio::main]
async fn main() -> chromatile::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let runner = MosaicRunner::new(cli);
    runner.run().await.map(|_| ())
}
