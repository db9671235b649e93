use anyhow::Result;
use clap::Parser;
use teller::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    teller::observability::init(cli.verbose);
    cli.run()
}
