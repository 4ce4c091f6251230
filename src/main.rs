//! certsplit CLI entrypoint

use clap::Parser;

use certsplit::cli::Cli;
use certsplit::output;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
