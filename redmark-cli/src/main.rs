//! redmark command-line interface

use clap::Parser;
use redmark_cli::commands::Commands;

/// Text annotation engine for English grammar highlighting
#[derive(Debug, Parser)]
#[command(name = "redmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.command.execute() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
