use std::process;

use clap::Parser;

use pebble_asm::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
