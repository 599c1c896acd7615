// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod archive;
mod cmd;
mod config;
mod content;
mod estimate;
mod format;
mod generate;
mod plan;
mod render;

use clap::Parser;
use cmd::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
