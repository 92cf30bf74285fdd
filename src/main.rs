mod cli;
mod config;
mod convert;
mod index_cmd;
mod logging;
mod step_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Index(args) => index_cmd::run(args),
        Command::Step(args) => step_cmd::run(args),
    }
}
