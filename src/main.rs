use clap::Parser;

mod cli;
mod commands;
mod domain;
mod errors;
mod metadata;
mod services;

use cli::Cli;
use services::output::print_error;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = run(cli) {
        print_error(json, &err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if commands::handle_trust_commands(&cli)? {
        return Ok(());
    }
    if commands::handle_meta_commands(&cli)? {
        return Ok(());
    }
    commands::handle_release_commands(&cli)
}
