#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser;
use log::debug;
use std::process::ExitCode;
use sylltab::cli::Cli;
use sylltab::{run, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = Settings::from_cli(Cli::parse()).and_then(|settings| run(&settings));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
