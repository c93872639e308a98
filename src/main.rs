use clap::Parser;
use log::error;
use murmur::app::{self, Arguments};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Arguments::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_filter()),
    )
    .init();

    match app::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
