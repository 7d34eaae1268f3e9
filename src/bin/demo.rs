use fixed_hash_map::demo::{self, DemoConfig};
use std::{io, process::ExitCode};

fn main() -> ExitCode {
    let config = match DemoConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "usage: demo [--capacity N] [--inserts N] [--key-range N] [--seed N] [--verbose]"
            );
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    if let Err(e) = demo::run(&config, &mut stdout.lock()) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
