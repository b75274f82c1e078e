use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod codec;
mod dump;
mod signal;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_logging(args.verbose);
    args.run()
}

/**
    Send diagnostics to stderr so stdout carries only the buffer dumps.

    `RUST_LOG` wins over the `-v` count when set.
*/
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
