use clap::Parser;
use igmedia_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose) {
        match logging::init_logging_stderr(cli.verbose) {
            Ok(()) => tracing::warn!("log file unavailable, logging to stderr: {:#}", err),
            Err(fallback) => eprintln!("igmedia: logging disabled: {:#}; {:#}", err, fallback),
        }
    }

    if let Err(err) = cli.run().await {
        eprintln!("igmedia error: {:#}", err);
        std::process::exit(1);
    }
}
