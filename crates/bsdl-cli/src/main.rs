use bsdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Falls back to stderr on its own when the log file is unavailable.
    let sink = logging::init_logging();
    tracing::debug!(%sink, "logging to");

    if let Err(err) = Cli::run_from_args() {
        eprintln!("bsdl error: {:#}", err);
        std::process::exit(1);
    }
}
