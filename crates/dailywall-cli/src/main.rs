use dailywall_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    if let Err(err) = Cli::run_from_args().await {
        tracing::error!("{:#}", err);
        eprintln!("dailywall error: {:#}", err);
        std::process::exit(1);
    }
}
