//! ZPGen binary entry point

use clap::Parser;
use tracing::error;

use zpgen_cli::{run, Cli};
use zpgen_common::logging::{init_logging, LogConfig, LogLevel};

fn main() {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::builder().level(LogLevel::Debug).build()
    } else {
        LogConfig::from_env().unwrap_or_default()
    };
    // Logging failures must not abort the compilation.
    let _ = init_logging(&log_config);

    if let Err(e) = run(&cli) {
        error!(error = %e, "compilation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
