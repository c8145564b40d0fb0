//! Logging setup and optional LangSmith run reporting

mod langsmith;

pub use langsmith::{LangSmithSettings, LangSmithTracer, RunHandle, RunType};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing. `RUST_LOG` wins over the verbosity-derived default.
pub fn init_logging(verbose: bool, quiet_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("termsai=debug,tower_http=debug")
        } else {
            EnvFilter::new(format!("termsai={}", quiet_level))
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
