//! Tracing subscriber setup for the binary.

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Install a compact stderr logger. `RUST_LOG` overrides the defaults.
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(verbose: bool) -> Result<(), TryInitError> {
    let default = if verbose {
        "bingo_caller=debug,info"
    } else {
        "bingo_caller=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Stdout belongs to the operator console
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_reported() {
        // The first call may race other tests for the global slot
        let _ = init_logger(false);
        assert!(init_logger(true).is_err());
    }
}
