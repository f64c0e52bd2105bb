//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Builds the event filter.
///
/// `RUST_LOG` takes precedence; otherwise the configured directive is used,
/// falling back to `info` when it does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global fmt subscriber.
///
/// Returns false when a subscriber was already installed, which happens when
/// several commands or tests run in one process.
pub fn init_logging(directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_falls_back() {
        // Must not panic on garbage
        let _ = build_filter("cereal=[[[");
    }

    #[test]
    fn test_second_init_is_noop() {
        init_logging("warn");
        assert!(!init_logging("warn"));
    }
}
