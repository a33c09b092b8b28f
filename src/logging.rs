use tracing_subscriber::{layer::SubscriberExt, util::{SubscriberInitExt, TryInitError}, EnvFilter};

/// Log levels accepted by `--log-level`.
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Installs the global stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        let _ = init_tracing("debug");
        assert!(init_tracing("info").is_err());
    }
}
