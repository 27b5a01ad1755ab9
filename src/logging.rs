use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// `-v` count.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    tracing::debug!(verbosity, "tracing initialized");
}
