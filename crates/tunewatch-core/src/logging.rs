use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise `quiet` selects `warn`
/// and the default is `info`. Output goes to stderr, as JSON lines when
/// `json` is set. Calling this twice is harmless; the second call is ignored.
pub fn init_logging(quiet: bool, json: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!(event = "core.logging.already_initialized");
    }
}
