use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Diagnostics go to stderr; stdout carries only result lines.
pub fn init_logging(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("API_TESTER_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
