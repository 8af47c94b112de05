use tracing_subscriber::EnvFilter;

/// Map the -v/-q flags onto a tracing level, falling back to `default_level`
pub fn level_for(verbose: u8, quiet: bool, default_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => default_level.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the stderr subscriber; RUST_LOG takes precedence over `level`
pub fn init_tracing(level: &str, ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .try_init();
}
