use tracing_subscriber::EnvFilter;

/// Initialize tracing on stderr.
///
/// The filter comes from `CONVGEN_LOG`; without it only warnings are shown,
/// or debug output with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CONVGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
