use tracing_subscriber::EnvFilter;

/// Installs the process-wide subscriber: stderr, `RUST_LOG` filter
/// (default `info`), timestamps and caller location on every line.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Span for work done outside a request, tagged like request spans.
pub fn process_span() -> tracing::Span {
    tracing::info_span!(
        "gateway",
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
    )
}
