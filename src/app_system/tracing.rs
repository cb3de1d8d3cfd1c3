/// Installs the global `tracing` subscriber.
///
/// Honors `RUST_LOG` (for example `RUST_LOG=cart_actor=debug`) and falls back to
/// `info`. Call once at startup.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
