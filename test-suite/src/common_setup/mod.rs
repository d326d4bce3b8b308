pub mod presentation;

/// Log output for the integration tests, filtered with `RUST_LOG`.
/// Every test calls it, only the first call installs the subscriber
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
