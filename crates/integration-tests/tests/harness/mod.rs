//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod catalog;
pub mod faults;
pub mod mapping;

/// Install a test-writer subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faultmap=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
