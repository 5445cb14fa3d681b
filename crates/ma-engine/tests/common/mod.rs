//! Common test utilities for multi-field assertions
//!
//! Registered fixture types and a tracing setup for integration tests.

mod fixtures;

pub use fixtures::*;

/// Install a test-writer subscriber once, filtered by `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
