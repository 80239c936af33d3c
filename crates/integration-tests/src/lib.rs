//! Integration tests for LeafCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leafcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end shopping flows against a real catalog
//! - `persistence` - Durability, corruption recovery, and round trips

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Install a test-friendly tracing subscriber.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
