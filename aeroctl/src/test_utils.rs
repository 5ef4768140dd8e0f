//! Shared helpers for handler and integration tests.

use crate::config::Config;
use axum_test::TestServer;

/// Seed used by every test app, so fixtures are identical across runs.
pub const TEST_SEED: u64 = 2024;

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        enable_metrics: false,
        ..Default::default()
    };
    config.fixtures.seed = Some(TEST_SEED);
    config
}

pub fn create_test_app() -> TestServer {
    crate::Application::new(create_test_config())
        .expect("Failed to create application")
        .into_test_server()
}
