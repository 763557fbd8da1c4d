use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the test environment exactly once per process: loads
/// `.env_test` so every test runs against the in-memory cache store.
pub(crate) fn init_test_environment() {
    INIT.call_once(|| {
        dotenvy::from_filename(".env_test").ok();
    });
}
