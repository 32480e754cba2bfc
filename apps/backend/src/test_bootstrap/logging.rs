//! Unit-test logging, delegating to the shared test support crate so unit
//! and integration tests honour the same `TEST_LOG` / `RUST_LOG` filters.

pub fn init() {
    backend_test_support::logging::init();
}
