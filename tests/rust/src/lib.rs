//! Shared test utilities and fixtures for ctxlog integration tests.

pub use harness::{
    assert_scenario, capture_one, check_fields, no_wrapper, parse_record, run_scenario,
    FieldMismatch, HarnessError, Scenario, Wrapper,
};

/// Context keys used by the scenarios
pub mod keys {
    use ctxlog_core::ContextKey;

    /// String-valued key rendered as `a`
    pub struct AKey;

    impl ContextKey for AKey {
        type Value = String;
        const ATTR: &'static str = "a";
    }

    /// Integer-valued key rendered as `b`
    pub struct BKey;

    impl ContextKey for BKey {
        type Value = i64;
        const ATTR: &'static str = "b";
    }
}

/// Decorator chains built from the scenario keys
pub mod wrappers {
    use std::sync::Arc;

    use ctxlog_core::{ContextAttr, Handler};

    use crate::keys::{AKey, BKey};

    pub fn a_wrapper(handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        ContextAttr::<AKey, _>::wrap(handler)
    }

    pub fn b_wrapper(handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        ContextAttr::<BKey, _>::wrap(handler)
    }

    /// `b` around `a` around the terminal handler
    pub fn ab_wrapper(handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        b_wrapper(a_wrapper(handler))
    }

    /// `a` around `b` around the terminal handler
    pub fn ba_wrapper(handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        a_wrapper(b_wrapper(handler))
    }
}

/// Install a test-writer tracing subscriber once per test binary.
///
/// `RUST_LOG` takes precedence; by default decorator trace events are shown.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("ctxlog_core=trace".parse().expect("static directive"))
            .add_directive("tests=debug".parse().expect("static directive"))
    });

    // Another test in the same binary may already have installed it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}
