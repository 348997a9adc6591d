//! Shared proptest configuration for domain property suites.

use proptest::test_runner::Config as ProptestConfig;

/// Case count honours `PROPTEST_CASES`, defaulting to a quick local run.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(64);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
