#![allow(dead_code)]

// tests/common/mod.rs
use impostor_backend::{DomainError, ErrorCode};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    impostor_test_support::logging::init();
}

/// Assert that `result` failed with `expected`, showing the error otherwise.
pub fn assert_error_code<T: std::fmt::Debug>(result: Result<T, DomainError>, expected: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {expected}, got Ok({value:?})"),
        Err(err) => assert_eq!(err.code(), expected, "unexpected error: {err}"),
    }
}
