//! Panic-with-message replacements for `unwrap`/`expect` in test code,
//! so the ambient workspace policy against bare `unwrap()` still applies to
//! tests that build on this crate.

/// Extracts the value from a `Result`, or panics with the error.
#[track_caller]
pub fn must_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("unexpected Err: {e:?}"),
    }
}

/// Extracts the value from an `Option`, or panics.
#[track_caller]
pub fn must_some<T>(option: Option<T>) -> T {
    match option {
        Some(v) => v,
        None => panic!("unexpected None"),
    }
}

/// Extracts the error from a `Result`, or panics if it was `Ok`.
#[track_caller]
pub fn must_err<T: std::fmt::Debug, E>(result: Result<T, E>) -> E {
    match result {
        Err(e) => e,
        Ok(v) => panic!("expected Err, got Ok({v:?})"),
    }
}
