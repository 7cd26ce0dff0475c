//! Testing utilities for code that returns outcomes
//!
//! Assertion macros that print the full outcome (reasons and metadata
//! included) when they fail, and, with the `proptest` feature, an
//! [`Arbitrary`](proptest::arbitrary::Arbitrary) implementation for
//! [`Outcome`](crate::Outcome).
//!
//! # Examples
//!
//! ```rust
//! use verdict::{assert_failure, assert_fault_message, assert_success, Outcome};
//!
//! let ok = Outcome::success(42);
//! assert_eq!(assert_success!(ok), 42);
//!
//! let failed = Outcome::<i32>::failure("disk full");
//! assert_failure!(failed.clone());
//! assert_fault_message!(failed, "disk full");
//! ```

/// Assert that an outcome succeeded and evaluate to its value.
///
/// Panics with the outcome's display form when it failed.
///
/// # Example
///
/// ```rust
/// use verdict::{assert_success, Outcome};
///
/// let value = assert_success!(Outcome::success("ready"));
/// assert_eq!(value, "ready");
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {{
        let outcome = $outcome;
        if outcome.is_failure() {
            panic!("Expected Success, got {}", outcome);
        }
        match outcome.into_result() {
            Ok(value) => value,
            Err(fault) => panic!("Expected Success, got Failure: {:?}", fault),
        }
    }};
}

/// Assert that an outcome failed and evaluate to its primary fault.
///
/// # Example
///
/// ```rust
/// use verdict::{assert_failure, Outcome};
///
/// let fault = assert_failure!(Outcome::<()>::failure("timeout"));
/// assert_eq!(fault.message(), "timeout");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {{
        let outcome = $outcome;
        if outcome.is_success() {
            panic!("Expected Failure, got {}", outcome);
        }
        match outcome.into_result() {
            Err(fault) => fault,
            Ok(_) => panic!("Expected Failure, got Success"),
        }
    }};
}

/// Assert that an outcome failed with a primary fault carrying `message`.
///
/// # Example
///
/// ```rust
/// use verdict::{assert_fault_message, Outcome};
///
/// let outcome = Outcome::<u8>::failure("disk full").with_context("saving report: ");
/// assert_fault_message!(outcome, "saving report: disk full");
/// ```
#[macro_export]
macro_rules! assert_fault_message {
    ($outcome:expr, $expected:expr) => {{
        let fault = $crate::assert_failure!($outcome);
        assert_eq!(
            fault.message(),
            $expected,
            "fault message mismatch, trail: {:#}",
            fault
        );
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T> Arbitrary for crate::Outcome<T>
where
    T: Arbitrary + std::fmt::Debug + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let metadata = proptest::collection::vec(("[a-z]{1,4}", any::<i64>()), 0..3);
        prop_oneof![
            (any_with::<T>(args), metadata.clone()).prop_map(|(value, entries)| {
                entries.into_iter().fold(crate::Outcome::success(value), |o, (k, v)| {
                    o.with_metadata(k, v)
                })
            }),
            ("[a-z ]{1,16}", metadata).prop_map(|(message, entries)| {
                entries.into_iter().fold(crate::Outcome::<T>::failure(message), |o, (k, v)| {
                    o.with_metadata(k, v)
                })
            }),
        ]
        .boxed()
    }
}
