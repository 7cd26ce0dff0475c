//! Sequence, traverse, combine and partition for collections of outcomes
//!
//! # Core Concepts
//!
//! - **`sequence`**: `Vec<Outcome<T>>` → `Outcome<Vec<T>>`, fail-fast
//! - **`traverse`**: map a fallible function over a collection, fail-fast
//! - **`combine`**: check independent unit outcomes, reporting *every* failure
//! - **`partition`**: split into successes and faults without failing
//!
//! `sequence` and `traverse` thread dependent values, so only the first
//! failure matters and later elements are never evaluated. `combine` checks
//! independent operations, so every failure is relevant and they are folded
//! into one aggregate fault.
//!
//! # Examples
//!
//! ```
//! use verdict::Outcome;
//! use verdict::traverse::{combine, traverse};
//!
//! fn parse(s: &str) -> Outcome<i32> {
//!     Outcome::from_result(s.parse::<i32>())
//! }
//!
//! assert_eq!(traverse(["1", "2", "3"], parse).ok(), Ok(&vec![1, 2, 3]));
//! assert!(traverse(["1", "x", "3"], parse).is_failure());
//!
//! let checks = vec![
//!     Outcome::failure("disk almost full"),
//!     Outcome::completed(),
//!     Outcome::failure("clock skew"),
//! ];
//! let report = combine(checks);
//! assert_eq!(report.fault().map(|f| f.inner_faults().len()), Some(2));
//! ```

use crate::{Fault, Metadata, NonEmptyVec, Outcome, Semigroup};

/// Collect the payloads of a sequence of outcomes, stopping at the first
/// failure.
///
/// Outcomes are pulled from the iterator one at a time, so anything lazily
/// producing them stops running once a failure is seen. On success the
/// elements' reasons are concatenated and their metadata merged, in order.
/// On failure the failing element is returned with its own reasons.
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
/// use verdict::traverse::sequence;
///
/// let all = sequence(vec![Outcome::success(1), Outcome::success(2)]);
/// assert_eq!(all.ok(), Ok(&vec![1, 2]));
///
/// let first_failure = sequence(vec![
///     Outcome::success(1),
///     Outcome::failure("x"),
///     Outcome::failure("y"),
/// ]);
/// assert_eq!(first_failure.fault().map(|f| f.message()), Some("x"));
/// ```
pub fn sequence<T, I>(iter: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = Outcome<T>>,
{
    let mut values = Vec::new();
    let mut reasons = Vec::new();
    let mut metadata = Metadata::new();

    for outcome in iter {
        let (state, element_reasons, element_metadata) = outcome.into_parts();
        match state {
            Ok(value) => {
                values.push(value);
                reasons.extend(element_reasons);
                metadata.merge(&element_metadata);
            }
            Err(fault) => {
                log_trace!(completed = values.len(), fault = %fault, "sequence stopped at first failure");
                return Outcome::from_parts(Err(fault), element_reasons, element_metadata);
            }
        }
    }

    Outcome::from_parts(Ok(values), reasons, metadata)
}

/// Apply `f` to each element and collect the payloads, stopping at the first
/// failure. Elements after the failing one are never passed to `f`.
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
/// use verdict::traverse::traverse;
///
/// fn positive(n: i32) -> Outcome<i32> {
///     if n > 0 {
///         Outcome::success(n)
///     } else {
///         Outcome::failure(format!("{n} is not positive"))
///     }
/// }
///
/// let result = traverse(vec![3, -1, -2], positive);
/// assert_eq!(result.fault().map(|f| f.message()), Some("-1 is not positive"));
/// ```
pub fn traverse<T, U, F, I>(iter: I, f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Outcome<U>,
{
    sequence(iter.into_iter().map(f))
}

/// Check a set of independent unit outcomes, reporting every failure.
///
/// Every element is inspected. A single failure is returned as-is with the
/// reasons of every element. Several are folded into one
/// [`Fault::aggregate`], whose own auto-wrapped reason comes first, followed
/// by the reasons of every element. The elements' metadata is merged in order.
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
/// use verdict::traverse::combine;
///
/// let result = combine(vec![
///     Outcome::failure("a"),
///     Outcome::completed(),
///     Outcome::failure("b"),
/// ]);
///
/// let fault = result.fault().unwrap();
/// assert_eq!(fault.kind(), "AggregateFault");
/// assert_eq!(fault.message(), "a; b");
/// ```
pub fn combine<I>(iter: I) -> Outcome<()>
where
    I: IntoIterator<Item = Outcome<()>>,
{
    let mut faults = Vec::new();
    let mut reasons = Vec::new();
    let mut metadata = Metadata::new();

    for outcome in iter {
        let (state, element_reasons, element_metadata) = outcome.into_parts();
        if let Err(fault) = state {
            faults.push(fault);
        }
        reasons.extend(element_reasons);
        metadata.merge(&element_metadata);
    }

    if !faults.is_empty() {
        log_debug!(failures = faults.len(), "combine collected failures");
    }
    let mut faults = faults.into_iter();
    let Some(first) = faults.next() else {
        return Outcome::from_parts(Ok(()), reasons, metadata);
    };
    let rest: Vec<Fault> = faults.collect();
    if rest.is_empty() {
        return Outcome::from_parts(Err(first), reasons, metadata);
    }

    let aggregate = Fault::aggregate(NonEmptyVec::new(first, rest));
    let (state, own_reasons, _) = Outcome::<()>::failure(aggregate).into_parts();
    Outcome::from_parts(state, own_reasons.combine(reasons), metadata)
}

/// Split outcomes into payloads and faults. Never fails.
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
/// use verdict::traverse::partition;
///
/// let (values, faults) = partition(vec![
///     Outcome::success(1),
///     Outcome::failure("x"),
///     Outcome::success(3),
/// ]);
/// assert_eq!(values, vec![1, 3]);
/// assert_eq!(faults.len(), 1);
/// ```
pub fn partition<T, I>(iter: I) -> (Vec<T>, Vec<Fault>)
where
    I: IntoIterator<Item = Outcome<T>>,
{
    let mut values = Vec::new();
    let mut faults = Vec::new();
    for outcome in iter {
        match outcome.into_result() {
            Ok(value) => values.push(value),
            Err(fault) => faults.push(fault),
        }
    }
    (values, faults)
}

impl<T> FromIterator<Outcome<T>> for Outcome<Vec<T>> {
    /// Same as [`sequence`].
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        sequence(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_sequence_empty() {
        let result = sequence(Vec::<Outcome<i32>>::new());
        assert_eq!(result.ok(), Ok(&vec![]));
    }

    #[test]
    fn test_sequence_is_fail_fast() {
        let evaluated = Cell::new(0);
        let produce = |i: i32| {
            evaluated.set(evaluated.get() + 1);
            if i == 1 {
                Outcome::failure("x")
            } else {
                Outcome::success(i)
            }
        };

        let result = sequence((0..3).map(produce));

        assert_eq!(result.fault().unwrap().message(), "x");
        assert_eq!(evaluated.get(), 2);
    }

    #[test]
    fn test_sequence_merges_history_in_order() {
        let result = sequence(vec![
            Outcome::success(1).with_success("one").with_metadata("k", 1),
            Outcome::success(2).with_success("two").with_metadata("K", 2),
        ]);

        let messages: Vec<_> = result.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["one", "two"]);
        assert_eq!(result.metadata().get("k").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn test_sequence_failure_keeps_only_failing_history() {
        let result = sequence(vec![
            Outcome::success(1).with_success("one"),
            Outcome::<i32>::failure("boom"),
        ]);
        assert_eq!(result.reasons().len(), 1);
        assert!(result.reasons()[0].is_auto_wrapped());
    }

    #[test]
    fn test_traverse_stops_calling_f() {
        let calls = Cell::new(0);
        let result = traverse(vec![1, 2, 3, 4], |n| {
            calls.set(calls.get() + 1);
            if n == 2 {
                Outcome::<i32>::failure("two")
            } else {
                Outcome::success(n)
            }
        });

        assert!(result.is_failure());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_combine_all_success() {
        let result = combine(vec![Outcome::completed(), Outcome::completed().with_success("ok")]);
        assert!(result.is_success());
        assert_eq!(result.reasons().len(), 1);
    }

    #[test]
    fn test_combine_aggregates_all_failures() {
        let result = combine(vec![
            Outcome::failure("a"),
            Outcome::completed(),
            Outcome::failure("b"),
        ]);

        let fault = result.fault().unwrap();
        let members: Vec<_> = fault.inner_faults().iter().map(|f| f.message()).collect();
        assert_eq!(members, vec!["a", "b"]);
        // aggregate's own reason, then one per failing element
        assert_eq!(result.reasons().len(), 3);
        assert_eq!(result.primary_error().unwrap().message(), "a; b");
    }

    #[test]
    fn test_combine_single_failure_is_not_wrapped() {
        let result = combine(vec![Outcome::completed(), Outcome::failure("only")]);
        let fault = result.fault().unwrap();
        assert_eq!(fault.message(), "only");
        assert!(!fault.is_aggregate());
        assert_eq!(result.reasons().len(), 1);
        assert!(result.to_string().contains("reasons=1"));
    }

    #[test]
    fn test_combine_single_failure_keeps_sibling_reasons() {
        let result = combine(vec![
            Outcome::completed().with_success("warmed cache"),
            Outcome::failure("only"),
        ]);
        let messages: Vec<_> = result.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["warmed cache", "only"]);
    }

    #[test]
    fn test_partition() {
        let (values, faults) = partition(vec![
            Outcome::<i32>::failure("a"),
            Outcome::success(2),
            Outcome::failure("b"),
        ]);
        assert_eq!(values, vec![2]);
        let messages: Vec<_> = faults.iter().map(|f| f.message()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_collect_into_outcome() {
        let collected: Outcome<Vec<i32>> = (1..=3).map(Outcome::success).collect();
        assert_eq!(collected.ok(), Ok(&vec![1, 2, 3]));
    }
}
