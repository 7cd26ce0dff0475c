//! Chaining combinators: bind, map, tap, zip, apply
//!
//! All of these short-circuit: once an outcome has failed, later functions
//! are never invoked and the original primary fault travels on unchanged.
//!
//! # Examples
//!
//! ```
//! use verdict::Outcome;
//!
//! fn parse(input: &str) -> Outcome<i32> {
//!     Outcome::from_result(input.parse::<i32>())
//! }
//!
//! fn non_zero(n: i32) -> Outcome<i32> {
//!     if n == 0 {
//!         Outcome::failure("division by zero")
//!     } else {
//!         Outcome::success(n)
//!     }
//! }
//!
//! let result = parse("4").bind(non_zero).map(|n| 100 / n);
//! assert_eq!(result.ok(), Ok(&25));
//!
//! let result = parse("0").bind(non_zero).map(|n| 100 / n);
//! assert_eq!(result.fault().map(|f| f.message()), Some("division by zero"));
//! ```

use crate::{Fault, Outcome, Semigroup};

impl<T> Outcome<T> {
    /// Chain a dependent, fallible step.
    ///
    /// Equivalent to [`bind_with(true, f)`](Outcome::bind_with): the new
    /// outcome inherits this outcome's reasons and metadata.
    #[inline]
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.bind_with(true, f)
    }

    /// Chain a dependent, fallible step, choosing whether history is carried.
    ///
    /// On success `f` runs. When `copy_reasons_and_metadata` is set, this
    /// outcome's reasons are appended after the ones `f` produced and its
    /// metadata fills in every key `f` did not set.
    ///
    /// On failure `f` never runs and the result is a failure of the new
    /// payload type with the same primary fault. With the flag set it keeps
    /// the reasons and metadata; without it, it starts from a clean failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let source = Outcome::success(1).with_success("loaded").with_metadata("step", "load");
    ///
    /// let carried = source.clone().bind_with(true, |n| Outcome::success(n + 1));
    /// assert_eq!(carried.reasons().len(), 1);
    /// assert!(carried.metadata().contains_key("step"));
    ///
    /// let clean = source.bind_with(false, |n| Outcome::success(n + 1));
    /// assert!(clean.reasons().is_empty());
    /// assert!(clean.metadata().is_empty());
    /// ```
    pub fn bind_with<U, F>(self, copy_reasons_and_metadata: bool, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        let (state, reasons, metadata) = self.into_parts();
        match state {
            Ok(value) => {
                let next = f(value);
                if copy_reasons_and_metadata {
                    next.inherit(reasons, &metadata)
                } else {
                    next
                }
            }
            Err(fault) => {
                log_trace!(fault = %fault, "bind short-circuited");
                if copy_reasons_and_metadata {
                    Outcome::from_parts(Err(fault), reasons, metadata)
                } else {
                    Outcome::failure(fault)
                }
            }
        }
    }

    /// Transform the payload of a success.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::success(("ada", 36)).map(|(name, age)| format!("{name}:{age}"));
    /// assert_eq!(outcome.value().map(String::as_str), Some("ada:36"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        let (state, reasons, metadata) = self.into_parts();
        Outcome::from_parts(state.map(f), reasons, metadata)
    }

    /// Two-step bind: derive an intermediate outcome from the payload, then
    /// combine both payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let order = Outcome::success(("o-1", 3u32));
    /// let priced = order.select_many(
    ///     |(_, qty)| Outcome::success(*qty * 250),
    ///     |(id, _), cents| format!("{id}: {cents}"),
    /// );
    /// assert_eq!(priced.value().map(String::as_str), Some("o-1: 750"));
    /// ```
    pub fn select_many<U, R, F, G>(self, f: F, combine: G) -> Outcome<R>
    where
        F: FnOnce(&T) -> Outcome<U>,
        G: FnOnce(T, U) -> R,
    {
        self.bind(|value| {
            let intermediate = f(&value);
            intermediate.map(|other| combine(value, other))
        })
    }

    /// Run a side effect on the payload of a success.
    ///
    /// The outcome is returned unchanged.
    #[inline]
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        self.if_success(f);
        self
    }

    /// Run a side effect on the primary fault of a failure.
    ///
    /// The outcome is returned unchanged.
    #[inline]
    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&Fault),
    {
        self.if_failure(f);
        self
    }

    /// Pair this payload with another outcome's payload.
    ///
    /// The first failing operand, left to right, is returned. Failures are not
    /// accumulated. On success the reasons and metadata of both sides are
    /// merged, left first.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let both = Outcome::success(1).zip(Outcome::success("a"));
    /// assert_eq!(both.ok(), Ok(&(1, "a")));
    ///
    /// let left_fails = Outcome::<i32>::failure("left").zip(Outcome::<i32>::failure("right"));
    /// assert_eq!(left_fails.fault().map(|f| f.message()), Some("left"));
    /// ```
    pub fn zip<U>(self, other: Outcome<U>) -> Outcome<(T, U)> {
        let (left, left_reasons, left_metadata) = self.into_parts();
        let a = match left {
            Ok(a) => a,
            Err(fault) => return Outcome::from_parts(Err(fault), left_reasons, left_metadata),
        };
        let (right, right_reasons, right_metadata) = other.into_parts();
        match right {
            Ok(b) => Outcome::from_parts(
                Ok((a, b)),
                left_reasons.combine(right_reasons),
                left_metadata.combine(right_metadata),
            ),
            Err(fault) => Outcome::from_parts(Err(fault), right_reasons, right_metadata),
        }
    }

    /// Zip two outcomes and combine their payloads with `f`.
    pub fn zip_with<U, R, F>(self, other: Outcome<U>, f: F) -> Outcome<R>
    where
        F: FnOnce(T, U) -> R,
    {
        self.zip(other).map(|(a, b)| f(a, b))
    }

    /// Turn a success into a failure when `predicate` rejects the payload.
    ///
    /// The failure keeps this outcome's reasons and metadata after its own
    /// auto-wrapped fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let age = Outcome::success(15).ensure(|n| *n >= 18, |n| format!("{n} is under age").into());
    /// assert_eq!(age.fault().map(|f| f.message()), Some("15 is under age"));
    /// ```
    pub fn ensure<P, E>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> Fault,
    {
        let (state, reasons, metadata) = self.into_parts();
        match state {
            Ok(value) => {
                if predicate(&value) {
                    Outcome::from_parts(Ok(value), reasons, metadata)
                } else {
                    Outcome::failure(error(&value)).inherit(reasons, &metadata)
                }
            }
            Err(fault) => Outcome::from_parts(Err(fault), reasons, metadata),
        }
    }
}

impl<F> Outcome<F> {
    /// Apply a wrapped function to a wrapped argument.
    ///
    /// Short-circuits on the first failing operand, function first.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let add_one = Outcome::success(|n: i32| n + 1);
    /// assert_eq!(add_one.apply(Outcome::success(41)).ok(), Ok(&42));
    /// ```
    pub fn apply<A, U>(self, arg: Outcome<A>) -> Outcome<U>
    where
        F: FnOnce(A) -> U,
    {
        self.zip_with(arg, |f, a| f(a))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::errors::NotFoundError;
    use crate::{MetadataValue, Outcome};

    #[test]
    fn test_bind_success() {
        let outcome = Outcome::success(2).bind(|n| Outcome::success(n * 3));
        assert_eq!(outcome.ok(), Ok(&6));
    }

    #[test]
    fn test_bind_short_circuits() {
        let calls = Cell::new(0);
        let outcome = Outcome::<i32>::failure("early")
            .bind(|n| {
                calls.set(calls.get() + 1);
                Outcome::success(n + 1)
            })
            .bind(|n| {
                calls.set(calls.get() + 1);
                Outcome::success(n + 1)
            });

        assert_eq!(calls.get(), 0);
        assert_eq!(outcome.fault().unwrap().message(), "early");
    }

    #[test]
    fn test_bind_failure_keeps_original_fault() {
        let source = Outcome::<i32>::failure("boom");
        let original = source.fault().unwrap().clone();
        let chained: Outcome<String> = source.bind(|n| Outcome::success(n.to_string()));

        assert!(chained.fault().unwrap().ptr_eq(&original));
        assert_eq!(chained.reasons().len(), 1);
    }

    #[test]
    fn test_bind_appends_source_reasons_after_new_ones() {
        let outcome = Outcome::success(1)
            .with_success("first")
            .bind(|n| Outcome::success(n).with_success("second"));

        let messages: Vec<_> = outcome.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn test_bind_new_metadata_wins() {
        let outcome = Outcome::success(1)
            .with_metadata("stage", "parse")
            .with_metadata("user", "ada")
            .bind(|n| Outcome::success(n).with_metadata("STAGE", "store"));

        assert_eq!(outcome.metadata().get("stage"), Some(&MetadataValue::from("store")));
        assert_eq!(outcome.metadata().get("user"), Some(&MetadataValue::from("ada")));
    }

    #[test]
    fn test_bind_without_copy_on_failure_is_clean() {
        let outcome = Outcome::<i32>::failure("boom")
            .with_error(NotFoundError::new("user", 1))
            .with_metadata("k", "v")
            .bind_with(false, |n| Outcome::success(n + 1));

        assert_eq!(outcome.reasons().len(), 1);
        assert!(outcome.reasons()[0].is_auto_wrapped());
        assert!(outcome.metadata().is_empty());
        assert_eq!(outcome.fault().unwrap().message(), "boom");
    }

    #[test]
    fn test_bind_with_copy_on_failure_carries_history() {
        let outcome = Outcome::<i32>::failure("boom")
            .with_error(NotFoundError::new("user", 1))
            .with_metadata("k", "v")
            .bind(|n| Outcome::success(n + 1));

        assert_eq!(outcome.reasons().len(), 2);
        assert!(outcome.metadata().contains_key("K"));
        assert_eq!(outcome.primary_error().unwrap().code(), "NOT_FOUND");
    }

    #[test]
    fn test_map_keeps_reasons() {
        let outcome = Outcome::success(1).with_success("note").map(|n| n + 1);
        assert_eq!(outcome.ok(), Ok(&2));
        assert_eq!(outcome.reasons().len(), 1);
    }

    #[test]
    fn test_select_many_short_circuits_on_intermediate() {
        let outcome = Outcome::success(5).select_many(
            |_| Outcome::<i32>::failure("lookup failed"),
            |a, b| a + b,
        );
        assert_eq!(outcome.fault().unwrap().message(), "lookup failed");
    }

    #[test]
    fn test_tap_only_on_success() {
        let seen = Cell::new(0);
        let outcome = Outcome::success(7).tap(|n| seen.set(*n));
        assert_eq!(seen.get(), 7);
        assert_eq!(outcome.ok(), Ok(&7));

        let failed = Outcome::<i32>::failure("x").tap(|_| seen.set(-1));
        assert_eq!(seen.get(), 7);
        assert!(failed.is_failure());
    }

    #[test]
    fn test_tap_error_only_on_failure() {
        let seen = Cell::new(false);
        let _ = Outcome::success(1).tap_error(|_| seen.set(true));
        assert!(!seen.get());

        let failed = Outcome::<i32>::failure("x").tap_error(|_| seen.set(true));
        assert!(seen.get());
        assert_eq!(failed.fault().unwrap().message(), "x");
    }

    #[test]
    fn test_zip_first_failure_wins() {
        let outcome = Outcome::success(1).zip(Outcome::<i32>::failure("right"));
        assert_eq!(outcome.fault().unwrap().message(), "right");

        let outcome = Outcome::<i32>::failure("left").zip(Outcome::<i32>::failure("right"));
        assert_eq!(outcome.fault().unwrap().message(), "left");
        assert_eq!(outcome.reasons().len(), 1);
    }

    #[test]
    fn test_zip_merges_history() {
        let outcome = Outcome::success(1)
            .with_success("left")
            .with_metadata("side", "left")
            .zip(Outcome::success(2).with_success("right").with_metadata("side", "right"));

        let messages: Vec<_> = outcome.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["left", "right"]);
        assert_eq!(outcome.metadata().get("side"), Some(&MetadataValue::from("right")));
    }

    #[test]
    fn test_apply() {
        let f = Outcome::success(|s: &str| s.len());
        assert_eq!(f.apply(Outcome::success("four")).ok(), Ok(&4));

        let f = Outcome::<fn(i32) -> i32>::failure("no function");
        assert_eq!(
            f.apply(Outcome::<i32>::failure("no arg")).fault().unwrap().message(),
            "no function"
        );
    }

    #[test]
    fn test_ensure() {
        let kept = Outcome::success(20).ensure(|n| *n >= 18, |_| "too young".into());
        assert_eq!(kept.ok(), Ok(&20));

        let rejected = Outcome::success(12)
            .with_success("parsed")
            .ensure(|n| *n >= 18, |_| "too young".into());
        assert_eq!(rejected.fault().unwrap().message(), "too young");
        assert_eq!(rejected.reasons().len(), 2);
        assert!(rejected.reasons()[0].is_auto_wrapped());
    }
}
