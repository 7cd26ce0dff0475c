//! Error shaping and recovery
//!
//! - [`Outcome::map_error`] / [`Outcome::map_error_with`] replace the primary
//!   fault, either discarding history or accumulating it ([`ChainPolicy`])
//! - [`Outcome::with_context`], [`Outcome::prepend_error`] and
//!   [`Outcome::append_error`] reword the fault while keeping the original as
//!   its cause
//! - [`Outcome::recover`], [`Outcome::recover_or`] and
//!   [`Outcome::recover_with`] turn failures back into successes
//! - [`Outcome::filter_error`] drops error reasons and can turn a failure into
//!   a success when none survive
//! - [`Outcome::match_error`] searches the reasons for a specific error type
//!
//! # Examples
//!
//! ```
//! use verdict::Outcome;
//!
//! let outcome = Outcome::<u32>::failure("connection refused")
//!     .with_context("querying users: ")
//!     .with_context("loading profile: ");
//!
//! let fault = outcome.fault().unwrap();
//! assert_eq!(fault.message(), "loading profile: querying users: connection refused");
//! assert_eq!(fault.root_cause().message(), "connection refused");
//! assert_eq!(outcome.reasons().len(), 3);
//! ```

use std::sync::Arc;

use crate::reason::{fault_of, ErrorReason, Retained};
use crate::{Fault, Outcome, Reason, Semigroup};

/// How error-shaping combinators treat the history of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainPolicy {
    /// Replace the primary fault and start from a clean failure
    #[default]
    ShortCircuit,
    /// Replace the primary fault but keep every earlier reason and metadata
    /// entry, so repeated wrapping builds a diagnostic trail
    Accumulate,
}

impl<T> Outcome<T> {
    /// Transform the primary fault of a failure, discarding earlier history.
    ///
    /// Same as [`map_error_with(ChainPolicy::ShortCircuit, f)`](Outcome::map_error_with).
    #[inline]
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(Fault) -> Fault,
    {
        self.map_error_with(ChainPolicy::ShortCircuit, f)
    }

    /// Transform the primary fault of a failure under a [`ChainPolicy`].
    ///
    /// With `ShortCircuit` the result is a fresh failure for `f(fault)`. With
    /// `Accumulate` the fresh failure's auto-wrapped reason is followed by all
    /// earlier reasons, and earlier metadata is merged with the new.
    /// Successes pass through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{ChainPolicy, Fault, Outcome};
    ///
    /// let source = Outcome::<()>::failure("boom").with_metadata("host", "db-1");
    ///
    /// let fresh = source.clone().map_error(|f| Fault::wrap("storage unavailable", f));
    /// assert_eq!(fresh.reasons().len(), 1);
    /// assert!(fresh.metadata().is_empty());
    ///
    /// let trail = source.map_error_with(ChainPolicy::Accumulate, |f| Fault::wrap("storage unavailable", f));
    /// assert_eq!(trail.reasons().len(), 2);
    /// assert!(trail.metadata().contains_key("host"));
    /// ```
    pub fn map_error_with<F>(self, policy: ChainPolicy, f: F) -> Self
    where
        F: FnOnce(Fault) -> Fault,
    {
        let (state, reasons, metadata) = self.into_parts();
        let fault = match state {
            Ok(value) => return Outcome::from_parts(Ok(value), reasons, metadata),
            Err(fault) => fault,
        };

        let next = Outcome::failure(f(fault));
        match policy {
            ChainPolicy::ShortCircuit => next,
            ChainPolicy::Accumulate => {
                let (state, new_reasons, new_metadata) = next.into_parts();
                Outcome::from_parts(
                    state,
                    new_reasons.combine(reasons),
                    metadata.combine(new_metadata),
                )
            }
        }
    }

    /// Prefix the fault's message, keeping the old fault as its cause.
    ///
    /// Uses [`ChainPolicy::Accumulate`]; a no-op on success.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::<()>::failure("boom").with_context("ctx: ");
    /// let fault = outcome.fault().unwrap();
    /// assert_eq!(fault.message(), "ctx: boom");
    /// assert_eq!(fault.cause().map(|c| c.message()), Some("boom"));
    /// ```
    #[inline]
    pub fn with_context(self, context: &str) -> Self {
        self.prepend_error(context)
    }

    /// Prefix the fault's message, keeping the old fault as its cause.
    pub fn prepend_error(self, prefix: &str) -> Self {
        self.map_error_with(ChainPolicy::Accumulate, |fault| {
            let message = format!("{}{}", prefix, fault.message());
            Fault::wrap(message, fault)
        })
    }

    /// Suffix the fault's message, keeping the old fault as its cause.
    pub fn append_error(self, suffix: &str) -> Self {
        self.map_error_with(ChainPolicy::Accumulate, |fault| {
            let message = format!("{}{}", fault.message(), suffix);
            Fault::wrap(message, fault)
        })
    }

    /// Turn a failure into a success computed from its fault.
    ///
    /// Reasons and metadata are kept, so the recovered outcome still records
    /// what went wrong.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    /// use verdict::errors::NotFoundError;
    ///
    /// let outcome = Outcome::<Vec<String>>::from_error(NotFoundError::new("inbox", "u-1"))
    ///     .recover(|_| Vec::new());
    /// assert!(outcome.is_success());
    /// assert!(outcome.has_error::<NotFoundError>());
    /// ```
    pub fn recover<F>(self, f: F) -> Self
    where
        F: FnOnce(Fault) -> T,
    {
        let (state, reasons, metadata) = self.into_parts();
        match state {
            Ok(value) => Outcome::from_parts(Ok(value), reasons, metadata),
            Err(fault) => {
                log_debug!(fault = %fault, "recovering failure");
                Outcome::from_parts(Ok(f(fault)), reasons, metadata)
            }
        }
    }

    /// Turn a failure into a success holding `fallback`.
    pub fn recover_or(self, fallback: T) -> Self {
        self.recover(|_| fallback)
    }

    /// Replace a failure with the outcome `f` derives from its fault.
    ///
    /// `f` may fail again. Earlier reasons and metadata are inherited as with
    /// [`bind`](Outcome::bind).
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let primary = Outcome::<&str>::failure("primary down");
    /// let result = primary.recover_with(|fault| {
    ///     if fault.message().contains("down") {
    ///         Outcome::success("replica")
    ///     } else {
    ///         Outcome::failure(fault)
    ///     }
    /// });
    /// assert_eq!(result.ok(), Ok(&"replica"));
    /// ```
    pub fn recover_with<F>(self, f: F) -> Self
    where
        F: FnOnce(Fault) -> Outcome<T>,
    {
        let (state, reasons, metadata) = self.into_parts();
        match state {
            Ok(value) => Outcome::from_parts(Ok(value), reasons, metadata),
            Err(fault) => f(fault).inherit(reasons, &metadata),
        }
    }

    /// Keep only the error reasons for which `keep` returns `true`.
    ///
    /// Errors made of several parts, such as a multi-message
    /// [`ValidationError`](crate::errors::ValidationError), are tested part by
    /// part and narrowed to the parts that survive. Non-error reasons and
    /// metadata are always kept, and reason order is preserved.
    ///
    /// On a failure:
    /// - if some error survives, the result is a failure whose primary fault
    ///   comes from the first surviving error;
    /// - if none survives, the failure becomes a **success** holding the value
    ///   produced by `fallback`. There is no original payload to keep, so the
    ///   caller must say what the success carries.
    ///
    /// On a success only the reasons are filtered.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{ErrorReason, Outcome};
    /// use verdict::errors::ValidationError;
    ///
    /// let errors = ValidationError::many(["a", "b"]).unwrap();
    ///
    /// let narrowed = Outcome::<u8>::from_error(errors.clone())
    ///     .filter_error(|e| e.message() != "b", || 0);
    /// assert_eq!(narrowed.fault().map(|f| f.message()), Some("a"));
    ///
    /// let cleared = Outcome::<u8>::from_error(errors)
    ///     .filter_error(|e| e.code() != "VALIDATION", || 0);
    /// assert_eq!(cleared.ok(), Ok(&0));
    /// ```
    pub fn filter_error<P, D>(self, mut keep: P, fallback: D) -> Self
    where
        P: FnMut(&dyn ErrorReason) -> bool,
        D: FnOnce() -> T,
    {
        let (state, reasons, metadata) = self.into_parts();
        let mut retained = Vec::with_capacity(reasons.len());
        let mut first_error: Option<Arc<dyn ErrorReason>> = None;

        for reason in reasons {
            let (error, auto_wrapped) = match reason {
                Reason::Error {
                    error,
                    auto_wrapped,
                } => (error, auto_wrapped),
                other => {
                    retained.push(other);
                    continue;
                }
            };

            let parts = error.retain_parts(&mut keep);
            let verdict = parts.unwrap_or_else(|| {
                if keep(error.as_ref()) {
                    Retained::Keep
                } else {
                    Retained::Drop
                }
            });
            let error = match verdict {
                Retained::Keep => error,
                Retained::Replace(narrowed) => narrowed,
                Retained::Drop => continue,
            };

            if first_error.is_none() {
                first_error = Some(Arc::clone(&error));
            }
            retained.push(Reason::Error {
                error,
                auto_wrapped,
            });
        }

        match (state, first_error) {
            (Ok(value), _) => Outcome::from_parts(Ok(value), retained, metadata),
            (Err(_), Some(primary)) => {
                Outcome::from_parts(Err(fault_of(primary.as_ref())), retained, metadata)
            }
            (Err(_fault), None) => {
                log_debug!(fault = %_fault, "every error filtered out, failure becomes success");
                Outcome::from_parts(Ok(fallback()), retained, metadata)
            }
        }
    }

    /// The first attached error of type `E`, whatever the outcome's state.
    pub fn find_error<E: ErrorReason>(&self) -> Option<&E> {
        self.reasons().iter().find_map(Reason::downcast_error::<E>)
    }

    /// Returns `true` if an error of type `E` is attached.
    pub fn has_error<E: ErrorReason>(&self) -> bool {
        self.find_error::<E>().is_some()
    }

    /// Call `on_match` with the first attached error of type `E`, or
    /// `on_else` if there is none.
    ///
    /// Searches every reason, not just the primary fault, and works on
    /// successes too: a recovered outcome still reports the errors it
    /// recovered from.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    /// use verdict::errors::NotFoundError;
    ///
    /// let outcome = Outcome::<()>::from_error(NotFoundError::new("user", 5))
    ///     .with_context("loading: ");
    ///
    /// let status = outcome.match_error::<NotFoundError, _, _, _>(|_| 404, || 500);
    /// assert_eq!(status, 404);
    /// ```
    pub fn match_error<E, R, M, O>(&self, on_match: M, on_else: O) -> R
    where
        E: ErrorReason,
        M: FnOnce(&E) -> R,
        O: FnOnce() -> R,
    {
        match self.find_error::<E>() {
            Some(error) => on_match(error),
            None => on_else(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FaultError, NotFoundError, ValidationError, VALIDATION_CODE};
    use crate::{Annotation, MetadataValue};

    #[test]
    fn test_map_error_short_circuit_replaces_history() {
        let outcome = Outcome::<()>::failure("boom")
            .with_error(NotFoundError::new("user", 1))
            .map_error(|f| Fault::wrap("wrapped", f));

        assert_eq!(outcome.fault().unwrap().message(), "wrapped");
        assert_eq!(outcome.reasons().len(), 1);
        assert!(!outcome.has_error::<NotFoundError>());
    }

    #[test]
    fn test_map_error_on_success_is_noop() {
        let calls = std::cell::Cell::new(0);
        let outcome = Outcome::success(1).map_error(|f| {
            calls.set(calls.get() + 1);
            f
        });
        assert_eq!(outcome.ok(), Ok(&1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_accumulate_twice_concatenates_reasons() {
        let outcome = Outcome::<()>::failure("boom")
            .map_error_with(ChainPolicy::Accumulate, |f| Fault::wrap("first", f))
            .map_error_with(ChainPolicy::Accumulate, |f| Fault::wrap("second", f));

        let messages: Vec<_> = outcome.reasons().iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["second", "first", "boom"]);
        assert_eq!(outcome.fault().unwrap().message(), "second");
    }

    #[test]
    fn test_accumulate_merges_metadata_old_then_new() {
        let outcome = Outcome::<()>::failure("boom")
            .with_metadata("a", 1)
            .with_metadata("b", 2)
            .map_error_with(ChainPolicy::Accumulate, |f| f);

        let keys: Vec<_> = outcome.metadata().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_with_context_preserves_original_fault() {
        let source = Outcome::<()>::failure("boom");
        let original = source.fault().unwrap().clone();
        let outcome = source.with_context("ctx: ");

        let fault = outcome.fault().unwrap();
        assert_eq!(fault.message(), "ctx: boom");
        assert!(fault.cause().unwrap().ptr_eq(&original));
    }

    #[test]
    fn test_append_error() {
        let outcome = Outcome::<()>::failure("timeout").append_error(" after 3 attempts");
        assert_eq!(outcome.fault().unwrap().message(), "timeout after 3 attempts");
        assert_eq!(outcome.fault().unwrap().cause().unwrap().message(), "timeout");
    }

    #[test]
    fn test_context_on_success_is_noop() {
        let outcome = Outcome::success(1).with_context("ctx: ").append_error("!");
        assert_eq!(outcome.ok(), Ok(&1));
        assert!(outcome.reasons().is_empty());
    }

    #[test]
    fn test_context_keeps_domain_error_primary() {
        let outcome = Outcome::<()>::from_error(NotFoundError::new("user", 1)).with_context("api: ");
        assert_eq!(outcome.primary_error().unwrap().code(), "NOT_FOUND");
        assert_eq!(outcome.fault().unwrap().message(), "api: user '1' was not found");
    }

    #[test]
    fn test_recover_keeps_reasons() {
        let outcome = Outcome::<i32>::failure("boom").recover(|f| f.message().len() as i32);
        assert_eq!(outcome.ok(), Ok(&4));
        assert_eq!(outcome.reasons().len(), 1);
    }

    #[test]
    fn test_recover_or() {
        assert_eq!(Outcome::<i32>::failure("x").recover_or(9).ok(), Ok(&9));
        assert_eq!(Outcome::success(1).recover_or(9).ok(), Ok(&1));
    }

    #[test]
    fn test_recover_with_can_fail_again() {
        let outcome = Outcome::<i32>::failure("first")
            .recover_with(|f| Outcome::failure(Fault::wrap("second", f)));
        assert_eq!(outcome.fault().unwrap().message(), "second");
        assert_eq!(outcome.reasons().len(), 2);
    }

    #[test]
    fn test_recover_with_skipped_on_success() {
        let outcome = Outcome::success(1).recover_with(|_| panic!("must not run"));
        assert_eq!(outcome.ok(), Ok(&1));
    }

    #[test]
    fn test_filter_error_all_dropped_becomes_success() {
        let errors = ValidationError::many(["a", "b"]).unwrap();
        let outcome = Outcome::<String>::from_error(errors)
            .with_reason(Reason::success(Annotation::new("checked")))
            .filter_error(|e| e.code() != VALIDATION_CODE, || "defaulted".to_string());

        assert!(outcome.is_success());
        assert_eq!(outcome.value().map(String::as_str), Some("defaulted"));
        assert_eq!(outcome.reasons().len(), 1);
        assert!(!outcome.reasons()[0].is_error());
    }

    #[test]
    fn test_filter_error_narrows_validation() {
        let errors = ValidationError::many(["a", "b"]).unwrap();
        let outcome = Outcome::<()>::from_error(errors).filter_error(|e| e.message() != "b", || ());

        assert!(outcome.is_failure());
        let primary = outcome.primary_error().unwrap();
        let validation = outcome.find_error::<ValidationError>().unwrap();
        assert_eq!(primary.message(), "a");
        assert_eq!(
            validation.messages().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a"]
        );
        assert_eq!(outcome.fault().unwrap().kind(), "ValidationError");
        assert_eq!(outcome.fault().unwrap().message(), "a");
    }

    #[test]
    fn test_filter_error_first_survivor_is_primary_fault() {
        let outcome = Outcome::<()>::failure("boom")
            .with_error(NotFoundError::new("user", 1))
            .with_error(ValidationError::new("bad"))
            .filter_error(|e| e.code() != "FAULT", || ());

        assert_eq!(outcome.reasons().len(), 2);
        assert_eq!(outcome.fault().unwrap().message(), "user '1' was not found");
    }

    #[test]
    fn test_filter_error_keeps_metadata() {
        let outcome = Outcome::<u8>::failure("boom")
            .with_metadata("trace", "t-1")
            .filter_error(|_| false, || 1);

        assert_eq!(outcome.ok(), Ok(&1));
        assert!(outcome.reasons().is_empty());
        assert_eq!(outcome.metadata().get("trace"), Some(&MetadataValue::from("t-1")));
    }

    #[test]
    fn test_filter_error_on_success_filters_reasons_only() {
        let outcome = Outcome::success(3)
            .with_error(NotFoundError::new("cache", "k"))
            .with_success("computed")
            .filter_error(|_| false, || unreachable!());

        assert_eq!(outcome.ok(), Ok(&3));
        assert_eq!(outcome.reasons().len(), 1);
        assert_eq!(outcome.reasons()[0].message(), "computed");
    }

    #[test]
    fn test_filter_error_preserves_auto_wrapped_flag() {
        let outcome = Outcome::<()>::failure("boom").filter_error(|_| true, || ());
        assert!(outcome.reasons()[0].is_auto_wrapped());
        assert_eq!(outcome.fault().unwrap().message(), "boom");
    }

    #[test]
    fn test_match_error_searches_all_reasons() {
        let outcome = Outcome::<i32>::from_error(NotFoundError::new("user", 1))
            .with_context("ctx: ")
            .recover_or(0);

        assert!(outcome.is_success());
        let found = outcome.match_error::<NotFoundError, _, _, _>(|e| e.identifier().to_string(), String::new);
        assert_eq!(found, "1");
        assert!(!outcome.match_error::<ValidationError, _, _, _>(|_| true, || false));
        assert!(outcome.has_error::<FaultError>());
    }
}
