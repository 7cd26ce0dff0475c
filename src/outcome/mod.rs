//! The `Outcome` type: success or failure, plus a diagnostic bag
//!
//! An [`Outcome<T>`] is either a success holding a payload `T` or a failure
//! holding exactly one primary [`Fault`]. Whatever its state, it also owns an
//! ordered list of [`Reason`]s and a case-insensitive [`Metadata`] map.
//!
//! The payload is a single generic parameter. Several values travel as a
//! tuple, no value at all as `()`:
//!
//! ```
//! use verdict::Outcome;
//!
//! let none: Outcome = Outcome::completed();
//! let one = Outcome::success(7);
//! let pair = Outcome::success(("alice", 31));
//!
//! assert!(none.is_success());
//! assert_eq!(one.ok(), Ok(&7));
//! assert_eq!(pair.map(|(name, age)| format!("{name} is {age}")).value().map(String::as_str), Some("alice is 31"));
//! ```
//!
//! Combinators live in [`chain`] (bind, map, zip, apply, ...) and [`shape`]
//! (error shaping, recovery, filtering). Collections are handled by
//! [`crate::traverse`].
//!
//! # Rendering
//!
//! `Display` renders a stable one-line summary:
//!
//! ```
//! use verdict::Outcome;
//!
//! let outcome = Outcome::<i32>::failure("boom").with_metadata("user", "alice");
//! assert_eq!(
//!     outcome.to_string(),
//!     "Failure(Fault: boom) code=FAULT reasons=1 meta=user:alice"
//! );
//! ```

pub mod chain;
pub mod shape;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::fault::short_type_name;
use crate::reason::{fault_of, primary_reason, select_primary, Annotation};
use crate::{ErrorReason, Fault, Metadata, MetadataValue, Reason, SuccessReason};

pub use shape::ChainPolicy;

/// Number of metadata entries rendered by `Display`.
const DISPLAY_METADATA_LIMIT: usize = 2;

/// A success carrying a payload, or a failure carrying a primary fault.
///
/// # Type Parameters
///
/// * `T` - The payload: `()` for none, the value itself for one, a tuple for several
///
/// # Examples
///
/// ```
/// use verdict::Outcome;
/// use verdict::errors::NotFoundError;
///
/// fn find_user(id: u32) -> Outcome<String> {
///     if id == 1 {
///         Outcome::success("alice".to_string())
///     } else {
///         Outcome::from_error(NotFoundError::new("user", id))
///     }
/// }
///
/// let greeting = find_user(1).map(|name| format!("hello, {name}"));
/// assert_eq!(greeting.value().map(String::as_str), Some("hello, alice"));
///
/// let missing = find_user(2).map(|name| format!("hello, {name}"));
/// assert_eq!(missing.fault().map(|f| f.message()), Some("user '2' was not found"));
/// ```
#[derive(Debug, Clone)]
pub struct Outcome<T = ()> {
    state: Result<T, Fault>,
    reasons: Vec<Reason>,
    metadata: Metadata,
}

/// Borrowed view of an outcome's state, for native `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutcomeRef<'a, T> {
    /// The payload of a success
    Success(&'a T),
    /// The primary fault of a failure
    Failure(&'a Fault),
}

impl<T> Outcome<T> {
    /// Create a successful outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::success(42);
    /// assert!(outcome.is_success());
    /// assert!(outcome.reasons().is_empty());
    /// ```
    #[inline]
    pub fn success(value: T) -> Self {
        Self::from_parts(Ok(value), Vec::new(), Metadata::new())
    }

    /// Create a failed outcome from a fault or a message.
    ///
    /// A [`FaultError`](crate::errors::FaultError) wrapping the fault is
    /// attached automatically, so a failure never has an empty reason list.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::<i32>::failure("boom");
    /// assert!(outcome.is_failure());
    /// assert_eq!(outcome.reasons().len(), 1);
    /// assert!(outcome.reasons()[0].is_auto_wrapped());
    /// ```
    pub fn failure(fault: impl Into<Fault>) -> Self {
        let fault = fault.into();
        let reasons = vec![Reason::wrapped_fault(fault.clone())];
        Self::from_parts(Err(fault), reasons, Metadata::new())
    }

    /// Create a failed outcome from a domain error.
    ///
    /// The error becomes the only reason and its metadata is copied into the
    /// outcome. The primary fault is the error's causing fault, or a fault
    /// named after the error type when it has none.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    /// use verdict::errors::NotFoundError;
    ///
    /// let outcome = Outcome::<()>::from_error(NotFoundError::new("user", 9));
    /// assert_eq!(outcome.fault().map(|f| f.kind()), Some("NotFoundError"));
    /// assert!(outcome.metadata().contains_key("RESOURCE"));
    /// ```
    pub fn from_error(error: impl ErrorReason) -> Self {
        Self::from_shared_error(Arc::new(error))
    }

    pub(crate) fn from_shared_error(error: Arc<dyn ErrorReason>) -> Self {
        let fault = fault_of(error.as_ref());
        let metadata = error.metadata().clone();
        Self::from_parts(Err(fault), vec![Reason::from_shared(error)], metadata)
    }

    /// Bridge a standard `Result`, turning its error into a fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let parsed = Outcome::from_result("12".parse::<i32>());
    /// assert_eq!(parsed.ok(), Ok(&12));
    ///
    /// let failed = Outcome::from_result("x".parse::<i32>());
    /// assert_eq!(failed.fault().map(|f| f.kind()), Some("ParseIntError"));
    /// ```
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(Fault::from_error(error)),
        }
    }

    #[inline]
    pub(crate) fn from_parts(state: Result<T, Fault>, reasons: Vec<Reason>, metadata: Metadata) -> Self {
        Outcome {
            state,
            reasons,
            metadata,
        }
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (Result<T, Fault>, Vec<Reason>, Metadata) {
        (self.state, self.reasons, self.metadata)
    }

    /// Append reasons from an earlier outcome and fill in metadata keys this
    /// outcome has not set.
    pub(crate) fn inherit(mut self, reasons: Vec<Reason>, metadata: &Metadata) -> Self {
        self.reasons.extend(reasons);
        self.metadata.merge_missing(metadata);
        self
    }

    // ========== Inspection ==========

    /// Returns `true` for a success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.state.is_ok()
    }

    /// Returns `true` for a failure.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.state.is_err()
    }

    /// Borrow the payload or the primary fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::success("ready");
    /// if let Ok(value) = outcome.ok() {
    ///     assert_eq!(*value, "ready");
    /// }
    /// ```
    #[inline]
    pub fn ok(&self) -> Result<&T, &Fault> {
        self.state.as_ref()
    }

    /// The payload of a success.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.state.as_ref().ok()
    }

    /// The primary fault of a failure.
    #[inline]
    pub fn fault(&self) -> Option<&Fault> {
        self.state.as_ref().err()
    }

    /// Borrowed view of the state for native pattern matching.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Outcome, OutcomeRef};
    ///
    /// let outcome = Outcome::<u8>::failure("nope");
    /// match outcome.state() {
    ///     OutcomeRef::Success(v) => panic!("unexpected {v}"),
    ///     OutcomeRef::Failure(fault) => assert_eq!(fault.message(), "nope"),
    /// }
    /// ```
    pub fn state(&self) -> OutcomeRef<'_, T> {
        match &self.state {
            Ok(value) => OutcomeRef::Success(value),
            Err(fault) => OutcomeRef::Failure(fault),
        }
    }

    /// Consume the outcome, calling exactly one of the two functions.
    ///
    /// The failure branch always receives the primary fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let text = Outcome::<i32>::failure("boom").fold(
    ///     |n| format!("got {n}"),
    ///     |fault| format!("failed: {fault}"),
    /// );
    /// assert_eq!(text, "failed: boom");
    /// ```
    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(Fault) -> R,
    {
        match self.state {
            Ok(value) => on_success(value),
            Err(fault) => on_failure(fault),
        }
    }

    /// Run `f` with the payload of a success; nothing happens on failure.
    pub fn if_success<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Ok(value) = &self.state {
            f(value);
        }
    }

    /// Run `f` with the primary fault of a failure; nothing happens on success.
    pub fn if_failure<F>(&self, f: F)
    where
        F: FnOnce(&Fault),
    {
        if let Err(fault) = &self.state {
            f(fault);
        }
    }

    /// All attached reasons, in insertion order.
    #[inline]
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    /// The outcome's metadata.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Attached error reasons, in insertion order.
    pub fn errors(&self) -> impl Iterator<Item = &dyn ErrorReason> {
        self.reasons.iter().filter_map(Reason::as_error)
    }

    /// Attached success annotations, in insertion order.
    pub fn successes(&self) -> impl Iterator<Item = &dyn SuccessReason> {
        self.reasons.iter().filter_map(Reason::as_success)
    }

    /// The error that best explains this outcome.
    ///
    /// The first attached error that was not auto-wrapped wins; if every
    /// error is an auto-wrapped fault, the first of those is used. Wrapping a
    /// failure with context therefore never hides a domain error.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    /// use verdict::errors::NotFoundError;
    ///
    /// let outcome = Outcome::<()>::from_error(NotFoundError::new("user", 3))
    ///     .with_context("loading profile: ");
    /// assert_eq!(outcome.primary_error().map(|e| e.code()), Some("NOT_FOUND"));
    /// ```
    pub fn primary_error(&self) -> Option<&dyn ErrorReason> {
        select_primary(&self.reasons)
    }

    // ========== Extraction ==========

    /// Convert into a `Result`, surfacing the primary fault.
    ///
    /// This is the escape hatch out of the algebra: combined with `?` it
    /// re-raises the fault in the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Fault, Outcome};
    ///
    /// fn total() -> Result<i32, Fault> {
    ///     let a = Outcome::success(2).into_result()?;
    ///     let b = Outcome::success(3).into_result()?;
    ///     Ok(a + b)
    /// }
    /// assert_eq!(total().ok(), Some(5));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, Fault> {
        self.state
    }

    /// Convert into a `Result`, transforming the primary fault.
    pub fn into_result_with<E, F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(Fault) -> E,
    {
        self.state.map_err(f)
    }

    /// The payload, or `default` on failure.
    pub fn value_or(self, default: T) -> T {
        self.state.unwrap_or(default)
    }

    /// The payload, or the result of `f` on failure.
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(&Fault) -> T,
    {
        match self.state {
            Ok(value) => value,
            Err(fault) => f(&fault),
        }
    }

    // ========== Builders ==========

    /// Attach a reason.
    ///
    /// Builders consume the outcome, so they can only run before it is shared.
    pub fn with_reason(mut self, reason: Reason) -> Self {
        self.reasons.push(reason);
        self
    }

    /// Attach several reasons, keeping their order.
    pub fn with_reasons<I>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = Reason>,
    {
        self.reasons.extend(reasons);
        self
    }

    /// Attach a domain error as a reason, without changing the state.
    pub fn with_error(self, error: impl ErrorReason) -> Self {
        self.with_reason(Reason::error(error))
    }

    /// Attach a success annotation with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Outcome;
    ///
    /// let outcome = Outcome::success(3).with_success("read from cache");
    /// assert_eq!(outcome.to_string(), "Success(i32: read from cache) reasons=1");
    /// ```
    pub fn with_success(self, message: impl Into<String>) -> Self {
        self.with_reason(Reason::success(Annotation::new(message)))
    }

    /// Set a metadata entry; keys compare case-insensitively, last write wins.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

impl Outcome<()> {
    /// A success with no payload.
    pub fn completed() -> Self {
        Self::success(())
    }
}

impl<T> From<Result<T, Fault>> for Outcome<T> {
    fn from(result: Result<T, Fault>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(fault) => Outcome::failure(fault),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Fault> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Ok(_) => {
                let message = self.successes().next().map_or("ok", |s| s.message());
                write!(f, "Success({}: {})", short_type_name::<T>(), message)?;
            }
            Err(fault) => {
                let (header_type, header_message, code) = match primary_reason(&self.reasons) {
                    Some(reason) => {
                        let error = reason.as_error().ok_or(fmt::Error)?;
                        let header_type = match error.causing_fault() {
                            Some(cause) if reason.is_auto_wrapped() => cause.kind().to_string(),
                            _ => error.type_name(),
                        };
                        (header_type, error.message(), Some(error.code()))
                    }
                    None => (fault.kind().to_string(), fault.message(), None),
                };
                write!(f, "Failure({}: {})", header_type, header_message)?;
                if let Some(code) = code {
                    write!(f, " code={}", code)?;
                }
            }
        }

        if !self.reasons.is_empty() {
            write!(f, " reasons={}", self.reasons.len())?;
        }

        if !self.metadata.is_empty() {
            let entries = self
                .metadata
                .iter()
                .take(DISPLAY_METADATA_LIMIT)
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, " meta={}", entries)?;
        }

        Ok(())
    }
}
