//! Reasons: diagnostic items attached to an outcome
//!
//! A [`Reason`] is either an error (something went wrong, see [`ErrorReason`])
//! or a success annotation (provenance for a value, see [`SuccessReason`]).
//! Both kinds attach to any [`Outcome`](crate::Outcome), whatever its own
//! state: a recovered success can still list the errors it recovered from.
//!
//! Each error reason records at construction whether it was *auto-wrapped*,
//! that is attached by [`Outcome::failure`](crate::Outcome::failure) to bridge
//! a plain fault. The primary-error rule reads that flag instead of inspecting
//! types at runtime.
//!
//! # Examples
//!
//! ```
//! use verdict::{Annotation, Outcome, Reason};
//! use verdict::errors::NotFoundError;
//!
//! let outcome = Outcome::<u32>::failure("lookup failed")
//!     .with_reason(Reason::error(NotFoundError::new("user", 42)))
//!     .with_reason(Reason::success(Annotation::new("served from replica")));
//!
//! assert_eq!(outcome.reasons().len(), 3);
//! assert_eq!(outcome.primary_error().map(|e| e.code()), Some("NOT_FOUND"));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::errors::FaultError;
use crate::fault::short_type_name;
use crate::{Fault, Metadata, MetadataValue};

/// The error capability.
///
/// Implement this for domain errors to attach them to outcomes. Only
/// [`code`](ErrorReason::code), [`message`](ErrorReason::message) and
/// [`metadata`](ErrorReason::metadata) are required.
///
/// # Examples
///
/// ```
/// use verdict::{ErrorReason, Metadata, Outcome};
///
/// #[derive(Debug)]
/// struct QuotaExceeded {
///     metadata: Metadata,
/// }
///
/// impl ErrorReason for QuotaExceeded {
///     fn code(&self) -> &str {
///         "QUOTA"
///     }
///     fn message(&self) -> &str {
///         "quota exceeded"
///     }
///     fn metadata(&self) -> &Metadata {
///         &self.metadata
///     }
/// }
///
/// let outcome = Outcome::<()>::from_error(QuotaExceeded { metadata: Metadata::new() });
/// assert_eq!(outcome.fault().map(|f| f.kind()), Some("QuotaExceeded"));
/// assert!(outcome.has_error::<QuotaExceeded>());
/// ```
pub trait ErrorReason: Any + fmt::Debug + Send + Sync {
    /// Machine-readable error code.
    fn code(&self) -> &str;

    /// Human-readable message.
    fn message(&self) -> &str;

    /// The fault that caused this error, if there is one.
    fn causing_fault(&self) -> Option<&Fault> {
        None
    }

    /// Metadata describing this error.
    fn metadata(&self) -> &Metadata;

    /// Display name of the error type.
    fn type_name(&self) -> String {
        short_type_name::<Self>()
    }

    /// Filter an error that bundles several independent parts.
    ///
    /// Returning `None` (the default) means the error is tested as a whole.
    /// Multi-part errors test each part with `keep` and report what survives.
    fn retain_parts(&self, keep: &mut dyn FnMut(&dyn ErrorReason) -> bool) -> Option<Retained> {
        let _ = keep;
        None
    }
}

impl fmt::Display for dyn ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Result of filtering an error with [`ErrorReason::retain_parts`].
#[derive(Debug, Clone)]
pub enum Retained {
    /// Keep the error unchanged
    Keep,
    /// Drop the error entirely
    Drop,
    /// Keep a narrowed version of the error
    Replace(Arc<dyn ErrorReason>),
}

/// The success annotation capability.
pub trait SuccessReason: Any + fmt::Debug + Send + Sync {
    /// Human-readable message.
    fn message(&self) -> &str;

    /// Metadata describing this annotation.
    fn metadata(&self) -> &Metadata;
}

/// The built-in success annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    message: String,
    metadata: Metadata,
}

impl Annotation {
    /// Create an annotation with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Annotation {
            message: message.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

impl SuccessReason for Annotation {
    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// A diagnostic item attached to an outcome.
#[derive(Debug, Clone)]
pub enum Reason {
    /// Something went wrong
    Error {
        /// The error itself
        error: Arc<dyn ErrorReason>,
        /// `true` when attached automatically to bridge a plain fault
        auto_wrapped: bool,
    },
    /// Provenance for a successful value
    Success(Arc<dyn SuccessReason>),
}

impl Reason {
    /// Wrap a domain error.
    pub fn error(error: impl ErrorReason) -> Self {
        Reason::Error {
            error: Arc::new(error),
            auto_wrapped: false,
        }
    }

    /// Wrap a success annotation.
    pub fn success(annotation: impl SuccessReason) -> Self {
        Reason::Success(Arc::new(annotation))
    }

    pub(crate) fn from_shared(error: Arc<dyn ErrorReason>) -> Self {
        Reason::Error {
            error,
            auto_wrapped: false,
        }
    }

    /// The reason attached by `Outcome::failure` for a plain fault.
    pub(crate) fn wrapped_fault(fault: Fault) -> Self {
        Reason::Error {
            error: Arc::new(FaultError::new(fault)),
            auto_wrapped: true,
        }
    }

    /// Message of the underlying error or annotation.
    pub fn message(&self) -> &str {
        match self {
            Reason::Error { error, .. } => error.message(),
            Reason::Success(s) => s.message(),
        }
    }

    /// Metadata of the underlying error or annotation.
    pub fn metadata(&self) -> &Metadata {
        match self {
            Reason::Error { error, .. } => error.metadata(),
            Reason::Success(s) => s.metadata(),
        }
    }

    /// Returns `true` for error reasons.
    pub fn is_error(&self) -> bool {
        matches!(self, Reason::Error { .. })
    }

    /// Returns `true` for error reasons attached automatically for a plain fault.
    pub fn is_auto_wrapped(&self) -> bool {
        matches!(self, Reason::Error { auto_wrapped: true, .. })
    }

    /// The error, for error reasons.
    pub fn as_error(&self) -> Option<&dyn ErrorReason> {
        match self {
            Reason::Error { error, .. } => Some(error.as_ref()),
            Reason::Success(_) => None,
        }
    }

    /// The annotation, for success reasons.
    pub fn as_success(&self) -> Option<&dyn SuccessReason> {
        match self {
            Reason::Success(s) => Some(s.as_ref()),
            Reason::Error { .. } => None,
        }
    }

    /// The error as a concrete type, if it is one.
    pub fn downcast_error<E: ErrorReason>(&self) -> Option<&E> {
        let error: &dyn Any = self.as_error()?;
        error.downcast_ref::<E>()
    }

    /// The annotation as a concrete type, if it is one.
    pub fn downcast_success<S: SuccessReason>(&self) -> Option<&S> {
        let annotation: &dyn Any = self.as_success()?;
        annotation.downcast_ref::<S>()
    }
}

/// The primary error of a reason list: the first error that was not
/// auto-wrapped, falling back to the first auto-wrapped one.
pub(crate) fn select_primary(reasons: &[Reason]) -> Option<&dyn ErrorReason> {
    primary_reason(reasons).and_then(Reason::as_error)
}

pub(crate) fn primary_reason(reasons: &[Reason]) -> Option<&Reason> {
    let mut fallback = None;
    for reason in reasons.iter().filter(|r| r.is_error()) {
        if !reason.is_auto_wrapped() {
            return Some(reason);
        }
        fallback = fallback.or(Some(reason));
    }
    fallback
}

/// The fault an error surfaces as when it becomes the primary fault.
pub(crate) fn fault_of(error: &dyn ErrorReason) -> Fault {
    match error.causing_fault() {
        Some(fault) => fault.clone(),
        None => Fault::with_kind(error.type_name(), error.message()),
    }
}
