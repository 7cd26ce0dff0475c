//! Built-in error reasons
//!
//! - [`FaultError`]: bridges an arbitrary [`Fault`] into the error capability
//! - [`NotFoundError`]: a resource looked up by identifier does not exist
//! - [`ValidationError`]: one or more rule violations
//!
//! Any other type implementing [`ErrorReason`] works alongside these.

use std::fmt;
use std::sync::Arc;

use crate::reason::{ErrorReason, Retained};
use crate::{Fault, Metadata, MetadataValue, NonEmptyVec};

/// Code reported by [`FaultError`].
pub const FAULT_CODE: &str = "FAULT";
/// Code reported by [`NotFoundError`].
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";
/// Code reported by [`ValidationError`].
pub const VALIDATION_CODE: &str = "VALIDATION";

/// An error that wraps a fault with no further domain meaning.
///
/// The fault is never lost: it is always available as
/// [`causing_fault`](ErrorReason::causing_fault), whatever message the error
/// reports.
///
/// # Examples
///
/// ```
/// use verdict::{ErrorReason, Fault};
/// use verdict::errors::FaultError;
///
/// let error = FaultError::new(Fault::new("connection reset")).with_prefix("syncing: ");
/// assert_eq!(error.message(), "syncing: connection reset");
/// assert_eq!(error.causing_fault().map(|f| f.message()), Some("connection reset"));
/// ```
#[derive(Debug, Clone)]
pub struct FaultError {
    message: String,
    fault: Fault,
    metadata: Metadata,
}

impl FaultError {
    /// Wrap a fault, reporting its message.
    pub fn new(fault: Fault) -> Self {
        FaultError {
            message: fault.message().to_string(),
            fault,
            metadata: Metadata::new(),
        }
    }

    /// Wrap a fault under a different message.
    pub fn with_message(message: impl Into<String>, fault: Fault) -> Self {
        FaultError {
            message: message.into(),
            fault,
            metadata: Metadata::new(),
        }
    }

    /// Prefix the reported message.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.message = format!("{}{}", prefix, self.message);
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// The wrapped fault.
    pub fn fault(&self) -> &Fault {
        &self.fault
    }
}

impl ErrorReason for FaultError {
    fn code(&self) -> &str {
        FAULT_CODE
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn causing_fault(&self) -> Option<&Fault> {
        Some(&self.fault)
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// A resource that could not be found.
///
/// # Examples
///
/// ```
/// use verdict::ErrorReason;
/// use verdict::errors::NotFoundError;
///
/// let error = NotFoundError::new("invoice", "inv-204");
/// assert_eq!(error.message(), "invoice 'inv-204' was not found");
/// assert_eq!(error.metadata().get("resource").and_then(|v| v.as_str()), Some("invoice"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundError {
    resource: String,
    identifier: String,
    message: String,
    metadata: Metadata,
}

impl NotFoundError {
    /// Create a not-found error for `resource` with `identifier`.
    pub fn new(resource: impl Into<String>, identifier: impl fmt::Display) -> Self {
        let resource = resource.into();
        let identifier = identifier.to_string();
        let message = format!("{} '{}' was not found", resource, identifier);
        let mut metadata = Metadata::new();
        metadata.insert("resource", resource.clone());
        metadata.insert("identifier", identifier.clone());
        NotFoundError {
            resource,
            identifier,
            message,
            metadata,
        }
    }

    /// The kind of resource that was looked up.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The identifier that matched nothing.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl ErrorReason for NotFoundError {
    fn code(&self) -> &str {
        NOT_FOUND_CODE
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// One or more validation failures.
///
/// Filtering with [`Outcome::filter_error`](crate::Outcome::filter_error)
/// tests each message separately, so a predicate can keep some messages of a
/// validation error and drop others.
///
/// # Examples
///
/// ```
/// use verdict::ErrorReason;
/// use verdict::errors::ValidationError;
///
/// let error = ValidationError::many(["name is required", "age must be positive"]).unwrap();
/// assert_eq!(error.messages().len(), 2);
/// assert_eq!(error.message(), "name is required; age must be positive");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    messages: NonEmptyVec<String>,
    message: String,
    metadata: Metadata,
}

impl ValidationError {
    /// A validation error with a single message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_messages(NonEmptyVec::singleton(message.into()))
    }

    /// A validation error with several messages; `None` when given none.
    pub fn many<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages = messages.into_iter().map(Into::into).collect();
        NonEmptyVec::from_vec(messages).map(Self::from_messages)
    }

    /// A validation error from a non-empty message list.
    pub fn from_messages(messages: NonEmptyVec<String>) -> Self {
        let message = messages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        ValidationError {
            messages,
            message,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Every message, in the order given.
    pub fn messages(&self) -> &NonEmptyVec<String> {
        &self.messages
    }
}

impl ErrorReason for ValidationError {
    fn code(&self) -> &str {
        VALIDATION_CODE
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn retain_parts(&self, keep: &mut dyn FnMut(&dyn ErrorReason) -> bool) -> Option<Retained> {
        if self.messages.len() == 1 {
            return None;
        }
        let total = self.messages.len();
        let metadata = &self.metadata;
        let survivors = self.messages.clone().retain(|msg| {
            let part = ValidationError {
                messages: NonEmptyVec::singleton(msg.clone()),
                message: msg.clone(),
                metadata: metadata.clone(),
            };
            keep(&part)
        });
        Some(match survivors {
            None => Retained::Drop,
            Some(kept) if kept.len() == total => Retained::Keep,
            Some(kept) => {
                let mut narrowed = ValidationError::from_messages(kept);
                narrowed.metadata = self.metadata.clone();
                Retained::Replace(Arc::new(narrowed))
            }
        })
    }
}
