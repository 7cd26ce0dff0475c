//! Faults: the root cause carried by every failed outcome
//!
//! A [`Fault`] is what a failed [`Outcome`](crate::Outcome) surfaces through
//! `fold`, `ok` and `into_result`. Faults are immutable and cheap to clone;
//! wrapping a fault with context always keeps the original reachable through
//! [`Fault::cause`].
//!
//! # Examples
//!
//! ```
//! use verdict::Fault;
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
//! let fault = Fault::from_error(io);
//! let wrapped = Fault::wrap("loading settings: config.toml missing", fault.clone());
//!
//! assert_eq!(wrapped.kind(), "Error");
//! assert!(wrapped.cause().is_some_and(|c| c.ptr_eq(&fault)));
//! assert!(fault.downcast_ref::<std::io::Error>().is_some());
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::nonempty::NonEmptyVec;
use crate::Semigroup;

/// Kind reported by [`Fault::new`].
pub const DEFAULT_FAULT_KIND: &str = "Fault";

/// Kind reported by [`Fault::aggregate`].
pub const AGGREGATE_FAULT_KIND: &str = "AggregateFault";

type BoxedSource = Arc<dyn StdError + Send + Sync + 'static>;

/// The causing fault of a failure.
#[derive(Clone)]
pub struct Fault {
    inner: Arc<FaultInner>,
}

struct FaultInner {
    kind: String,
    message: String,
    cause: Option<Fault>,
    source: Option<BoxedSource>,
    members: Vec<Fault>,
}

impl Fault {
    /// Create a fault from a message.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::Fault;
    ///
    /// let fault = Fault::new("boom");
    /// assert_eq!(fault.kind(), "Fault");
    /// assert_eq!(fault.message(), "boom");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(DEFAULT_FAULT_KIND, message)
    }

    /// Create a fault with an explicit kind name.
    pub fn with_kind(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(kind.into(), message.into(), None, None, Vec::new())
    }

    /// Bridge any standard error into a fault.
    ///
    /// The kind is the error's unqualified type name and the original error is
    /// kept as the fault's [`source`](StdError::source).
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let kind = short_type_name::<E>();
        let message = error.to_string();
        Self::build(kind, message, None, Some(Arc::new(error)), Vec::new())
    }

    /// Create a fault that wraps `cause` under a new message.
    ///
    /// The new fault reports the same kind as its cause.
    pub fn wrap(message: impl Into<String>, cause: Fault) -> Self {
        let kind = cause.inner.kind.clone();
        Self::build(kind, message.into(), Some(cause), None, Vec::new())
    }

    /// Fold several faults into one. Nested aggregates are flattened.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdict::{Fault, NonEmptyVec};
    ///
    /// let fault = Fault::aggregate(NonEmptyVec::new(Fault::new("a"), vec![Fault::new("b")]));
    /// assert_eq!(fault.kind(), "AggregateFault");
    /// assert_eq!(fault.message(), "a; b");
    /// assert_eq!(fault.inner_faults().len(), 2);
    /// ```
    pub fn aggregate(faults: NonEmptyVec<Fault>) -> Self {
        let members: Vec<Fault> = faults
            .into_iter()
            .flat_map(|f| {
                if f.is_aggregate() {
                    f.inner.members.clone()
                } else {
                    vec![f]
                }
            })
            .collect();
        let message = members
            .iter()
            .map(Fault::message)
            .collect::<Vec<_>>()
            .join("; ");
        Self::build(AGGREGATE_FAULT_KIND.to_string(), message, None, None, members)
    }

    fn build(
        kind: String,
        message: String,
        cause: Option<Fault>,
        source: Option<BoxedSource>,
        members: Vec<Fault>,
    ) -> Self {
        Fault {
            inner: Arc::new(FaultInner {
                kind,
                message,
                cause,
                source,
                members,
            }),
        }
    }

    /// Unqualified type name of the fault (or of the error it bridges).
    pub fn kind(&self) -> &str {
        &self.inner.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The fault this one wraps, if any.
    pub fn cause(&self) -> Option<&Fault> {
        self.inner.cause.as_ref()
    }

    /// Member faults of an aggregate; empty for every other fault.
    pub fn inner_faults(&self) -> &[Fault] {
        &self.inner.members
    }

    /// Returns `true` if this fault was built by [`Fault::aggregate`].
    pub fn is_aggregate(&self) -> bool {
        !self.inner.members.is_empty()
    }

    /// The innermost fault of the [`cause`](Fault::cause) chain.
    pub fn root_cause(&self) -> &Fault {
        let mut current = self;
        while let Some(next) = current.cause() {
            current = next;
        }
        current
    }

    /// Iterate over this fault followed by each of its causes.
    pub fn chain(&self) -> impl Iterator<Item = &Fault> {
        std::iter::successors(Some(self), |f| Fault::cause(f))
    }

    /// Downcast the bridged standard error anywhere in the cause chain.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.chain()
            .filter_map(|f| f.inner.source.as_deref())
            .find_map(|s| s.downcast_ref::<E>())
    }

    /// Returns `true` if both handles point at the same fault.
    pub fn ptr_eq(&self, other: &Fault) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.inner.kind == other.inner.kind
                && self.inner.message == other.inner.message
                && self.inner.cause == other.inner.cause
                && self.inner.members == other.inner.members)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Fault");
        s.field("kind", &self.inner.kind)
            .field("message", &self.inner.message);
        if let Some(cause) = &self.inner.cause {
            s.field("cause", cause);
        }
        if !self.inner.members.is_empty() {
            s.field("members", &self.inner.members);
        }
        s.finish()
    }
}

impl fmt::Display for Fault {
    /// `{}` prints the message; `{:#}` adds the cause trail, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.message)?;
        if f.alternate() {
            for (depth, cause) in self.chain().skip(1).enumerate() {
                write!(f, "\n{}-> {}", "  ".repeat(depth + 1), cause.message())?;
            }
        }
        Ok(())
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match (&self.inner.cause, &self.inner.source) {
            (Some(cause), _) => Some(cause),
            (None, Some(source)) => Some(source.as_ref()),
            (None, None) => None,
        }
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::new(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::new(message)
    }
}

impl From<std::io::Error> for Fault {
    fn from(error: std::io::Error) -> Self {
        Fault::from_error(error)
    }
}

impl Semigroup for Fault {
    fn combine(self, other: Self) -> Self {
        Fault::aggregate(NonEmptyVec::new(self, vec![other]))
    }
}

/// Type name with every module path stripped, generics included:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    shorten_path(std::any::type_name::<T>())
}

fn shorten_path(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (i, c) in full.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            continue;
        }
        push_last_segment(&mut out, &full[start..i]);
        out.push(c);
        start = i + c.len_utf8();
    }
    push_last_segment(&mut out, &full[start..]);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fault() {
        let fault = Fault::new("boom");
        assert_eq!(fault.kind(), DEFAULT_FAULT_KIND);
        assert_eq!(fault.message(), "boom");
        assert!(fault.cause().is_none());
        assert!(fault.source().is_none());
    }

    #[test]
    fn test_wrap_keeps_original() {
        let original = Fault::with_kind("TimeoutError", "boom");
        let wrapped = Fault::wrap("ctx: boom", original.clone());

        assert_eq!(wrapped.message(), "ctx: boom");
        assert_eq!(wrapped.kind(), "TimeoutError");
        assert!(wrapped.cause().unwrap().ptr_eq(&original));
        assert!(wrapped.root_cause().ptr_eq(&original));
    }

    #[test]
    fn test_from_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let fault = Fault::from_error(io);

        assert_eq!(fault.kind(), "Error");
        assert_eq!(fault.message(), "denied");
        assert!(fault.source().is_some());
        assert_eq!(
            fault.downcast_ref::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn test_downcast_through_wrap() {
        let io = std::io::Error::other("disk");
        let wrapped = Fault::wrap("saving: disk", Fault::from_error(io));
        assert!(wrapped.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_chain_walks_causes_outermost_first() {
        let wrapped = Fault::wrap("outer: mid: inner", Fault::wrap("mid: inner", Fault::new("inner")));
        let messages: Vec<_> = wrapped.chain().map(Fault::message).collect();
        assert_eq!(messages, vec!["outer: mid: inner", "mid: inner", "inner"]);
        assert_eq!(wrapped.root_cause().message(), "inner");
    }

    #[test]
    fn test_source_chain_follows_cause() {
        let wrapped = Fault::wrap("outer", Fault::new("inner"));
        let source = wrapped.source().unwrap();
        assert_eq!(source.to_string(), "inner");
    }

    #[test]
    fn test_aggregate_flattens() {
        let ab = Fault::new("a").combine(Fault::new("b"));
        let abc = ab.combine(Fault::new("c"));

        assert_eq!(abc.kind(), AGGREGATE_FAULT_KIND);
        assert_eq!(abc.message(), "a; b; c");
        assert_eq!(abc.inner_faults().len(), 3);
    }

    #[test]
    fn test_aggregate_associative() {
        let a = Fault::new("a");
        let b = Fault::new("b");
        let c = Fault::new("c");

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_display_alternate_shows_trail() {
        let fault = Fault::wrap("loading profile", Fault::wrap("querying users", Fault::new("timeout")));

        assert_eq!(format!("{}", fault), "loading profile");
        let lines: Vec<String> = format!("{:#}", fault).lines().map(String::from).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "loading profile");
        assert_eq!(lines[1], "  -> querying users");
        assert_eq!(lines[2], "    -> timeout");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<i32>(), "i32");
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(short_type_name::<(u8, String)>(), "(u8, String)");
        assert_eq!(short_type_name::<()>(), "()");
    }

    #[test]
    fn test_clone_shares_fault() {
        let fault = Fault::new("x");
        let copy = fault.clone();
        assert!(fault.ptr_eq(&copy));
        assert_eq!(fault, copy);
    }
}
