//! # Verdict
//!
//! Composable success/failure values that remember *why*.
//!
//! An [`Outcome<T>`] is either a success holding `T` or a failure holding a
//! primary [`Fault`]. Either way it carries an ordered list of [`Reason`]s
//! (domain errors and success annotations) and a case-insensitive
//! [`Metadata`] bag. Combinators thread both forward, so the end of a
//! pipeline can still explain what happened along the way.
//!
//! ## Quick Example
//!
//! ```rust
//! use verdict::errors::NotFoundError;
//! use verdict::Outcome;
//!
//! fn find_user(id: u32) -> Outcome<String> {
//!     if id == 1 {
//!         Outcome::success("ada".to_string()).with_success("cache hit")
//!     } else {
//!         Outcome::from_error(NotFoundError::new("user", id))
//!     }
//! }
//!
//! let greeting = find_user(1).map(|name| format!("hello {name}"));
//! assert_eq!(greeting.ok().map(String::as_str), Ok("hello ada"));
//!
//! let missing = find_user(2)
//!     .with_context("loading profile: ")
//!     .with_metadata("request", "r-17");
//! assert_eq!(
//!     missing.to_string(),
//!     "Failure(NotFoundError: user '2' was not found) code=NOT_FOUND reasons=2 meta=resource:user,identifier:2"
//! );
//! ```
//!
//! ## Cargo features
//!
//! - `async`: [`future`] combinators over `Future<Output = Outcome<T>>`
//! - `tracing`: debug/trace events when pipelines short-circuit or recover
//! - `serde`: `Serialize`/`Deserialize` for [`Metadata`] and [`MetadataValue`]
//! - `proptest`: `Arbitrary` for [`Outcome`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

pub mod errors;
pub mod fault;
#[cfg(feature = "async")]
pub mod future;
pub mod metadata;
pub mod nonempty;
pub mod one_of;
pub mod outcome;
pub mod reason;
pub mod semigroup;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod testing;
pub mod traverse;

// Re-exports
pub use fault::Fault;
pub use metadata::{Metadata, MetadataValue};
pub use nonempty::NonEmptyVec;
pub use one_of::{OneOf2, OneOf3, OneOf4, OneOf5, OneOf6, OneOf7, OneOf8};
pub use outcome::{ChainPolicy, Outcome, OutcomeRef};
pub use reason::{Annotation, ErrorReason, Reason, Retained, SuccessReason};
pub use semigroup::Semigroup;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{FaultError, NotFoundError, ValidationError};
    #[cfg(feature = "async")]
    pub use crate::future::OutcomeFutureExt;
    pub use crate::traverse::{combine, partition, sequence, traverse};
    pub use crate::{
        Annotation, ChainPolicy, ErrorReason, Fault, Metadata, MetadataValue, NonEmptyVec,
        OneOf2, OneOf3, Outcome, Reason, Semigroup, SuccessReason,
    };
}
