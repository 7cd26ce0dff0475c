//! Async combinators for outcome-producing futures
//!
//! [`OutcomeFutureExt`] adds `bind`, `map`, `tap` and `recover_with`
//! counterparts to any `Future<Output = Outcome<T>>`, with the same rules for
//! carrying reasons and metadata as the synchronous versions. The free
//! functions mirror [`traverse`](crate::traverse).
//!
//! # Example
//!
//! ```rust
//! use verdict::future::OutcomeFutureExt;
//! use verdict::Outcome;
//!
//! async fn fetch(id: u32) -> Outcome<String> {
//!     Outcome::success(format!("user-{id}")).with_success("fetched")
//! }
//!
//! async fn audit(name: String) -> Outcome<usize> {
//!     Outcome::success(name.len())
//! }
//!
//! # tokio_test::block_on(async {
//! let len = fetch(7).bind_async(audit).await;
//! assert_eq!(len.ok(), Ok(&6));
//! assert_eq!(len.reasons().len(), 1);
//! # });
//! ```

use std::future::Future;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::traverse::{combine, sequence};
use crate::{Fault, Outcome};

/// Combinators over futures that resolve to an [`Outcome`].
pub trait OutcomeFutureExt<T>: Future<Output = Outcome<T>> + Sized {
    /// Chain an async step after a success.
    ///
    /// A failure skips `f` and keeps its reasons and metadata. On success the
    /// new outcome inherits the earlier reasons and any metadata keys it does
    /// not set itself.
    fn bind_async<'a, U, F, Fut>(self, f: F) -> BoxFuture<'a, Outcome<U>>
    where
        Self: Send + 'a,
        T: Send + 'a,
        U: Send + 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<U>> + Send + 'a,
    {
        async move {
            let (state, reasons, metadata) = self.await.into_parts();
            match state {
                Ok(value) => f(value).await.inherit(reasons, &metadata),
                Err(fault) => {
                    log_trace!(fault = %fault, "bind_async short-circuited");
                    Outcome::from_parts(Err(fault), reasons, metadata)
                }
            }
        }
        .boxed()
    }

    /// Transform the payload of a success with an async function.
    fn map_async<'a, U, F, Fut>(self, f: F) -> BoxFuture<'a, Outcome<U>>
    where
        Self: Send + 'a,
        T: Send + 'a,
        U: Send + 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = U> + Send + 'a,
    {
        async move {
            let (state, reasons, metadata) = self.await.into_parts();
            let state = match state {
                Ok(value) => Ok(f(value).await),
                Err(fault) => Err(fault),
            };
            Outcome::from_parts(state, reasons, metadata)
        }
        .boxed()
    }

    /// Run an async side effect on success, passing the outcome through.
    fn tap_async<'a, F, Fut>(self, f: F) -> BoxFuture<'a, Outcome<T>>
    where
        Self: Send + 'a,
        T: Send + Sync + 'a,
        F: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a,
    {
        async move {
            let outcome = self.await;
            if let Ok(value) = outcome.ok() {
                f(value).await;
            }
            outcome
        }
        .boxed()
    }

    /// Replace a failure with the outcome an async function derives from its
    /// fault. Earlier reasons and metadata are inherited.
    fn recover_with_async<'a, F, Fut>(self, f: F) -> BoxFuture<'a, Outcome<T>>
    where
        Self: Send + 'a,
        T: Send + 'a,
        F: FnOnce(Fault) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<T>> + Send + 'a,
    {
        async move {
            let (state, reasons, metadata) = self.await.into_parts();
            match state {
                Ok(value) => Outcome::from_parts(Ok(value), reasons, metadata),
                Err(fault) => {
                    log_debug!(fault = %fault, "recovering failure asynchronously");
                    f(fault).await.inherit(reasons, &metadata)
                }
            }
        }
        .boxed()
    }
}

impl<T, Fut> OutcomeFutureExt<T> for Fut where Fut: Future<Output = Outcome<T>> {}

/// Apply an async `f` to each element in order, stopping at the first
/// failure. Elements after the failing one are never passed to `f`.
pub async fn traverse_async<T, U, I, F, Fut>(iter: I, mut f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Outcome<U>>,
{
    let mut evaluated = Vec::new();
    for item in iter {
        let outcome = f(item).await;
        let failed = outcome.is_failure();
        evaluated.push(outcome);
        if failed {
            break;
        }
    }
    sequence(evaluated)
}

/// Await futures one at a time, stopping at the first failure.
pub async fn sequence_async<T, I, Fut>(futures: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Outcome<T>>,
{
    traverse_async(futures, |fut| fut).await
}

/// Drive all futures concurrently, then report every failure like
/// [`combine`].
pub async fn combine_async<I, Fut>(futures: I) -> Outcome<()>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Outcome<()>>,
{
    combine(join_all(futures).await)
}
