//! Deferred values - the immediate/deferred distinction.
//!
//! This module provides [`Deferred`], a two-variant sum over "a value that is
//! already here" and "a value that will settle later". Every other component
//! in the crate branches on this distinction: composition chains
//! synchronously while values stay [`Deferred::Ready`], the curry engine
//! resolves deferred argument slots before invocation, and the pool mapper
//! only enters its async drain loop once a transform actually goes pending.
//!
//! The governing invariant is **no accidental forcing**: an operation whose
//! inputs are all `Ready` must produce a `Ready` output without allocating a
//! future. Callers on a hot synchronous path never pay for the async
//! machinery they do not use.
//!
//! # Example
//!
//! ```
//! use millrace::Deferred;
//!
//! // A synchronous chain never allocates a future.
//! let result = Deferred::ready(21).map(|x| x * 2);
//! assert_eq!(result.into_ready(), Some(42));
//!
//! // A pending chain settles without blocking.
//! # tokio_test::block_on(async {
//! let result = Deferred::pending(async { 21 }).map(|x| x * 2);
//! assert!(result.is_pending());
//! assert_eq!(result.settle().await, 42);
//! # });
//! ```

mod join;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// A boxed future that is Send + 'static
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A value that is either immediately available or will settle later.
///
/// `Deferred<T>` is the crate's answer to "is this value a future?". The
/// classification is structural: a `Ready` holds the value inline, a
/// `Pending` holds a boxed future that yields it. Combinators preserve
/// readiness wherever they can - see [`Deferred::map`] and
/// [`Deferred::and_then`].
pub enum Deferred<T> {
    /// The value is available now.
    Ready(T),
    /// The value will be produced by the contained future.
    Pending(BoxFuture<'static, T>),
}

impl<T: 'static> Deferred<T> {
    /// Wrap an immediate value.
    pub fn ready(value: T) -> Self {
        Deferred::Ready(value)
    }

    /// Wrap a future that will produce the value.
    ///
    /// # Example
    ///
    /// ```
    /// use millrace::Deferred;
    ///
    /// # tokio_test::block_on(async {
    /// let value = Deferred::pending(async { 7 });
    /// assert_eq!(value.settle().await, 7);
    /// # });
    /// ```
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Deferred::Pending(Box::pin(future))
    }

    /// Returns `true` if the value is immediately available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Deferred::Ready(_))
    }

    /// Returns `true` if the value has not settled yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Deferred::Pending(_))
    }

    /// Extract the value if it is immediately available.
    ///
    /// Returns `None` for a pending value. Useful in tests asserting that a
    /// synchronous path stayed synchronous.
    pub fn into_ready(self) -> Option<T> {
        match self {
            Deferred::Ready(value) => Some(value),
            Deferred::Pending(_) => None,
        }
    }

    /// Wait for the value, whichever variant it is.
    ///
    /// A `Ready` value returns without yielding to the executor.
    pub async fn settle(self) -> T {
        match self {
            Deferred::Ready(value) => value,
            Deferred::Pending(future) => future.await,
        }
    }

    /// Transform the eventual value.
    ///
    /// A `Ready` input is transformed on the spot and stays `Ready`; a
    /// `Pending` input defers the transformation to settlement time.
    ///
    /// # Example
    ///
    /// ```
    /// use millrace::Deferred;
    ///
    /// let doubled = Deferred::ready(3).map(|x| x * 2);
    /// assert_eq!(doubled.into_ready(), Some(6));
    /// ```
    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        F: FnOnce(T) -> U + Send + 'static,
        U: 'static,
    {
        match self {
            Deferred::Ready(value) => Deferred::Ready(f(value)),
            Deferred::Pending(future) => Deferred::Pending(Box::pin(async move { f(future.await) })),
        }
    }

    /// Chain a dependent step with dual-path branching.
    ///
    /// When `self` is `Ready`, the continuation runs on the current call
    /// stack and its result is returned as-is - in particular, a `Ready`
    /// continuation result stays `Ready` with no allocation. When `self` is
    /// `Pending`, the continuation is invoked once the future settles and
    /// the chain settles with the continuation's outcome, whichever variant
    /// that turns out to be.
    ///
    /// The continuation sees exactly the settled value; it is never invoked
    /// early, and never invoked more than once.
    ///
    /// # Example
    ///
    /// ```
    /// use millrace::Deferred;
    ///
    /// // Synchronous all the way through.
    /// let result = Deferred::ready(2).and_then(|x| Deferred::ready(x + 1));
    /// assert_eq!(result.into_ready(), Some(3));
    ///
    /// // The continuation may itself go pending.
    /// # tokio_test::block_on(async {
    /// let result = Deferred::ready(2)
    ///     .and_then(|x| Deferred::pending(async move { x + 1 }));
    /// assert_eq!(result.settle().await, 3);
    /// # });
    /// ```
    pub fn and_then<U, F>(self, f: F) -> Deferred<U>
    where
        F: FnOnce(T) -> Deferred<U> + Send + 'static,
        U: Send + 'static,
    {
        match self {
            Deferred::Ready(value) => f(value),
            Deferred::Pending(future) => {
                Deferred::Pending(Box::pin(async move { f(future.await).settle().await }))
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Deferred::Pending(_) => f.debug_tuple("Pending").field(&"<future>").finish(),
        }
    }
}
