//! Dual-path function composition.
//!
//! Composition here has one job beyond gluing two functions together: it
//! must never drag a synchronous computation onto the async path. When the
//! first step produces a [`Deferred::Ready`] value, the second step runs
//! immediately on the same call stack; only when the first step goes
//! pending does the chain allocate a future and settle through it. The same
//! branching applies recursively to the second step's own outcome.
//!
//! Two surfaces are provided:
//!
//! - [`compose`] - the binary operator of the scheme above.
//! - [`Pipeline`] - an n-ary chain built by left-folding the binary
//!   operator, stored behind an `Arc` so a finished pipeline is cheap to
//!   clone and reuse.
//!
//! # Example
//!
//! ```
//! use millrace::{compose, Deferred};
//!
//! let double = |x: i32| Deferred::ready(x * 2);
//! let inc = |x: i32| Deferred::ready(x + 1);
//!
//! // Both steps immediate: the composition never allocates a future.
//! let double_then_inc = compose(double, inc);
//! assert_eq!(double_then_inc(5).into_ready(), Some(11));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::deferred::Deferred;

/// Compose two unary steps with immediate/deferred branching.
///
/// Returns a function `g` with `g(x) = second(first(x))` up to settlement:
/// if `first(x)` is `Ready`, `second` is invoked synchronously and its
/// result returned unwrapped; if `first(x)` is `Pending`, `g(x)` is a
/// pending value that invokes `second` on the settled output and settles
/// with `second`'s own outcome.
///
/// `second` is always invoked with exactly the settled value of `first`,
/// never concurrently with it and never before it settles.
///
/// # Example
///
/// ```
/// use millrace::{compose, Deferred};
///
/// # tokio_test::block_on(async {
/// let fetch = |x: i32| Deferred::pending(async move { x * 2 });
/// let inc = |x: i32| Deferred::ready(x + 1);
///
/// let step = compose(fetch, inc);
/// let result = step(5);
/// assert!(result.is_pending());
/// assert_eq!(result.settle().await, 11);
/// # });
/// ```
pub fn compose<A, B, C, F, G>(first: F, second: G) -> impl Fn(A) -> Deferred<C>
where
    F: Fn(A) -> Deferred<B>,
    G: Fn(B) -> Deferred<C> + Clone + Send + Sync + 'static,
    B: 'static,
    C: Send + 'static,
{
    move |input| match first(input) {
        Deferred::Ready(value) => second(value),
        Deferred::Pending(future) => {
            let second = second.clone();
            Deferred::pending(async move { second(future.await).settle().await })
        }
    }
}

/// A reusable left-fold chain of dual-path steps.
///
/// `Pipeline` folds [`compose`] over a sequence of steps. Each `then` call
/// wraps the accumulated chain in one closure, so an n-step pipeline costs
/// n indirect calls per run and nothing more on the all-immediate path.
///
/// The chain is stored behind an `Arc`: cloning a pipeline is a reference
/// count bump, and a pipeline can be run any number of times.
///
/// # Example
///
/// ```
/// use millrace::{Deferred, Pipeline};
///
/// let pipeline = Pipeline::new(|x: i32| Deferred::ready(x + 1))
///     .then(|x| Deferred::ready(x * 2))
///     .then(|x| Deferred::ready(x - 3));
///
/// assert_eq!(pipeline.run(5).into_ready(), Some(9));
/// ```
pub struct Pipeline<A, B> {
    chain: Arc<dyn Fn(A) -> Deferred<B> + Send + Sync>,
}

impl<A, B> Pipeline<A, B>
where
    A: 'static,
    B: Send + 'static,
{
    /// Start a pipeline from a single step.
    pub fn new<F>(step: F) -> Self
    where
        F: Fn(A) -> Deferred<B> + Send + Sync + 'static,
    {
        Pipeline {
            chain: Arc::new(step),
        }
    }

    /// Append a step, folding it onto the accumulated chain.
    ///
    /// The appended step sees the settled output of the chain so far, under
    /// the same branching discipline as [`compose`].
    pub fn then<C, G>(self, step: G) -> Pipeline<A, C>
    where
        G: Fn(B) -> Deferred<C> + Send + Sync + 'static,
        C: Send + 'static,
    {
        let step = Arc::new(step);
        let chain = self.chain;
        Pipeline {
            chain: Arc::new(move |input| match chain(input) {
                Deferred::Ready(value) => step(value),
                Deferred::Pending(future) => {
                    let step = Arc::clone(&step);
                    Deferred::pending(async move { step(future.await).settle().await })
                }
            }),
        }
    }

    /// Run the pipeline on one input.
    pub fn run(&self, input: A) -> Deferred<B> {
        (self.chain)(input)
    }
}

impl<A, B> Clone for Pipeline<A, B> {
    fn clone(&self) -> Self {
        Pipeline {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<A, B> fmt::Debug for Pipeline<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("chain", &"<chain>").finish()
    }
}
