//! Bounded-concurrency collection mapping.
//!
//! [`pool`] applies a transform to every element of a keyed collection with
//! at most `limit` transforms outstanding at once. The scheduler has three
//! phases per invocation:
//!
//! - **Draining** - pull the next `(key, element)` pair and invoke the
//!   transform. An immediate outcome is written straight into the result
//!   slot for its key; a pending outcome is registered as an in-flight task.
//!   Before pulling another element while the registry is full, the
//!   scheduler suspends until any one task settles.
//! - **Flushing** - once the source is exhausted, await every remaining
//!   in-flight task.
//! - **Done** - finish the result container and hand it back.
//!
//! Result slots are addressed by source key, so the finished container
//! always matches the source's keying regardless of the order completions
//! arrive in. Side effects inside the transform are explicitly unordered -
//! they happen at real settlement time.
//!
//! The dual-path discipline applies to the call as a whole: if no transform
//! ever goes pending, the whole run happens on the caller's stack and the
//! result comes back [`Deferred::Ready`]. The async drain loop is entered
//! only when the first pending outcome appears.
//!
//! # Errors
//!
//! The first `Err` the scheduler observes - from an immediate outcome or a
//! settling task - is propagated at once. Remaining in-flight tasks are
//! dropped with the registry, which cancels them; no attempt is made to
//! await their outcomes first.
//!
//! # Example
//!
//! ```
//! use millrace::{pool, Deferred};
//!
//! # tokio_test::block_on(async {
//! let squares = pool(vec![1, 2, 3, 4], 2, |n: i32, _key: &usize| {
//!     Deferred::pending(async move { Ok::<_, String>(n * n) })
//! });
//! assert_eq!(squares.settle().await, Ok(vec![1, 4, 9, 16]));
//! # });
//! ```

mod source;
mod table;

pub use source::KeyedSource;
pub use table::{HashTable, IndexTable, OrderedTable, SlotTable};

use futures::stream::{FuturesUnordered, StreamExt};

use crate::deferred::{BoxFuture, Deferred};

/// Apply `transform` across `source` with at most `limit` transforms
/// outstanding at once.
///
/// The transform receives each element together with a borrow of its key
/// and returns a possibly-deferred `Result`. The finished container is the
/// source's natural result shape - `Vec<T>` for a `Vec` source, `HashMap`
/// for a `HashMap` source, and so on - addressed by the same keys.
///
/// An entirely immediate run returns `Ready`; see the module docs for the
/// scheduling discipline and failure policy.
///
/// # Panics
///
/// Panics if `limit` is zero: a pool that can never admit a task cannot
/// make progress.
///
/// # Example
///
/// ```
/// use millrace::{pool, Deferred};
///
/// // An all-immediate transform never leaves the synchronous path.
/// let doubled = pool(vec![1, 2, 3], 8, |n: i32, _key: &usize| {
///     Deferred::ready(Ok::<_, String>(n * 2))
/// });
/// assert_eq!(doubled.into_ready(), Some(Ok(vec![2, 4, 6])));
/// ```
pub fn pool<S, F, T, E>(
    source: S,
    limit: usize,
    transform: F,
) -> Deferred<Result<<S::Table<T> as SlotTable>::Output, E>>
where
    S: KeyedSource,
    S::Item: 'static,
    S::Pairs: Send + 'static,
    S::Table<T>: Send + 'static,
    <S::Table<T> as SlotTable>::Output: Send + 'static,
    F: Fn(S::Item, &S::Key) -> Deferred<Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    assert!(limit > 0, "pool requires a concurrency limit of at least 1");

    let mut table = <S::Table<T> as SlotTable>::with_capacity(source.len_hint());
    let mut pairs = source.into_pairs();

    // Synchronous fast path: stay here until a transform goes pending.
    while let Some((key, item)) = pairs.next() {
        match transform(item, &key) {
            Deferred::Ready(Ok(value)) => table.write(key, value),
            Deferred::Ready(Err(error)) => return Deferred::Ready(Err(error)),
            Deferred::Pending(task) => {
                return Deferred::Pending(Box::pin(drain(
                    table, pairs, limit, transform, key, task,
                )));
            }
        }
    }

    Deferred::Ready(Ok(table.finish()))
}

/// The async drain loop, entered on the first pending transform.
///
/// `in_flight` is the registry of outstanding tasks, owned by this
/// invocation and never shared. A task is removed when the loop observes
/// its settlement through `next()`; completion callbacks never mutate the
/// registry themselves.
async fn drain<P, Tab, K, I, F, T, E>(
    mut table: Tab,
    mut pairs: P,
    limit: usize,
    transform: F,
    first_key: K,
    first_task: BoxFuture<'static, Result<T, E>>,
) -> Result<Tab::Output, E>
where
    P: Iterator<Item = (K, I)> + Send + 'static,
    Tab: SlotTable<Key = K, Value = T> + Send + 'static,
    K: Send + 'static,
    I: 'static,
    F: Fn(I, &K) -> Deferred<Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let mut in_flight: FuturesUnordered<BoxFuture<'static, (K, Result<T, E>)>> =
        FuturesUnordered::new();
    in_flight.push(Box::pin(async move { (first_key, first_task.await) }));

    loop {
        // Suspend before pulling the next element while the registry is
        // full; any one settlement unblocks us.
        while in_flight.len() >= limit {
            #[cfg(feature = "tracing")]
            tracing::trace!(in_flight = in_flight.len(), limit, "pool suspending");
            match in_flight.next().await {
                Some((key, Ok(value))) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(in_flight = in_flight.len(), "pool task settled");
                    table.write(key, value);
                }
                Some((_, Err(error))) => return Err(error),
                None => break,
            }
        }

        let Some((key, item)) = pairs.next() else {
            break;
        };
        match transform(item, &key) {
            Deferred::Ready(Ok(value)) => table.write(key, value),
            Deferred::Ready(Err(error)) => return Err(error),
            Deferred::Pending(task) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(in_flight = in_flight.len() + 1, "pool task registered");
                in_flight.push(Box::pin(async move { (key, task.await) }));
            }
        }
    }

    // Flush: the source is exhausted, await everything still in flight.
    #[cfg(feature = "tracing")]
    tracing::trace!(in_flight = in_flight.len(), "pool flushing");
    while let Some((key, outcome)) = in_flight.next().await {
        match outcome {
            Ok(value) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(in_flight = in_flight.len(), "pool task settled");
                table.write(key, value);
            }
            Err(error) => return Err(error),
        }
    }

    Ok(table.finish())
}
