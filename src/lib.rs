//! # Millrace
//!
//! > *A millrace is the channel that keeps just enough water moving to
//! > drive the wheel.*
//!
//! A small scheduling core for function-combinator libraries: dual-path
//! sync/async composition, placeholder-based partial application, and
//! bounded-concurrency collection mapping.
//!
//! ## Philosophy
//!
//! Everything in this crate branches on one structural question - is this
//! value here now, or will it settle later? - and obeys one rule about the
//! answer: **synchronous work is never forced onto the asynchronous path**.
//! A composition of immediate steps runs on the caller's stack with no
//! future allocated; a curry invocation over immediate arguments returns
//! its direct result; a pool run whose transforms all complete immediately
//! hands back a ready container. The async machinery only switches on when
//! a value genuinely goes pending.
//!
//! ## The pieces
//!
//! - [`Deferred`] - the immediate/deferred sum type, with dual-path
//!   [`map`](Deferred::map) / [`and_then`](Deferred::and_then) and
//!   concurrent [`join_all`](Deferred::join_all) resolution.
//! - [`compose()`] / [`Pipeline`] - binary and left-folded n-ary
//!   composition under the dual-path discipline.
//! - [`curry()`] / [`Curried`] - placeholder partial application with
//!   fill-left-to-right semantics, concurrent argument resolution, and
//!   curry-past-arity chains; [`curry2`]/[`curry3`]/[`curry4`] fixed-arity
//!   resolvers.
//! - [`pool()`] - map a keyed collection with at most K transforms
//!   outstanding, result slots addressed by source key.
//!
//! ## Quick Example
//!
//! ```
//! use millrace::{pool, Deferred};
//!
//! # tokio_test::block_on(async {
//! // At most two squares in flight at once; results in source order.
//! let squares = pool(vec![1, 2, 3, 4, 5, 6], 2, |n: i32, _key: &usize| {
//!     Deferred::pending(async move { Ok::<_, String>(n * n) })
//! });
//! assert_eq!(squares.settle().await, Ok(vec![1, 4, 9, 16, 25, 36]));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod compose;
pub mod curry;
pub mod deferred;
pub mod pool;

// Re-exports
pub use compose::{compose, Pipeline};
pub use curry::{curry, curry2, curry3, curry4, Applied, Arg, Curried, CurryError};
pub use deferred::{BoxFuture, Deferred};
pub use pool::{pool, KeyedSource, SlotTable};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compose::{compose, Pipeline};
    pub use crate::curry::{curry, curry2, curry3, curry4, Applied, Arg, Curried, CurryError};
    pub use crate::deferred::{BoxFuture, Deferred};
    pub use crate::pool::{pool, KeyedSource, SlotTable};
}
