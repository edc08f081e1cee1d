//! Placeholder-based partial application.
//!
//! The curry engine builds partially-applied functions from an arity, an
//! underlying function over a homogeneous argument vector, and a vector of
//! [`Arg`] slots that each hold either a concrete (possibly deferred) value
//! or a [`Arg::Placeholder`]. Applying more arguments fills placeholder
//! slots left-to-right; once the vector reaches the arity with no holes,
//! any deferred slots are resolved concurrently and the function is
//! invoked.
//!
//! Two rules give the engine its shape:
//!
//! - **No accidental forcing.** A vector of immediate values invokes the
//!   function synchronously and returns the direct result. Only genuinely
//!   deferred slots push the invocation onto the async path.
//! - **Curry past arity.** Supplying more concrete values than the arity
//!   invokes the function with the first `arity` of them and re-applies the
//!   leftovers to the result - which therefore must itself be curried, or
//!   the call fails with [`CurryError::NotCallable`].
//!
//! The outcome of every application is the explicit two-state
//! [`Applied`] - a plain value or a function still waiting for arguments -
//! wrapped in [`Deferred`] and [`Result`] for the async and contract-failure
//! channels respectively.
//!
//! # Example
//!
//! ```
//! use millrace::{curry, Arg};
//!
//! // Positional encoding makes argument order visible.
//! let digits = |values: Vec<i32>| {
//!     values.iter().fold(0, |acc, d| acc * 10 + d)
//! };
//!
//! let partial = curry(
//!     4,
//!     digits,
//!     vec![Arg::Placeholder, Arg::value(1), Arg::value(2), Arg::value(3)],
//! );
//! let curried = partial.into_ready().unwrap().unwrap().curried().unwrap();
//!
//! // The placeholder fills first: f(4, 1, 2, 3).
//! let result = curried.apply_value(4);
//! let applied = result.into_ready().unwrap().unwrap();
//! assert_eq!(applied.value(), Some(4123));
//! ```

mod error;
mod resolvers;

pub use error::CurryError;
pub use resolvers::{curry2, curry3, curry4};

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::deferred::Deferred;

/// One slot of an argument vector: a concrete value, a deferred value, or
/// a hole still waiting to be filled.
pub enum Arg<T> {
    /// The slot has not been supplied yet.
    Placeholder,
    /// The slot holds a value, immediate or deferred.
    Value(Deferred<T>),
}

impl<T: 'static> Arg<T> {
    /// An immediate value slot.
    pub fn value(value: T) -> Self {
        Arg::Value(Deferred::Ready(value))
    }

    /// A deferred value slot; resolved concurrently with any other deferred
    /// slots before the function is finally invoked.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Arg::Value(Deferred::pending(future))
    }

    /// Returns `true` if the slot is an unfilled hole.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Arg::Placeholder)
    }
}

impl<T: fmt::Debug> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Placeholder => f.write_str("Placeholder"),
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// The explicit two-state outcome of an application: finished, or still
/// partially applied.
pub enum Applied<T> {
    /// The function was invoked and produced this value.
    Value(T),
    /// The argument vector is still short of the arity (or contains holes);
    /// this function accepts the rest.
    Curried(Curried<T>),
}

impl<T> Applied<T> {
    /// The final value, if the application finished.
    pub fn value(self) -> Option<T> {
        match self {
            Applied::Value(value) => Some(value),
            Applied::Curried(_) => None,
        }
    }

    /// The partially-applied function, if the application did not finish.
    pub fn curried(self) -> Option<Curried<T>> {
        match self {
            Applied::Value(_) => None,
            Applied::Curried(curried) => Some(curried),
        }
    }

    /// Returns `true` if the application produced a final value.
    pub fn is_value(&self) -> bool {
        matches!(self, Applied::Value(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Applied<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applied::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Applied::Curried(curried) => f.debug_tuple("Curried").field(curried).finish(),
        }
    }
}

type RawFn<T> = dyn Fn(Vec<T>) -> Deferred<Applied<T>> + Send + Sync;

/// A partially-applied function: an arity, the underlying function, and
/// the argument vector accumulated so far.
///
/// Each application consumes the `Curried` and either produces a fresh one
/// (with a new vector - slots are never mutated in place) or invokes the
/// underlying function. The underlying function is shared behind an `Arc`,
/// so successive partial applications do not clone it.
pub struct Curried<T> {
    arity: usize,
    func: Arc<RawFn<T>>,
    args: Vec<Arg<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Curried<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried")
            .field("arity", &self.arity)
            .field("func", &"<function>")
            .field("args", &self.args)
            .finish()
    }
}

impl<T> Curried<T>
where
    T: Send + 'static,
{
    /// Curry a plain function over an argument vector.
    ///
    /// The function is invoked with exactly `arity` values once the vector
    /// fills.
    pub fn new<F>(arity: usize, func: F) -> Self
    where
        F: Fn(Vec<T>) -> T + Send + Sync + 'static,
    {
        Self::new_raw(arity, move |values| {
            Deferred::Ready(Applied::Value(func(values)))
        })
    }

    /// Curry a function whose result is itself deferred.
    pub fn new_deferred<F>(arity: usize, func: F) -> Self
    where
        F: Fn(Vec<T>) -> Deferred<T> + Send + Sync + 'static,
    {
        Self::new_raw(arity, move |values| func(values).map(Applied::Value))
    }

    /// Curry a function in the engine's full generality: the result may be
    /// deferred, and may itself be another curried function (which is what
    /// makes curry-past-arity chains work).
    pub fn new_raw<F>(arity: usize, func: F) -> Self
    where
        F: Fn(Vec<T>) -> Deferred<Applied<T>> + Send + Sync + 'static,
    {
        Curried {
            arity,
            func: Arc::new(func),
            args: Vec::new(),
        }
    }

    /// The number of values the underlying function is invoked with.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// How many more concrete values are needed before invocation: unfilled
    /// holes plus slots not yet supplied at all.
    pub fn missing(&self) -> usize {
        let holes = self.args.iter().filter(|arg| arg.is_placeholder()).count();
        holes + self.arity.saturating_sub(self.args.len())
    }

    /// Apply further arguments.
    ///
    /// New arguments fill existing placeholder slots left-to-right, in slot
    /// order; a newly supplied `Placeholder` occupies the slot it lands in
    /// and still counts as a hole. Arguments beyond the available holes are
    /// appended at the end of the vector.
    ///
    /// The outcome is `Ready` whenever it can be: a still-partial vector
    /// yields `Ready(Ok(Applied::Curried(..)))` immediately, and a complete
    /// vector of immediate values invokes the function synchronously. Only
    /// deferred slots (or a deferred function result) produce a pending
    /// outcome.
    pub fn apply(mut self, args: Vec<Arg<T>>) -> Deferred<Result<Applied<T>, CurryError>> {
        fill(&mut self.args, args);
        dispatch(self.arity, self.func, self.args)
    }

    /// Apply a single immediate value. Shorthand for the common call shape.
    pub fn apply_value(self, value: T) -> Deferred<Result<Applied<T>, CurryError>> {
        self.apply(vec![Arg::value(value)])
    }
}

/// Build a partially-applied function from an arity, a plain function over
/// the full argument vector, and an initial vector of slots.
///
/// This is the front door of the engine. If the vector already has `arity`
/// concrete slots and no holes, the function is invoked on the spot and the
/// direct result returned; otherwise the outcome is a [`Curried`] awaiting
/// the rest. See [`Curried::apply`] for the filling rules and
/// [`Curried::new_raw`] for functions whose results are themselves curried.
///
/// # Example
///
/// ```
/// use millrace::{curry, Arg};
///
/// let sum = |values: Vec<i32>| values.iter().sum::<i32>();
///
/// // A complete immediate vector invokes synchronously.
/// let outcome = curry(3, sum, vec![Arg::value(1), Arg::value(2), Arg::value(3)]);
/// let applied = outcome.into_ready().unwrap().unwrap();
/// assert_eq!(applied.value(), Some(6));
/// ```
pub fn curry<T, F>(
    arity: usize,
    func: F,
    args: Vec<Arg<T>>,
) -> Deferred<Result<Applied<T>, CurryError>>
where
    T: Send + 'static,
    F: Fn(Vec<T>) -> T + Send + Sync + 'static,
{
    Curried::new(arity, func).apply(args)
}

/// Fill placeholder slots left-to-right, appending any remainder.
fn fill<T: 'static>(slots: &mut Vec<Arg<T>>, args: Vec<Arg<T>>) {
    let mut incoming = args.into_iter();
    for slot in slots.iter_mut() {
        if slot.is_placeholder() {
            match incoming.next() {
                Some(arg) => *slot = arg,
                None => return,
            }
        }
    }
    slots.extend(incoming);
}

/// The engine's single decision point: partial, invoke, or resolve then
/// invoke.
fn dispatch<T>(
    arity: usize,
    func: Arc<RawFn<T>>,
    mut args: Vec<Arg<T>>,
) -> Deferred<Result<Applied<T>, CurryError>>
where
    T: Send + 'static,
{
    let holes = args.iter().filter(|arg| arg.is_placeholder()).count();
    if args.len() < arity || holes > 0 {
        return Deferred::Ready(Ok(Applied::Curried(Curried { arity, func, args })));
    }

    let surplus = if args.len() > arity {
        args.split_off(arity)
    } else {
        Vec::new()
    };

    let slots: Vec<Deferred<T>> = args
        .into_iter()
        .map(|arg| match arg {
            Arg::Value(value) => value,
            Arg::Placeholder => unreachable!("placeholder survived the hole count"),
        })
        .collect();

    match Deferred::join_all(slots) {
        Deferred::Ready(values) => invoke(func, values, surplus),
        Deferred::Pending(future) => Deferred::Pending(Box::pin(async move {
            invoke(func, future.await, surplus).settle().await
        })),
    }
}

/// Invoke with exactly `arity` values, then re-apply any surplus to the
/// result.
fn invoke<T>(
    func: Arc<RawFn<T>>,
    values: Vec<T>,
    surplus: Vec<Arg<T>>,
) -> Deferred<Result<Applied<T>, CurryError>>
where
    T: Send + 'static,
{
    let outcome = func(values);
    if surplus.is_empty() {
        return outcome.map(Ok);
    }
    outcome.and_then(move |applied| match applied {
        Applied::Curried(next) => next.apply(surplus),
        Applied::Value(_) => Deferred::Ready(Err(CurryError::NotCallable {
            surplus: surplus.len(),
        })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: Vec<i32>) -> i32 {
        values.iter().fold(0, |acc, d| acc * 10 + d)
    }

    fn ready_outcome(outcome: Deferred<Result<Applied<i32>, CurryError>>) -> Applied<i32> {
        outcome
            .into_ready()
            .expect("outcome should be immediate")
            .expect("outcome should not be a contract violation")
    }

    #[test]
    fn complete_immediate_vector_invokes_synchronously() {
        let outcome = curry(3, digits, vec![Arg::value(1), Arg::value(2), Arg::value(3)]);
        assert_eq!(ready_outcome(outcome).value(), Some(123));
    }

    #[test]
    fn short_vector_returns_curried() {
        let outcome = curry(3, digits, vec![Arg::value(1)]);
        let curried = ready_outcome(outcome).curried().expect("still partial");
        assert_eq!(curried.arity(), 3);
        assert_eq!(curried.missing(), 2);
    }

    #[test]
    fn placeholder_fills_left_to_right() {
        let outcome = curry(
            4,
            digits,
            vec![Arg::Placeholder, Arg::value(1), Arg::value(2), Arg::value(3)],
        );
        let curried = ready_outcome(outcome).curried().expect("one hole left");
        let outcome = curried.apply_value(4);
        assert_eq!(ready_outcome(outcome).value(), Some(4123));
    }

    #[test]
    fn two_holes_fill_in_slot_order() {
        let outcome = curry(
            3,
            digits,
            vec![Arg::Placeholder, Arg::value(2), Arg::Placeholder],
        );
        let curried = ready_outcome(outcome).curried().expect("two holes");
        let outcome = curried.apply(vec![Arg::value(1), Arg::value(3)]);
        assert_eq!(ready_outcome(outcome).value(), Some(123));
    }

    #[test]
    fn supplied_placeholder_stays_a_hole() {
        let outcome = curry(
            2,
            digits,
            vec![Arg::Placeholder, Arg::Placeholder],
        );
        let curried = ready_outcome(outcome).curried().expect("two holes");

        // The first hole is filled with another placeholder: still partial.
        let outcome = curried.apply(vec![Arg::Placeholder, Arg::value(2)]);
        let curried = ready_outcome(outcome).curried().expect("one hole left");
        assert_eq!(curried.missing(), 1);

        let outcome = curried.apply_value(1);
        assert_eq!(ready_outcome(outcome).value(), Some(12));
    }

    #[test]
    fn incremental_application_accumulates() {
        let outcome = curry(3, digits, Vec::new());
        let curried = ready_outcome(outcome).curried().expect("empty vector");
        let curried = ready_outcome(curried.apply_value(1))
            .curried()
            .expect("one of three");
        let curried = ready_outcome(curried.apply_value(2))
            .curried()
            .expect("two of three");
        assert_eq!(ready_outcome(curried.apply_value(3)).value(), Some(123));
    }

    #[tokio::test]
    async fn deferred_slots_resolve_before_invocation() {
        let outcome = curry(
            3,
            digits,
            vec![
                Arg::deferred(async { 1 }),
                Arg::value(2),
                Arg::deferred(async { 3 }),
            ],
        );
        assert!(outcome.is_pending());
        let applied = outcome.settle().await.expect("no violation");
        assert_eq!(applied.value(), Some(123));
    }

    #[tokio::test]
    async fn deferred_function_result_settles_through() {
        let curried = Curried::new_deferred(1, |values: Vec<i32>| {
            let value = values[0];
            Deferred::pending(async move { value * 2 })
        });
        let outcome = curried.apply_value(21);
        assert!(outcome.is_pending());
        assert_eq!(outcome.settle().await.unwrap().value(), Some(42));
    }

    #[test]
    fn curry_past_arity_reapplies_leftovers() {
        // A unary function returning another unary function: applying two
        // values in one call runs both stages.
        let add = Curried::new_raw(1, |outer: Vec<i32>| {
            let first = outer[0];
            Deferred::Ready(Applied::Curried(Curried::new(1, move |inner: Vec<i32>| {
                first + inner[0]
            })))
        });
        let outcome = add.apply(vec![Arg::value(40), Arg::value(2)]);
        assert_eq!(ready_outcome(outcome).value(), Some(42));
    }

    #[test]
    fn surplus_on_plain_value_is_not_callable() {
        let curried = Curried::new(1, |values: Vec<i32>| values[0]);
        let outcome = curried.apply(vec![Arg::value(1), Arg::value(2)]);
        let result = outcome.into_ready().expect("immediate");
        assert_eq!(result.unwrap_err(), CurryError::NotCallable { surplus: 1 });
    }

    #[test]
    fn vector_longer_than_arity_with_hole_stays_partial() {
        let outcome = curry(
            2,
            digits,
            vec![Arg::Placeholder, Arg::value(2), Arg::value(9)],
        );
        let curried = ready_outcome(outcome).curried().expect("hole present");
        assert_eq!(curried.missing(), 1);
    }
}
