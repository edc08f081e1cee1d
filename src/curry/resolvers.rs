//! Fixed-arity resolvers: one placeholder, one remaining argument.
//!
//! These are the low-level building blocks a dispatch layer reaches for
//! when the hole position is known at the call site: a binary, ternary or
//! quaternary function plus a slot vector with exactly one placeholder
//! yields a unary closure for the missing value. Vectors with zero or more
//! than one placeholder are rejected up front with
//! [`CurryError::PlaceholderCount`] rather than left to misbehave later.
//!
//! Deferred slots are allowed; they are resolved concurrently when the
//! closure is finally invoked, and an all-immediate vector invokes the
//! function synchronously.

use crate::curry::{Arg, CurryError};
use crate::deferred::Deferred;

/// Resolve a binary function over a slot vector with exactly one
/// placeholder.
///
/// # Example
///
/// ```
/// use millrace::{curry2, Arg};
///
/// let divide = curry2(|a: i32, b: i32| a / b, [Arg::Placeholder, Arg::value(2)]).unwrap();
/// assert_eq!(divide(10).into_ready(), Some(5));
/// ```
pub fn curry2<T, R, F>(
    func: F,
    args: [Arg<T>; 2],
) -> Result<impl FnOnce(T) -> Deferred<R>, CurryError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, T) -> R + Send + 'static,
{
    check_single_hole(&args)?;
    Ok(move |value: T| {
        Deferred::join_all(fill_hole(args, value)).map(move |values| {
            let mut values = values.into_iter();
            let a = next_value(&mut values);
            let b = next_value(&mut values);
            func(a, b)
        })
    })
}

/// Resolve a ternary function over a slot vector with exactly one
/// placeholder.
pub fn curry3<T, R, F>(
    func: F,
    args: [Arg<T>; 3],
) -> Result<impl FnOnce(T) -> Deferred<R>, CurryError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, T, T) -> R + Send + 'static,
{
    check_single_hole(&args)?;
    Ok(move |value: T| {
        Deferred::join_all(fill_hole(args, value)).map(move |values| {
            let mut values = values.into_iter();
            let a = next_value(&mut values);
            let b = next_value(&mut values);
            let c = next_value(&mut values);
            func(a, b, c)
        })
    })
}

/// Resolve a quaternary function over a slot vector with exactly one
/// placeholder.
pub fn curry4<T, R, F>(
    func: F,
    args: [Arg<T>; 4],
) -> Result<impl FnOnce(T) -> Deferred<R>, CurryError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(T, T, T, T) -> R + Send + 'static,
{
    check_single_hole(&args)?;
    Ok(move |value: T| {
        Deferred::join_all(fill_hole(args, value)).map(move |values| {
            let mut values = values.into_iter();
            let a = next_value(&mut values);
            let b = next_value(&mut values);
            let c = next_value(&mut values);
            let d = next_value(&mut values);
            func(a, b, c, d)
        })
    })
}

fn check_single_hole<T: 'static>(args: &[Arg<T>]) -> Result<(), CurryError> {
    let found = args.iter().filter(|arg| arg.is_placeholder()).count();
    if found == 1 {
        Ok(())
    } else {
        Err(CurryError::PlaceholderCount { found })
    }
}

/// Substitute the supplied value at the single hole, yielding resolvable
/// slots.
fn fill_hole<T, const N: usize>(args: [Arg<T>; N], value: T) -> Vec<Deferred<T>> {
    let mut fill = Some(value);
    args.into_iter()
        .map(|arg| match arg {
            Arg::Placeholder => {
                Deferred::Ready(fill.take().expect("exactly one placeholder after validation"))
            }
            Arg::Value(slot) => slot,
        })
        .collect()
}

fn next_value<T>(values: &mut std::vec::IntoIter<T>) -> T {
    values.next().expect("join preserves the slot count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_position_determines_argument_order() {
        let first = curry2(|a: i32, b: i32| a - b, [Arg::Placeholder, Arg::value(3)]).unwrap();
        assert_eq!(first(10).into_ready(), Some(7));

        let second = curry2(|a: i32, b: i32| a - b, [Arg::value(10), Arg::Placeholder]).unwrap();
        assert_eq!(second(3).into_ready(), Some(7));
    }

    #[test]
    fn zero_placeholders_is_rejected() {
        let result = curry2(|a: i32, b: i32| a + b, [Arg::value(1), Arg::value(2)]);
        assert!(matches!(
            result.map(|_| ()),
            Err(CurryError::PlaceholderCount { found: 0 })
        ));
    }

    #[test]
    fn two_placeholders_is_rejected() {
        let result = curry3(
            |a: i32, b: i32, c: i32| a + b + c,
            [Arg::Placeholder, Arg::Placeholder, Arg::value(1)],
        );
        assert!(matches!(
            result.map(|_| ()),
            Err(CurryError::PlaceholderCount { found: 2 })
        ));
    }

    #[test]
    fn immediate_slots_invoke_synchronously() {
        let join = curry3(
            |a: i32, b: i32, c: i32| a * 100 + b * 10 + c,
            [Arg::value(1), Arg::Placeholder, Arg::value(3)],
        )
        .unwrap();
        let result = join(2);
        assert!(result.is_ready());
        assert_eq!(result.into_ready(), Some(123));
    }

    #[tokio::test]
    async fn deferred_slots_resolve_before_invocation() {
        let join = curry4(
            |a: i32, b: i32, c: i32, d: i32| a * 1000 + b * 100 + c * 10 + d,
            [
                Arg::deferred(async { 1 }),
                Arg::value(2),
                Arg::Placeholder,
                Arg::deferred(async { 4 }),
            ],
        )
        .unwrap();
        let result = join(3);
        assert!(result.is_pending());
        assert_eq!(result.settle().await, 1234);
    }
}
