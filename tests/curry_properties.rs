//! Property-based tests for the placeholder curry engine.

use millrace::{curry, Applied, Arg, CurryError, Deferred};
use proptest::prelude::*;

/// Positional encoding: sensitive to both the values and their order.
fn weighted(values: Vec<i64>) -> i64 {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| value * 10i64.pow(position as u32))
        .sum()
}

fn ready_applied(outcome: Deferred<Result<Applied<i64>, CurryError>>) -> Applied<i64> {
    outcome
        .into_ready()
        .expect("immediate arguments give an immediate outcome")
        .expect("well-formed vectors violate no contract")
}

proptest! {
    /// For f of arity N and a vector with one placeholder and N-1 concrete
    /// values, applying x yields f with x substituted at the hole.
    #[test]
    fn single_placeholder_substitutes_at_its_position(
        values in prop::collection::vec(0i64..100, 1..8),
        hole_seed in any::<prop::sample::Index>(),
    ) {
        let arity = values.len();
        let hole = hole_seed.index(arity);

        let args: Vec<Arg<i64>> = values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                if position == hole {
                    Arg::Placeholder
                } else {
                    Arg::value(*value)
                }
            })
            .collect();

        let curried = ready_applied(curry(arity, weighted, args))
            .curried()
            .expect("one hole leaves the call partial");
        let applied = ready_applied(curried.apply_value(values[hole]));

        prop_assert_eq!(applied.value(), Some(weighted(values)));
    }

    /// Splitting a concrete argument vector across two applications is the
    /// same call as supplying it whole.
    #[test]
    fn split_application_equals_single_application(
        values in prop::collection::vec(0i64..100, 2..8),
        split_seed in any::<prop::sample::Index>(),
    ) {
        let arity = values.len();
        let split = 1 + split_seed.index(arity - 1);

        let (head, tail) = values.split_at(split);
        let head: Vec<Arg<i64>> = head.iter().map(|v| Arg::value(*v)).collect();
        let tail: Vec<Arg<i64>> = tail.iter().map(|v| Arg::value(*v)).collect();

        let curried = ready_applied(curry(arity, weighted, head))
            .curried()
            .expect("a strict prefix leaves the call partial");
        let applied = ready_applied(curried.apply(tail));

        prop_assert_eq!(applied.value(), Some(weighted(values)));
    }

    /// A complete immediate vector always invokes synchronously, whatever
    /// its contents.
    #[test]
    fn complete_immediate_vector_is_never_wrapped(
        values in prop::collection::vec(0i64..100, 1..8),
    ) {
        let arity = values.len();
        let args: Vec<Arg<i64>> = values.iter().map(|v| Arg::value(*v)).collect();

        let outcome = curry(arity, weighted, args);
        prop_assert!(outcome.is_ready());
    }
}

#[tokio::test]
async fn deferred_arguments_resolve_concurrently_before_invocation() {
    use std::time::Duration;

    // Two slow slots: concurrent resolution finishes in one sleep, not two.
    let started = std::time::Instant::now();
    let outcome = curry(
        3,
        weighted,
        vec![
            Arg::deferred(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                1
            }),
            Arg::value(2),
            Arg::deferred(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                3
            }),
        ],
    );
    assert!(outcome.is_pending());
    let applied = outcome.settle().await.expect("no contract violation");
    assert_eq!(applied.value(), Some(321));
    assert!(
        started.elapsed() < Duration::from_millis(95),
        "deferred slots resolved sequentially"
    );
}
