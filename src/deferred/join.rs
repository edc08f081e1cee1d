//! Concurrent resolution of a vector of possibly-deferred values.

use super::{BoxFuture, Deferred};

impl<T> Deferred<T>
where
    T: Send + 'static,
{
    /// Resolve every slot of a vector, concurrently, preserving positions.
    ///
    /// Slots that are already `Ready` are taken as-is and never re-awaited;
    /// pending slots are driven together so that a slow slot does not
    /// serialize behind its neighbours. When every slot is `Ready` the
    /// result is `Ready` - no future is allocated for an all-immediate
    /// vector.
    ///
    /// # Example
    ///
    /// ```
    /// use millrace::Deferred;
    ///
    /// // All immediate: stays immediate.
    /// let values = Deferred::join_all(vec![Deferred::ready(1), Deferred::ready(2)]);
    /// assert_eq!(values.into_ready(), Some(vec![1, 2]));
    ///
    /// // Mixed: settles in source order regardless of completion order.
    /// # tokio_test::block_on(async {
    /// let values = Deferred::join_all(vec![
    ///     Deferred::pending(async { 1 }),
    ///     Deferred::ready(2),
    ///     Deferred::pending(async { 3 }),
    /// ]);
    /// assert_eq!(values.settle().await, vec![1, 2, 3]);
    /// # });
    /// ```
    pub fn join_all(items: Vec<Deferred<T>>) -> Deferred<Vec<T>> {
        let mut slots: Vec<Option<T>> = Vec::with_capacity(items.len());
        let mut pending: Vec<(usize, BoxFuture<'static, T>)> = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            match item {
                Deferred::Ready(value) => slots.push(Some(value)),
                Deferred::Pending(future) => {
                    slots.push(None);
                    pending.push((index, future));
                }
            }
        }

        if pending.is_empty() {
            return Deferred::Ready(drain_slots(slots));
        }

        Deferred::Pending(Box::pin(async move {
            let tagged = pending
                .into_iter()
                .map(|(index, future)| async move { (index, future.await) });
            for (index, value) in futures::future::join_all(tagged).await {
                slots[index] = Some(value);
            }
            drain_slots(slots)
        }))
    }
}

fn drain_slots<T>(slots: Vec<Option<T>>) -> Vec<T> {
    slots
        .into_iter()
        .map(|slot| slot.expect("every slot is written before the join settles"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ready_stays_ready() {
        let values = Deferred::join_all(vec![Deferred::ready(1), Deferred::ready(2)]);
        assert_eq!(values.into_ready(), Some(vec![1, 2]));
    }

    #[test]
    fn empty_vector_is_ready() {
        let values = Deferred::<i32>::join_all(Vec::new());
        assert_eq!(values.into_ready(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn mixed_slots_settle_in_position_order() {
        let values = Deferred::join_all(vec![
            Deferred::pending(async { 10 }),
            Deferred::ready(20),
            Deferred::pending(async { 30 }),
        ]);
        assert!(values.is_pending());
        assert_eq!(values.settle().await, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn slow_slot_does_not_reorder_results() {
        let values = Deferred::join_all(vec![
            Deferred::pending(async {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                1
            }),
            Deferred::pending(async { 2 }),
        ]);
        assert_eq!(values.settle().await, vec![1, 2]);
    }
}
