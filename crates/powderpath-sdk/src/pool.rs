//! Bounded-concurrency job runner.

use std::future::Future;

use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};

use crate::cancel::{CancelToken, Cancelled};

/// Run `job` over `items` with at most `workers` jobs in flight.
///
/// Output order matches input order. Workers check `cancel` before taking
/// each item; a cancelled run returns `Err(Cancelled)` and drops partial
/// results.
pub async fn run_bounded<T, R, F, Fut>(
    items: Vec<T>,
    workers: usize,
    cancel: &CancelToken,
    job: F,
) -> Result<Vec<R>, Cancelled>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let workers = workers.clamp(1, total);

    let (tx, rx) = mpsc::unbounded_channel();
    for entry in items.into_iter().enumerate() {
        if tx.send(entry).is_err() {
            break;
        }
    }
    drop(tx);

    let queue = Mutex::new(rx);
    let queue = &queue;
    let job = &job;

    let outputs = join_all((0..workers).map(|_| async move {
        let mut done = Vec::new();
        loop {
            cancel.check()?;
            let next = queue.lock().await.recv().await;
            let Some((idx, item)) = next else {
                break;
            };
            done.push((idx, job(item).await));
        }
        Ok::<_, Cancelled>(done)
    }))
    .await;

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    for output in outputs {
        for (idx, result) in output? {
            slots[idx] = Some(result);
        }
    }
    cancel.check()?;
    Ok(slots.into_iter().flatten().collect())
}
