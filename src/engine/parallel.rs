// src/engine/parallel.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, debug, error};

use crate::config::ExecutorSettings;
use crate::error::{FanJoinResult, FanJoinError};
use super::result::{BatchStats, ResultSet};
use super::task::TaskUnit;

/// Fan-out/join executor.
///
/// Every unit of a batch is spawned up front, in input order, and the join loop
/// writes each outcome into the slot reserved for its item index. Meant to be driven
/// by a current-thread runtime, so units interleave only at their own await points.
pub struct Executor {
    settings: ExecutorSettings,
    launched: Arc<AtomicUsize>,
}

impl Executor {
    /// Create a new executor
    pub fn new(settings: ExecutorSettings) -> Self {
        Self {
            settings,
            launched: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Total number of concurrent computations this executor has started so far.
    ///
    /// Flat batches count one spawned task per item. Tree reductions count each present
    /// child subtree; those run as joined futures inside their parent's task rather than
    /// as separately spawned tasks.
    pub fn tasks_launched(&self) -> usize {
        self.launched.load(Ordering::Relaxed)
    }

    pub(crate) fn record_launches(&self, count: usize) {
        self.launched.fetch_add(count, Ordering::Relaxed);
    }

    /// Run `unit` over every item concurrently and return the outputs in input order.
    ///
    /// The first unit failure aborts the batch: siblings still running are cancelled
    /// and no partial result is returned.
    pub async fn execute_all<U, I>(&self, items: I, unit: U) -> FanJoinResult<ResultSet<U::Output>>
    where
        U: TaskUnit,
        I: IntoIterator<Item = U::Input>,
    {
        let items: Vec<U::Input> = items.into_iter().collect();
        let mut stats = BatchStats::begin(unit.name());

        if items.is_empty() {
            info!("Batch {}: no {} units to execute", stats.batch_id, stats.unit);
            return Ok(ResultSet::new(Vec::new(), stats));
        }

        let total = items.len();
        info!("Batch {}: launching {} {} units", stats.batch_id, total, stats.unit);

        let start_time = Instant::now();
        let unit = Arc::new(unit);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let unit_clone = unit.clone();
            let tx_clone = tx.clone();

            tasks.spawn(async move {
                let outcome = unit_clone.run(item).await;
                // The receiver is gone only if the batch already failed.
                let _ = tx_clone.send((index, outcome));
            });

            self.record_launches(1);
            stats.launched += 1;
        }

        // Only the tasks hold senders now, so `recv` yields `None` once they have all exited.
        drop(tx);

        let mut slots: Vec<Option<U::Output>> = (0..total).map(|_| None).collect();
        stats.completion_order.reserve(total);

        while stats.completion_order.len() < total {
            let Some((index, outcome)) = rx.recv().await else {
                break;
            };

            match outcome {
                Ok(value) => {
                    debug!("Batch {}: item {} completed", stats.batch_id, index);
                    slots[index] = Some(value);
                    stats.completion_order.push(index);
                }
                Err(e) => {
                    error!("Batch {}: {} unit failed on item {}: {:#}", stats.batch_id, stats.unit, index, e);
                    tasks.abort_all();
                    return Err(FanJoinError::UnitFailure {
                        unit: stats.unit,
                        index,
                        message: format!("{:#}", e),
                    });
                }
            }
        }

        if stats.completion_order.len() < total {
            return Err(Self::lost_task_error(&mut tasks, &slots).await);
        }

        let values = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| FanJoinError::UnexpectedError("Result slot left unfilled".to_string()))?;

        stats.elapsed = start_time.elapsed();
        info!(
            "Batch {}: joined {} {} units in {:?}",
            stats.batch_id, total, stats.unit, stats.elapsed
        );

        Ok(ResultSet::new(values, stats))
    }

    /// A task exited without reporting an outcome, which only happens when it panicked.
    async fn lost_task_error<T>(tasks: &mut JoinSet<()>, slots: &[Option<T>]) -> FanJoinError {
        let index = slots.iter().position(Option::is_none).unwrap_or_default();

        let mut message = "task exited without reporting".to_string();
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    message = e.to_string();
                    break;
                }
            }
        }
        tasks.abort_all();

        error!("Task for item {} panicked: {}", index, message);
        FanJoinError::TaskPanicked { index, message }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ExecutorSettings::default())
    }
}
