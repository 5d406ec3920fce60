// src/units/partition.rs
use std::time::Duration;
use anyhow::Context;
use tracing::info;

use crate::engine::{Executor, TaskUnit};
use crate::error::{FanJoinResult, FanJoinError};

/// Minimum of a slice, after a simulated latency
pub struct MinUnit {
    latency: Duration,
}

impl MinUnit {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait::async_trait]
impl TaskUnit for MinUnit {
    type Input = Vec<i64>;
    type Output = i64;

    fn name(&self) -> &str {
        "partition-min"
    }

    async fn run(&self, partition: Vec<i64>) -> anyhow::Result<i64> {
        tokio::time::sleep(self.latency).await;

        partition
            .iter()
            .copied()
            .min()
            .context("cannot take the minimum of an empty partition")
    }
}

/// Split `nums` in half at `len / 2`, take each half's minimum concurrently, and
/// return the smaller. Both halves must be non-empty, so at least two numbers are needed.
pub async fn min_of_partitions(executor: &Executor, nums: &[i64]) -> FanJoinResult<i64> {
    let (low, high) = nums.split_at(nums.len() / 2);
    let unit = MinUnit::new(executor.settings().simulated_latency());

    let minimums = executor.execute_all([low.to_vec(), high.to_vec()], unit).await?;

    let min = minimums
        .iter()
        .copied()
        .min()
        .ok_or_else(|| FanJoinError::UnexpectedError("no partition minimums".to_string()))?;

    info!("Minimum over {} numbers is {}", nums.len(), min);
    Ok(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_min_of_partitions() {
        let executor = Executor::default();
        let start = Instant::now();

        let min = min_of_partitions(&executor, &[7, 3, 9, 4, 2, 8, 5, 1]).await.unwrap();

        assert_eq!(min, 1);
        assert_eq!(executor.tasks_launched(), 2);
        // Both halves wait out their latency side by side.
        assert!(start.elapsed() < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_minimum_in_first_half() {
        let executor = Executor::default();

        assert_eq!(min_of_partitions(&executor, &[-4, 10, 3]).await.unwrap(), -4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_number_leaves_empty_half() {
        let executor = Executor::default();

        let err = min_of_partitions(&executor, &[42]).await.unwrap_err();

        assert!(matches!(err, FanJoinError::UnitFailure { index: 0, .. }), "got {:?}", err);
    }
}
