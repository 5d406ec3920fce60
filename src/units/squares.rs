// src/units/squares.rs
use std::time::Duration;
use anyhow::Context;
use tracing::info;

use crate::engine::{Executor, TaskUnit};
use crate::error::{FanJoinResult, FanJoinError};

/// Squares a number after a simulated latency
pub struct SquareUnit {
    latency: Duration,
}

impl SquareUnit {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait::async_trait]
impl TaskUnit for SquareUnit {
    type Input = i64;
    type Output = i64;

    fn name(&self) -> &str {
        "square"
    }

    async fn run(&self, n: i64) -> anyhow::Result<i64> {
        tokio::time::sleep(self.latency).await;
        n.checked_mul(n)
            .with_context(|| format!("square of {} overflows i64", n))
    }
}

pub async fn sum_of_squares(executor: &Executor, nums: Vec<i64>) -> FanJoinResult<i64> {
    let unit = SquareUnit::new(executor.settings().simulated_latency());
    let squares = executor.execute_all(nums, unit).await?;
    let total = squares
        .iter()
        .try_fold(0i64, |acc, &square| acc.checked_add(square))
        .ok_or_else(|| FanJoinError::InvalidInput("sum of squares overflows i64".to_string()))?;

    info!("Sum of {} squares is {}", squares.len(), total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sum_of_squares() {
        let executor = Executor::default();
        let start = Instant::now();

        let total = sum_of_squares(&executor, vec![1, 2, 3, 4, 5]).await.unwrap();

        assert_eq!(total, 55);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_empty_sum_is_zero() {
        let executor = Executor::default();

        assert_eq!(sum_of_squares(&executor, Vec::new()).await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_numbers() {
        let executor = Executor::default();

        assert_eq!(sum_of_squares(&executor, vec![-3, 4]).await.unwrap(), 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflowing_square_fails_unit() {
        let executor = Executor::default();

        let err = sum_of_squares(&executor, vec![2, 4_000_000_000]).await.unwrap_err();

        match err {
            FanJoinError::UnitFailure { unit, index, message } => {
                assert_eq!(unit, "square");
                assert_eq!(index, 1);
                assert!(message.contains("overflows"), "message was {}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflowing_total_is_reported() {
        let executor = Executor::default();

        // Each square fits in i64, their sum does not.
        let err = sum_of_squares(&executor, vec![3_037_000_499, 3_037_000_499]).await.unwrap_err();

        assert!(matches!(err, FanJoinError::InvalidInput(_)), "got {:?}", err);
    }
}
