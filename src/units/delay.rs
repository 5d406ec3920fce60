// src/units/delay.rs
use std::time::Duration;
use anyhow::Context;
use tracing::debug;

use crate::engine::{Executor, ResultSet, TaskUnit};
use crate::error::FanJoinResult;

/// Waits `value` time units, then yields `value`
pub struct DelayUnit {
    time_unit: Duration,
}

impl DelayUnit {
    pub fn new(time_unit: Duration) -> Self {
        Self { time_unit }
    }
}

#[async_trait::async_trait]
impl TaskUnit for DelayUnit {
    type Input = u32;
    type Output = u32;

    fn name(&self) -> &str {
        "delay"
    }

    async fn run(&self, value: u32) -> anyhow::Result<u32> {
        let wait = self.time_unit
            .checked_mul(value)
            .with_context(|| format!("delay of {} units overflows", value))?;

        tokio::time::sleep(wait).await;
        debug!("Delay of {:?} elapsed", wait);

        Ok(value)
    }
}

/// Delay-and-collect: every value comes back in its input slot, whatever order the waits end in
pub async fn collect_delays(executor: &Executor, values: Vec<u32>) -> FanJoinResult<ResultSet<u32>> {
    let unit = DelayUnit::new(executor.settings().time_unit());
    executor.execute_all(values, unit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;
    use crate::config::ExecutorSettings;

    fn executor() -> Executor {
        Executor::new(ExecutorSettings {
            time_unit_ms: 100,
            ..ExecutorSettings::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_keeps_input_order() {
        let executor = executor();
        let start = Instant::now();

        let collected = collect_delays(&executor, vec![3, 1, 2]).await.unwrap();

        assert_eq!(collected.into_values(), vec![3, 1, 2]);
        // Bounded by the slowest unit, not the sum of all of them.
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_order_differs_from_result_order() {
        let executor = executor();

        let collected = collect_delays(&executor, vec![5, 0, 4, 1]).await.unwrap();

        assert_eq!(&*collected, &[5, 0, 4, 1]);
        assert_eq!(collected.stats().completion_order, vec![1, 3, 2, 0]);
    }

    #[tokio::test]
    async fn test_overflowing_delay_fails() {
        let executor = Executor::new(ExecutorSettings {
            time_unit_ms: u64::MAX,
            ..ExecutorSettings::default()
        });

        assert!(collect_delays(&executor, vec![0, u32::MAX]).await.is_err());
    }
}
