// src/units/primes.rs
use tracing::info;

use crate::engine::{Executor, TaskUnit};
use crate::error::FanJoinResult;

/// Trial division up to the square root; anything below 2 is not prime
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }

    let mut divisor: i64 = 2;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }

    true
}

pub struct PrimalityUnit;

#[async_trait::async_trait]
impl TaskUnit for PrimalityUnit {
    type Input = i64;
    type Output = bool;

    fn name(&self) -> &str {
        "primality"
    }

    async fn run(&self, n: i64) -> anyhow::Result<bool> {
        Ok(is_prime(n))
    }
}

/// The primes among `nums`, in the order they were given
pub async fn filter_primes(executor: &Executor, nums: Vec<i64>) -> FanJoinResult<Vec<i64>> {
    let verdicts = executor.execute_all(nums.clone(), PrimalityUnit).await?;

    let primes: Vec<i64> = nums
        .into_iter()
        .zip(verdicts)
        .filter_map(|(n, prime)| prime.then_some(n))
        .collect();

    info!("Found {} primes", primes.len());
    Ok(primes)
}
