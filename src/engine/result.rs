// src/engine/result.rs
use std::ops::Deref;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Bookkeeping for one flat batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub batch_id: Uuid,
    pub unit: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub launched: usize,
    /// Item indices in the order their units finished
    pub completion_order: Vec<usize>,
}

impl BatchStats {
    pub(crate) fn begin(unit: &str) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            unit: unit.to_string(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            launched: 0,
            completion_order: Vec::new(),
        }
    }
}

/// Outputs of a joined batch, indexed identically to the input sequence
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ResultSet<T> {
    values: Vec<T>,
    #[serde(skip)]
    stats: BatchStats,
}

impl<T> ResultSet<T> {
    pub(crate) fn new(values: Vec<T>, stats: BatchStats) -> Self {
        Self { values, stats }
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T> Deref for ResultSet<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
