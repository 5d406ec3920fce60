// src/engine/matrix.rs
use std::fmt;
use std::ops::{Add, Mul};
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::error::{FanJoinResult, FanJoinError};
use super::parallel::Executor;
use super::task::TaskUnit;

/// Numeric element usable in a row-parallel multiply
pub trait Element: Copy + Default + Add<Output = Self> + Mul<Output = Self> + Send + Sync + 'static {}

impl<T> Element for T where T: Copy + Default + Add<Output = T> + Mul<Output = T> + Send + Sync + 'static {}

/// Rectangular rows x columns matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<T>>", into = "Vec<Vec<T>>")]
pub struct Matrix<T: Clone> {
    rows: Vec<Vec<T>>,
    cols: usize,
}

impl<T: Clone> Matrix<T> {
    /// Build a matrix, rejecting rows of unequal length. A matrix without rows has no columns.
    pub fn new(rows: Vec<Vec<T>>) -> FanJoinResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);

        if let Some((row, found)) = rows.iter().map(Vec::len).enumerate().find(|&(_, len)| len != cols) {
            return Err(FanJoinError::RaggedMatrix { row, expected: cols, found });
        }

        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn as_rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.rows
    }
}

impl<T: Clone> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = FanJoinError;

    fn try_from(rows: Vec<Vec<T>>) -> FanJoinResult<Self> {
        Self::new(rows)
    }
}

impl<T: Clone> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.rows
    }
}

impl<T: Clone + fmt::Debug> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

/// Dot product of `row` against every column of `rhs`
pub fn multiply_row<T: Element>(row: &[T], rhs: &Matrix<T>) -> Vec<T> {
    (0..rhs.cols())
        .map(|j| {
            row.iter()
                .zip(rhs.as_rows())
                .fold(T::default(), |acc, (&a, rhs_row)| acc + a * rhs_row[j])
        })
        .collect()
}

/// Computes one output row; every row task shares the right-hand matrix read-only.
struct RowUnit<T: Element> {
    rhs: Arc<Matrix<T>>,
}

#[async_trait::async_trait]
impl<T: Element> TaskUnit for RowUnit<T> {
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn name(&self) -> &str {
        "matrix-row"
    }

    async fn run(&self, row: Vec<T>) -> anyhow::Result<Vec<T>> {
        // Let sibling rows get scheduled before this one monopolises the thread.
        tokio::task::yield_now().await;
        Ok(multiply_row(&row, &self.rhs))
    }
}

impl Executor {
    /// Multiply `a` by `b`, computing each output row in its own task.
    ///
    /// Shapes are checked before anything is scheduled.
    pub async fn multiply<T: Element>(&self, a: &Matrix<T>, b: &Matrix<T>) -> FanJoinResult<Matrix<T>> {
        if a.cols() != b.rows() {
            warn!(
                "Cannot multiply {}x{} by {}x{}",
                a.rows(), a.cols(), b.rows(), b.cols()
            );
            return Err(FanJoinError::IncompatibleShape {
                left_rows: a.rows(),
                left_cols: a.cols(),
                right_rows: b.rows(),
                right_cols: b.cols(),
            });
        }

        info!("Multiplying {}x{} by {}x{}", a.rows(), a.cols(), b.rows(), b.cols());

        let unit = RowUnit { rhs: Arc::new(b.clone()) };
        let rows = self.execute_all(a.as_rows().to_vec(), unit).await?;

        Matrix::new(rows.into_values())
    }
}
