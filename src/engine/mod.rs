mod matrix;
mod parallel;
mod result;
mod task;
mod tree;

pub use matrix::{multiply_row, Element, Matrix};
pub use parallel::Executor;
pub use result::{BatchStats, ResultSet};
pub use task::{unit_fn, FnUnit, TaskUnit};
pub use tree::TreeNode;
