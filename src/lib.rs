pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod units;

// Re-export main types for easier access
pub use config::{Config, ExecutorSettings};
pub use engine::{
    Executor,
    Matrix,
    ResultSet,
    TaskUnit,
    TreeNode,
    unit_fn,
};
pub use error::{FanJoinError, FanJoinResult};
