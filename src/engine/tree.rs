// src/engine/tree.rs
use std::future::Future;
use std::pin::Pin;
use serde::{Serialize, Deserialize};
use tracing::{info, debug, warn};

use crate::error::{FanJoinResult, FanJoinError};
use super::parallel::Executor;

type Reduction<'a> = Pin<Box<dyn Future<Output = i64> + Send + 'a>>;

/// Binary tree node. Children are owned; a node without children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    #[serde(default)]
    pub left: Option<Box<TreeNode>>,
    #[serde(default)]
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        Self { value, left: None, right: None }
    }

    pub fn new(value: i64, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Walks with an explicit stack so measuring a degenerate tree cannot overflow.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [&node.left, &node.right].into_iter().flatten() {
                stack.push((&**child, depth + 1));
            }
        }

        deepest
    }
}

impl Executor {
    /// Sum every value in the tree, reducing the two subtrees of each node concurrently.
    ///
    /// Each level keeps its children's reductions alive at once, so the number of
    /// live computations grows with the tree. Trees deeper than `max_tree_depth`
    /// are rejected before anything is scheduled.
    pub async fn reduce_tree(&self, root: Option<&TreeNode>) -> FanJoinResult<i64> {
        let Some(root) = root else {
            debug!("Empty tree reduces to 0");
            return Ok(0);
        };

        let max_depth = self.settings().max_tree_depth;
        let depth = root.depth();
        if depth > max_depth {
            warn!("Tree depth {} exceeds maximum of {}", depth, max_depth);
            return Err(FanJoinError::TreeTooDeep { max_depth });
        }

        info!("Reducing tree of depth {}", depth);
        let total = self.reduce_node(Some(root)).await;
        info!("Tree reduced to {}", total);

        Ok(total)
    }

    fn reduce_node<'a>(&'a self, node: Option<&'a TreeNode>) -> Reduction<'a> {
        Box::pin(async move {
            let Some(node) = node else {
                return 0;
            };

            // Children are polled together within this task; the counter tracks them as
            // child computations, not spawned tasks.
            let children = node.left.is_some() as usize + node.right.is_some() as usize;
            self.record_launches(children);

            let (left, right) = tokio::join!(
                self.reduce_node(node.left.as_deref()),
                self.reduce_node(node.right.as_deref()),
            );

            node.value + left + right
        })
    }
}
