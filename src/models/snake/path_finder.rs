//! Breadth-first search from the snake's current pose to a target cell.
//!
//! The search runs over whole poses rather than bare coordinates: whether a
//! move is legal depends on where the body is, and the body moves with the
//! head. Every edge costs one move so the first pose popped with its head on
//! the target ends a shortest path.
use std::collections::{HashSet, VecDeque};

use log::{debug, warn};

use super::{
    grid::{Cell, Grid},
    snake_body::{Snake, SnakeAction},
    snake_error::{Result, SnakeError},
};

/// Default cap on poses expanded by a single search.
pub const DEFAULT_MAX_EXPANSIONS: usize = 250_000;

/// A pose reached by the search and how it was reached.
struct Node {
    pose: Snake,
    parent: Option<(usize, SnakeAction)>,
}

#[derive(Clone, Debug)]
pub struct PathFinder {
    max_expansions: usize,
    total_expansions: usize,
}

impl PathFinder {
    #[must_use]
    pub fn new(max_expansions: usize) -> Self {
        Self {
            max_expansions,
            total_expansions: 0,
        }
    }

    /// Poses expanded over every search run by this finder.
    #[must_use]
    pub fn total_expansions(&self) -> usize {
        self.total_expansions
    }

    /// Shortest list of moves bringing the head of `snake` onto `target`.
    /// An empty list means the head is already there. `snake` is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Unreachable`] when every reachable pose has been
    /// seen without reaching `target`, and [`SnakeError::SearchAborted`] when
    /// more than the configured number of poses had to be expanded.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        snake: &Snake,
        target: Cell,
    ) -> Result<Vec<SnakeAction>> {
        if !grid.contains(target) {
            return Err(SnakeError::Unreachable { target });
        }
        let mut nodes = vec![Node {
            pose: snake.clone(),
            parent: None,
        }];
        let mut visited: HashSet<Snake> = HashSet::from([snake.clone()]);
        let mut queue: VecDeque<usize> = VecDeque::from([0]);
        let mut expansions = 0;

        while let Some(index) = queue.pop_front() {
            if nodes[index].pose.get_head() == target {
                self.total_expansions += expansions;
                let path = Self::trace_back(&nodes, index);
                debug!(
                    "Found {} move path to {target:?} after {expansions} expansions",
                    path.len()
                );
                return Ok(path);
            }
            if expansions >= self.max_expansions {
                self.total_expansions += expansions;
                warn!("Gave up on {target:?} after {expansions} expansions");
                return Err(SnakeError::SearchAborted { target, expansions });
            }
            expansions += 1;

            let successors: Vec<(Snake, SnakeAction)> = SnakeAction::VARIANTS
                .iter()
                .filter_map(|action| {
                    nodes[index]
                        .pose
                        .apply_move(grid, *action)
                        .ok()
                        .map(|pose| (pose, *action))
                })
                .collect();
            for (pose, action) in successors {
                if visited.insert(pose.clone()) {
                    nodes.push(Node {
                        pose,
                        parent: Some((index, action)),
                    });
                    queue.push_back(nodes.len() - 1);
                }
            }
        }

        self.total_expansions += expansions;
        debug!("{target:?} unreachable, {expansions} poses explored");
        Err(SnakeError::Unreachable { target })
    }

    fn trace_back(nodes: &[Node], mut index: usize) -> Vec<SnakeAction> {
        let mut actions = Vec::new();
        while let Some((parent, action)) = nodes[index].parent {
            actions.push(action);
            index = parent;
        }
        actions.reverse();
        actions
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPANSIONS)
    }
}
