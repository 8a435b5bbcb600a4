//! Module for planning the snake's route over every active cell.
//!
//! The planner greedily picks the closest remaining active cell, asks the
//! [`PathFinder`] for a shortest path to it and slides the snake along that
//! path. Cells that cannot be reached from the current pose are skipped for
//! the rest of the run, so every iteration shrinks the remaining set and the
//! run always terminates. Once nothing is left the snake heads back to where
//! its head started so the animation can loop.
use std::{cmp::Reverse, collections::BTreeSet};

use log::{debug, info};

use super::{
    grid::{Cell, Grid},
    path_finder::{PathFinder, DEFAULT_MAX_EXPANSIONS},
    snake_body::{Snake, SnakeAction},
    snake_error::{Result, SnakeError},
};

/// Knobs for a planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Cap on poses expanded by each individual path search.
    pub max_expansions: usize,
    /// Route the head back to its starting cell once every cell is handled.
    pub close_loop: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            close_loop: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Unreachable,
    SearchAborted,
}

/// An active cell the snake gave up on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedCell {
    pub cell: Cell,
    /// Index of the pose the search started from.
    pub pose_index: usize,
    pub reason: SkipReason,
}

/// Poses of one run, initial pose first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    poses: Vec<Snake>,
    visited: Vec<Cell>,
    skipped: Vec<SkippedCell>,
    closed_loop: bool,
    expansions: usize,
}

impl Route {
    fn new(initial: Snake) -> Self {
        Self {
            poses: vec![initial],
            visited: Vec::new(),
            skipped: Vec::new(),
            closed_loop: false,
            expansions: 0,
        }
    }

    #[must_use]
    pub fn poses(&self) -> &[Snake] {
        &self.poses
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Head cell of every pose.
    pub fn heads(&self) -> impl Iterator<Item = Cell> + '_ {
        self.poses.iter().map(Snake::get_head)
    }

    #[must_use]
    pub fn last_pose(&self) -> &Snake {
        // starts with the initial pose and only grows
        &self.poses[self.poses.len() - 1]
    }

    /// Active cells in the order the head ate them.
    #[must_use]
    pub fn visited(&self) -> &[Cell] {
        &self.visited
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedCell] {
        &self.skipped
    }

    /// Whether the head made it back to where it started.
    #[must_use]
    pub fn closed_loop(&self) -> bool {
        self.closed_loop
    }

    /// Poses expanded by every path search of the run.
    #[must_use]
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

/// Where the planner is in its run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlannerState {
    SelectingTarget,
    RoutingToTarget(Cell),
    ApplyingMoves {
        target: Cell,
        actions: Vec<SnakeAction>,
    },
    ClosingLoop,
    Done,
}

/// Mutable state of one planning run.
#[derive(Debug)]
pub struct RoutePlanner<'a> {
    grid: &'a Grid,
    config: PlannerConfig,
    snake: Snake,
    start_head: Cell,
    remaining: BTreeSet<Cell>,
    path_finder: PathFinder,
    route: Route,
    state: PlannerState,
}

impl<'a> RoutePlanner<'a> {
    /// Starts a run on `grid` from `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::NoInitialSnake`] if `initial` does not fit `grid`.
    pub fn new(grid: &'a Grid, initial: &Snake, config: PlannerConfig) -> Result<Self> {
        initial.check_fits(grid)?;
        let mut planner = Self {
            grid,
            path_finder: PathFinder::new(config.max_expansions),
            config,
            snake: initial.clone(),
            start_head: initial.get_head(),
            remaining: grid.cells_by_level(),
            route: Route::new(initial.clone()),
            state: PlannerState::SelectingTarget,
        };
        planner.eat(initial.get_head());
        debug!(
            "Planning over {} active cells with a snake of length {}",
            planner.remaining.len(),
            initial.len()
        );
        Ok(planner)
    }

    #[must_use]
    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    /// Active cells neither eaten nor skipped yet.
    #[must_use]
    pub fn remaining(&self) -> &BTreeSet<Cell> {
        &self.remaining
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Closest remaining cell to the head. Ties go to the higher level,
    /// then the lower row, then the lower column.
    #[must_use]
    pub fn select_target(&self) -> Option<Cell> {
        let head = self.snake.get_head();
        self.remaining
            .iter()
            .copied()
            .min_by_key(|cell| {
                (
                    head.manhattan(*cell),
                    Reverse(self.grid.level(*cell)),
                    cell.y,
                    cell.x,
                )
            })
    }

    /// Performs one state transition. Returns `false` once the run is done.
    ///
    /// # Errors
    ///
    /// Only logic errors escape: an [`SnakeError::InvalidMove`] while
    /// applying a path the search produced.
    pub fn step(&mut self) -> Result<bool> {
        let state = std::mem::replace(&mut self.state, PlannerState::Done);
        self.state = match state {
            PlannerState::SelectingTarget => match self.select_target() {
                Some(target) => PlannerState::RoutingToTarget(target),
                None => PlannerState::ClosingLoop,
            },
            PlannerState::RoutingToTarget(target) => {
                match self.path_finder.find_path(self.grid, &self.snake, target) {
                    Ok(actions) => PlannerState::ApplyingMoves { target, actions },
                    Err(e) if e.is_routing_failure() => {
                        self.skip(target, &e);
                        PlannerState::SelectingTarget
                    }
                    Err(e) => return Err(e),
                }
            }
            PlannerState::ApplyingMoves { target, actions } => {
                for action in actions {
                    self.advance(action)?;
                }
                self.remaining.remove(&target);
                PlannerState::SelectingTarget
            }
            PlannerState::ClosingLoop => {
                if self.config.close_loop {
                    self.close_loop()?;
                }
                PlannerState::Done
            }
            PlannerState::Done => return Ok(false),
        };
        Ok(true)
    }

    /// Runs to completion and hands over the route.
    ///
    /// # Errors
    ///
    /// See [`RoutePlanner::step`].
    pub fn run(mut self) -> Result<Route> {
        while self.step()? {}
        self.route.expansions = self.path_finder.total_expansions();
        info!(
            "Route planned: {} poses, {} cells eaten, {} skipped, {} expansions, loop closed: {}",
            self.route.len(),
            self.route.visited.len(),
            self.route.skipped.len(),
            self.route.expansions,
            self.route.closed_loop
        );
        Ok(self.route)
    }

    fn advance(&mut self, action: SnakeAction) -> Result<()> {
        self.snake = self.snake.apply_move(self.grid, action)?;
        self.route.poses.push(self.snake.clone());
        self.eat(self.snake.get_head());
        Ok(())
    }

    fn eat(&mut self, cell: Cell) {
        if self.remaining.remove(&cell) {
            self.route.visited.push(cell);
        }
    }

    fn skip(&mut self, target: Cell, error: &SnakeError) {
        let reason = match error {
            SnakeError::SearchAborted { .. } => SkipReason::SearchAborted,
            _ => SkipReason::Unreachable,
        };
        debug!("Skipping {target:?}: {error}");
        self.remaining.remove(&target);
        self.route.skipped.push(SkippedCell {
            cell: target,
            pose_index: self.route.poses.len() - 1,
            reason,
        });
    }

    fn close_loop(&mut self) -> Result<()> {
        match self
            .path_finder
            .find_path(self.grid, &self.snake, self.start_head)
        {
            Ok(actions) => {
                debug!("Closing the loop in {} moves", actions.len());
                for action in actions {
                    self.advance(action)?;
                }
                self.route.closed_loop = true;
                Ok(())
            }
            Err(e) if e.is_routing_failure() => {
                debug!("Route stays open: {e}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Plans a route over every active cell of `grid` with default settings.
///
/// # Errors
///
/// Returns [`SnakeError::NoInitialSnake`] when `initial` does not fit `grid`.
pub fn compute_route(grid: &Grid, initial: &Snake) -> Result<Route> {
    compute_route_with(grid, initial, PlannerConfig::default())
}

/// Same as [`compute_route`] with explicit settings.
///
/// # Errors
///
/// Returns [`SnakeError::NoInitialSnake`] when `initial` does not fit `grid`.
pub fn compute_route_with(grid: &Grid, initial: &Snake, config: PlannerConfig) -> Result<Route> {
    RoutePlanner::new(grid, initial, config)?.run()
}
