//! Module containing the sliding snake and the moves it can make.
use std::collections::VecDeque;

use super::{
    grid::{Cell, Grid},
    snake_error::{Result, SnakeError},
};

/// Unit move of the snake's head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeAction {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeAction {
    /// Order in which successors are generated. Keeps equal-length paths stable.
    pub const VARIANTS: &'static [SnakeAction] = &[Self::Up, Self::Right, Self::Down, Self::Left];

    /// `(dx, dy)` of the move; `y` grows downwards.
    #[must_use]
    pub fn value(self) -> (i8, i8) {
        match self {
            SnakeAction::Up => (0, -1),
            SnakeAction::Down => (0, 1),
            SnakeAction::Left => (-1, 0),
            SnakeAction::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> SnakeAction {
        match self {
            SnakeAction::Up => SnakeAction::Down,
            SnakeAction::Down => SnakeAction::Up,
            SnakeAction::Left => SnakeAction::Right,
            SnakeAction::Right => SnakeAction::Left,
        }
    }

    /// Action moving `from` onto the adjacent cell `to`.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<SnakeAction> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|action| from.offset(action.value()) == to)
    }
}

/// One pose of the snake. Cells run from tail (front) to head (back).
///
/// Poses are plain values: equality and hashing go over the whole ordered
/// body, so they can key the path search's visited set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snake {
    squares_taken: VecDeque<Cell>,
}

impl Snake {
    /// Creates a snake from cells ordered tail first.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::NoInitialSnake`] if `cells` is empty, has a
    /// repeated cell or two consecutive cells that are not adjacent.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let squares_taken: VecDeque<Cell> = cells.into_iter().collect();
        if squares_taken.is_empty() {
            return Err(SnakeError::no_initial_snake("snake has no cells"));
        }
        for (i, pair) in squares_taken.iter().zip(squares_taken.iter().skip(1)).enumerate() {
            if !pair.0.is_adjacent(*pair.1) {
                return Err(SnakeError::no_initial_snake(format!(
                    "cells {i} and {} are not adjacent",
                    i + 1
                )));
            }
        }
        for (i, cell) in squares_taken.iter().enumerate() {
            if squares_taken.iter().skip(i + 1).any(|other| other == cell) {
                return Err(SnakeError::no_initial_snake(format!(
                    "cell {cell:?} is used twice"
                )));
            }
        }
        Ok(Self { squares_taken })
    }

    /// Horizontal snake on the top row, tail at `(0, 0)` and head at `(length - 1, 0)`.
    ///
    /// # Errors
    ///
    /// Fails like [`Snake::from_cells`] when `length` is zero or too large.
    pub fn horizontal(length: usize) -> Result<Self> {
        let length = i32::try_from(length)
            .map_err(|_| SnakeError::no_initial_snake(format!("length {length} is too large")))?;
        Self::from_cells((0..length).map(|x| Cell::new(x, 0)))
    }

    /// Checks the snake sits fully inside `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::NoInitialSnake`] naming the first stray cell.
    pub fn check_fits(&self, grid: &Grid) -> Result<()> {
        match self.squares_taken.iter().find(|c| !grid.contains(**c)) {
            Some(cell) => Err(SnakeError::no_initial_snake(format!(
                "cell {cell:?} is outside the {}x{} grid",
                grid.width(),
                grid.height()
            ))),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn get_head(&self) -> Cell {
        // never empty, checked on construction
        self.squares_taken[self.squares_taken.len() - 1]
    }

    #[must_use]
    pub fn get_tail(&self) -> Cell {
        self.squares_taken[0]
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Cell> + ExactSizeIterator + '_ {
        self.squares_taken.iter().copied()
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.squares_taken.contains(&cell)
    }

    /// Whether `action` keeps the head on the grid and off the body.
    /// The tail cell is about to be vacated so the head may enter it.
    #[must_use]
    pub fn is_valid_move(&self, grid: &Grid, action: SnakeAction) -> bool {
        let next = self.get_head().offset(action.value());
        grid.contains(next) && !self.squares_taken.iter().skip(1).any(|c| *c == next)
    }

    /// New pose with the head advanced and the tail dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidMove`] when [`Snake::is_valid_move`] is false.
    pub fn apply_move(&self, grid: &Grid, action: SnakeAction) -> Result<Snake> {
        if !self.is_valid_move(grid, action) {
            return Err(SnakeError::InvalidMove {
                head: self.get_head(),
                action,
            });
        }
        let mut next = self.clone();
        next.squares_taken.pop_front();
        next.squares_taken.push_back(self.get_head().offset(action.value()));
        Ok(next)
    }

    /// Whether `next` follows from this pose by exactly one slide.
    #[must_use]
    pub fn is_followed_by(&self, next: &Snake) -> bool {
        self.len() == next.len()
            && self.get_head().is_adjacent(next.get_head())
            && self.cells().skip(1).eq(next.cells().take(next.len() - 1))
    }
}
