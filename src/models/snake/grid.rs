//! Module for the contribution grid the snake walks over.
use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use super::{
    contributions::ContributionDay,
    snake_error::{Result, SnakeError},
};

/// Highest intensity level a cell can carry.
pub const MAX_LEVEL: u8 = 4;
/// Rows in a contribution calendar, one per weekday.
pub const DAYS_PER_WEEK: usize = 7;
/// Most week columns a calendar spans. A year touches at most 54 weeks.
pub const MAX_WEEKS: usize = 54;

/// Coordinate on the grid. `x` is the week column and `y` the weekday row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, delta: (i8, i8)) -> Self {
        Self {
            x: self.x + i32::from(delta.0),
            y: self.y + i32::from(delta.1),
        }
    }

    #[must_use]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[must_use]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

/// Immutable `width x height` map of intensity levels. Level 0 is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    levels: Vec<u8>,
}

impl Grid {
    /// Builds a grid from row-major levels.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::MalformedGrid`] if a dimension is zero, the
    /// number of levels does not match, or a level is above [`MAX_LEVEL`].
    pub fn new(width: usize, height: usize, levels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SnakeError::malformed_grid(format!(
                "grid must not be empty, got {width}x{height}"
            )));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(SnakeError::malformed_grid("grid is too large"));
        }
        if levels.len() != width * height {
            return Err(SnakeError::malformed_grid(format!(
                "expected {} levels for a {width}x{height} grid but got {}",
                width * height,
                levels.len()
            )));
        }
        if let Some(bad) = levels.iter().find(|l| **l > MAX_LEVEL) {
            return Err(SnakeError::malformed_grid(format!(
                "level {bad} is above {MAX_LEVEL}"
            )));
        }
        Ok(Self {
            width,
            height,
            levels,
        })
    }

    /// Grid of the given size with no active cell.
    ///
    /// # Errors
    ///
    /// See [`Grid::new`].
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, vec![0; width * height])
    }

    /// Builds a grid from rows, `rows[y][x]`.
    ///
    /// # Errors
    ///
    /// Also fails with [`SnakeError::MalformedGrid`] when rows are ragged.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(SnakeError::malformed_grid("rows have different lengths"));
        }
        Self::new(width, rows.len(), rows.concat())
    }

    /// Builds a calendar grid out of per-day contribution records.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::MalformedGrid`] when there are no records, a
    /// record lies outside the calendar (week [`MAX_WEEKS`] or later, weekday
    /// 7 or later) or a record carries a level above [`MAX_LEVEL`].
    pub fn from_contribution_days(days: &[ContributionDay]) -> Result<Self> {
        let Some(last_week) = days.iter().map(|d| d.x).max() else {
            return Err(SnakeError::malformed_grid("no contribution days"));
        };
        let width = last_week
            .checked_add(1)
            .filter(|width| *width <= MAX_WEEKS)
            .ok_or_else(|| {
                SnakeError::malformed_grid(format!(
                    "week {last_week} is past the {MAX_WEEKS} week calendar"
                ))
            })?;
        let mut levels = vec![0; width * DAYS_PER_WEEK];
        for day in days {
            if day.y >= DAYS_PER_WEEK {
                return Err(SnakeError::malformed_grid(format!(
                    "weekday {} of {} is out of range",
                    day.y, day.date
                )));
            }
            levels[day.y * width + day.x] = day.level;
        }
        debug!("Built {width}x{DAYS_PER_WEEK} grid from {} days", days.len());
        Self::new(width, DAYS_PER_WEEK, levels)
    }

    /// Random grid where roughly `density` of the cells are active.
    ///
    /// # Errors
    ///
    /// See [`Grid::new`].
    pub fn random(width: usize, height: usize, density: f64, rng: &mut impl Rng) -> Result<Self> {
        let density = density.clamp(0.0, 1.0);
        let levels = (0..width * height)
            .map(|_| {
                if rng.gen_bool(density) {
                    rng.gen_range(1..=MAX_LEVEL)
                } else {
                    0
                }
            })
            .collect();
        Self::new(width, height, levels)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Level of `cell`, 0 when outside the grid.
    #[must_use]
    pub fn level(&self, cell: Cell) -> u8 {
        self.index(cell).map_or(0, |i| self.levels[i])
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        // dimensions were checked to fit in i32 on construction
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Cells with a level above zero.
    #[must_use]
    pub fn cells_by_level(&self) -> BTreeSet<Cell> {
        self.cells().filter(|c| self.level(*c) > 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_levels_are_row_major() {
        let grid = Grid::from_rows(&[vec![1, 0, 2], vec![0, 3, 0]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.level(Cell::new(2, 0)), 2);
        assert_eq!(grid.level(Cell::new(1, 1)), 3);
        assert_eq!(grid.level(Cell::new(-1, 0)), 0);
        assert_eq!(grid.level(Cell::new(3, 0)), 0);
    }

    #[test]
    fn test_active_cells_skip_empty_levels() {
        let grid = Grid::from_rows(&[vec![1, 0, 2], vec![0, 4, 0]]).unwrap();
        let active: Vec<Cell> = grid.cells_by_level().into_iter().collect();
        assert_eq!(
            active,
            vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 0)]
        );
    }

    #[test]
    fn test_bounds_are_half_open() {
        let grid = Grid::empty(53, 7).unwrap();
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(52, 6)));
        assert!(!grid.contains(Cell::new(53, 6)));
        assert!(!grid.contains(Cell::new(52, 7)));
        assert!(!grid.contains(Cell::new(0, -1)));
        assert_eq!(grid.cells().count(), 53 * 7);
    }

    #[test]
    fn test_malformed_grids_are_rejected() {
        assert!(matches!(
            Grid::empty(0, 7),
            Err(SnakeError::MalformedGrid(_))
        ));
        assert!(matches!(
            Grid::new(2, 2, vec![0, 0, 0]),
            Err(SnakeError::MalformedGrid(_))
        ));
        assert!(matches!(
            Grid::new(1, 1, vec![5]),
            Err(SnakeError::MalformedGrid(_))
        ));
        assert!(matches!(
            Grid::from_rows(&[vec![0, 0], vec![0]]),
            Err(SnakeError::MalformedGrid(_))
        ));
    }

    #[test]
    fn test_random_grids_are_reproducible() {
        let a = Grid::random(53, 7, 0.4, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Grid::random(53, 7, 0.4, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(!a.cells_by_level().is_empty());
        assert!(a.cells().all(|c| a.level(c) <= MAX_LEVEL));
    }

    #[test]
    fn test_calendar_grid_from_days() {
        let days = vec![
            ContributionDay::new(0, 0, "2024-01-07", 0, 0),
            ContributionDay::new(0, 3, "2024-01-10", 5, 2),
            ContributionDay::new(2, 6, "2024-01-27", 12, 4),
        ];
        let grid = Grid::from_contribution_days(&days).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), DAYS_PER_WEEK);
        assert_eq!(grid.level(Cell::new(0, 3)), 2);
        assert_eq!(grid.level(Cell::new(2, 6)), 4);
        assert_eq!(grid.cells_by_level().len(), 2);
    }

    #[test]
    fn test_calendar_grid_rejects_bad_days() {
        assert!(Grid::from_contribution_days(&[]).is_err());
        let days = vec![ContributionDay::new(0, 7, "2024-01-07", 1, 1)];
        assert!(matches!(
            Grid::from_contribution_days(&days),
            Err(SnakeError::MalformedGrid(_))
        ));
    }

    #[test]
    fn test_calendar_grid_rejects_weeks_past_a_year() {
        let _ = env_logger::builder().is_test(true).try_init();
        for week in [MAX_WEEKS, 1_000_000_000, 4_000_000_000_000_000_000, usize::MAX] {
            let days = vec![
                ContributionDay::new(0, 0, "2024-01-07", 1, 1),
                ContributionDay::new(week, 0, "2099-01-01", 1, 1),
            ];
            assert!(matches!(
                Grid::from_contribution_days(&days),
                Err(SnakeError::MalformedGrid(_))
            ));
        }
        let last = vec![ContributionDay::new(MAX_WEEKS - 1, 6, "2024-12-31", 3, 2)];
        let grid = Grid::from_contribution_days(&last).unwrap();
        assert_eq!(grid.width(), MAX_WEEKS);
        assert_eq!(grid.level(Cell::new(53, 6)), 2);
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, -2)), 5);
        assert!(Cell::new(1, 1).is_adjacent(Cell::new(1, 2)));
        assert!(!Cell::new(1, 1).is_adjacent(Cell::new(2, 2)));
    }
}
