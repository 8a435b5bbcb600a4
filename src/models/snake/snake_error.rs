//! Errors raised while building grids, moving snakes and planning routes.
use super::{grid::Cell, snake_body::SnakeAction};

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(thiserror::Error, Debug)]
pub enum SnakeError {
    /// Moving the head this way leaves the grid or bites the body.
    #[error("invalid move {action:?} from head {head:?}")]
    InvalidMove { head: Cell, action: SnakeAction },

    /// No sequence of legal moves brings the head to `target`.
    #[error("cell {target:?} is unreachable")]
    Unreachable { target: Cell },

    /// The path search expanded too many poses and gave up.
    #[error("search for {target:?} aborted after {expansions} expansions")]
    SearchAborted { target: Cell, expansions: usize },

    #[error("no usable initial snake: {0}")]
    NoInitialSnake(String),

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid contribution data: {0}")]
    InvalidContributions(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SnakeError {
    #[must_use]
    pub fn no_initial_snake(msg: impl Into<String>) -> Self {
        Self::NoInitialSnake(msg.into())
    }

    #[must_use]
    pub fn malformed_grid(msg: impl Into<String>) -> Self {
        Self::MalformedGrid(msg.into())
    }

    #[must_use]
    pub fn invalid_contributions(msg: impl Into<String>) -> Self {
        Self::InvalidContributions(msg.into())
    }

    /// Routing failures are recovered by the planner instead of surfacing.
    #[must_use]
    pub fn is_routing_failure(&self) -> bool {
        matches!(self, Self::Unreachable { .. } | Self::SearchAborted { .. })
    }
}
