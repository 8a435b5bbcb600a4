//! Grid, snake and the planner walking the snake over every active cell.
pub mod contributions;
pub mod grid;
pub mod path_finder;
pub mod route_planner;
pub mod snake_body;
pub mod snake_error;
