//! Turns a planned route into an animated SVG.
//!
//! Cells are drawn as rounded dots. Each dot the snake eats switches to the
//! empty colour at the frame the head first lands on it, and each body
//! segment walks through its positions with CSS keyframes. One frame per
//! pose, looping forever.
use std::collections::HashMap;

use log::debug;

use crate::{
    models::snake::{
        grid::{Cell, Grid},
        route_planner::Route,
    },
    view::View,
};

use super::palette::Palette;

/// Default time spent on each pose.
pub const DEFAULT_STEP_DURATION_MS: u64 = 100;

/// Fraction of the dot size the tail segment shrinks to.
const TAIL_SCALE: f64 = 0.5;

#[allow(clippy::cast_precision_loss)]
fn percent(frame: usize, frames: usize) -> f64 {
    frame as f64 * 100.0 / frames as f64
}

fn px(cell: Cell, size_cell: u32) -> (i64, i64) {
    (
        i64::from(cell.x) * i64::from(size_cell),
        i64::from(cell.y) * i64::from(size_cell),
    )
}

/// First frame at which the head reaches each active cell.
fn eaten_frames(grid: &Grid, route: &Route) -> HashMap<Cell, usize> {
    let mut eaten = HashMap::new();
    for (frame, head) in route.heads().enumerate() {
        if grid.level(head) > 0 {
            eaten.entry(head).or_insert(frame);
        }
    }
    eaten
}

fn render_cells(svg: &mut String, grid: &Grid, route: &Route, palette: &Palette) {
    let frames = route.len();
    let eaten = eaten_frames(grid, route);
    let offset = (palette.size_cell - palette.size_dot) / 2;
    let mut style = String::new();
    let mut rects = String::new();
    for (i, cell) in grid.cells().enumerate() {
        let level = grid.level(cell);
        let (x, y) = px(cell, palette.size_cell);
        let mut class = format!("c l{level}");
        if let Some(frame) = eaten.get(&cell) {
            let at = percent(*frame, frames);
            style.push_str(&format!(
                "@keyframes c{i}{{0%,{at:.3}%{{fill:{color}}}{next:.3}%,100%{{fill:{empty}}}}}\
                 .c{i}{{animation-name:c{i}}}",
                color = palette.color_for_level(level),
                next = (at + 0.001).min(100.0),
                empty = palette.color_empty,
            ));
            class.push_str(&format!(" c{i}"));
        }
        rects.push_str(&format!(
            "<rect class=\"{class}\" x=\"{}\" y=\"{}\" rx=\"{r}\" ry=\"{r}\"/>",
            x + i64::from(offset),
            y + i64::from(offset),
            r = palette.size_dot_border_radius,
        ));
    }
    svg.push_str(&style);
    svg.push_str("</style>");
    svg.push_str(&rects);
}

/// Pushes one rect per body segment into `rects` and returns their keyframes.
fn render_snake(rects: &mut String, route: &Route, palette: &Palette) -> String {
    let frames = route.len();
    let length = route.last_pose().len();
    let mut style = String::new();
    for segment in 0..length {
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 - (1.0 - TAIL_SCALE) * segment as f64 / length.max(2).saturating_sub(1) as f64;
        let size = f64::from(palette.size_dot) * scale;
        let margin = (f64::from(palette.size_cell) - size) / 2.0;
        style.push_str(&format!("@keyframes s{segment}{{"));
        for (frame, pose) in route.poses().iter().enumerate() {
            // segment 0 is the head, the last cell of the pose
            let Some(cell) = pose.cells().rev().nth(segment) else {
                continue;
            };
            let (x, y) = px(cell, palette.size_cell);
            style.push_str(&format!(
                "{:.3}%{{transform:translate({x}px,{y}px)}}",
                percent(frame, frames)
            ));
        }
        if let Some(cell) = route.poses()[0].cells().rev().nth(segment) {
            let (x, y) = px(cell, palette.size_cell);
            style.push_str(&format!("100%{{transform:translate({x}px,{y}px)}}"));
        }
        style.push('}');
        style.push_str(&format!(".s{segment}{{animation-name:s{segment}}}"));
        rects.push_str(&format!(
            "<rect class=\"s s{segment}\" x=\"{margin:.1}\" y=\"{margin:.1}\" width=\"{size:.1}\" height=\"{size:.1}\" rx=\"{r}\" ry=\"{r}\"/>",
            r = palette.size_dot_border_radius + 2,
        ));
    }
    style
}

/// Renders `route` over `grid` as an animated SVG document.
#[must_use]
pub fn render_snake_svg(grid: &Grid, route: &Route, palette: &Palette, step_duration_ms: u64) -> String {
    let frames = route.len();
    let duration = u64::try_from(frames)
        .unwrap_or(u64::MAX)
        .saturating_mul(step_duration_ms.max(1));
    let cell = u64::from(palette.size_cell);
    let width = u64::try_from(grid.width()).unwrap_or(u64::MAX).saturating_mul(cell);
    let height = u64::try_from(grid.height()).unwrap_or(u64::MAX).saturating_mul(cell);

    let mut svg = format!(
        "<svg viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    svg.push_str(&format!(
        "<style>.c{{shape-rendering:geometricPrecision;fill:{empty};stroke-width:1px;stroke:{border};\
         width:{dot}px;height:{dot}px;animation:none {duration}ms linear infinite}}\
         .s{{shape-rendering:geometricPrecision;fill:{snake};animation:none {duration}ms linear infinite}}",
        empty = palette.color_empty,
        border = palette.color_dot_border,
        dot = palette.size_dot,
        snake = palette.color_snake,
    ));
    for level in 1..=4u8 {
        svg.push_str(&format!(
            ".c.l{level}{{fill:{}}}",
            palette.color_for_level(level)
        ));
    }

    let mut snake_rects = String::new();
    let snake_style = render_snake(&mut snake_rects, route, palette);
    svg.push_str(&snake_style);
    render_cells(&mut svg, grid, route, palette);
    svg.push_str(&snake_rects);
    svg.push_str("</svg>");

    debug!(
        "Rendered {} theme: {frames} frames, {duration}ms loop, {} bytes",
        palette.name,
        svg.len()
    );
    svg
}

/// One themed SVG rendering of a planned route.
#[derive(Clone, Debug)]
pub struct SnakeSvgView<'a> {
    grid: &'a Grid,
    route: &'a Route,
    palette: &'static Palette,
    step_duration_ms: u64,
}

impl<'a> SnakeSvgView<'a> {
    #[must_use]
    pub fn new(grid: &'a Grid, route: &'a Route, palette: &'static Palette, step_duration_ms: u64) -> Self {
        Self {
            grid,
            route,
            palette,
            step_duration_ms,
        }
    }
}

impl View for SnakeSvgView<'_> {
    fn file_name(&self) -> String {
        format!("snake-{}.svg", self.palette.name)
    }

    fn render(&self) -> String {
        render_snake_svg(self.grid, self.route, self.palette, self.step_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snake::{route_planner::compute_route, snake_body::Snake};

    fn sample() -> (Grid, Route) {
        let grid = Grid::from_rows(&[vec![1, 0, 2]]).unwrap();
        let initial = Snake::from_cells(vec![Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
        let route = compute_route(&grid, &initial).unwrap();
        (grid, route)
    }

    #[test]
    fn test_document_is_sized_from_the_grid() {
        let (grid, route) = sample();
        let svg = render_snake_svg(&grid, &route, &Palette::LIGHT, 100);
        assert!(svg.starts_with("<svg viewBox=\"0 0 48 16\""));
        assert!(svg.ends_with("</svg>"));
        // five poses of 100ms each
        assert!(svg.contains("500ms linear infinite"));
    }

    #[test]
    fn test_every_cell_and_segment_is_drawn() {
        let (grid, route) = sample();
        let svg = render_snake_svg(&grid, &route, &Palette::DARK, 100);
        assert_eq!(svg.matches("<rect class=\"c ").count(), 3);
        assert_eq!(svg.matches("<rect class=\"s ").count(), 2);
        assert!(svg.contains("fill:#00c647"));
    }

    #[test]
    fn test_eaten_cells_fade_when_the_head_arrives() {
        let (grid, route) = sample();
        let svg = render_snake_svg(&grid, &route, &Palette::LIGHT, 100);
        // (2,0) is eaten on frame 1 of 5, (0,0) on frame 3
        assert!(svg.contains("@keyframes c2{0%,20.000%{fill:#40c463}"));
        assert!(svg.contains("@keyframes c0{0%,60.000%{fill:#9be9a8}"));
        assert!(!svg.contains("@keyframes c1{"));
    }

    #[test]
    fn test_head_segment_follows_the_route() {
        let (grid, route) = sample();
        let svg = render_snake_svg(&grid, &route, &Palette::LIGHT, 100);
        assert!(svg.contains(
            "@keyframes s0{0.000%{transform:translate(16px,0px)}20.000%{transform:translate(32px,0px)}"
        ));
    }

    #[test]
    fn test_view_names_files_by_theme() {
        let (grid, route) = sample();
        let view = SnakeSvgView::new(&grid, &route, &Palette::DARK, 100);
        assert_eq!(view.file_name(), "snake-dark.svg");
        assert_eq!(
            view.render(),
            render_snake_svg(&grid, &route, &Palette::DARK, 100)
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let (grid, route) = sample();
        assert_eq!(
            render_snake_svg(&grid, &route, &Palette::DARK, 80),
            render_snake_svg(&grid, &route, &Palette::DARK, 80)
        );
    }
}
