//! Grid snapping.

use kurbo::{Point, Size};

/// Smallest allowed grid cell.
pub const MIN_GRID_SIZE: f64 = 2.0;

/// Clamp a grid size to at least [`MIN_GRID_SIZE`] on each axis.
pub fn clamp_grid(grid: Size) -> Size {
    Size::new(grid.width.max(MIN_GRID_SIZE), grid.height.max(MIN_GRID_SIZE))
}

/// Snap a point to the nearest grid intersection, with the grid anchored at `origin`.
pub fn snap_to_grid(point: Point, origin: Point, grid: Size) -> Point {
    let grid = clamp_grid(grid);
    let rel = point - origin;
    Point::new(
        origin.x + (rel.x / grid.width).round() * grid.width,
        origin.y + (rel.y / grid.height).round() * grid.height,
    )
}
