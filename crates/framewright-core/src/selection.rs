//! Resize handle geometry around the selected widget.

use kurbo::{Point, Rect};

use crate::mode::ResizeDirection;

/// Default half-size of a handle hit zone.
pub const HANDLE_HALF_SIZE: f64 = 3.0;

/// A resize handle centered on a corner or edge midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub direction: ResizeDirection,
    pub center: Point,
    /// Hit zone.
    pub rect: Rect,
}

impl Handle {
    pub fn new(direction: ResizeDirection, center: Point, half_size: f64) -> Self {
        Self {
            direction,
            center,
            rect: Rect::new(
                center.x - half_size,
                center.y - half_size,
                center.x + half_size,
                center.y + half_size,
            ),
        }
    }

    /// Whether this handle lights up while `active` is hovered or dragged.
    ///
    /// A corner lights for itself and for its two adjacent edges, an edge only
    /// for itself.
    pub fn is_highlighted(&self, active: Option<ResizeDirection>) -> bool {
        active.is_some_and(|active| self.direction.edges().contains(active.edges()))
    }
}

/// The eight handles around a rectangle, in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditArea {
    pub bounds: Rect,
    pub handles: [Handle; 8],
}

impl EditArea {
    pub fn new(bounds: Rect, half_size: f64) -> Self {
        let handles = ResizeDirection::ALL
            .map(|direction| Handle::new(direction, anchor(bounds, direction), half_size));
        Self { bounds, handles }
    }

    /// First handle containing `point`. Corners win over edges.
    pub fn hit(&self, point: Point) -> Option<ResizeDirection> {
        self.handles
            .iter()
            .find(|h| h.rect.contains(point))
            .map(|h| h.direction)
    }
}

fn anchor(r: Rect, direction: ResizeDirection) -> Point {
    let center = r.center();
    match direction {
        ResizeDirection::TopLeft => Point::new(r.x0, r.y0),
        ResizeDirection::TopRight => Point::new(r.x1, r.y0),
        ResizeDirection::BottomLeft => Point::new(r.x0, r.y1),
        ResizeDirection::BottomRight => Point::new(r.x1, r.y1),
        ResizeDirection::Top => Point::new(center.x, r.y0),
        ResizeDirection::Bottom => Point::new(center.x, r.y1),
        ResizeDirection::Left => Point::new(r.x0, center.y),
        ResizeDirection::Right => Point::new(r.x1, center.y),
    }
}
