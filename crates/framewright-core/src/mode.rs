//! Edit modes of the layout workspace.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Rectangle edges touched by a resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

/// Direction of a resize, one per handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeDirection {
    /// All directions in hit-test priority order (corners first).
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
        ResizeDirection::Top,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::Right,
    ];

    /// Edges moved by a resize in this direction.
    pub fn edges(self) -> Edges {
        match self {
            ResizeDirection::TopLeft => Edges::TOP | Edges::LEFT,
            ResizeDirection::TopRight => Edges::TOP | Edges::RIGHT,
            ResizeDirection::BottomLeft => Edges::BOTTOM | Edges::LEFT,
            ResizeDirection::BottomRight => Edges::BOTTOM | Edges::RIGHT,
            ResizeDirection::Top => Edges::TOP,
            ResizeDirection::Bottom => Edges::BOTTOM,
            ResizeDirection::Left => Edges::LEFT,
            ResizeDirection::Right => Edges::RIGHT,
        }
    }

    pub fn is_corner(self) -> bool {
        self.edges().bits().count_ones() == 2
    }
}

/// What the next pointer drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Select,
    Move,
    Resize(ResizeDirection),
    /// The next released pointer target becomes the parent of the selection.
    SelectNewParent,
}

impl EditMode {
    /// True while a move or resize drag is in progress.
    pub fn is_dragging(self) -> bool {
        matches!(self, EditMode::Move | EditMode::Resize(_))
    }

    pub fn resize_direction(self) -> Option<ResizeDirection> {
        match self {
            EditMode::Resize(direction) => Some(direction),
            _ => None,
        }
    }
}
