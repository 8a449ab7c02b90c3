//! Fixed layout constants: tolerances, catalog sizes and room colors.
//!
//! Values that a deployment may want to tune (canvas size, grid step) live in
//! [`crate::config::PlannerConfig`]; the defaults there come from here.

pub mod canvas {
    /// Horizontal bound used by relative placement and drag commits.
    pub const WIDTH: i32 = 1300;
    /// Vertical bound used by relative placement and drag commits.
    pub const HEIGHT: i32 = 850;
    /// Drag snap step.
    pub const GRID_STEP: i32 = 2;
    /// Spacing of the background dot grid drawn by the canvas.
    pub const DOT_SPACING: i32 = 20;
}

pub mod tolerance {
    /// Max distance from a wall line for an opening to count as "on" it.
    pub const WALL: i32 = 5;
    /// Max perpendicular distance between two openings that conflict.
    pub const OPENING_OVERLAP: i32 = 5;
    /// Max gap between two room edges that still counts as adjacency.
    pub const ADJACENCY: i32 = 5;
    /// Max distance between a door and a wall line for the door to cut it.
    pub const DOOR_CUT: i32 = 10;
}

pub mod openings {
    /// Drawn length of every window.
    pub const WINDOW_LENGTH: i32 = 15;
    /// Span a window reserves on its wall when checking for conflicts.
    pub const WINDOW_CLEARANCE: i32 = 30;
    /// Span a door must fit inside a wall for that wall to be cut.
    pub const DOOR_CUT_SPAN: i32 = 15;
}

/// Item catalog dimensions as `(width, height)` at rotation 0.
pub mod catalog {
    pub const BED: (i32, i32) = (30, 40);
    pub const CHAIR: (i32, i32) = (20, 20);
    pub const TABLE: (i32, i32) = (44, 30);
    pub const SOFA: (i32, i32) = (52, 32);
    pub const DINING_SET: (i32, i32) = (46, 23);

    pub const COMMODE: (i32, i32) = (40, 50);
    pub const WASHBASIN: (i32, i32) = (50, 40);
    pub const SHOWER: (i32, i32) = (35, 40);
    pub const KITCHEN_SINK: (i32, i32) = (45, 40);
    pub const STOVE: (i32, i32) = (40, 35);
}

/// Fill colors per room category.
pub mod colors {
    use crate::model::Color;

    pub const BEDROOM: Color = Color::rgb(144, 238, 144);
    pub const BATHROOM: Color = Color::rgb(135, 206, 235);
    pub const KITCHEN: Color = Color::rgb(210, 4, 45);
    pub const LIVING_ROOM: Color = Color::rgb(255, 255, 0);
}
