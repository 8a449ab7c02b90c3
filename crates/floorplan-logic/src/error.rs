//! Rejection reasons returned by every command of the layout engine.
//!
//! A `PlanError` never means the plan is broken: it is returned before any
//! mutation is committed, and its `Display` text is meant to be shown to the
//! user as-is.

use thiserror::Error;

use crate::model::{ItemId, RoomCategory, RoomId};

/// Which class of entity a placement collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    Room,
    Opening,
    Item,
}

impl std::fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapKind::Room => write!(f, "existing rooms"),
            OverlapKind::Opening => write!(f, "an existing door or window"),
            OverlapKind::Item => write!(f, "existing furniture or fixtures"),
        }
    }
}

/// Why a wall refused an opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRestriction {
    /// Bedrooms and bathrooms must open onto another room.
    DoorOnOuterWall(RoomCategory),
    /// Windows may only sit on exterior walls.
    WindowOnSharedWall,
}

impl std::fmt::Display for WallRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WallRestriction::DoorOnOuterWall(category) => {
                write!(f, "{} cannot have doors facing outside", category.name())
            }
            WallRestriction::WindowOnSharedWall => {
                write!(f, "windows cannot be placed between rooms")
            }
        }
    }
}

/// A rejected mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("cannot add room here - exceeds canvas dimensions")]
    CapacityExceeded,

    #[error("placement overlaps with {0}")]
    Overlap(OverlapKind),

    #[error("cannot place room outside the canvas")]
    OutOfBounds,

    #[error("doors and windows must be placed on the walls only")]
    InvalidWallPosition,

    #[error("{0}")]
    RestrictedWall(WallRestriction),

    #[error("furniture and fixtures must be placed inside rooms")]
    NotInRoom,

    #[error("no room selected")]
    NoSelection,

    #[error("room dimensions must be positive, got {width}×{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("room #{0} does not exist")]
    RoomNotFound(RoomId),

    #[error("item #{0} does not exist")]
    ItemNotFound(ItemId),

    #[error("no drag in progress")]
    NoDragInProgress,

    #[error("a drag is already in progress")]
    DragInProgress,
}
