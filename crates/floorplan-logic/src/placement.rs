//! Room placement engine.
//!
//! Algorithm for `place_room`:
//! 1. First room (no reference) goes to the canvas origin
//! 2. Otherwise sit flush against the reference on the requested side,
//!    aligned on the perpendicular axis
//! 3. If the right edge passes the canvas width, wrap to a new row at x = 0
//! 4. Reject anything off-canvas (`CapacityExceeded`) or intersecting an
//!    existing room
//!
//! Every command validates first and mutates last, so a rejection leaves the
//! plan untouched.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{OverlapKind, PlanError};
use crate::geometry::{snap_point, Point, Rect};
use crate::model::{Plan, Room, RoomCategory, RoomId};
use crate::selection::SelectionState;

/// Side of the reference room the new room is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// How the new room lines up with the reference along the shared wall.
/// For East/West placements Left means top edges match and Right means
/// bottom edges match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// An "add room" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub category: RoomCategory,
    pub width: i32,
    pub height: i32,
    pub direction: Direction,
    pub alignment: Alignment,
}

impl RoomRequest {
    /// East / Left, the editor's default placement.
    pub fn new(category: RoomCategory, width: i32, height: i32) -> Self {
        Self {
            category,
            width,
            height,
            direction: Direction::East,
            alignment: Alignment::Left,
        }
    }

    pub fn toward(mut self, direction: Direction, alignment: Alignment) -> Self {
        self.direction = direction;
        self.alignment = alignment;
        self
    }
}

/// Top-left corner of a `width`×`height` room placed against `reference`.
/// Center alignment truncates toward zero.
pub fn candidate_position(
    reference: &Rect,
    direction: Direction,
    alignment: Alignment,
    width: i32,
    height: i32,
) -> Point {
    let along_x = |a: Alignment| match a {
        Alignment::Left => reference.x,
        Alignment::Center => reference.x.saturating_add(reference.width.saturating_sub(width) / 2),
        Alignment::Right => reference.right().saturating_sub(width),
    };
    let along_y = |a: Alignment| match a {
        Alignment::Left => reference.y,
        Alignment::Center => reference.y.saturating_add(reference.height.saturating_sub(height) / 2),
        Alignment::Right => reference.bottom().saturating_sub(height),
    };
    match direction {
        Direction::North => Point::new(along_x(alignment), reference.y.saturating_sub(height)),
        Direction::South => Point::new(along_x(alignment), reference.bottom()),
        Direction::East => Point::new(reference.right(), along_y(alignment)),
        Direction::West => Point::new(reference.x.saturating_sub(width), along_y(alignment)),
    }
}

/// Start of the next row below a candidate that overflowed the canvas width:
/// the lowest bottom edge among rooms overlapping the candidate's vertical
/// span. With no such room the candidate keeps its y.
pub fn next_row_origin(plan: &Plan, candidate: &Rect) -> Point {
    let row_bottom = plan
        .rooms()
        .iter()
        .map(Room::rect)
        .filter(|r| r.top() < candidate.bottom() && r.bottom() > candidate.top())
        .map(|r| r.bottom())
        .max()
        .unwrap_or(candidate.y);
    Point::new(0, row_bottom.max(candidate.y))
}

/// Resolve the final rectangle for a request without touching the plan.
pub fn resolve_placement(
    plan: &Plan,
    reference: Option<&Room>,
    request: &RoomRequest,
    config: &PlannerConfig,
) -> Result<Rect, PlanError> {
    let (width, height) = (request.width, request.height);
    if width <= 0 || height <= 0 {
        return Err(PlanError::InvalidDimensions { width, height });
    }
    if width > config.canvas_width || height > config.canvas_height {
        return Err(PlanError::CapacityExceeded);
    }

    let rect = match reference {
        None => Rect::new(0, 0, width, height),
        Some(reference) => {
            let pos = candidate_position(
                &reference.rect(),
                request.direction,
                request.alignment,
                width,
                height,
            );
            let candidate = Rect::new(pos.x, pos.y, width, height);
            if candidate.right() > config.canvas_width {
                let wrapped = candidate.at(next_row_origin(plan, &candidate));
                if wrapped.bottom() > config.canvas_height {
                    return Err(PlanError::CapacityExceeded);
                }
                wrapped
            } else {
                candidate
            }
        }
    };

    if !rect.within(config.canvas_width, config.canvas_height) {
        return Err(PlanError::CapacityExceeded);
    }
    if plan.room_overlaps(&rect, None) {
        return Err(PlanError::Overlap(OverlapKind::Room));
    }
    Ok(rect)
}

/// Add a room relative to the current reference room. On success the new
/// room becomes both the selection and the next reference.
pub fn place_room(
    plan: &mut Plan,
    selection: &mut SelectionState,
    request: &RoomRequest,
    config: &PlannerConfig,
) -> Result<RoomId, PlanError> {
    let reference = selection.reference().and_then(|id| plan.room(id));
    let rect = resolve_placement(plan, reference, request, config).map_err(|e| {
        log::warn!("Rejected {} {}×{}: {}", request.category.name(), request.width, request.height, e);
        e
    })?;

    let id = plan.push_room(rect, request.category);
    selection.select(id);
    log::info!(
        "Placed {} #{} at ({}, {}) {}×{}",
        request.category.name(),
        id,
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
    Ok(id)
}

/// Check that room `id` could sit with its origin at `origin`.
/// Bounds are checked before overlap.
pub fn check_room_position(
    plan: &Plan,
    id: RoomId,
    origin: Point,
    config: &PlannerConfig,
) -> Result<Rect, PlanError> {
    let room = plan.room(id).ok_or(PlanError::RoomNotFound(id))?;
    let rect = room.rect().at(origin);
    if !rect.within(config.canvas_width, config.canvas_height) {
        return Err(PlanError::OutOfBounds);
    }
    if plan.room_overlaps(&rect, Some(id)) {
        return Err(PlanError::Overlap(OverlapKind::Room));
    }
    Ok(rect)
}

/// Snap `target` to the grid and move the room there. On rejection the room
/// stays exactly where it was.
pub fn move_room(
    plan: &mut Plan,
    id: RoomId,
    target: Point,
    config: &PlannerConfig,
) -> Result<Point, PlanError> {
    let snapped = snap_point(target, config.grid_step);
    if let Err(e) = check_room_position(plan, id, snapped, config) {
        log::warn!("Move of room #{} to ({}, {}) reverted: {}", id, snapped.x, snapped.y, e);
        return Err(e);
    }
    if let Some(room) = plan.room_mut(id) {
        room.set_origin(snapped);
    }
    log::info!("Moved room #{} to ({}, {})", id, snapped.x, snapped.y);
    Ok(snapped)
}

/// Swap the room's width and height in place. If the rotated room would
/// leave the canvas or hit another room, nothing changes.
pub fn rotate_room(plan: &mut Plan, id: RoomId, config: &PlannerConfig) -> Result<Rect, PlanError> {
    let room = plan.room(id).ok_or(PlanError::RoomNotFound(id))?;
    let rotated = room.rect().rotated();
    let verdict = if !rotated.within(config.canvas_width, config.canvas_height) {
        Err(PlanError::OutOfBounds)
    } else if plan.room_overlaps(&rotated, Some(id)) {
        Err(PlanError::Overlap(OverlapKind::Room))
    } else {
        Ok(rotated)
    };
    if let Err(e) = verdict {
        log::warn!("Cannot rotate room #{}: {}", id, e);
        return Err(e);
    }

    if let Some(room) = plan.room_mut(id) {
        room.set_rect(rotated);
    }
    log::info!("Rotated room #{} to {}×{}", id, rotated.width, rotated.height);
    Ok(rotated)
}

/// Delete a room and its openings, moving the selection to a remaining room
/// if the deleted one was selected.
pub fn remove_room(
    plan: &mut Plan,
    selection: &mut SelectionState,
    id: RoomId,
) -> Result<Room, PlanError> {
    let removed = plan.remove_room(id).ok_or(PlanError::RoomNotFound(id))?;
    selection.on_room_removed(plan, id);
    log::info!(
        "Removed {} #{} ({} doors, {} windows)",
        removed.category.name(),
        id,
        removed.doors.len(),
        removed.windows.len()
    );
    Ok(removed)
}
