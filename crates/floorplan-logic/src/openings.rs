//! Door and window placement with wall restrictions.
//!
//! An opening is accepted when:
//! 1. the point lies within tolerance of one of the room's walls (the nearest
//!    one decides which wall it belongs to)
//! 2. the category rules for that wall allow it
//! 3. it does not collide with any door or window already on the room

use crate::adjacency::{has_adjacent_room, is_outer_wall, nearest_wall};
use crate::config::PlannerConfig;
use crate::error::{OverlapKind, PlanError, WallRestriction};
use crate::geometry::{distance, Orientation, Point, Side};
use crate::model::{Opening, Plan, Room, RoomId};

/// The wall a door at `p` would belong to, if doors are allowed there.
/// Bedrooms and bathrooms refuse doors on outer walls.
pub fn is_valid_door_position(
    plan: &Plan,
    room: &Room,
    p: Point,
    config: &PlannerConfig,
) -> Result<Side, PlanError> {
    let side = nearest_wall(&room.rect(), p, config.wall_tolerance)
        .ok_or(PlanError::InvalidWallPosition)?;
    if room.category.restricts_outer_doors()
        && is_outer_wall(plan, room, side, config.adjacency_tolerance)
    {
        return Err(PlanError::RestrictedWall(WallRestriction::DoorOnOuterWall(
            room.category,
        )));
    }
    Ok(side)
}

/// The wall a window at `p` would belong to. Windows only go on outer walls.
pub fn is_valid_window_position(
    plan: &Plan,
    room: &Room,
    p: Point,
    config: &PlannerConfig,
) -> Result<Side, PlanError> {
    let side = nearest_wall(&room.rect(), p, config.wall_tolerance)
        .ok_or(PlanError::InvalidWallPosition)?;
    if has_adjacent_room(plan, room, side, config.adjacency_tolerance) {
        return Err(PlanError::RestrictedWall(WallRestriction::WindowOnSharedWall));
    }
    Ok(side)
}

/// Two openings at `existing` and `new` collide when they sit on the same
/// wall line (within `tolerance`) and either start falls inside the other's
/// `length`-long span.
pub fn is_overlap(
    existing: Point,
    new: Point,
    length: i32,
    orientation: Orientation,
    tolerance: i32,
) -> bool {
    let (line_a, line_b, s1, s2) = match orientation {
        Orientation::Vertical => (existing.x, new.x, existing.y, new.y),
        Orientation::Horizontal => (existing.y, new.y, existing.x, new.x),
    };
    distance(line_a, line_b) <= tolerance
        && ((s2..=s2.saturating_add(length)).contains(&s1)
            || (s1..=s1.saturating_add(length)).contains(&s2))
}

/// True if an opening at `p` reserving `clearance` along `orientation` would
/// collide with anything already on `room`. The larger of the two
/// clearances is used, so the result does not depend on placement order.
pub fn conflicts_with_existing(
    room: &Room,
    p: Point,
    orientation: Orientation,
    clearance: i32,
    config: &PlannerConfig,
) -> bool {
    room.openings().any(|o| {
        let at = o.position(room.origin());
        let length = clearance.max(o.clearance(config));
        is_overlap(at, p, length, orientation, config.opening_tolerance)
    })
}

/// Add a door to room `id` at absolute point `p`. The door runs along the
/// wall it lands on, whatever `orientation` was requested, and its length is
/// the length of that wall.
pub fn add_door(
    plan: &mut Plan,
    id: RoomId,
    p: Point,
    orientation: Orientation,
    config: &PlannerConfig,
) -> Result<Opening, PlanError> {
    let door = {
        let room = plan.room(id).ok_or(PlanError::RoomNotFound(id))?;
        let verdict = is_valid_door_position(plan, room, p, config).and_then(|side| {
            let along = side.orientation();
            let door = Opening::door(p.offset_from(room.origin()), along, room.wall_length(along));
            if conflicts_with_existing(room, p, along, door.clearance(config), config) {
                Err(PlanError::Overlap(OverlapKind::Opening))
            } else {
                Ok((side, door))
            }
        });
        match verdict {
            Ok((side, door)) => {
                if door.orientation != orientation {
                    log::debug!("Door at ({}, {}) follows the {} wall", p.x, p.y, side.name());
                }
                log::info!(
                    "Door added to {} #{} on the {} wall at ({}, {})",
                    room.category.name(),
                    id,
                    side.name(),
                    p.x,
                    p.y
                );
                door
            }
            Err(e) => {
                log::warn!("Door at ({}, {}) rejected for room #{}: {}", p.x, p.y, id, e);
                return Err(e);
            }
        }
    };

    if let Some(room) = plan.room_mut(id) {
        room.doors.push(door);
    }
    Ok(door)
}

/// Add a window to room `id` at absolute point `p`, running along the wall
/// it lands on.
pub fn add_window(
    plan: &mut Plan,
    id: RoomId,
    p: Point,
    orientation: Orientation,
    config: &PlannerConfig,
) -> Result<Opening, PlanError> {
    let window = {
        let room = plan.room(id).ok_or(PlanError::RoomNotFound(id))?;
        let verdict = is_valid_window_position(plan, room, p, config).and_then(|side| {
            let window = Opening::window(p.offset_from(room.origin()), side.orientation());
            if conflicts_with_existing(room, p, window.orientation, window.clearance(config), config) {
                Err(PlanError::Overlap(OverlapKind::Opening))
            } else {
                Ok((side, window))
            }
        });
        match verdict {
            Ok((side, window)) => {
                if window.orientation != orientation {
                    log::debug!("Window at ({}, {}) follows the {} wall", p.x, p.y, side.name());
                }
                log::info!(
                    "Window added to {} #{} on the {} wall at ({}, {})",
                    room.category.name(),
                    id,
                    side.name(),
                    p.x,
                    p.y
                );
                window
            }
            Err(e) => {
                log::warn!("Window at ({}, {}) rejected for room #{}: {}", p.x, p.y, id, e);
                return Err(e);
            }
        }
    };

    if let Some(room) = plan.room_mut(id) {
        room.windows.push(window);
    }
    Ok(window)
}
