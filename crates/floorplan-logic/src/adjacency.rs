//! Adjacency and wall-sharing between rooms.
//!
//! Pure functions over the whole [`Plan`]: a room never holds a reference to
//! its neighbours, every lookup scans the plan explicitly.

use crate::config::PlannerConfig;
use crate::geometry::{distance, spans_overlap, Orientation, Point, Rect, Side, WallSegment};
use crate::model::{Opening, Plan, Room};

/// True if some other room's facing edge lies within `tolerance` of `side`
/// and the two rooms overlap on the cross axis.
pub fn has_adjacent_room(plan: &Plan, room: &Room, side: Side, tolerance: i32) -> bool {
    adjacent_rooms(plan, room, side, tolerance).next().is_some()
}

/// All rooms sharing `side` of `room`, in plan order.
pub fn adjacent_rooms<'a>(
    plan: &'a Plan,
    room: &'a Room,
    side: Side,
    tolerance: i32,
) -> impl Iterator<Item = &'a Room> + 'a {
    let r = room.rect();
    plan.rooms()
        .iter()
        .filter(move |other| other.id != room.id)
        .filter(move |other| faces(&r, &other.rect(), side, tolerance))
}

fn faces(r: &Rect, o: &Rect, side: Side, tolerance: i32) -> bool {
    let vertical_overlap = r.top() < o.bottom() && r.bottom() > o.top();
    let horizontal_overlap = r.left() < o.right() && r.right() > o.left();
    match side {
        Side::Left => distance(r.left(), o.right()) <= tolerance && vertical_overlap,
        Side::Right => distance(r.right(), o.left()) <= tolerance && vertical_overlap,
        Side::Top => distance(r.top(), o.bottom()) <= tolerance && horizontal_overlap,
        Side::Bottom => distance(r.bottom(), o.top()) <= tolerance && horizontal_overlap,
    }
}

/// An outer wall faces the building exterior: no room shares it.
pub fn is_outer_wall(plan: &Plan, room: &Room, side: Side, tolerance: i32) -> bool {
    !has_adjacent_room(plan, room, side, tolerance)
}

/// True if another room has an edge collinear (within `tolerance`) with
/// `wall` that overlaps it along the wall's running axis.
pub fn is_wall_shared(plan: &Plan, room: &Room, wall: &WallSegment, tolerance: i32) -> bool {
    shared_walls(plan, room, wall, tolerance).next().is_some()
}

/// Every other room sharing `wall`, paired with that room's coincident wall.
pub fn shared_walls<'a>(
    plan: &'a Plan,
    room: &'a Room,
    wall: &'a WallSegment,
    tolerance: i32,
) -> impl Iterator<Item = (&'a Room, WallSegment)> + 'a {
    plan.rooms()
        .iter()
        .filter(move |other| other.id != room.id)
        .filter_map(move |other| coincident_wall(&other.rect(), wall, tolerance).map(|w| (other, w)))
}

/// The first room sharing `wall`, with its coincident wall.
pub fn shared_wall_with<'a>(
    plan: &'a Plan,
    room: &'a Room,
    wall: &'a WallSegment,
    tolerance: i32,
) -> Option<(&'a Room, WallSegment)> {
    shared_walls(plan, room, wall, tolerance).next()
}

/// The wall of `other` lying on the same line as `wall`, if the two overlap.
fn coincident_wall(other: &Rect, wall: &WallSegment, tolerance: i32) -> Option<WallSegment> {
    let line = wall.line();
    let (near, far, cross) = match wall.orientation() {
        Orientation::Vertical => (Side::Left, Side::Right, (other.top(), other.bottom())),
        Orientation::Horizontal => (Side::Top, Side::Bottom, (other.left(), other.right())),
    };
    if !spans_overlap(wall.span(), cross) {
        return None;
    }
    [near, far]
        .into_iter()
        .map(|side| other.wall(side))
        .find(|candidate| distance(candidate.line(), line) <= tolerance)
}

/// The wall line nearest to `p`, if it lies within `tolerance`.
/// Ties resolve in [`Side::ALL`] order.
pub fn nearest_wall(rect: &Rect, p: Point, tolerance: i32) -> Option<Side> {
    let mut best: Option<(Side, i32)> = None;
    for side in Side::ALL {
        let d = rect.distance_to_wall_line(side, p);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((side, d));
        }
    }
    best.filter(|&(_, d)| d <= tolerance).map(|(side, _)| side)
}

/// True if `door` (belonging to a room at `room_origin`) cuts `wall`.
fn door_cuts_wall(
    door: &Opening,
    room_origin: Point,
    wall: &WallSegment,
    config: &PlannerConfig,
) -> bool {
    if !door.is_door() || door.orientation != wall.orientation() {
        return false;
    }
    let at = door.position(room_origin);
    let (lo, hi) = wall.span();
    match wall.orientation() {
        Orientation::Vertical => {
            distance(wall.line(), at.x) <= config.door_cut_tolerance
                && lo <= at.y
                && hi >= at.y.saturating_add(config.door_cut_span)
        }
        Orientation::Horizontal => {
            distance(wall.line(), at.y) <= config.door_cut_tolerance
                && lo <= at.x
                && hi >= at.x.saturating_add(config.door_cut_span)
        }
    }
}

/// True if the wall on `side` of `room` is interrupted by a door, either one
/// of the room's own or one cut into the coincident wall of a neighbour.
/// A door in a shared wall shows as one gap, so both rooms skip the line.
pub fn wall_has_door(plan: &Plan, room: &Room, side: Side, config: &PlannerConfig) -> bool {
    let wall = room.wall(side);
    if room
        .doors
        .iter()
        .any(|d| door_cuts_wall(d, room.origin(), &wall, config))
    {
        return true;
    }
    let cut = shared_walls(plan, room, &wall, config.adjacency_tolerance).any(|(other, other_wall)| {
        other
            .doors
            .iter()
            .any(|d| door_cuts_wall(d, other.origin(), &other_wall, config))
    });
    cut
}
