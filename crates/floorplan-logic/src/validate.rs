//! Whole-plan validation.
//!
//! Commands keep a plan consistent as it is edited, but a plan loaded from a
//! file (or edited by hand) gets no such guarantee. These checks re-verify
//! every structural rule and report what is wrong without changing anything.

use std::collections::HashSet;

use crate::adjacency::{has_adjacent_room, is_outer_wall, nearest_wall};
use crate::config::PlannerConfig;
use crate::model::Plan;

/// A plan validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Per-room ─────────────────────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in plan.rooms() {
        if r.width <= 0 || r.height <= 0 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} has non-positive dimensions: {}×{}",
                    r.id, r.width, r.height
                ),
            });
        }
    }
    errors
}

/// Check that room aspect ratios are reasonable (< 10:1).
pub fn check_room_aspect_ratios(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in plan.rooms() {
        if r.width <= 0 || r.height <= 0 {
            continue; // caught by dimension check
        }
        let (long, short) = (r.width.max(r.height), r.width.min(r.height));
        if i64::from(long) > i64::from(short) * 10 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room #{} has extreme aspect ratio {:.1}:1 ({}×{})",
                    r.id,
                    long as f32 / short as f32,
                    r.width,
                    r.height
                ),
            });
        }
    }
    errors
}

/// Check rooms don't extend outside the canvas.
pub fn check_rooms_within_canvas(plan: &Plan, config: &PlannerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in plan.rooms() {
        let rect = r.rect();
        if !rect.within(config.canvas_width, config.canvas_height) {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} extends outside canvas: ({},{})→({},{}) vs canvas {}×{}",
                    r.id,
                    rect.left(),
                    rect.top(),
                    rect.right(),
                    rect.bottom(),
                    config.canvas_width,
                    config.canvas_height
                ),
            });
        }
    }
    errors
}

// ── B. Pairwise ─────────────────────────────────────────────────────────

/// No two rooms may share interior area. Shared edges are fine.
pub fn check_room_overlaps(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let rooms = plan.rooms();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if rooms[i].intersects(&rooms[j]) {
                errors.push(ValidationError {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!("Rooms #{} and #{} overlap", rooms[i].id, rooms[j].id),
                });
            }
        }
    }
    errors
}

/// No two items may share interior area.
pub fn check_item_overlaps(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let items = plan.items();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if items[i].intersects(&items[j]) {
                errors.push(ValidationError {
                    category: "item_overlap",
                    severity: Severity::Error,
                    message: format!(
                        "{} #{} and {} #{} overlap",
                        items[i].item_type.name(),
                        items[i].id,
                        items[j].item_type.name(),
                        items[j].id
                    ),
                });
            }
        }
    }
    errors
}

/// Ids must be unique within their collection.
pub fn check_duplicate_ids(plan: &Plan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for r in plan.rooms() {
        if !seen.insert(r.id) {
            errors.push(ValidationError {
                category: "identity",
                severity: Severity::Error,
                message: format!("Duplicate room id #{}", r.id),
            });
        }
    }
    seen.clear();
    for i in plan.items() {
        if !seen.insert(i.id) {
            errors.push(ValidationError {
                category: "identity",
                severity: Severity::Error,
                message: format!("Duplicate item id #{}", i.id),
            });
        }
    }
    errors
}

// ── C. Contents ─────────────────────────────────────────────────────────

/// Items are placed inside a room. Moving them later may leave them outside,
/// which is allowed but worth flagging.
pub fn check_items_in_rooms(plan: &Plan) -> Vec<ValidationError> {
    plan.items()
        .iter()
        .filter(|item| plan.room_at(item.origin()).is_none())
        .map(|item| ValidationError {
            category: "item_placement",
            severity: Severity::Warning,
            message: format!(
                "{} #{} at ({}, {}) is not inside any room",
                item.item_type.name(),
                item.id,
                item.x,
                item.y
            ),
        })
        .collect()
}

/// Every opening should still sit on a wall of its room (rotation keeps
/// offsets, so a rotated room can strand them), and wall rules should still
/// hold after neighbours moved.
pub fn check_openings(plan: &Plan, config: &PlannerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for room in plan.rooms() {
        for opening in room.openings() {
            let at = opening.position(room.origin());
            let what = if opening.is_door() { "Door" } else { "Window" };
            let Some(side) = nearest_wall(&room.rect(), at, config.wall_tolerance) else {
                errors.push(ValidationError {
                    category: "openings",
                    severity: Severity::Warning,
                    message: format!(
                        "{} of room #{} at ({}, {}) is not on any wall",
                        what, room.id, at.x, at.y
                    ),
                });
                continue;
            };
            let broken = if opening.is_door() {
                room.category.restricts_outer_doors()
                    && is_outer_wall(plan, room, side, config.adjacency_tolerance)
            } else {
                has_adjacent_room(plan, room, side, config.adjacency_tolerance)
            };
            if broken {
                errors.push(ValidationError {
                    category: "openings",
                    severity: Severity::Warning,
                    message: format!(
                        "{} of {} #{} on the {} wall breaks wall rules",
                        what,
                        room.category.name(),
                        room.id,
                        side.name()
                    ),
                });
            }
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all plan validations and return combined results.
pub fn validate_all(plan: &Plan, config: &PlannerConfig) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(plan));
    all.extend(check_room_aspect_ratios(plan));
    all.extend(check_rooms_within_canvas(plan, config));
    all.extend(check_room_overlaps(plan));
    all.extend(check_item_overlaps(plan));
    all.extend(check_duplicate_ids(plan));
    all.extend(check_items_in_rooms(plan));
    all.extend(check_openings(plan, config));
    all
}
