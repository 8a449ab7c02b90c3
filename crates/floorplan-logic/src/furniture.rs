//! Furniture and fixture placement, rotation and dragging.

use crate::config::PlannerConfig;
use crate::error::{OverlapKind, PlanError};
use crate::geometry::{snap_point, Point, Rect};
use crate::model::{ItemId, ItemType, Plan, Rotation};

/// Place a catalog item with its top-left corner at `p`. The point must lie
/// inside some room and the footprint must not touch another item's interior.
pub fn place_item(plan: &mut Plan, item_type: ItemType, p: Point) -> Result<ItemId, PlanError> {
    let Some(room) = plan.room_at(p) else {
        log::warn!("{} at ({}, {}) is outside every room", item_type.name(), p.x, p.y);
        return Err(PlanError::NotInRoom);
    };
    let room_id = room.id;

    let (width, height) = item_type.size();
    let footprint = Rect::new(p.x, p.y, width, height);
    if plan.item_overlaps(&footprint, None) {
        log::warn!("{} at ({}, {}) overlaps another item", item_type.name(), p.x, p.y);
        return Err(PlanError::Overlap(OverlapKind::Item));
    }

    let id = plan.push_item(item_type, p);
    log::info!(
        "Placed {} #{} at ({}, {}) in room #{}",
        item_type.name(),
        id,
        p.x,
        p.y,
        room_id
    );
    Ok(id)
}

/// Quarter-turn the item, swapping its footprint around the same corner.
/// A turn that would overlap another item is refused.
pub fn rotate_item(plan: &mut Plan, id: ItemId) -> Result<Rotation, PlanError> {
    let item = plan.item(id).ok_or(PlanError::ItemNotFound(id))?;
    let turned = item.bounds().rotated();
    if plan.item_overlaps(&turned, Some(id)) {
        log::warn!("Rotating item #{} would overlap another item", id);
        return Err(PlanError::Overlap(OverlapKind::Item));
    }

    let item = plan.item_mut(id).ok_or(PlanError::ItemNotFound(id))?;
    item.rotate();
    log::debug!("Item #{} now at {}°", id, item.rotation.degrees());
    Ok(item.rotation)
}

/// Check that item `id` could sit with its corner at `origin`. Only other
/// items are considered; room membership is checked at placement time.
pub fn check_item_position(plan: &Plan, id: ItemId, origin: Point) -> Result<Rect, PlanError> {
    let item = plan.item(id).ok_or(PlanError::ItemNotFound(id))?;
    let bounds = item.bounds().at(origin);
    if plan.item_overlaps(&bounds, Some(id)) {
        return Err(PlanError::Overlap(OverlapKind::Item));
    }
    Ok(bounds)
}

/// Snap `target` to the grid and move the item there. On rejection the item
/// keeps its original position.
pub fn drag_item(
    plan: &mut Plan,
    id: ItemId,
    target: Point,
    config: &PlannerConfig,
) -> Result<Point, PlanError> {
    let snapped = snap_point(target, config.grid_step);
    if let Err(e) = check_item_position(plan, id, snapped) {
        log::warn!("Move of item #{} to ({}, {}) reverted: {}", id, snapped.x, snapped.y, e);
        return Err(e);
    }
    if let Some(item) = plan.item_mut(id) {
        item.set_origin(snapped);
    }
    log::debug!("Moved item #{} to ({}, {})", id, snapped.x, snapped.y);
    Ok(snapped)
}
