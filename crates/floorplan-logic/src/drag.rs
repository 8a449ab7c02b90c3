//! Drag state machine for rooms and items.
//!
//! ```text
//! Idle ──begin──▶ Dragging ──end──▶ Idle   (committed or reverted)
//!                    │  ▲
//!                    └──┘ update (preview only)
//! ```
//!
//! While dragging, the pointer position is buffered in the session and the
//! plan is left untouched. `end` validates the final position and either
//! commits it or leaves the entity exactly at the origin captured by `begin`.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::furniture;
use crate::geometry::{snap_point, Point};
use crate::model::{ItemId, Plan, RoomId};
use crate::placement;

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragTarget {
    Room(RoomId),
    Item(ItemId),
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Entity position when the drag began.
    pub origin: Point,
    /// Pointer offset from the entity's top-left corner.
    pub grab: Point,
    /// Last previewed (snapped) position.
    pub preview: Point,
}

impl DragSession {
    fn position_for(&self, pointer: Point, config: &PlannerConfig) -> Point {
        snap_point(pointer.offset_from(self.grab), config.grid_step)
    }
}

/// Result of a preview update: where the entity would go, and whether it
/// could be dropped there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPreview {
    pub target: DragTarget,
    pub position: Point,
    pub conflict: Option<PlanError>,
}

impl DragPreview {
    pub fn is_valid(&self) -> bool {
        self.conflict.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Start dragging `target` with the pointer at `pointer`. Returns the
    /// captured origin.
    pub fn begin(&mut self, plan: &Plan, target: DragTarget, pointer: Point) -> Result<Point, PlanError> {
        if self.is_dragging() {
            return Err(PlanError::DragInProgress);
        }
        let origin = match target {
            DragTarget::Room(id) => plan.room(id).ok_or(PlanError::RoomNotFound(id))?.origin(),
            DragTarget::Item(id) => plan.item(id).ok_or(PlanError::ItemNotFound(id))?.origin(),
        };
        *self = DragState::Dragging(DragSession {
            target,
            origin,
            grab: pointer.offset_from(origin),
            preview: origin,
        });
        log::debug!("Drag of {:?} started at ({}, {})", target, origin.x, origin.y);
        Ok(origin)
    }

    /// Move the preview to follow the pointer. The plan is not modified.
    pub fn update(
        &mut self,
        plan: &Plan,
        pointer: Point,
        config: &PlannerConfig,
    ) -> Result<DragPreview, PlanError> {
        let DragState::Dragging(session) = self else {
            return Err(PlanError::NoDragInProgress);
        };
        let position = session.position_for(pointer, config);
        session.preview = position;
        let conflict = match session.target {
            DragTarget::Room(id) => placement::check_room_position(plan, id, position, config).err(),
            DragTarget::Item(id) => furniture::check_item_position(plan, id, position).err(),
        };
        if let Some(e) = &conflict {
            log::debug!("Preview of {:?} at ({}, {}): {}", session.target, position.x, position.y, e);
        }
        Ok(DragPreview {
            target: session.target,
            position,
            conflict,
        })
    }

    /// Release at `pointer`: commit the snapped position if it is valid,
    /// otherwise leave the entity at its origin and return the reason.
    /// Either way the state returns to `Idle`.
    pub fn end(
        &mut self,
        plan: &mut Plan,
        pointer: Point,
        config: &PlannerConfig,
    ) -> Result<Point, PlanError> {
        let DragState::Dragging(session) = std::mem::take(self) else {
            return Err(PlanError::NoDragInProgress);
        };
        let target = pointer.offset_from(session.grab);
        match session.target {
            DragTarget::Room(id) => placement::move_room(plan, id, target, config),
            DragTarget::Item(id) => furniture::drag_item(plan, id, target, config),
        }
    }

    /// Abandon the drag. The plan was never touched, so nothing to restore.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Dragging(session) => {
                log::debug!("Drag of {:?} cancelled", session.target);
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlapKind;
    use crate::geometry::Rect;
    use crate::model::{ItemType, RoomCategory};

    fn two_rooms() -> (Plan, RoomId, RoomId) {
        let mut plan = Plan::new();
        let a = plan.push_room(Rect::new(0, 0, 100, 100), RoomCategory::Kitchen);
        let b = plan.push_room(Rect::new(300, 0, 100, 100), RoomCategory::Kitchen);
        (plan, a, b)
    }

    #[test]
    fn room_drag_commits_snapped_position() {
        let config = PlannerConfig::default();
        let (mut plan, a, _) = two_rooms();
        let mut drag = DragState::default();
        // Grab the room 10 units in from its corner
        assert_eq!(drag.begin(&plan, DragTarget::Room(a), Point::new(10, 10)).unwrap(), Point::new(0, 0));

        let preview = drag.update(&plan, Point::new(41, 211), &config).unwrap();
        assert_eq!(preview.position, Point::new(32, 202));
        assert!(preview.is_valid());
        // Preview does not move the room
        assert_eq!(plan.room(a).unwrap().origin(), Point::new(0, 0));

        let at = drag.end(&mut plan, Point::new(41, 211), &config).unwrap();
        assert_eq!(at, Point::new(32, 202));
        assert_eq!(plan.room(a).unwrap().origin(), Point::new(32, 202));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn room_drag_onto_neighbour_reverts() {
        let config = PlannerConfig::default();
        let (mut plan, a, _) = two_rooms();
        let before = plan.clone();
        let mut drag = DragState::default();
        drag.begin(&plan, DragTarget::Room(a), Point::new(50, 50)).unwrap();

        let preview = drag.update(&plan, Point::new(320, 50), &config).unwrap();
        assert_eq!(preview.conflict, Some(PlanError::Overlap(OverlapKind::Room)));

        let err = drag.end(&mut plan, Point::new(320, 50), &config).unwrap_err();
        assert_eq!(err, PlanError::Overlap(OverlapKind::Room));
        assert_eq!(plan, before);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn item_drag_ignores_rooms() {
        let config = PlannerConfig::default();
        let (mut plan, _, _) = two_rooms();
        let id = plan.push_item(ItemType::Chair, Point::new(10, 10));
        let mut drag = DragState::default();
        drag.begin(&plan, DragTarget::Item(id), Point::new(15, 15)).unwrap();
        // Dropped between rooms: only item overlap is checked
        let at = drag.end(&mut plan, Point::new(205, 15), &config).unwrap();
        assert_eq!(at, Point::new(200, 10));
    }

    #[test]
    fn extreme_pointer_positions_revert() {
        let config = PlannerConfig::default();
        let (mut plan, a, _) = two_rooms();
        let before = plan.clone();
        let mut drag = DragState::default();
        drag.begin(&plan, DragTarget::Room(a), Point::new(50, 50)).unwrap();
        let preview = drag.update(&plan, Point::new(i32::MIN, i32::MAX), &config).unwrap();
        assert_eq!(preview.conflict, Some(PlanError::OutOfBounds));
        let err = drag.end(&mut plan, Point::new(i32::MAX, i32::MAX), &config).unwrap_err();
        assert_eq!(err, PlanError::OutOfBounds);
        assert_eq!(plan, before);
    }

    #[test]
    fn state_errors() {
        let config = PlannerConfig::default();
        let (mut plan, a, _) = two_rooms();
        let mut drag = DragState::default();
        assert_eq!(
            drag.update(&plan, Point::new(0, 0), &config).unwrap_err(),
            PlanError::NoDragInProgress
        );
        assert_eq!(
            drag.end(&mut plan, Point::new(0, 0), &config).unwrap_err(),
            PlanError::NoDragInProgress
        );
        assert_eq!(
            drag.begin(&plan, DragTarget::Room(99), Point::new(0, 0)).unwrap_err(),
            PlanError::RoomNotFound(99)
        );
        drag.begin(&plan, DragTarget::Room(a), Point::new(0, 0)).unwrap();
        assert_eq!(
            drag.begin(&plan, DragTarget::Room(a), Point::new(0, 0)).unwrap_err(),
            PlanError::DragInProgress
        );
        assert!(drag.cancel().is_some());
        assert!(drag.cancel().is_none());
    }
}
