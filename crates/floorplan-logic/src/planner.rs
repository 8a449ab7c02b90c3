//! Command surface for a presentation layer.
//!
//! [`Planner`] bundles the plan with the editor state (selection, drag) and
//! the configuration, and maps pointer-level gestures onto the engine
//! modules. Every command either commits fully or returns a [`PlanError`]
//! with the plan unchanged.

use std::io::{Read, Write};

use crate::config::PlannerConfig;
use crate::drag::{DragPreview, DragState, DragTarget};
use crate::error::PlanError;
use crate::furniture;
use crate::geometry::{Orientation, Point, Rect};
use crate::model::{ItemId, ItemType, Opening, Plan, Room, RoomId, Rotation};
use crate::openings;
use crate::persistence::{self, SaveError};
use crate::placement::{self, RoomRequest};
use crate::render::{self, PlanSnapshot};
use crate::selection::SelectionState;
use crate::validate::{self, Severity, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct Planner {
    plan: Plan,
    selection: SelectionState,
    drag: DragState,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    // ── Rooms ───────────────────────────────────────────────────────────

    /// Add a room next to the current reference room.
    pub fn place_room(&mut self, request: RoomRequest) -> Result<RoomId, PlanError> {
        placement::place_room(&mut self.plan, &mut self.selection, &request, &self.config)
    }

    /// Select the first room under `p`; clicking empty canvas keeps the
    /// current selection.
    pub fn select_at(&mut self, p: Point) -> Option<RoomId> {
        let id = self.plan.room_at(p)?.id;
        self.selection.select(id);
        Some(id)
    }

    pub fn select(&mut self, id: RoomId) -> Result<(), PlanError> {
        self.plan.room(id).ok_or(PlanError::RoomNotFound(id))?;
        self.selection.select(id);
        Ok(())
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.selection.selected().and_then(|id| self.plan.room(id))
    }

    pub fn rotate_selected(&mut self) -> Result<Rect, PlanError> {
        let id = self.selection.selected().ok_or(PlanError::NoSelection)?;
        placement::rotate_room(&mut self.plan, id, &self.config)
    }

    pub fn remove_selected(&mut self) -> Result<Room, PlanError> {
        let id = self.selection.selected().ok_or(PlanError::NoSelection)?;
        placement::remove_room(&mut self.plan, &mut self.selection, id)
    }

    /// Move a room so its corner lands on `target`, as a drag grabbed at
    /// the room's corner.
    pub fn move_room(&mut self, id: RoomId, target: Point) -> Result<Point, PlanError> {
        let origin = self.plan.room(id).ok_or(PlanError::RoomNotFound(id))?.origin();
        self.begin_drag(DragTarget::Room(id), origin)?;
        self.end_drag(target)
    }

    // ── Openings ────────────────────────────────────────────────────────

    /// Add a door at `p` to the first room containing it.
    pub fn add_door(&mut self, p: Point, orientation: Orientation) -> Result<Opening, PlanError> {
        let id = self.room_for_opening(p)?;
        openings::add_door(&mut self.plan, id, p, orientation, &self.config)
    }

    /// Add a window at `p` to the first room containing it.
    pub fn add_window(&mut self, p: Point, orientation: Orientation) -> Result<Opening, PlanError> {
        let id = self.room_for_opening(p)?;
        openings::add_window(&mut self.plan, id, p, orientation, &self.config)
    }

    fn room_for_opening(&self, p: Point) -> Result<RoomId, PlanError> {
        self.plan
            .room_at(p)
            .map(|r| r.id)
            .ok_or(PlanError::InvalidWallPosition)
    }

    // ── Furniture ───────────────────────────────────────────────────────

    pub fn place_item(&mut self, item_type: ItemType, p: Point) -> Result<ItemId, PlanError> {
        furniture::place_item(&mut self.plan, item_type, p)
    }

    /// Rotate the first item under `p`.
    pub fn rotate_item_at(&mut self, p: Point) -> Option<Result<Rotation, PlanError>> {
        let id = self.plan.item_at(p)?.id;
        Some(furniture::rotate_item(&mut self.plan, id))
    }

    pub fn rotate_item(&mut self, id: ItemId) -> Result<Rotation, PlanError> {
        furniture::rotate_item(&mut self.plan, id)
    }

    pub fn drag_item(&mut self, id: ItemId, target: Point) -> Result<Point, PlanError> {
        furniture::drag_item(&mut self.plan, id, target, &self.config)
    }

    // ── Dragging ────────────────────────────────────────────────────────

    /// Press at `pointer`: an item under the pointer wins over the room
    /// beneath it. Pressing on a room also selects it.
    pub fn begin_drag_at(&mut self, pointer: Point) -> Option<Result<DragTarget, PlanError>> {
        let target = if let Some(item) = self.plan.item_at(pointer) {
            DragTarget::Item(item.id)
        } else {
            let id = self.plan.room_at(pointer)?.id;
            self.selection.select(id);
            DragTarget::Room(id)
        };
        Some(self.begin_drag(target, pointer).map(|_| target))
    }

    pub fn begin_drag(&mut self, target: DragTarget, pointer: Point) -> Result<Point, PlanError> {
        self.drag.begin(&self.plan, target, pointer)
    }

    pub fn update_drag(&mut self, pointer: Point) -> Result<DragPreview, PlanError> {
        self.drag.update(&self.plan, pointer, &self.config)
    }

    pub fn end_drag(&mut self, pointer: Point) -> Result<Point, PlanError> {
        self.drag.end(&mut self.plan, pointer, &self.config)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // ── Output ──────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> PlanSnapshot {
        render::snapshot(&self.plan, &self.selection, &self.drag, &self.config)
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate::validate_all(&self.plan, &self.config)
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_plan(writer, &self.plan)
    }

    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_plan_json(writer, &self.plan)
    }

    /// Replace the plan with a binary save. Returns validation findings for
    /// the loaded plan; they are logged but do not block loading.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<Vec<ValidationError>, SaveError> {
        let plan = persistence::load_plan(reader)?;
        Ok(self.install(plan))
    }

    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<Vec<ValidationError>, SaveError> {
        let plan = persistence::load_plan_json(reader)?;
        Ok(self.install(plan))
    }

    fn install(&mut self, plan: Plan) -> Vec<ValidationError> {
        self.drag.cancel();
        self.plan = plan;
        self.selection.retain_valid(&self.plan);

        let findings = self.validate();
        for f in &findings {
            match f.severity {
                Severity::Error => log::warn!("[{}] {}", f.category, f.message),
                Severity::Warning => log::info!("[{}] {}", f.category, f.message),
            }
        }
        log::info!(
            "Loaded plan: {} rooms, {} items, {} findings",
            self.plan.rooms().len(),
            self.plan.items().len(),
            findings.len()
        );
        findings
    }

    /// Start over with an empty plan.
    pub fn clear(&mut self) {
        self.drag.cancel();
        self.plan = Plan::new();
        self.selection.clear();
    }
}
