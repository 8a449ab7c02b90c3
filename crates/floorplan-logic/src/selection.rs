//! Which room is selected, and which one anchors the next relative placement.

use crate::model::{Plan, RoomId};

/// Selection is threaded explicitly through commands rather than living in
/// the plan: it is editor state, not part of the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: Option<RoomId>,
    reference: Option<RoomId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The room targeted by rotate/remove.
    pub fn selected(&self) -> Option<RoomId> {
        self.selected
    }

    /// The anchor for the next relative placement.
    pub fn reference(&self) -> Option<RoomId> {
        self.reference
    }

    /// Selecting a room also makes it the placement reference.
    pub fn select(&mut self, id: RoomId) {
        self.selected = Some(id);
        self.reference = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.reference = None;
    }

    /// After `removed` left the plan: if it was selected or referenced, fall
    /// back to the most recently added remaining room.
    pub fn on_room_removed(&mut self, plan: &Plan, removed: RoomId) {
        if self.selected != Some(removed) && self.reference != Some(removed) {
            return;
        }
        match plan.rooms().last() {
            Some(room) => self.select(room.id),
            None => self.clear(),
        }
    }

    /// Drop ids that no longer exist in `plan` (e.g. after loading a file).
    pub fn retain_valid(&mut self, plan: &Plan) {
        if self.selected.is_some_and(|id| plan.room(id).is_none()) {
            self.selected = None;
        }
        if self.reference.is_some_and(|id| plan.room(id).is_none()) {
            self.reference = None;
        }
    }
}
