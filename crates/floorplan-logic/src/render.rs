//! Render-ready snapshot of a plan.
//!
//! The presentation layer draws exactly what is in a [`PlanSnapshot`]: fills,
//! wall segments (with `drawn == false` where a door gaps the wall), window
//! strokes, door gaps and item boxes. No layout logic runs at draw time.

use serde::Serialize;

use crate::adjacency::wall_has_door;
use crate::config::PlannerConfig;
use crate::drag::{DragState, DragTarget};
use crate::geometry::{Orientation, Point, Rect, Side, WallSegment};
use crate::model::{Color, ItemId, ItemType, Opening, Plan, Room, RoomId};
use crate::selection::SelectionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallView {
    pub side: Side,
    pub segment: WallSegment,
    /// False where a door (this room's or a neighbour's) cuts the wall.
    pub drawn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpeningStyle {
    /// Drawn as a gap in the wall.
    Door,
    /// Drawn as a short stroke centered on the opening's position.
    Window,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpeningView {
    pub style: OpeningStyle,
    pub segment: WallSegment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub id: RoomId,
    pub rect: Rect,
    pub color: Color,
    pub label: &'static str,
    pub selected: bool,
    /// True while the room is being dragged and shown at its preview position.
    pub dragging: bool,
    pub walls: Vec<WallView>,
    pub openings: Vec<OpeningView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub item_type: ItemType,
    pub bounds: Rect,
    pub is_fixture: bool,
    pub rotation_degrees: u16,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSnapshot {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub rooms: Vec<RoomView>,
    pub items: Vec<ItemView>,
}

fn opening_view(opening: &Opening, room_origin: Point, config: &PlannerConfig) -> OpeningView {
    let at = opening.position(room_origin);
    let (style, from, to) = if opening.is_door() {
        (OpeningStyle::Door, 0, config.door_cut_span)
    } else {
        let half = config.window_length / 2;
        (OpeningStyle::Window, -half, config.window_length - half)
    };
    let segment = match opening.orientation {
        Orientation::Vertical => WallSegment::new(at.translate(0, from), at.translate(0, to)),
        Orientation::Horizontal => WallSegment::new(at.translate(from, 0), at.translate(to, 0)),
    };
    OpeningView { style, segment }
}

fn room_view(
    plan: &Plan,
    room: &Room,
    selection: &SelectionState,
    preview: Option<Point>,
    config: &PlannerConfig,
) -> RoomView {
    let walls = Side::ALL
        .into_iter()
        .map(|side| WallView {
            side,
            segment: room.wall(side),
            drawn: !wall_has_door(plan, room, side, config),
        })
        .collect();

    let origin = preview.unwrap_or_else(|| room.origin());
    let openings = room
        .openings()
        .map(|o| opening_view(o, origin, config))
        .collect();

    let mut view = RoomView {
        id: room.id,
        rect: room.rect().at(origin),
        color: room.color(),
        label: room.category.name(),
        selected: selection.selected() == Some(room.id),
        dragging: preview.is_some(),
        walls,
        openings,
    };
    // Walls follow a dragged room; door gaps are recomputed on drop.
    if preview.is_some() {
        for wall in &mut view.walls {
            wall.segment = view.rect.wall(wall.side);
        }
    }
    view
}

/// Build the draw list for the current state.
pub fn snapshot(
    plan: &Plan,
    selection: &SelectionState,
    drag: &DragState,
    config: &PlannerConfig,
) -> PlanSnapshot {
    let preview = drag.session().map(|s| (s.target, s.preview));
    let room_preview = |id: RoomId| match preview {
        Some((DragTarget::Room(r), at)) if r == id => Some(at),
        _ => None,
    };
    let item_preview = |id: ItemId| match preview {
        Some((DragTarget::Item(i), at)) if i == id => Some(at),
        _ => None,
    };

    let rooms = plan
        .rooms()
        .iter()
        .map(|room| room_view(plan, room, selection, room_preview(room.id), config))
        .collect();

    let items = plan
        .items()
        .iter()
        .map(|item| {
            let at = item_preview(item.id);
            ItemView {
                id: item.id,
                item_type: item.item_type,
                bounds: item.bounds().at(at.unwrap_or_else(|| item.origin())),
                is_fixture: item.is_fixture(),
                rotation_degrees: item.rotation.degrees(),
                dragging: at.is_some(),
            }
        })
        .collect();

    PlanSnapshot {
        canvas_width: config.canvas_width,
        canvas_height: config.canvas_height,
        rooms,
        items,
    }
}
