//! Integration tests for the layout engine through the `Planner` surface.
//!
//! Exercises: place rooms → add openings → place furniture → drag/rotate
//! → save/load, checking the plan invariants after every step.
//!
//! All tests are pure logic, no rendering.

use floorplan_logic::drag::DragTarget;
use floorplan_logic::error::{OverlapKind, PlanError, WallRestriction};
use floorplan_logic::geometry::{Orientation, Point, Rect, Side};
use floorplan_logic::model::{ItemType, Plan, RoomCategory, RoomId};
use floorplan_logic::persistence;
use floorplan_logic::placement::{Alignment, Direction, RoomRequest};
use floorplan_logic::validate::{validate_all, Severity};
use floorplan_logic::Planner;

// ── Helpers ────────────────────────────────────────────────────────────

fn room(planner: &Planner, id: RoomId) -> Rect {
    planner.plan().room(id).expect("room exists").rect()
}

fn bytes(plan: &Plan) -> Vec<u8> {
    let mut buf = Vec::new();
    persistence::save_plan(&mut buf, plan).expect("save");
    buf
}

/// Run `command` and, if it is rejected, check that the plan did not change
/// by value or by serialized bytes.
fn assert_clean_rejection<T: std::fmt::Debug>(
    planner: &mut Planner,
    command: impl FnOnce(&mut Planner) -> Result<T, PlanError>,
) -> PlanError {
    let before = planner.plan().clone();
    let before_bytes = bytes(&before);
    let err = command(planner).expect_err("command should be rejected");
    assert_eq!(planner.plan(), &before);
    assert_eq!(bytes(planner.plan()), before_bytes);
    err
}

fn assert_no_errors(planner: &Planner) {
    let errors: Vec<_> = validate_all(planner.plan(), planner.config())
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect();
    assert!(errors.is_empty(), "{:?}", errors);
}

/// Bedroom at the origin with a Bathroom to its East.
fn bedroom_and_bath() -> (Planner, RoomId, RoomId) {
    let mut planner = Planner::default();
    let bed = planner
        .place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 200))
        .unwrap();
    let bath = planner
        .place_room(RoomRequest::new(RoomCategory::Bathroom, 150, 150))
        .unwrap();
    (planner, bed, bath)
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn first_room_then_east_neighbour() {
    let (planner, bed, bath) = bedroom_and_bath();
    assert_eq!(room(&planner, bed), Rect::new(0, 0, 200, 200));
    assert_eq!(room(&planner, bath), Rect::new(200, 0, 150, 150));
    assert_eq!(planner.selection().selected(), Some(bath));
    assert_eq!(planner.selection().reference(), Some(bath));
    assert_no_errors(&planner);
}

#[test]
fn door_rules_on_shared_and_outer_walls() {
    let (mut planner, bed, _) = bedroom_and_bath();

    let door = planner
        .add_door(Point::new(200, 50), Orientation::Vertical)
        .unwrap();
    assert!(door.is_door());
    assert_eq!(planner.plan().room(bed).unwrap().doors.len(), 1);

    let err = assert_clean_rejection(&mut planner, |p| {
        p.add_door(Point::new(0, 50), Orientation::Vertical)
    });
    assert_eq!(
        err,
        PlanError::RestrictedWall(WallRestriction::DoorOnOuterWall(RoomCategory::Bedroom))
    );
    assert_eq!(err.to_string(), "Bedroom cannot have doors facing outside");

    // The shared door gaps both rooms' walls
    let snapshot = planner.snapshot();
    let hidden: Vec<(RoomId, Side)> = snapshot
        .rooms
        .iter()
        .flat_map(|r| r.walls.iter().filter(|w| !w.drawn).map(move |w| (r.id, w.side)))
        .collect();
    assert_eq!(hidden, vec![(bed, Side::Right), (bed + 1, Side::Left)]);
}

#[test]
fn furniture_overlap_and_containment() {
    let mut planner = Planner::default();
    planner
        .place_room(RoomRequest::new(RoomCategory::Bedroom, 300, 300))
        .unwrap();
    let bed = planner.place_item(ItemType::Bed, Point::new(10, 10)).unwrap();
    assert_eq!(planner.plan().item(bed).unwrap().bounds(), Rect::new(10, 10, 30, 40));

    let err = assert_clean_rejection(&mut planner, |p| {
        p.place_item(ItemType::Chair, Point::new(25, 30))
    });
    assert_eq!(err, PlanError::Overlap(OverlapKind::Item));

    planner.place_item(ItemType::Chair, Point::new(45, 10)).unwrap();

    let err = assert_clean_rejection(&mut planner, |p| {
        p.place_item(ItemType::Chair, Point::new(700, 700))
    });
    assert_eq!(err, PlanError::NotInRoom);
    assert_no_errors(&planner);
}

#[test]
fn room_rotation_against_neighbours() {
    let mut planner = Planner::default();
    let a = planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 100))
        .unwrap();
    planner
        .place_room(RoomRequest::new(RoomCategory::LivingRoom, 200, 100))
        .unwrap();
    planner.select(a).unwrap();
    assert_eq!(planner.rotate_selected().unwrap(), Rect::new(0, 0, 100, 200));
    // And back
    assert_eq!(planner.rotate_selected().unwrap(), Rect::new(0, 0, 200, 100));

    let mut blocked = Planner::default();
    let a = blocked
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 100))
        .unwrap();
    blocked
        .place_room(
            RoomRequest::new(RoomCategory::LivingRoom, 200, 100)
                .toward(Direction::South, Alignment::Left),
        )
        .unwrap();
    blocked.select(a).unwrap();
    let err = assert_clean_rejection(&mut blocked, |p| p.rotate_selected());
    assert_eq!(err, PlanError::Overlap(OverlapKind::Room));
    assert_eq!(room(&blocked, a), Rect::new(0, 0, 200, 100));
}

#[test]
fn drag_off_canvas_restores_exact_origin() {
    let mut planner = Planner::default();
    let a = planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 200))
        .unwrap();
    planner.move_room(a, Point::new(401, 301)).unwrap();
    let origin = planner.plan().room(a).unwrap().origin();
    assert_eq!(origin, Point::new(402, 302));

    let before = bytes(planner.plan());
    assert_eq!(
        planner.begin_drag_at(Point::new(500, 400)).unwrap().unwrap(),
        DragTarget::Room(a)
    );
    // Right edge would land past the 1300-wide canvas
    let preview = planner.update_drag(Point::new(1350, 400)).unwrap();
    assert_eq!(preview.conflict, Some(PlanError::OutOfBounds));
    assert_eq!(
        planner.end_drag(Point::new(1350, 400)).unwrap_err(),
        PlanError::OutOfBounds
    );
    assert_eq!(planner.plan().room(a).unwrap().origin(), origin);
    assert_eq!(bytes(planner.plan()), before);
    assert!(!planner.drag_state().is_dragging());
}

// ── Row wrap & capacity ────────────────────────────────────────────────

#[test]
fn row_wrap_clears_the_tallest_room_in_the_row() {
    let mut planner = Planner::default();
    planner
        .place_room(RoomRequest::new(RoomCategory::LivingRoom, 500, 300))
        .unwrap();
    planner
        .place_room(
            RoomRequest::new(RoomCategory::Kitchen, 500, 100).toward(Direction::East, Alignment::Center),
        )
        .unwrap();
    // Kitchen sits at y = 100. The third room overflows the 1300-wide
    // canvas and must wrap below the living room, not just the kitchen.
    let c = planner
        .place_room(RoomRequest::new(RoomCategory::Bedroom, 400, 100))
        .unwrap();
    assert_eq!(room(&planner, c), Rect::new(0, 300, 400, 100));
    assert_no_errors(&planner);
}

#[test]
fn exact_fit_does_not_wrap() {
    let mut planner = Planner::default();
    planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 650, 100))
        .unwrap();
    let b = planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 650, 100))
        .unwrap();
    // Right edge == canvas width stays on the row
    assert_eq!(room(&planner, b), Rect::new(650, 0, 650, 100));
}

#[test]
fn full_canvas_reports_capacity() {
    let mut planner = Planner::default();
    let mut placed = 0;
    let err = loop {
        match planner.place_room(RoomRequest::new(RoomCategory::Bedroom, 650, 425)) {
            Ok(_) => placed += 1,
            Err(e) => break e,
        }
    };
    assert_eq!(placed, 4);
    assert_eq!(err, PlanError::CapacityExceeded);
    assert_no_errors(&planner);
}

#[test]
fn placements_off_the_canvas_report_capacity() {
    let mut planner = Planner::default();
    planner
        .place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 200))
        .unwrap();
    let err = assert_clean_rejection(&mut planner, |p| {
        p.place_room(
            RoomRequest::new(RoomCategory::Kitchen, 100, 100).toward(Direction::North, Alignment::Left),
        )
    });
    assert_eq!(err, PlanError::CapacityExceeded);
    let err = assert_clean_rejection(&mut planner, |p| {
        p.place_room(RoomRequest::new(RoomCategory::Kitchen, i32::MAX, 100))
    });
    assert_eq!(err, PlanError::CapacityExceeded);
}

#[test]
fn extreme_move_targets_are_rejected() {
    let mut planner = Planner::default();
    let a = planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 200))
        .unwrap();
    let err = assert_clean_rejection(&mut planner, |p| p.move_room(a, Point::new(i32::MAX, 0)));
    assert_eq!(err, PlanError::OutOfBounds);
}

// ── Item rotation ──────────────────────────────────────────────────────

#[test]
fn rotated_item_may_not_overlap() {
    let mut planner = Planner::default();
    planner
        .place_room(RoomRequest::new(RoomCategory::LivingRoom, 400, 400))
        .unwrap();
    // Sofa 52×32; a chair just below its current footprint
    let sofa = planner.place_item(ItemType::Sofa, Point::new(100, 100)).unwrap();
    planner.place_item(ItemType::Chair, Point::new(100, 140)).unwrap();

    let err = assert_clean_rejection(&mut planner, |p| p.rotate_item_at(Point::new(110, 110)).unwrap());
    assert_eq!(err, PlanError::Overlap(OverlapKind::Item));
    assert_eq!(planner.plan().item(sofa).unwrap().bounds(), Rect::new(100, 100, 52, 32));
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn full_plan_survives_save_and_load() {
    let (mut planner, _, _) = bedroom_and_bath();
    planner
        .add_door(Point::new(200, 50), Orientation::Vertical)
        .unwrap();
    planner
        .add_window(Point::new(0, 100), Orientation::Vertical)
        .unwrap();
    planner.place_item(ItemType::Bed, Point::new(20, 20)).unwrap();
    let shower = planner.place_item(ItemType::Shower, Point::new(250, 20)).unwrap();
    planner.rotate_item(shower).unwrap();

    let mut binary = Vec::new();
    planner.save(&mut binary).unwrap();
    let mut json = Vec::new();
    planner.save_json(&mut json).unwrap();

    let mut from_binary = Planner::default();
    assert!(from_binary.load(&binary[..]).unwrap().is_empty());
    assert_eq!(from_binary.plan(), planner.plan());

    let mut from_json = Planner::default();
    assert!(from_json.load_json(&json[..]).unwrap().is_empty());
    assert_eq!(from_json.plan(), planner.plan());

    let bed_room = &from_json.plan().rooms()[0];
    assert_eq!(bed_room.doors.len(), 1);
    assert_eq!(bed_room.windows.len(), 1);
}

#[test]
fn loading_an_inconsistent_plan_reports_findings() {
    let json = r#"{
        "version": 1,
        "rooms": [
            { "id": 0, "x": 0, "y": 0, "width": 100, "height": 100,
              "category": "Kitchen", "doors": [], "windows": [] },
            { "id": 1, "x": 50, "y": 50, "width": 100, "height": 100,
              "category": "Bedroom", "doors": [], "windows": [] }
        ],
        "items": [],
        "next_room_id": 0,
        "next_item_id": 0
    }"#;
    let mut planner = Planner::default();
    let findings = planner.load_json(json.as_bytes()).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("overlap"));

    // Counters resume past the loaded ids
    planner.select(1).unwrap();
    let id = planner
        .place_room(RoomRequest::new(RoomCategory::Kitchen, 100, 100))
        .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(id, 2);
}

#[test]
fn loading_a_huge_room_reports_it() {
    let json = r#"{
        "version": 1,
        "rooms": [
            { "id": 4294967295, "x": 0, "y": 0, "width": 300000000, "height": 300000000,
              "category": "Kitchen", "doors": [], "windows": [] }
        ],
        "items": [],
        "next_room_id": 0,
        "next_item_id": 0
    }"#;
    let mut planner = Planner::default();
    let findings = planner.load_json(json.as_bytes()).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Error);
    assert!(findings[0].message.contains("outside canvas"));
}
