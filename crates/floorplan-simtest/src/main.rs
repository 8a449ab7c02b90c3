//! Floor Planner Headless Harness
//!
//! Drives the layout engine through fixed scenarios, a seeded randomized
//! command sweep and the bundled sample plan. Runs entirely in-process, no
//! window and no rendering.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --seed 7 --steps 5000

use floorplan_logic::drag::DragTarget;
use floorplan_logic::error::{OverlapKind, PlanError, WallRestriction};
use floorplan_logic::geometry::{Orientation, Point, Rect, Side};
use floorplan_logic::model::{ItemType, Plan, RoomCategory};
use floorplan_logic::persistence;
use floorplan_logic::placement::{Alignment, Direction, RoomRequest};
use floorplan_logic::validate::{self, Severity};
use floorplan_logic::Planner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Sample plan (same JSON format as `save_plan_json`) ──────────────────
const SAMPLE_PLAN_JSON: &str = include_str!("../../../data/sample_plan.json");

#[derive(Debug, Deserialize)]
struct SampleHeader {
    version: u32,
    rooms: Vec<serde_json::Value>,
    items: Vec<serde_json::Value>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn arg_value(name: &str) -> Option<u64> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let seed = arg_value("--seed").unwrap_or(42);
    let steps = arg_value("--steps").unwrap_or(2000) as usize;
    println!("=== Floor Planner Harness ===\n");

    let mut results = Vec::new();

    // 1. Sample plan
    results.extend(validate_sample_plan(verbose));

    // 2. Room placement scenarios
    results.extend(validate_room_placement(verbose));

    // 3. Openings and wall rules
    results.extend(validate_openings(verbose));

    // 4. Furniture
    results.extend(validate_furniture(verbose));

    // 5. Drag and rotation
    results.extend(validate_drag_and_rotate(verbose));

    // 6. Randomized invariant sweep
    results.extend(validate_random_sweep(seed, steps, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Unwrap a setup step, recording a failed result when it breaks so later
/// checks in the section are skipped instead of reporting nonsense.
fn setup<T>(results: &mut Vec<TestResult>, name: &str, outcome: Result<T, PlanError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            results.push(TestResult {
                name: format!("setup_{}", name),
                passed: false,
                detail: format!("setup failed: {}", e),
            });
            None
        }
    }
}

fn bincode_bytes(plan: &Plan) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail; an empty buffer would fail the comparison anyway
    let _ = persistence::save_plan(&mut buf, plan);
    buf
}

// ── 1. Sample Plan ──────────────────────────────────────────────────────

fn validate_sample_plan(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Plan ---");
    let mut results = Vec::new();

    let header: SampleHeader = match serde_json::from_str(SAMPLE_PLAN_JSON) {
        Ok(h) => h,
        Err(e) => {
            results.push(TestResult {
                name: "sample_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "sample_version".into(),
        passed: header.version == persistence::SAVE_VERSION,
        detail: format!("format version {}", header.version),
    });

    let mut planner = Planner::default();
    let findings = match planner.load_json(SAMPLE_PLAN_JSON.as_bytes()) {
        Ok(f) => f,
        Err(e) => {
            results.push(TestResult {
                name: "sample_load".into(),
                passed: false,
                detail: format!("load error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "sample_load".into(),
        passed: planner.plan().rooms().len() == header.rooms.len()
            && planner.plan().items().len() == header.items.len(),
        detail: format!(
            "{} rooms, {} items",
            planner.plan().rooms().len(),
            planner.plan().items().len()
        ),
    });

    if verbose {
        for f in &findings {
            println!("  [{:?}] {}: {}", f.severity, f.category, f.message);
        }
    }
    results.push(TestResult {
        name: "sample_validates_clean".into(),
        passed: findings.is_empty(),
        detail: format!("{} validation findings", findings.len()),
    });

    // Every category is represented
    let all_categories = RoomCategory::ALL
        .iter()
        .all(|c| planner.plan().rooms().iter().any(|r| r.category == *c));
    results.push(TestResult {
        name: "sample_all_categories".into(),
        passed: all_categories,
        detail: "every room category appears".into(),
    });

    // Round trip through the binary format
    let bytes = bincode_bytes(planner.plan());
    let reloaded = persistence::load_plan(&bytes[..]);
    results.push(TestResult {
        name: "sample_bincode_roundtrip".into(),
        passed: reloaded.as_ref().map(|p| p == planner.plan()).unwrap_or(false),
        detail: format!("{} bytes", bytes.len()),
    });

    // Door-gapped walls: bedroom/bath, kitchen/living and the kitchen's outer door
    let snapshot = planner.snapshot();
    let hidden: Vec<String> = snapshot
        .rooms
        .iter()
        .flat_map(|r| {
            r.walls
                .iter()
                .filter(|w| !w.drawn)
                .map(move |w| format!("{}:{}", r.label, w.side.name()))
        })
        .collect();
    results.push(TestResult {
        name: "sample_door_gaps".into(),
        passed: hidden.len() == 5,
        detail: format!("hidden walls: {}", hidden.join(", ")),
    });

    results
}

// ── 2. Room Placement ───────────────────────────────────────────────────

fn validate_room_placement(verbose: bool) -> Vec<TestResult> {
    println!("--- Room Placement ---");
    let mut results = Vec::new();

    // First room at the origin, second flush to the East
    let mut planner = Planner::default();
    let bed = planner.place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 200));
    let bath = planner.place_room(RoomRequest::new(RoomCategory::Bathroom, 150, 150));
    let rect = |p: &Planner, id: Result<u32, PlanError>| {
        id.ok().and_then(|id| p.plan().room(id)).map(|r| r.rect())
    };
    results.push(TestResult {
        name: "first_room_at_origin".into(),
        passed: rect(&planner, bed.clone()) == Some(Rect::new(0, 0, 200, 200)),
        detail: format!("{:?}", rect(&planner, bed)),
    });
    results.push(TestResult {
        name: "east_left_placement".into(),
        passed: rect(&planner, bath.clone()) == Some(Rect::new(200, 0, 150, 150)),
        detail: format!("{:?}", rect(&planner, bath)),
    });

    // Every direction/alignment pair around a central room
    let mut combos = 0;
    let mut ok = 0;
    for direction in [Direction::North, Direction::South, Direction::East, Direction::West] {
        for alignment in [Alignment::Left, Alignment::Center, Alignment::Right] {
            combos += 1;
            let mut p = Planner::default();
            let Ok(center) = p.place_room(RoomRequest::new(RoomCategory::LivingRoom, 1, 1)) else {
                continue;
            };
            // Re-seat the anchor in the middle of the canvas
            if p.move_room(center, Point::new(600, 400)).is_err() {
                continue;
            }
            if p.select(center).is_err() {
                continue;
            }
            let placed = p
                .place_room(
                    RoomRequest::new(RoomCategory::Kitchen, 100, 60).toward(direction, alignment),
                )
                .ok()
                .and_then(|id| p.plan().room(id).map(|r| r.rect()));
            let touches = placed.is_some_and(|r| {
                let c = Rect::new(600, 400, 1, 1);
                !r.intersects(&c)
                    && (r.right() == c.left()
                        || r.left() == c.right()
                        || r.bottom() == c.top()
                        || r.top() == c.bottom())
            });
            if touches {
                ok += 1;
            } else if verbose {
                println!("  {:?}/{:?} → {:?}", direction, alignment, placed);
            }
        }
    }
    results.push(TestResult {
        name: "all_directions_flush".into(),
        passed: ok == combos,
        detail: format!("{}/{} direction×alignment placements flush", ok, combos),
    });

    // Filling a row wraps to the next one
    let mut p = Planner::default();
    let mut last = None;
    for _ in 0..4 {
        last = p
            .place_room(RoomRequest::new(RoomCategory::Bedroom, 400, 200))
            .ok();
    }
    let wrapped = last.and_then(|id| p.plan().room(id)).map(|r| r.rect());
    results.push(TestResult {
        name: "row_wrap".into(),
        passed: wrapped == Some(Rect::new(0, 200, 400, 200)),
        detail: format!("4th 400-wide room → {:?}", wrapped),
    });

    // Keep wrapping until the canvas is full
    let mut outcome = Ok(0);
    for _ in 0..40 {
        outcome = p.place_room(RoomRequest::new(RoomCategory::Bedroom, 400, 200));
        if outcome.is_err() {
            break;
        }
    }
    results.push(TestResult {
        name: "capacity_exceeded".into(),
        passed: outcome == Err(PlanError::CapacityExceeded),
        detail: format!("{} rooms fit, then {:?}", p.plan().rooms().len(), outcome),
    });

    // Removing the selected room hands the selection to the last room
    let before = p.plan().rooms().len();
    let removed = p.remove_selected();
    let last_id = p.plan().rooms().last().map(|r| r.id);
    results.push(TestResult {
        name: "remove_reselects_last".into(),
        passed: removed.is_ok()
            && p.plan().rooms().len() == before - 1
            && p.selection().selected() == last_id,
        detail: format!("selection now {:?}", p.selection().selected()),
    });

    results
}

// ── 3. Openings ─────────────────────────────────────────────────────────

fn validate_openings(_verbose: bool) -> Vec<TestResult> {
    println!("--- Openings ---");
    let mut results = Vec::new();

    let mut p = Planner::default();
    let bedroom = p.place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 200));
    if setup(&mut results, "openings_bedroom", bedroom).is_none() {
        return results;
    }
    let kitchen = p.place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 200));
    if setup(&mut results, "openings_kitchen", kitchen).is_none() {
        return results;
    }

    let shared = p.add_door(Point::new(200, 50), Orientation::Vertical);
    results.push(TestResult {
        name: "door_on_shared_wall".into(),
        passed: shared.is_ok(),
        detail: format!("{:?}", shared.map(|d| d.offset())),
    });

    let outer = p.add_door(Point::new(0, 50), Orientation::Vertical);
    results.push(TestResult {
        name: "bedroom_outer_door_restricted".into(),
        passed: outer
            == Err(PlanError::RestrictedWall(WallRestriction::DoorOnOuterWall(
                RoomCategory::Bedroom,
            ))),
        detail: format!("{:?}", outer.err().map(|e| e.to_string())),
    });

    let kitchen_outer = p.add_door(Point::new(400, 100), Orientation::Vertical);
    results.push(TestResult {
        name: "kitchen_outer_door_allowed".into(),
        passed: kitchen_outer.is_ok(),
        detail: "kitchens may open outside".into(),
    });

    let between = p.add_window(Point::new(200, 150), Orientation::Vertical);
    results.push(TestResult {
        name: "window_between_rooms_restricted".into(),
        passed: between == Err(PlanError::RestrictedWall(WallRestriction::WindowOnSharedWall)),
        detail: format!("{:?}", between.err().map(|e| e.to_string())),
    });

    let window = p.add_window(Point::new(100, 0), Orientation::Horizontal);
    let clash = p.add_window(Point::new(120, 0), Orientation::Horizontal);
    results.push(TestResult {
        name: "window_clearance".into(),
        passed: window.is_ok() && clash == Err(PlanError::Overlap(OverlapKind::Opening)),
        detail: "second window 20 units along the wall collides".into(),
    });

    let interior = p.add_window(Point::new(100, 100), Orientation::Vertical);
    results.push(TestResult {
        name: "interior_point_rejected".into(),
        passed: interior == Err(PlanError::InvalidWallPosition),
        detail: "room interior is not a wall".into(),
    });

    results
}

// ── 4. Furniture ────────────────────────────────────────────────────────

fn validate_furniture(_verbose: bool) -> Vec<TestResult> {
    println!("--- Furniture ---");
    let mut results = Vec::new();

    let mut p = Planner::default();
    let bedroom = p.place_room(RoomRequest::new(RoomCategory::Bedroom, 300, 300));
    if setup(&mut results, "furniture_bedroom", bedroom).is_none() {
        return results;
    }

    let bed = p.place_item(ItemType::Bed, Point::new(10, 10));
    let chair_on_bed = p.place_item(ItemType::Chair, Point::new(20, 20));
    let chair_beside = p.place_item(ItemType::Chair, Point::new(60, 10));
    results.push(TestResult {
        name: "item_overlap".into(),
        passed: bed.is_ok()
            && chair_on_bed == Err(PlanError::Overlap(OverlapKind::Item))
            && chair_beside.is_ok(),
        detail: "chair on the bed rejected, beside it accepted".into(),
    });

    let outside = p.place_item(ItemType::Stove, Point::new(900, 600));
    results.push(TestResult {
        name: "item_outside_rooms".into(),
        passed: outside == Err(PlanError::NotInRoom),
        detail: "stove outside every room".into(),
    });

    // Every catalog entry fits somewhere in a big room
    let mut q = Planner::default();
    let living = q.place_room(RoomRequest::new(RoomCategory::LivingRoom, 1000, 600));
    if setup(&mut results, "catalog_living_room", living).is_none() {
        return results;
    }
    let placed = ItemType::ALL
        .iter()
        .enumerate()
        .filter(|(i, t)| q.place_item(**t, Point::new(10 + *i as i32 * 60, 10)).is_ok())
        .count();
    results.push(TestResult {
        name: "catalog_places".into(),
        passed: placed == ItemType::ALL.len(),
        detail: format!("{}/{} catalog items placed", placed, ItemType::ALL.len()),
    });

    // Four quarter turns bring the footprint back
    let bed = bed.ok();
    let before = bed.and_then(|id| p.plan().item(id).map(|i| i.bounds()));
    let mut turned = 0;
    if let Some(id) = bed {
        for _ in 0..4 {
            if p.rotate_item(id).is_ok() {
                turned += 1;
            }
        }
    }
    let after = bed.and_then(|id| p.plan().item(id).map(|i| i.bounds()));
    results.push(TestResult {
        name: "item_full_turn".into(),
        passed: turned == 4 && before == after,
        detail: format!("{} quarter turns, {:?}", turned, after),
    });

    results
}

// ── 5. Drag & Rotation ──────────────────────────────────────────────────

fn validate_drag_and_rotate(_verbose: bool) -> Vec<TestResult> {
    println!("--- Drag & Rotation ---");
    let mut results = Vec::new();

    // Rotation with an East neighbour succeeds
    let mut p = Planner::default();
    let Some(bedroom) = setup(
        &mut results,
        "rotate_bedroom",
        p.place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 100)),
    ) else {
        return results;
    };
    let bathroom = p.place_room(RoomRequest::new(RoomCategory::Bathroom, 200, 100));
    if setup(&mut results, "rotate_bathroom", bathroom).is_none()
        || setup(&mut results, "rotate_select", p.select(bedroom)).is_none()
    {
        return results;
    }
    let east = p.rotate_selected();
    results.push(TestResult {
        name: "rotate_with_east_neighbour".into(),
        passed: east == Ok(Rect::new(0, 0, 100, 200)),
        detail: format!("{:?}", east),
    });

    // Rotation into a South neighbour reverts byte-for-byte
    let mut q = Planner::default();
    let Some(bedroom) = setup(
        &mut results,
        "blocked_bedroom",
        q.place_room(RoomRequest::new(RoomCategory::Bedroom, 200, 100)),
    ) else {
        return results;
    };
    let bathroom = q.place_room(
        RoomRequest::new(RoomCategory::Bathroom, 200, 100).toward(Direction::South, Alignment::Left),
    );
    if setup(&mut results, "blocked_bathroom", bathroom).is_none()
        || setup(&mut results, "blocked_select", q.select(bedroom)).is_none()
    {
        return results;
    }
    let before = bincode_bytes(q.plan());
    let south = q.rotate_selected();
    results.push(TestResult {
        name: "rotate_into_south_neighbour".into(),
        passed: south == Err(PlanError::Overlap(OverlapKind::Room)) && bincode_bytes(q.plan()) == before,
        detail: format!("{:?}", south),
    });

    // Dragging half off the canvas restores the exact origin
    let mut r = Planner::default();
    let kitchen = r.place_room(RoomRequest::new(RoomCategory::Kitchen, 200, 200));
    let Some(id) = setup(&mut results, "drag_kitchen", kitchen) else {
        return results;
    };
    if setup(&mut results, "drag_reseat", r.move_room(id, Point::new(101, 101))).is_none() {
        return results;
    }
    let origin = r.plan().room(id).map(|room| room.origin());
    let began = r.begin_drag(DragTarget::Room(id), Point::new(150, 150));
    let preview = r.update_drag(Point::new(-40, 150));
    let ended = r.end_drag(Point::new(-40, 150));
    results.push(TestResult {
        name: "drag_off_canvas_reverts".into(),
        passed: began.is_ok()
            && preview.map(|pv| !pv.is_valid()).unwrap_or(false)
            && ended == Err(PlanError::OutOfBounds)
            && r.plan().room(id).map(|room| room.origin()) == origin,
        detail: format!("origin {:?} kept", origin),
    });

    // Snap on commit
    let snapped = r.move_room(id, Point::new(333, 211));
    results.push(TestResult {
        name: "drag_snaps_to_grid".into(),
        passed: snapped == Ok(Point::new(334, 212)),
        detail: format!("{:?}", snapped),
    });

    results
}

// ── 6. Randomized Sweep ─────────────────────────────────────────────────

fn validate_random_sweep(seed: u64, steps: usize, verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Sweep (seed {}, {} steps) ---", seed, steps);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut planner = Planner::default();

    let directions = [Direction::North, Direction::South, Direction::East, Direction::West];
    let alignments = [Alignment::Left, Alignment::Center, Alignment::Right];

    let mut accepted = 0usize;
    let mut rejected = 0usize;
    let mut dirty_rejections = 0usize;
    let mut invariant_breaks = 0usize;

    // Pointer positions range a little past the canvas edges
    let (width, height) = (planner.config().canvas_width, planner.config().canvas_height);
    let pick = |rng: &mut StdRng| {
        Point::new(rng.gen_range(-20..width + 20), rng.gen_range(-20..height + 20))
    };

    for step in 0..steps {
        let before = planner.plan().clone();
        let p = pick(&mut rng);

        let outcome: Result<(), PlanError> = match rng.gen_range(0..9) {
            0 | 1 => {
                let request = RoomRequest::new(
                    RoomCategory::ALL[rng.gen_range(0..RoomCategory::ALL.len())],
                    rng.gen_range(40..=300),
                    rng.gen_range(40..=300),
                )
                .toward(
                    directions[rng.gen_range(0..directions.len())],
                    alignments[rng.gen_range(0..alignments.len())],
                );
                planner.place_room(request).map(|_| ())
            }
            2 => {
                planner.select_at(p);
                planner.rotate_selected().map(|_| ())
            }
            3 => match planner.plan().room_at(p).map(|r| r.id) {
                Some(id) => {
                    let target = pick(&mut rng);
                    planner.move_room(id, target).map(|_| ())
                }
                None => Ok(()),
            },
            4 => {
                let o = if rng.gen_bool(0.5) {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                planner.add_door(p, o).map(|_| ())
            }
            5 => {
                let o = if rng.gen_bool(0.5) {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                planner.add_window(p, o).map(|_| ())
            }
            6 => {
                let t = ItemType::ALL[rng.gen_range(0..ItemType::ALL.len())];
                planner.place_item(t, p).map(|_| ())
            }
            7 => match planner.rotate_item_at(p) {
                Some(r) => r.map(|_| ()),
                None => Ok(()),
            },
            _ => match planner.begin_drag_at(p) {
                Some(Ok(_)) => {
                    let release = pick(&mut rng);
                    let _ = planner.update_drag(release);
                    planner.end_drag(release).map(|_| ())
                }
                Some(Err(e)) => Err(e),
                None => Ok(()),
            },
        };

        match outcome {
            Ok(()) => accepted += 1,
            Err(_) => {
                rejected += 1;
                if *planner.plan() != before {
                    dirty_rejections += 1;
                    if verbose {
                        println!("  step {}: rejection mutated the plan", step);
                    }
                }
            }
        }

        let errors: Vec<_> = [
            validate::check_room_overlaps(planner.plan()),
            validate::check_item_overlaps(planner.plan()),
            validate::check_rooms_within_canvas(planner.plan(), planner.config()),
            validate::check_duplicate_ids(planner.plan()),
        ]
        .into_iter()
        .flatten()
        .filter(|e| e.severity == Severity::Error)
        .collect();
        if !errors.is_empty() {
            invariant_breaks += 1;
            if verbose {
                for e in &errors {
                    println!("  step {}: {}", step, e.message);
                }
            }
        }
    }

    let counts: Vec<String> = Side::ALL
        .iter()
        .map(|side| {
            let n = planner
                .snapshot()
                .rooms
                .iter()
                .flat_map(|r| r.walls.iter())
                .filter(|w| w.side == *side && !w.drawn)
                .count();
            format!("{}={}", side.name(), n)
        })
        .collect();
    if verbose {
        println!(
            "  final plan: {} rooms, {} items, door-gapped walls {}",
            planner.plan().rooms().len(),
            planner.plan().items().len(),
            counts.join(" ")
        );
    }

    results.push(TestResult {
        name: "sweep_made_progress".into(),
        passed: accepted > 0 && !planner.plan().rooms().is_empty(),
        detail: format!("{} accepted, {} rejected", accepted, rejected),
    });
    results.push(TestResult {
        name: "sweep_rejections_clean".into(),
        passed: dirty_rejections == 0,
        detail: format!("{} rejections changed the plan", dirty_rejections),
    });
    results.push(TestResult {
        name: "sweep_invariants_hold".into(),
        passed: invariant_breaks == 0,
        detail: format!("{} steps broke an invariant", invariant_breaks),
    });

    // The final plan survives both save formats
    let bytes = bincode_bytes(planner.plan());
    let binary_ok = persistence::load_plan(&bytes[..])
        .map(|p| p == *planner.plan())
        .unwrap_or(false);
    let mut json = Vec::new();
    let json_ok = persistence::save_plan_json(&mut json, planner.plan()).is_ok()
        && persistence::load_plan_json(&json[..])
            .map(|p| p == *planner.plan())
            .unwrap_or(false);
    results.push(TestResult {
        name: "sweep_roundtrip".into(),
        passed: binary_ok && json_ok,
        detail: format!("{} bytes binary, {} bytes JSON", bytes.len(), json.len()),
    });

    results
}
