//! Pure layout logic for the floor planner.
//!
//! This crate contains the whole layout and constraint-validation engine,
//! independent of any windowing toolkit. Functions take plain data and
//! return results, so every rule is unit-testable and the same engine can
//! back a desktop canvas, a headless harness, or a server.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Shared walls, outer walls, nearest wall, door-cut walls |
//! | [`config`] | Canvas bounds, grid step and tolerances (JSON-loadable) |
//! | [`constants`] | Default tolerances, item catalog sizes, room colors |
//! | [`drag`] | Idle → Dragging → commit/revert state machine |
//! | [`error`] | Typed rejection reasons for every command |
//! | [`furniture`] | Item placement, quarter-turn rotation, dragging |
//! | [`geometry`] | Points, rectangles, wall segments, grid snapping |
//! | [`model`] | Rooms, openings, placed items, the `Plan` aggregate |
//! | [`openings`] | Door/window placement and wall restrictions |
//! | [`persistence`] | Binary and JSON save/load |
//! | [`placement`] | Relative room placement with row-wrap, move, rotate, remove |
//! | [`planner`] | Command surface bundling plan, selection, drag and config |
//! | [`render`] | Render-ready snapshot with door-gapped walls |
//! | [`selection`] | Selected room and placement reference |
//! | [`validate`] | Whole-plan consistency checks |

pub mod adjacency;
pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod furniture;
pub mod geometry;
pub mod model;
pub mod openings;
pub mod persistence;
pub mod placement;
pub mod planner;
pub mod render;
pub mod selection;
pub mod validate;

pub use error::PlanError;
pub use planner::Planner;
