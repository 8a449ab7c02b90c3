//! Save/Load of a plan.
//!
//! Binary saves use bincode; the same [`SaveData`] layout can also be written
//! as JSON for hand-editable files. Rooms are written before items, each in
//! insertion order, so identical plans always produce identical bytes.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::model::{ItemId, PlacedItem, Plan, Room, RoomId};

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Rooms with their doors and windows
    pub rooms: Vec<Room>,
    /// Furniture and fixtures
    pub items: Vec<PlacedItem>,
    /// Id counters, so ids of deleted rooms are not handed out again
    pub next_room_id: RoomId,
    pub next_item_id: ItemId,
}

impl From<&Plan> for SaveData {
    fn from(plan: &Plan) -> Self {
        Self {
            version: SAVE_VERSION,
            rooms: plan.rooms.clone(),
            items: plan.items.clone(),
            next_room_id: plan.next_room_id,
            next_item_id: plan.next_item_id,
        }
    }
}

impl SaveData {
    fn into_plan(self) -> Result<Plan, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        let mut plan = Plan::from_parts(self.rooms, self.items);
        // A hand-edited file may carry stale counters; never go below the ids in use
        plan.next_room_id = plan.next_room_id.max(self.next_room_id);
        plan.next_item_id = plan.next_item_id.max(self.next_item_id);
        Ok(plan)
    }
}

/// Save the plan to a writer in binary form
pub fn save_plan<W: Write>(writer: W, plan: &Plan) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &SaveData::from(plan))?;
    Ok(())
}

/// Load a plan from a binary save
pub fn load_plan<R: Read>(reader: R) -> Result<Plan, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;
    save_data.into_plan()
}

/// Save the plan as pretty-printed JSON
pub fn save_plan_json<W: Write>(writer: W, plan: &Plan) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &SaveData::from(plan))?;
    Ok(())
}

/// Load a plan from JSON
pub fn load_plan_json<R: Read>(reader: R) -> Result<Plan, SaveError> {
    let save_data: SaveData = serde_json::from_reader(reader)?;
    save_data.into_plan()
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, Point, Rect};
    use crate::model::{ItemType, Opening, RoomCategory};

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        let a = plan.push_room(Rect::new(0, 0, 200, 200), RoomCategory::Bedroom);
        plan.push_room(Rect::new(200, 0, 150, 150), RoomCategory::Bathroom);
        let room = plan.room_mut(a).unwrap();
        room.doors
            .push(Opening::door(Point::new(200, 50), Orientation::Vertical, 200));
        room.windows
            .push(Opening::window(Point::new(0, 100), Orientation::Vertical));
        let bed = plan.push_item(ItemType::Bed, Point::new(10, 10));
        plan.item_mut(bed).unwrap().rotate();
        plan
    }

    #[test]
    fn test_save_load_roundtrip() {
        let plan = sample_plan();

        let mut save_buffer = Vec::new();
        save_plan(&mut save_buffer, &plan).expect("Save failed");
        let loaded = load_plan(&save_buffer[..]).expect("Load failed");
        assert_eq!(loaded, plan);

        // Saving the loaded plan reproduces the same bytes
        let mut again = Vec::new();
        save_plan(&mut again, &loaded).expect("Save failed");
        assert_eq!(again, save_buffer);
    }

    #[test]
    fn test_json_roundtrip() {
        let plan = sample_plan();
        let mut json = Vec::new();
        save_plan_json(&mut json, &plan).expect("Save failed");
        let text = String::from_utf8(json.clone()).unwrap();
        assert!(text.contains("\"Bathroom\""));
        assert!(text.contains("\"bed\""));
        assert_eq!(load_plan_json(&json[..]).expect("Load failed"), plan);
    }

    #[test]
    fn test_removed_ids_stay_retired() {
        let mut plan = sample_plan();
        plan.remove_room(1);
        let mut buf = Vec::new();
        save_plan(&mut buf, &plan).unwrap();
        let mut loaded = load_plan(&buf[..]).unwrap();
        let id = loaded.push_room(Rect::new(400, 0, 10, 10), RoomCategory::Kitchen);
        assert_eq!(id, 2);
    }

    #[test]
    fn test_version_mismatch() {
        let mut data = SaveData::from(&sample_plan());
        data.version = SAVE_VERSION + 1;
        let bytes = bincode::serialize(&data).unwrap();
        match load_plan(&bytes[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let mut buf = Vec::new();
        save_plan(&mut buf, &sample_plan()).unwrap();
        buf.truncate(buf.len() / 2);
        assert!(matches!(load_plan(&buf[..]), Err(SaveError::Bincode(_))));
    }
}
