//! Entities of a floor plan: rooms with their openings, placed items, and
//! the [`Plan`] aggregate that owns them.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::constants::{catalog, colors};
use crate::geometry::{Orientation, Point, Rect, Side, WallSegment};

/// Stable room identifier, unique within a plan.
pub type RoomId = u32;
/// Stable placed-item identifier, unique within a plan.
pub type ItemId = u32;

/// Display color handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ── Rooms ───────────────────────────────────────────────────────────────

/// Closed set of room categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 4] = [
        RoomCategory::Bedroom,
        RoomCategory::Bathroom,
        RoomCategory::Kitchen,
        RoomCategory::LivingRoom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RoomCategory::Bedroom => "Bedroom",
            RoomCategory::Bathroom => "Bathroom",
            RoomCategory::Kitchen => "Kitchen",
            RoomCategory::LivingRoom => "Living Room",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn color(self) -> Color {
        match self {
            RoomCategory::Bedroom => colors::BEDROOM,
            RoomCategory::Bathroom => colors::BATHROOM,
            RoomCategory::Kitchen => colors::KITCHEN,
            RoomCategory::LivingRoom => colors::LIVING_ROOM,
        }
    }

    /// Bedrooms and bathrooms may only have doors onto another room.
    pub fn restricts_outer_doors(self) -> bool {
        matches!(self, RoomCategory::Bedroom | RoomCategory::Bathroom)
    }
}

/// Door or window; only the length semantics differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningKind {
    /// Length of the wall the door was cut into, along its orientation.
    Door { length: i32 },
    Window,
}

/// A door or window attached to one wall of its owning room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    /// Offset from the owning room's top-left corner.
    pub offset_x: i32,
    pub offset_y: i32,
    pub orientation: Orientation,
    pub kind: OpeningKind,
}

impl Opening {
    pub fn door(offset: Point, orientation: Orientation, length: i32) -> Self {
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            orientation,
            kind: OpeningKind::Door { length },
        }
    }

    pub fn window(offset: Point, orientation: Orientation) -> Self {
        Self {
            offset_x: offset.x,
            offset_y: offset.y,
            orientation,
            kind: OpeningKind::Window,
        }
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, OpeningKind::Door { .. })
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Absolute canvas position for a room whose origin is `room_origin`.
    pub fn position(&self, room_origin: Point) -> Point {
        room_origin.translate(self.offset_x, self.offset_y)
    }

    /// Drawn length: the stored wall length for doors, the fixed length for windows.
    pub fn length(&self, config: &PlannerConfig) -> i32 {
        match self.kind {
            OpeningKind::Door { length } => length,
            OpeningKind::Window => config.window_length,
        }
    }

    /// Span this opening reserves on its wall when checking conflicts.
    pub fn clearance(&self, config: &PlannerConfig) -> i32 {
        match self.kind {
            OpeningKind::Door { length } => length,
            OpeningKind::Window => config.window_clearance,
        }
    }
}

/// An axis-aligned rectangular room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub category: RoomCategory,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
}

impl Room {
    pub fn new(id: RoomId, rect: Rect, category: RoomCategory) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            category,
            doors: Vec::new(),
            windows: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn color(&self) -> Color {
        self.category.color()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect().contains(p)
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.rect().intersects(&other.rect())
    }

    pub fn wall(&self, side: Side) -> WallSegment {
        self.rect().wall(side)
    }

    /// Length of a wall running in `orientation` (height for vertical walls).
    pub fn wall_length(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    /// Doors first, then windows.
    pub fn openings(&self) -> impl Iterator<Item = &Opening> {
        self.doors.iter().chain(self.windows.iter())
    }

    pub(crate) fn set_origin(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

// ── Furniture & fixtures ────────────────────────────────────────────────

/// Closed catalog of placeable furniture and fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Bed,
    Chair,
    Table,
    Sofa,
    DiningSet,
    Commode,
    Washbasin,
    Shower,
    KitchenSink,
    Stove,
}

impl ItemType {
    pub const ALL: [ItemType; 10] = [
        ItemType::Bed,
        ItemType::Chair,
        ItemType::Table,
        ItemType::Sofa,
        ItemType::DiningSet,
        ItemType::Commode,
        ItemType::Washbasin,
        ItemType::Shower,
        ItemType::KitchenSink,
        ItemType::Stove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemType::Bed => "bed",
            ItemType::Chair => "chair",
            ItemType::Table => "table",
            ItemType::Sofa => "sofa",
            ItemType::DiningSet => "dining_set",
            ItemType::Commode => "commode",
            ItemType::Washbasin => "washbasin",
            ItemType::Shower => "shower",
            ItemType::KitchenSink => "kitchen_sink",
            ItemType::Stove => "stove",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Plumbing fixtures, as opposed to movable furniture.
    pub fn is_fixture(self) -> bool {
        matches!(
            self,
            ItemType::Commode
                | ItemType::Washbasin
                | ItemType::Shower
                | ItemType::KitchenSink
                | ItemType::Stove
        )
    }

    /// Catalog `(width, height)` at rotation 0.
    pub fn size(self) -> (i32, i32) {
        match self {
            ItemType::Bed => catalog::BED,
            ItemType::Chair => catalog::CHAIR,
            ItemType::Table => catalog::TABLE,
            ItemType::Sofa => catalog::SOFA,
            ItemType::DiningSet => catalog::DINING_SET,
            ItemType::Commode => catalog::COMMODE,
            ItemType::Washbasin => catalog::WASHBASIN,
            ItemType::Shower => catalog::SHOWER,
            ItemType::KitchenSink => catalog::KITCHEN_SINK,
            ItemType::Stove => catalog::STOVE,
        }
    }
}

/// Quarter-turn rotation of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Next quarter turn clockwise, wrapping at 360.
    pub fn next(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

/// A furniture or fixture instance on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub x: i32,
    pub y: i32,
    pub item_type: ItemType,
    /// Current footprint; swapped on every quarter turn.
    pub width: i32,
    pub height: i32,
    pub rotation: Rotation,
}

impl PlacedItem {
    pub fn new(id: ItemId, item_type: ItemType, at: Point) -> Self {
        let (width, height) = item_type.size();
        Self {
            id,
            x: at.x,
            y: at.y,
            item_type,
            width,
            height,
            rotation: Rotation::Deg0,
        }
    }

    pub fn is_fixture(&self) -> bool {
        self.item_type.is_fixture()
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned bounding box after rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    pub fn intersects(&self, other: &PlacedItem) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    pub(crate) fn set_origin(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    pub(crate) fn rotate(&mut self) {
        self.rotation = self.rotation.next();
        std::mem::swap(&mut self.width, &mut self.height);
    }
}

// ── Plan aggregate ──────────────────────────────────────────────────────

/// Everything the user has drawn: rooms in insertion order plus placed items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub(crate) rooms: Vec<Room>,
    pub(crate) items: Vec<PlacedItem>,
    pub(crate) next_room_id: RoomId,
    pub(crate) next_item_id: ItemId,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a plan from persisted parts; id counters resume past the
    /// largest ids present.
    pub fn from_parts(rooms: Vec<Room>, items: Vec<PlacedItem>) -> Self {
        let next_room_id = rooms.iter().map(|r| r.id.saturating_add(1)).max().unwrap_or(0);
        let next_item_id = items.iter().map(|i| i.id.saturating_add(1)).max().unwrap_or(0);
        Self {
            rooms,
            items,
            next_room_id,
            next_item_id,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.items.is_empty()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Option<&mut PlacedItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// First room (in insertion order) containing `p`, edges included.
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    /// First item (in insertion order) containing `p`, edges included.
    pub fn item_at(&self, p: Point) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.contains(p))
    }

    /// True if `rect` intersects any room other than `exclude`.
    pub fn room_overlaps(&self, rect: &Rect, exclude: Option<RoomId>) -> bool {
        self.rooms
            .iter()
            .filter(|r| Some(r.id) != exclude)
            .any(|r| r.rect().intersects(rect))
    }

    /// True if `rect` intersects any item other than `exclude`.
    pub fn item_overlaps(&self, rect: &Rect, exclude: Option<ItemId>) -> bool {
        self.items
            .iter()
            .filter(|i| Some(i.id) != exclude)
            .any(|i| i.bounds().intersects(rect))
    }

    pub(crate) fn push_room(&mut self, rect: Rect, category: RoomCategory) -> RoomId {
        let id = self.next_room_id;
        self.next_room_id = self.next_room_id.saturating_add(1);
        self.rooms.push(Room::new(id, rect, category));
        id
    }

    pub(crate) fn push_item(&mut self, item_type: ItemType, at: Point) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id = self.next_item_id.saturating_add(1);
        self.items.push(PlacedItem::new(id, item_type, at));
        id
    }

    /// Remove a room together with its openings.
    pub(crate) fn remove_room(&mut self, id: RoomId) -> Option<Room> {
        let index = self.rooms.iter().position(|r| r.id == id)?;
        Some(self.rooms.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_colors_and_names() {
        assert_eq!(RoomCategory::Bedroom.color(), Color::rgb(144, 238, 144));
        assert_eq!(RoomCategory::LivingRoom.name(), "Living Room");
        assert_eq!(
            RoomCategory::from_name("Living Room"),
            Some(RoomCategory::LivingRoom)
        );
        assert_eq!(RoomCategory::from_name("Garage"), None);
        assert!(RoomCategory::Bathroom.restricts_outer_doors());
        assert!(!RoomCategory::Kitchen.restricts_outer_doors());
    }

    #[test]
    fn catalog_lookup() {
        assert_eq!(ItemType::Bed.size(), (30, 40));
        assert_eq!(ItemType::Stove.size(), (40, 35));
        assert!(ItemType::Shower.is_fixture());
        assert!(!ItemType::Sofa.is_fixture());
        assert_eq!(ItemType::from_name("dining_set"), Some(ItemType::DiningSet));
        for t in ItemType::ALL {
            assert_eq!(ItemType::from_name(t.name()), Some(t));
        }
    }

    #[test]
    fn item_rotation_swaps_footprint() {
        let mut item = PlacedItem::new(0, ItemType::Table, Point::new(10, 10));
        item.rotate();
        assert_eq!(item.rotation, Rotation::Deg90);
        assert_eq!((item.width, item.height), (30, 44));
        item.rotate();
        item.rotate();
        item.rotate();
        assert_eq!(item.rotation, Rotation::Deg0);
        assert_eq!((item.width, item.height), (44, 30));
    }

    #[test]
    fn ids_are_stable_and_resume_after_load() {
        let mut plan = Plan::new();
        let a = plan.push_room(Rect::new(0, 0, 10, 10), RoomCategory::Kitchen);
        let b = plan.push_room(Rect::new(10, 0, 10, 10), RoomCategory::Kitchen);
        assert_eq!((a, b), (0, 1));
        plan.remove_room(a);
        let c = plan.push_room(Rect::new(0, 0, 10, 10), RoomCategory::Kitchen);
        assert_eq!(c, 2);

        let rebuilt = Plan::from_parts(plan.rooms.clone(), Vec::new());
        assert_eq!(rebuilt.next_room_id, 3);
        assert_eq!(rebuilt.next_item_id, 0);
    }

    #[test]
    fn hit_testing_prefers_insertion_order() {
        let mut plan = Plan::new();
        let a = plan.push_room(Rect::new(0, 0, 100, 100), RoomCategory::Bedroom);
        let b = plan.push_room(Rect::new(100, 0, 100, 100), RoomCategory::Bathroom);
        assert_eq!(plan.room_at(Point::new(100, 50)).map(|r| r.id), Some(a));
        assert_eq!(plan.room_at(Point::new(150, 50)).map(|r| r.id), Some(b));
        assert!(plan.room_at(Point::new(250, 50)).is_none());
    }

    #[test]
    fn opening_lengths() {
        let config = PlannerConfig::default();
        let door = Opening::door(Point::new(200, 50), Orientation::Vertical, 200);
        let window = Opening::window(Point::new(0, 50), Orientation::Vertical);
        assert_eq!(door.length(&config), 200);
        assert_eq!(window.length(&config), 15);
        assert_eq!(window.clearance(&config), 30);
        assert_eq!(door.position(Point::new(10, 10)), Point::new(210, 60));
    }
}
