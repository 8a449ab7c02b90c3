//! Spatial primitives shared by every layer of the layout engine.
//!
//! All coordinates are integer canvas units. Rectangles are axis-aligned and
//! described by their top-left corner plus size; `y` grows downwards.

use serde::{Deserialize, Serialize};

/// A point on the planning canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x.saturating_sub(origin.x), self.y.saturating_sub(origin.y))
    }

    pub fn translate(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Axis-aligned rectangle (top-left corner + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }
    /// Edges saturate at the `i32` limits, so oversized rectangles read as
    /// lying past the canvas instead of wrapping around.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }
    pub fn top(&self) -> i32 {
        self.y
    }
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, moved so its top-left corner sits at `origin`.
    pub fn at(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// Width and height swapped around the same top-left corner.
    pub fn rotated(&self) -> Rect {
        Rect::new(self.x, self.y, self.height, self.width)
    }

    pub fn contains(&self, p: Point) -> bool {
        rect_contains(self, p)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        rects_intersect(self, other)
    }

    /// True if the whole rectangle lies inside `[0, width] × [0, height]`.
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width && self.bottom() <= height
    }

    /// The wall segment along one side of the rectangle.
    pub fn wall(&self, side: Side) -> WallSegment {
        match side {
            Side::Left => WallSegment::new(
                Point::new(self.left(), self.top()),
                Point::new(self.left(), self.bottom()),
            ),
            Side::Right => WallSegment::new(
                Point::new(self.right(), self.top()),
                Point::new(self.right(), self.bottom()),
            ),
            Side::Top => WallSegment::new(
                Point::new(self.left(), self.top()),
                Point::new(self.right(), self.top()),
            ),
            Side::Bottom => WallSegment::new(
                Point::new(self.left(), self.bottom()),
                Point::new(self.right(), self.bottom()),
            ),
        }
    }

    /// Perpendicular distance from `p` to the infinite line carrying `side`.
    pub fn distance_to_wall_line(&self, side: Side, p: Point) -> i32 {
        match side {
            Side::Left => distance(p.x, self.left()),
            Side::Right => distance(p.x, self.right()),
            Side::Top => distance(p.y, self.top()),
            Side::Bottom => distance(p.y, self.bottom()),
        }
    }
}

/// Closed-interval containment: points on the boundary are inside.
pub fn rect_contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.left() && p.x <= rect.right() && p.y >= rect.top() && p.y <= rect.bottom()
}

/// Interior intersection. Rectangles that only touch along an edge do not
/// intersect, so neighbouring rooms can share a wall with zero gap.
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.left()
        || b.right() <= a.left()
        || a.bottom() <= b.top()
        || b.bottom() <= a.top())
}

/// Round `value` to the nearest multiple of `step` (halves round up).
pub fn snap_to_grid(value: i32, step: i32) -> i32 {
    if step <= 1 {
        return value;
    }
    value
        .saturating_add(step / 2)
        .div_euclid(step)
        .saturating_mul(step)
}

/// `|a - b|`, clamped to `i32::MAX`.
pub fn distance(a: i32, b: i32) -> i32 {
    i32::try_from(a.abs_diff(b)).unwrap_or(i32::MAX)
}

pub fn snap_point(p: Point, step: i32) -> Point {
    Point::new(snap_to_grid(p.x, step), snap_to_grid(p.y, step))
}

/// One of the four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Scan order used whenever sides compete (e.g. nearest-wall ties).
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Left and right walls run vertically.
    pub fn orientation(self) -> Orientation {
        match self {
            Side::Left | Side::Right => Orientation::Vertical,
            Side::Top | Side::Bottom => Orientation::Horizontal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Direction a wall or opening runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// A zero-width wall between two points on a shared x or y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: Point,
    pub end: Point,
}

impl WallSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn orientation(&self) -> Orientation {
        if self.start.x == self.end.x {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn length(&self) -> i32 {
        distance(self.end.x, self.start.x).saturating_add(distance(self.end.y, self.start.y))
    }

    /// The coordinate shared by every point of the wall (x for vertical walls).
    pub fn line(&self) -> i32 {
        match self.orientation() {
            Orientation::Vertical => self.start.x,
            Orientation::Horizontal => self.start.y,
        }
    }

    /// The `[lo, hi]` extent along the running axis.
    pub fn span(&self) -> (i32, i32) {
        match self.orientation() {
            Orientation::Vertical => (self.start.y.min(self.end.y), self.start.y.max(self.end.y)),
            Orientation::Horizontal => {
                (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
            }
        }
    }
}

/// Strict overlap of two `[lo, hi]` intervals (touching endpoints don't count).
pub fn spans_overlap(a: (i32, i32), b: (i32, i32)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 200, 200);
        let b = Rect::new(200, 0, 150, 150);
        assert!(!rects_intersect(&a, &b));
        assert!(!rects_intersect(&b, &a));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0, 0, 200, 200);
        let b = Rect::new(199, 199, 10, 10);
        assert!(rects_intersect(&a, &b));
    }

    #[test]
    fn containment_is_closed() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(30, 30)));
        assert!(!r.contains(Point::new(31, 30)));
        assert!(!r.contains(Point::new(9, 15)));
    }

    #[test]
    fn snap_rounds_to_nearest() {
        assert_eq!(snap_to_grid(7, 2), 8);
        assert_eq!(snap_to_grid(6, 2), 6);
        assert_eq!(snap_to_grid(14, 10), 10);
        assert_eq!(snap_to_grid(15, 10), 20);
        assert_eq!(snap_to_grid(-3, 2), -2);
        assert_eq!(snap_to_grid(123, 1), 123);
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(snap_to_grid(i32::MAX, 2), i32::MAX - 1);
        assert_eq!(snap_to_grid(i32::MIN, 3), i32::MIN);
        let huge = Rect::new(100, 100, i32::MAX, i32::MAX);
        assert_eq!(huge.right(), i32::MAX);
        assert_eq!(huge.bottom(), i32::MAX);
        assert!(!huge.within(1300, 850));
        assert_eq!(Point::new(i32::MIN, 0).offset_from(Point::new(10, 0)), Point::new(i32::MIN, 0));
        assert_eq!(distance(i32::MIN, i32::MAX), i32::MAX);
    }

    #[test]
    fn within_canvas() {
        assert!(Rect::new(0, 0, 100, 100).within(100, 100));
        assert!(!Rect::new(-1, 0, 100, 100).within(200, 200));
        assert!(!Rect::new(150, 0, 100, 100).within(200, 200));
    }

    #[test]
    fn walls_follow_sides() {
        let r = Rect::new(0, 0, 200, 100);
        let right = r.wall(Side::Right);
        assert_eq!(right.orientation(), Orientation::Vertical);
        assert_eq!(right.line(), 200);
        assert_eq!(right.span(), (0, 100));
        assert_eq!(right.length(), 100);
        let bottom = r.wall(Side::Bottom);
        assert_eq!(bottom.orientation(), Orientation::Horizontal);
        assert_eq!(bottom.line(), 100);
        assert_eq!(bottom.length(), 200);
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let r = Rect::new(5, 5, 200, 100).rotated();
        assert_eq!(r, Rect::new(5, 5, 100, 200));
    }
}
