//! 2D geometry primitives
//!
//! All coordinates are logical pixels. A `Rect` is an origin plus a size;
//! widgets keep their bounds in local space and map them to a shared global
//! space when comparing across the tree.

use std::ops::{Add, Sub};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by an offset
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Inclusive on all edges
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Move the rectangle by an offset, keeping its size
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::from_origin_size(self.origin.offset(dx, dy), self.size)
    }

    /// Nearest point of the rectangle to `point`; `point` itself when inside.
    pub fn closest_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.left(), self.right().max(self.left())),
            point.y.clamp(self.top(), self.bottom().max(self.top())),
        )
    }

    /// Minimum Euclidean distance from `point` to this rectangle.
    ///
    /// Zero when the point lies inside or on the boundary.
    pub fn distance_to_point(&self, point: Point) -> f32 {
        point.distance_to(self.closest_point(point))
    }

    /// Distance from `point` to the farthest of the four corners
    pub fn farthest_corner_distance(&self, point: Point) -> f32 {
        self.corners()
            .iter()
            .map(|c| point.distance_to(*c))
            .fold(0.0, f32::max)
    }

    /// Whether a circle of `radius` around `center` reaches this rectangle.
    ///
    /// True iff the minimum distance from `center` to the rectangle is `<= radius`.
    pub fn intersects_circle(&self, center: Point, radius: f32) -> bool {
        self.distance_to_point(center) <= radius
    }

    /// Intersection of two rectangles, or `None` if they don't overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}
