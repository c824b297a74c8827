//! Plane geometry.
//!
//! coordinate system: top-left origin, y grows downwards.
//!
//! ```svgbob
//! +--------------------------> x
//! | (0, 0)           (300, 0)
//! |
//! | (0, 100)
//! v y
//! ```
use derive_more::Display;
use smallvec::SmallVec;

/// Tolerance used to decide whether a coordinate sits on a line or an edge.
pub const EDGE_TOLERANCE: f32 = 0.01;

/// Resolution of [`PointKey`]: coordinates are rounded to `1 / QUANTUM`.
pub const QUANTUM: f32 = 1000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn key(&self) -> PointKey {
        PointKey::new(self)
    }

    /// Manhattan (L1) distance.
    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Returns the point moved by `distance` along `orientation`.
    pub fn moved(&self, orientation: Orientation, distance: f32) -> Self {
        match orientation {
            Orientation::Left => Self::new(self.x - distance, self.y),
            Orientation::Right => Self::new(self.x + distance, self.y),
            Orientation::Up => Self::new(self.x, self.y - distance),
            Orientation::Down => Self::new(self.x, self.y + distance),
        }
    }

    /// Returns the orientation of the axis-aligned segment `self -> to`.
    ///
    /// Returns `None` if both points share a key or differ in both axes.
    pub fn orientation_to(&self, to: &Point) -> Option<Orientation> {
        let (a, b) = (self.key(), to.key());

        if a.x == b.x && a.y != b.y {
            Some(if b.y < a.y {
                Orientation::Up
            } else {
                Orientation::Down
            })
        } else if a.y == b.y && a.x != b.x {
            Some(if b.x < a.x {
                Orientation::Left
            } else {
                Orientation::Right
            })
        } else {
            None
        }
    }
}

/// Quantized coordinates of a [`Point`], used as a hash key so that numerically
/// equal points map to the same graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}:{}", x, y)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
}

impl PointKey {
    pub fn new(point: &Point) -> Self {
        Self {
            x: quantize(point.x),
            y: quantize(point.y),
        }
    }
}

pub fn quantize(value: f32) -> i64 {
    (value * QUANTUM).round() as i64
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EDGE_TOLERANCE
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The outward normal of a rectangle edge.
///
/// Angles in degrees are mapped as follows:
///
/// ```svgbob
///              Up (90)
///            +---------+
///  Left (0)  |         |  Right (180)
///            +---------+
///             Down (270)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Orientation {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "right")]
    Right,
    #[display(fmt = "down")]
    Down,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Left,
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
    ];

    /// Returns the orientation for a canonical angle (0, 90, 180 or 270 degrees,
    /// modulo 360).
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Orientation::Left),
            90 => Some(Orientation::Up),
            180 => Some(Orientation::Right),
            270 => Some(Orientation::Down),
            _ => None,
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Orientation::Left => 0,
            Orientation::Up => 90,
            Orientation::Right => 180,
            Orientation::Down => 270,
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// A rectangle positioned by its center.
///
/// ```svgbob
///           minX    midX    maxX
///            *----------*----------* minY
///            |                     |
///            |                     |
///            *     (position)      * midY
///            |                     |
///            |                     |
///            *----------*----------* maxY
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    pub fn center(&self) -> Point {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn min_x(&self) -> f32 {
        self.position.x - self.size.width / 2.0
    }

    pub fn max_x(&self) -> f32 {
        self.position.x + self.size.width / 2.0
    }

    pub fn min_y(&self) -> f32 {
        self.position.y - self.size.height / 2.0
    }

    pub fn max_y(&self) -> f32 {
        self.position.y + self.size.height / 2.0
    }

    /// Returns a rectangle grown by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.position,
            Size::new(
                self.size.width + margin * 2.0,
                self.size.height + margin * 2.0,
            ),
        )
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.min_x().min(other.min_x());
        let max_x = self.max_x().max(other.max_x());
        let min_y = self.min_y().min(other.min_y());
        let max_y = self.max_y().max(other.max_y());

        Self::new(
            Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
            Size::new(max_x - min_x, max_y - min_y),
        )
    }

    /// Edges are included.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Returns the outward normals of all edges `p` lies on, in the order
    /// left, up, right, down. A corner lies on two edges.
    pub fn sides_at(&self, p: &Point) -> SmallVec<[Orientation; 2]> {
        let within_x = p.x >= self.min_x() - EDGE_TOLERANCE && p.x <= self.max_x() + EDGE_TOLERANCE;
        let within_y = p.y >= self.min_y() - EDGE_TOLERANCE && p.y <= self.max_y() + EDGE_TOLERANCE;
        let mut sides = SmallVec::new();

        if within_y && approx_eq(p.x, self.min_x()) {
            sides.push(Orientation::Left);
        }
        if within_x && approx_eq(p.y, self.min_y()) {
            sides.push(Orientation::Up);
        }
        if within_y && approx_eq(p.x, self.max_x()) {
            sides.push(Orientation::Right);
        }
        if within_x && approx_eq(p.y, self.max_y()) {
            sides.push(Orientation::Down);
        }

        sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(Point::new(100.0, 100.0), Size::new(50.0, 50.0))
    }

    #[test]
    fn rect_extents() {
        let r = rect();

        assert_eq!(r.min_x(), 75.0);
        assert_eq!(r.max_x(), 125.0);
        assert_eq!(r.min_y(), 75.0);
        assert_eq!(r.max_y(), 125.0);

        let r = r.inflate(10.0);
        assert_eq!(r.min_x(), 65.0);
        assert_eq!(r.max_y(), 135.0);
    }

    #[test]
    fn rect_union() {
        let a = rect();
        let b = Rect::new(Point::new(300.0, 150.0), Size::new(50.0, 100.0));
        let u = a.union(&b);

        assert_eq!(u.min_x(), 75.0);
        assert_eq!(u.max_x(), 325.0);
        assert_eq!(u.min_y(), 75.0);
        assert_eq!(u.max_y(), 200.0);
    }

    #[test]
    fn sides_at_edges_and_corners() {
        let r = rect();

        assert_eq!(r.sides_at(&Point::new(125.0, 100.0)).as_slice(), &[Orientation::Right]);
        assert_eq!(r.sides_at(&Point::new(100.0, 75.0)).as_slice(), &[Orientation::Up]);
        assert_eq!(
            r.sides_at(&Point::new(75.0, 125.0)).as_slice(),
            &[Orientation::Left, Orientation::Down]
        );
        assert!(r.sides_at(&Point::new(100.0, 100.0)).is_empty());
        assert!(r.sides_at(&Point::new(125.0, 200.0)).is_empty());
    }

    #[test]
    fn orientation_degrees() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_degrees(o.degrees()), Some(o));
        }
        assert_eq!(Orientation::from_degrees(-90), Some(Orientation::Down));
        assert_eq!(Orientation::from_degrees(450), Some(Orientation::Up));
        assert_eq!(Orientation::from_degrees(45), None);
    }

    #[test]
    fn orientation_between_points() {
        let p = Point::new(10.0, 10.0);

        assert_eq!(p.orientation_to(&Point::new(10.0, 0.0)), Some(Orientation::Up));
        assert_eq!(p.orientation_to(&Point::new(10.0, 20.0)), Some(Orientation::Down));
        assert_eq!(p.orientation_to(&Point::new(0.0, 10.0)), Some(Orientation::Left));
        assert_eq!(p.orientation_to(&Point::new(20.0, 10.0)), Some(Orientation::Right));
        assert_eq!(p.orientation_to(&Point::new(20.0, 20.0)), None);
        assert_eq!(p.orientation_to(&p), None);
    }

    #[test]
    fn point_key_quantizes() {
        let a = Point::new(0.3001, 1.0);
        let b = Point::new(0.3, 1.0);

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Point::new(0.302, 1.0).key());
        assert_eq!(a.key().to_string(), "300:1000");
    }

    #[test]
    fn moved_along_orientation() {
        let p = Point::new(125.0, 100.0);

        assert_eq!(p.moved(Orientation::Right, 10.0), Point::new(135.0, 100.0));
        assert_eq!(p.moved(Orientation::Up, 10.0), Point::new(125.0, 90.0));
    }
}
