//! Routing grid around two obstacles.
//!
//! ## Definition
//!
//! - **Grid line** - a horizontal (y) or vertical (x) coordinate that partitions the plane.
//! - **Cell** - the rectangle between two adjacent horizontal and two adjacent vertical lines.
//! - **Grid point** - a candidate waypoint. Every cell contributes nine of them: four corners,
//!   four edge midpoints and its center.
//! - **Outer extremes** - the bounding box of both margin-inflated obstacles. Points on it are
//!   always routable.
//!
//! ```svgbob
//!  minX                                    maxX
//!   o....o....o....o.........o....o....o....o minY
//!   :  +---------+ :         :  +---------+ :
//!   o..|    A    |.o....o....o..|    B    |.o
//!   :  |         o-*--------->*-o         | :
//!   o..|         |.o....o....o..|         |.o
//!   :  +---------+ :         :  +---------+ :
//!   o....o....o....o.........o....o....o....o maxY
//! ```
use crate::{
    connection::ConnectionPoint,
    geometry::{approx_eq, quantize, Orientation, Point, Rect},
};

/// Horizontal and vertical grid lines, strictly ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// y coordinates
    pub horizontal: Vec<f32>,
    /// x coordinates
    pub vertical: Vec<f32>,
    bounds: Option<Rect>,
}

impl GridLines {
    /// Builds grid lines for two obstacles and their connection points.
    ///
    /// A connection point whose side cannot be determined adds no line.
    pub fn build(rects: [&Rect; 2], connections: [&ConnectionPoint; 2], margin: f32) -> Self {
        let mut horizontal = vec![];
        let mut vertical = vec![];

        let inflated = rects.map(|r| r.inflate(margin));

        for r in &inflated {
            horizontal.extend([r.min_y(), r.max_y()]);
            vertical.extend([r.min_x(), r.max_x()]);
        }

        let bounds = inflated[0].union(&inflated[1]);
        horizontal.extend([bounds.min_y(), bounds.max_y()]);
        vertical.extend([bounds.min_x(), bounds.max_x()]);

        // A grid line passes through every connector.
        for (rect, conn) in rects.iter().zip(connections) {
            match conn.side(rect) {
                Some(Orientation::Left | Orientation::Right) => horizontal.push(conn.point.y),
                Some(Orientation::Up | Orientation::Down) => vertical.push(conn.point.x),
                None => {}
            }
        }

        Self {
            horizontal: sorted_lines(horizontal),
            vertical: sorted_lines(vertical),
            bounds: Some(bounds),
        }
    }

    /// Creates grid lines from arbitrary coordinates. Lines are sorted and deduplicated.
    pub fn from_lines(horizontal: Vec<f32>, vertical: Vec<f32>) -> Self {
        Self {
            horizontal: sorted_lines(horizontal),
            vertical: sorted_lines(vertical),
            bounds: None,
        }
    }

    /// Bounding box of both margin-inflated obstacles.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// The number of cells.
    pub fn cell_count(&self) -> usize {
        self.horizontal.len().saturating_sub(1) * self.vertical.len().saturating_sub(1)
    }

    /// Emits nine points per cell.
    ///
    /// ```svgbob
    /// NW      N      NE
    ///  *------*------*
    ///  |             |
    ///  *W     *C     *E
    ///  |             |
    ///  *------*------*
    /// SW      S      SE
    /// ```
    ///
    /// Adjacent cells share corners and edges, so the result contains duplicates.
    pub fn cell_points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.cell_count() * 9);

        for ys in self.horizontal.windows(2) {
            let (y1, y2) = (ys[0], ys[1]);
            let cy = (y1 + y2) / 2.0;

            for xs in self.vertical.windows(2) {
                let (x1, x2) = (xs[0], xs[1]);
                let cx = (x1 + x2) / 2.0;

                points.extend([
                    // corners
                    Point::new(x1, y1),
                    Point::new(x2, y1),
                    Point::new(x2, y2),
                    Point::new(x1, y2),
                    // edges
                    Point::new(cx, y1),
                    Point::new(x2, cy),
                    Point::new(cx, y2),
                    Point::new(x1, cy),
                    // center
                    Point::new(cx, cy),
                ]);
            }
        }

        points
    }
}

fn sorted_lines(mut lines: Vec<f32>) -> Vec<f32> {
    lines.retain(|v| v.is_finite());
    lines.sort_by(f32::total_cmp);
    // same resolution as graph node keys
    lines.dedup_by_key(|v| quantize(*v));
    lines
}

/// Removes grid points covered by the margin-inflated obstacles.
#[derive(Debug, Clone)]
pub struct PointFilter {
    obstacles: Vec<Rect>,
    bounds: Option<Rect>,
}

impl PointFilter {
    pub fn new(rects: [&Rect; 2], margin: f32, bounds: Option<Rect>) -> Self {
        Self {
            obstacles: rects.iter().map(|r| r.inflate(margin)).collect(),
            bounds,
        }
    }

    /// Whether `p` lies on one of the outer extremes.
    pub fn is_on_bounds(&self, p: &Point) -> bool {
        let Some(b) = self.bounds else { return false };

        approx_eq(p.x, b.min_x())
            || approx_eq(p.x, b.max_x())
            || approx_eq(p.y, b.min_y())
            || approx_eq(p.y, b.max_y())
    }

    /// Points on the outer extremes always pass, even when an obstacle covers them.
    pub fn is_routable(&self, p: &Point) -> bool {
        self.is_on_bounds(p) || !self.obstacles.iter().any(|r| r.contains_point(p))
    }

    pub fn apply(&self, points: impl IntoIterator<Item = Point>) -> Vec<Point> {
        points.into_iter().filter(|p| self.is_routable(p)).collect()
    }
}
