//! Connection points and their validation.
use crate::{
    error::RouteError,
    geometry::{Orientation, Point, Rect},
};

/// A point on a rectangle edge where a route attaches, together with the
/// outward normal of that edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    pub point: Point,
    pub orientation: Orientation,
}

impl ConnectionPoint {
    pub fn new(point: Point, orientation: Orientation) -> Self {
        Self { point, orientation }
    }

    /// Creates a connection point from an angle in degrees (see [`Orientation`]).
    pub fn with_degrees(point: Point, degrees: i32) -> Result<Self, RouteError> {
        let orientation =
            Orientation::from_degrees(degrees).ok_or(RouteError::UnknownAngle(degrees))?;

        Ok(Self::new(point, orientation))
    }

    /// Returns the edge of `rect` the point sits on.
    ///
    /// If the point is on a corner, the declared orientation picks one of the two
    /// edges. Returns `None` if the point is not on the boundary.
    pub fn side(&self, rect: &Rect) -> Option<Orientation> {
        let sides = rect.sides_at(&self.point);

        if sides.contains(&self.orientation) {
            Some(self.orientation)
        } else {
            sides.first().copied()
        }
    }

    /// The point where the route actually starts or ends: the connection point
    /// moved outward by `margin` along the normal of its edge.
    pub fn anchor(&self, rect: &Rect, margin: f32) -> Point {
        match self.side(rect) {
            Some(side) => self.point.moved(side, margin),
            None => self.point,
        }
    }
}

/// Checks that `connection` lies on the boundary of `rect` and faces outward.
///
/// The connector number in a returned error is `0`; callers that validate more
/// than one connector re-number it with [`RouteError::for_connector`].
pub fn validate(rect: &Rect, connection: &ConnectionPoint) -> Result<(), RouteError> {
    let sides = rect.sides_at(&connection.point);

    if sides.is_empty() {
        return Err(RouteError::PointNotOnEdge {
            connector: 0,
            point: connection.point,
        });
    }
    if !sides.contains(&connection.orientation) {
        return Err(RouteError::InvalidAngle {
            connector: 0,
            point: connection.point,
            orientation: connection.orientation,
        });
    }

    Ok(())
}

impl RouteError {
    pub fn for_connector(self, n: usize) -> Self {
        match self {
            RouteError::PointNotOnEdge { point, .. } => RouteError::PointNotOnEdge {
                connector: n,
                point,
            },
            RouteError::InvalidAngle {
                point, orientation, ..
            } => RouteError::InvalidAngle {
                connector: n,
                point,
                orientation,
            },
            e => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn rect() -> Rect {
        Rect::new(Point::new(100.0, 100.0), Size::new(50.0, 50.0))
    }

    #[test]
    fn accepts_points_on_every_edge() {
        let r = rect();

        for (p, o) in [
            (Point::new(75.0, 90.0), Orientation::Left),
            (Point::new(110.0, 75.0), Orientation::Up),
            (Point::new(125.0, 100.0), Orientation::Right),
            (Point::new(80.0, 125.0), Orientation::Down),
        ] {
            assert_eq!(validate(&r, &ConnectionPoint::new(p, o)), Ok(()), "{}", p);
        }
    }

    #[test]
    fn rejects_interior_and_exterior_points() {
        let r = rect();

        for p in [
            Point::new(100.0, 100.0),
            Point::new(124.0, 100.0),
            Point::new(126.0, 100.0),
            Point::new(125.0, 130.0),
            Point::new(300.0, 75.0),
        ] {
            let conn = ConnectionPoint::new(p, Orientation::Right);
            let Err(RouteError::PointNotOnEdge { point, .. }) = validate(&r, &conn) else {
                panic!("{} should not be on the edge", p);
            };
            assert_eq!(point, p);
        }
    }

    #[test]
    fn only_the_outward_angle_passes() {
        let r = rect();
        let p = Point::new(100.0, 75.0);

        for o in Orientation::ALL {
            let result = validate(&r, &ConnectionPoint::new(p, o));

            if o == Orientation::Up {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result, Err(RouteError::InvalidAngle { .. })));
            }
        }
    }

    #[test]
    fn degrees_follow_fixed_mapping() {
        let r = rect();

        // top edge, 90 degrees
        let conn = ConnectionPoint::with_degrees(Point::new(100.0, 75.0), 90).unwrap();
        assert!(validate(&r, &conn).is_ok());

        // right edge, 90 degrees
        let conn = ConnectionPoint::with_degrees(Point::new(125.0, 100.0), 90).unwrap();
        assert!(validate(&r, &conn).is_err());

        assert_eq!(
            ConnectionPoint::with_degrees(Point::new(125.0, 100.0), 30),
            Err(RouteError::UnknownAngle(30))
        );
    }

    #[test]
    fn corner_accepts_both_normals() {
        let r = rect();
        let corner = Point::new(125.0, 75.0);

        for o in [Orientation::Up, Orientation::Right] {
            let conn = ConnectionPoint::new(corner, o);
            assert!(validate(&r, &conn).is_ok());
            assert_eq!(conn.side(&r), Some(o));
        }

        let conn = ConnectionPoint::new(corner, Orientation::Left);
        assert!(validate(&r, &conn).is_err());
    }

    #[test]
    fn anchor_is_shifted_by_margin() {
        let r = rect();
        let conn = ConnectionPoint::new(Point::new(100.0, 125.0), Orientation::Down);

        assert_eq!(conn.anchor(&r, 10.0), Point::new(100.0, 135.0));
        assert_eq!(conn.anchor(&r, 0.0), Point::new(100.0, 125.0));
    }

    #[test]
    fn error_is_renumbered() {
        let r = rect();
        let conn = ConnectionPoint::new(Point::new(100.0, 100.0), Orientation::Up);
        let err = validate(&r, &conn).unwrap_err().for_connector(2);

        assert_eq!(
            err.to_string(),
            "connection point 2 at (100, 100) is not on the edge of its rectangle"
        );
    }
}
