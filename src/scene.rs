//! Scene: two rectangles, their connection points and routing options.
use crate::{
    connection::ConnectionPoint,
    error::{RouteError, SceneError},
    geometry::{Orientation, Rect},
    layout::{OrthogonalRouter, Route, RouteOptions, RouteOptionsBuilder, RoutingEngine},
    parser::{parser, Angle, Statement},
};
use chumsky::Parser;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub rects: [Rect; 2],
    pub connections: [ConnectionPoint; 2],
    pub options: RouteOptions,
}

impl Scene {
    pub fn new(rects: [Rect; 2], connections: [ConnectionPoint; 2], options: RouteOptions) -> Self {
        Self {
            rects,
            connections,
            options,
        }
    }

    /// Parses a scene description (see [`crate::parser`]).
    pub fn parse(src: &str) -> Result<Self, SceneError> {
        let statements = parser().parse(src).map_err(SceneError::Syntax)?;

        Self::from_statements(statements)
    }

    pub fn from_statements(statements: Vec<Statement>) -> Result<Self, SceneError> {
        let mut options = RouteOptionsBuilder::default();
        let mut shapes: Vec<(Rect, ConnectionPoint)> = vec![];

        for statement in statements {
            match statement {
                Statement::Margin(margin) => {
                    options.margin(margin);
                }
                Statement::TurnPenalty(turn_penalty) => {
                    options.turn_penalty(turn_penalty);
                }
                Statement::Rect {
                    center,
                    size,
                    port,
                    angle,
                } => {
                    let orientation = match angle {
                        Angle::Named(orientation) => orientation,
                        Angle::Degrees(degrees) => Orientation::from_degrees(degrees)
                            .ok_or(RouteError::UnknownAngle(degrees))?,
                    };

                    shapes.push((Rect::new(center, size), ConnectionPoint::new(port, orientation)));
                }
            }
        }

        let [(rect1, connection1), (rect2, connection2)]: [(Rect, ConnectionPoint); 2] = shapes
            .try_into()
            .map_err(|shapes: Vec<_>| SceneError::RectCount(shapes.len()))?;

        Ok(Self::new(
            [rect1, rect2],
            [connection1, connection2],
            options.build()?,
        ))
    }

    pub fn route(&self) -> Result<Route, RouteError> {
        let [rect1, rect2] = &self.rects;
        let [connection1, connection2] = &self.connections;

        OrthogonalRouter::new(self.options).compute_route(rect1, rect2, connection1, connection2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithm::RouteStatus, geometry::Point};

    const SRC: &str = "
margin 10
rect (100, 100) 50 x 50 port (125, 100) right
rect (300, 100) 50 x 50 port (275, 100) 0deg
";

    #[test]
    fn parse_scene() {
        let scene = Scene::parse(SRC).unwrap();

        assert_eq!(scene.rects[1].position, Point::new(300.0, 100.0));
        assert_eq!(scene.connections[0].orientation, Orientation::Right);
        assert_eq!(scene.connections[1].orientation, Orientation::Left);
        assert_eq!(scene.options.margin, 10.0);
        assert_eq!(scene.options.turn_penalty, RouteOptions::default().turn_penalty);
    }

    #[test]
    fn route_scene() {
        let route = Scene::parse(SRC).unwrap().route().unwrap();

        assert_eq!(route.status, RouteStatus::Found { cost: 130.0 });
        assert_eq!(route.path.len(), 3);
    }

    #[test]
    fn wrong_number_of_rects() {
        let err = Scene::parse("rect (0, 0) 10 x 10 port (5, 0) right").unwrap_err();
        assert!(matches!(err, SceneError::RectCount(1)));

        let err = Scene::parse("margin 3").unwrap_err();
        assert!(matches!(err, SceneError::RectCount(0)));
    }

    #[test]
    fn unknown_degrees() {
        let src = "
rect (0, 0) 10 x 10 port (5, 0) 45deg
rect (50, 0) 10 x 10 port (45, 0) left
";
        let err = Scene::parse(src).unwrap_err();

        assert!(matches!(err, SceneError::Angle(RouteError::UnknownAngle(45))));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let src = "
margin -5
rect (0, 0) 10 x 10 port (5, 0) right
rect (50, 0) 10 x 10 port (45, 0) left
";
        let err = Scene::parse(src).unwrap_err();

        assert!(matches!(err, SceneError::Options(_)));
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            Scene::parse("rect 1 2"),
            Err(SceneError::Syntax(_))
        ));
    }
}
