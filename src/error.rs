use crate::{
    geometry::{Orientation, Point},
    layout::RouteOptionsBuilderError,
};
use chumsky::error::Simple;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("connection point {connector} at {point} is not on the edge of its rectangle")]
    PointNotOnEdge { connector: usize, point: Point },
    #[error("connection angle {connector} ({orientation}) at {point} is not perpendicular to its edge or not facing outward")]
    InvalidAngle {
        connector: usize,
        point: Point,
        orientation: Orientation,
    },
    #[error("`{0}` degrees is not a canonical connection angle")]
    UnknownAngle(i32),
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("syntax error in scene description")]
    Syntax(Vec<Simple<char>>),
    #[error("a scene needs exactly two rectangles, found {0}")]
    RectCount(usize),
    #[error(transparent)]
    Angle(#[from] RouteError),
    #[error("invalid routing options: {0}")]
    Options(#[from] RouteOptionsBuilderError),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O failure")]
    IoFailure(#[from] io::Error),
}
