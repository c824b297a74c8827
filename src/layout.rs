//! Routing engine
//!
//! Algorithm
//! ---------
//!
//! Consider two rectangles `A` and `B` with a connection point on one edge of each:
//!
//! ```svgbob
//! +-------+                +-------+
//! |   A   o                o   B   |
//! |       |                |       |
//! +-------+                +-------+
//! ```
//!
//! The rules for drawing the connection are shown below:
//!
//! - The connection leaves and enters each rectangle perpendicular to the edge its connection
//!   point sits on.
//! - Connections can only go horizontally or vertically and can turn at right angles.
//! - Connections keep a clearance (*margin*) from both rectangles.
//! - Connections should choose the shortest path with the fewest turns.
//!
//! To calculate the path, we use the _expanded obstacles_ approach: every rectangle is inflated
//! by the margin and the plane around the inflated rectangles is covered with a grid.
//!
//! 1. Validate both connection points.
//! 2. Draw grid lines at the inflated edges, the outer bounding box and through each
//!    connection point.
//! 3. Place nine grid points in every grid cell.
//! 4. Remove grid points covered by an inflated rectangle, but keep the ones on the outer
//!    bounding box.
//! 5. Add both *anchors* (connection points shifted outward by the margin) and connect every
//!    grid point to its nearest neighbors horizontally and vertically.
//! 6. Run Dijkstra's algorithm with a penalty for every turn.
//!
//! ```svgbob
//!   o....o....o....o.........o....o....o....o
//!   :  +---------+ :         :  +---------+ :
//!   o..|    A    |.o....o....o..|    B    |.o
//!   :  |         o-*-------->*--o         | :
//!   o..|         |.o....o....o..|         |.o
//!   :  +---------+ :         :  +---------+ :
//!   o....o....o....o.........o....o....o....o
//! ```
use crate::{
    algorithm::{shortest_path, PathSearch, RouteStatus, DEFAULT_TURN_PENALTY},
    connection::{validate, ConnectionPoint},
    error::RouteError,
    geometry::{Point, Rect},
    grid::{GridLines, PointFilter},
    route_graph::RouteGraph,
};
use derive_builder::Builder;
use log::debug;

/// Clearance between the route and the rectangles, if not specified.
pub const DEFAULT_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct RouteOptions {
    /// Clearance applied to both rectangles.
    pub margin: f32,
    /// Extra cost for every change of direction.
    pub turn_penalty: f32,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            turn_penalty: DEFAULT_TURN_PENALTY,
        }
    }
}

impl RouteOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(margin) = self.margin {
            if !(margin.is_finite() && margin >= 0.0) {
                return Err(format!("margin must be a non-negative number, got {}", margin));
            }
        }
        if let Some(turn_penalty) = self.turn_penalty {
            if !(turn_penalty.is_finite() && turn_penalty >= 0.0) {
                return Err(format!(
                    "turn penalty must be a non-negative number, got {}",
                    turn_penalty
                ));
            }
        }
        Ok(())
    }
}

/// A computed route together with the grid and graph it was searched on.
#[derive(Debug, Clone)]
pub struct Route {
    pub grid: GridLines,
    pub graph: RouteGraph,
    /// From the start anchor to the end anchor. Empty if no path exists.
    pub path: Vec<Point>,
    pub status: RouteStatus,
    /// Start and end anchors.
    pub anchors: [Point; 2],
}

impl Route {
    pub fn horizontal_lines(&self) -> &[f32] {
        &self.grid.horizontal
    }

    pub fn vertical_lines(&self) -> &[f32] {
        &self.grid.vertical
    }

    pub fn is_found(&self) -> bool {
        self.status.is_found()
    }
}

pub trait RoutingEngine {
    /// Compute a route from `connection1` on `rect1` to `connection2` on `rect2`.
    ///
    /// Fails if a connection point is not on its rectangle's edge or does not face
    /// outward. A missing path is not an error: the route has an empty `path`.
    fn compute_route(
        &self,
        rect1: &Rect,
        rect2: &Rect,
        connection1: &ConnectionPoint,
        connection2: &ConnectionPoint,
    ) -> Result<Route, RouteError>;
}

#[derive(Debug, Clone, Default)]
pub struct OrthogonalRouter {
    options: RouteOptions,
}

impl OrthogonalRouter {
    pub fn new(options: RouteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }
}

impl RoutingEngine for OrthogonalRouter {
    fn compute_route(
        &self,
        rect1: &Rect,
        rect2: &Rect,
        connection1: &ConnectionPoint,
        connection2: &ConnectionPoint,
    ) -> Result<Route, RouteError> {
        let margin = self.options.margin;
        let rects = [rect1, rect2];
        let connections = [connection1, connection2];

        for (n, (rect, connection)) in rects.iter().zip(connections).enumerate() {
            validate(rect, connection).map_err(|e| e.for_connector(n + 1))?;
        }

        let grid = GridLines::build(rects, connections, margin);
        debug!(
            "grid lines: {} horizontal, {} vertical",
            grid.horizontal.len(),
            grid.vertical.len()
        );

        let filter = PointFilter::new(rects, margin, grid.bounds());
        let points = filter.apply(grid.cell_points());
        let anchors = [
            connection1.anchor(rect1, margin),
            connection2.anchor(rect2, margin),
        ];
        let graph = RouteGraph::build(points, &anchors);

        let PathSearch { path, status } =
            shortest_path(&graph, &anchors[0], &anchors[1], self.options.turn_penalty);

        debug!("route {} -> {}: {}", anchors[0], anchors[1], status);

        Ok(Route {
            grid,
            graph,
            path,
            status,
            anchors,
        })
    }
}

/// Compute a route with the default turn penalty and the given `margin`.
///
/// Unlike [`RouteOptionsBuilder`], which rejects them, a negative or non-finite
/// margin is clamped to `0`.
pub fn compute_route(
    rect1: &Rect,
    rect2: &Rect,
    connection1: &ConnectionPoint,
    connection2: &ConnectionPoint,
    margin: f32,
) -> Result<Route, RouteError> {
    let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
    let router = OrthogonalRouter::new(RouteOptions {
        margin,
        ..RouteOptions::default()
    });

    router.compute_route(rect1, rect2, connection1, connection2)
}
