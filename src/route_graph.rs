//! Sparse visibility graph over grid points.
//!
//! Every grid point becomes a node. A node is connected to the grid point at the immediately
//! adjacent coordinate on its horizontal and vertical line, if that point survived filtering.
//! A missing neighbor means an obstacle blocks the line of sight, so the scan never skips past
//! a gap.
//!
//! ```svgbob
//!   o---o---o---o
//!   |   |   |   |
//!   o---o   o---o     (gap: no edge across the obstacle)
//!   |   |   |   |
//!   o---o---o---o
//! ```
use crate::geometry::{Point, PointKey};
use log::debug;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use smallvec::SmallVec;
use std::{collections::HashMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteNodeId(NodeIndex);

impl RouteNodeId {
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

impl fmt::Display for RouteNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.index())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteNode {
    location: Point,
}

impl RouteNode {
    pub fn new(location: Point) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &Point {
        &self.location
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEdge {
    weight: f32,
}

impl RouteEdge {
    pub fn weight(&self) -> f32 {
        self.weight
    }
}

/// A neighbor of a node and the weight of the edge leading to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: RouteNodeId,
    pub weight: f32,
}

/// Routes in a plane represented by a directed graph.
///
/// Nodes live in an arena and are addressed by [`RouteNodeId`]; a quantized
/// [`PointKey`] lookup maps locations to nodes.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    graph: DiGraph<RouteNode, RouteEdge>,
    keys: HashMap<PointKey, RouteNodeId>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph over `points` and `anchors`.
    ///
    /// Duplicate points collapse into one node: the first occurrence decides the
    /// node order, the last one its location. Anchors are added if absent.
    pub fn build(points: impl IntoIterator<Item = Point>, anchors: &[Point]) -> Self {
        let mut route_graph = Self::new();

        for p in points {
            route_graph.add_node(p);
        }
        for a in anchors {
            if !route_graph.contains(a) {
                route_graph.add_node(*a);
            }
        }

        route_graph.connect_adjacent_nodes();
        debug!(
            "route graph: {} nodes, {} edges",
            route_graph.node_count(),
            route_graph.edge_count()
        );
        route_graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = RouteNodeId> {
        self.graph.node_indices().map(RouteNodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RouteNode> {
        self.graph.node_weights()
    }

    /// Returns the id of the `index`-th node.
    pub fn node_id(&self, index: usize) -> Option<RouteNodeId> {
        (index < self.graph.node_count()).then(|| RouteNodeId(NodeIndex::new(index)))
    }

    pub fn get_node(&self, id: RouteNodeId) -> Option<&RouteNode> {
        self.graph.node_weight(id.0)
    }

    pub fn location(&self, id: RouteNodeId) -> Option<Point> {
        self.get_node(id).map(|n| n.location)
    }

    pub fn find(&self, location: &Point) -> Option<RouteNodeId> {
        self.keys.get(&location.key()).copied()
    }

    pub fn contains(&self, location: &Point) -> bool {
        self.keys.contains_key(&location.key())
    }

    /// Adds a node at `location`, or returns the node already placed there
    /// (its location is replaced by `location`).
    pub fn add_node(&mut self, location: Point) -> RouteNodeId {
        if let Some(id) = self.find(&location) {
            self.graph[id.0].location = location;
            return id;
        }

        let id = RouteNodeId(self.graph.add_node(RouteNode::new(location)));
        self.keys.insert(location.key(), id);
        id
    }

    /// Adds an edge from `a` to `b` weighted by their Manhattan distance.
    /// Does nothing if the edge already exists or either node is missing.
    pub fn add_edge(&mut self, a: RouteNodeId, b: RouteNodeId) {
        let (Some(p), Some(q)) = (self.location(a), self.location(b)) else { return };

        if self.graph.find_edge(a.0, b.0).is_none() {
            self.graph.add_edge(
                a.0,
                b.0,
                RouteEdge {
                    weight: p.distance(&q),
                },
            );
        }
    }

    /// Returns outgoing neighbors in the order they were added.
    pub fn neighbors(&self, id: RouteNodeId) -> SmallVec<[Neighbor; 4]> {
        let mut neighbors: SmallVec<[Neighbor; 4]> = self
            .graph
            .edges(id.0)
            .map(|e| Neighbor {
                id: RouteNodeId(e.target()),
                weight: e.weight().weight,
            })
            .collect();

        // petgraph lists the most recent edge first.
        neighbors.reverse();
        neighbors
    }

    /// Returns `(source, target, weight)` of every edge.
    pub fn edges(&self) -> impl Iterator<Item = (RouteNodeId, RouteNodeId, f32)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (RouteNodeId(e.source()), RouteNodeId(e.target()), e.weight().weight))
    }

    /// Connects every node to the node at the adjacent x (left, right) and y
    /// (up, down) coordinate, if there is one.
    fn connect_adjacent_nodes(&mut self) {
        // y -> x -> node
        let mut rows: HashMap<i64, HashMap<i64, RouteNodeId>> = HashMap::new();

        for (key, id) in self.keys.iter() {
            rows.entry(key.y).or_default().insert(key.x, *id);
        }

        let mut xs = self.keys.keys().map(|k| k.x).collect::<Vec<_>>();
        let mut ys = self.keys.keys().map(|k| k.y).collect::<Vec<_>>();
        xs.sort_unstable();
        xs.dedup();
        ys.sort_unstable();
        ys.dedup();

        let lookup = |x: i64, y: i64| rows.get(&y).and_then(|row| row.get(&x)).copied();
        let mut edges: Vec<(RouteNodeId, RouteNodeId)> = vec![];

        for id in self.node_ids() {
            let key = self.graph[id.0].location.key();
            let (Ok(xi), Ok(yi)) = (xs.binary_search(&key.x), ys.binary_search(&key.y)) else {
                continue;
            };

            let left = xi.checked_sub(1).and_then(|i| lookup(xs[i], key.y));
            let right = xs.get(xi + 1).and_then(|x| lookup(*x, key.y));
            let up = yi.checked_sub(1).and_then(|i| lookup(key.x, ys[i]));
            let down = ys.get(yi + 1).and_then(|y| lookup(key.x, *y));

            for dest in [left, right, up, down] {
                let Some(dest) = dest else { continue };
                edges.push((id, dest));
            }
        }

        for (a, b) in edges {
            self.add_edge(a, b);
        }
    }
}
