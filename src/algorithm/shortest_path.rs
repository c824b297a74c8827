use crate::{
    geometry::{Orientation, Point},
    route_graph::{RouteGraph, RouteNodeId},
};
use derive_more::{Add, Display};
use fixedbitset::FixedBitSet;
use log::{debug, warn};
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

/// Cost added to an edge whose orientation differs from the orientation the
/// current node was reached with.
pub const DEFAULT_TURN_PENALTY: f32 = 5.0;

// Search states per node: one per arrival orientation, plus the start state
// that was not reached by any edge.
const STATES_PER_NODE: usize = 5;
const DEPARTURE: usize = 4;

/// The result of a route computation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum RouteStatus {
    #[display(fmt = "found (cost {})", cost)]
    Found { cost: f32 },
    /// The start or end anchor is not a node of the graph.
    #[display(fmt = "start or end point does not exist in the graph")]
    AnchorMissing,
    /// The search exhausted the graph without reaching the end anchor.
    #[display(fmt = "no path found")]
    Unreachable,
}

impl RouteStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteStatus::Found { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSearch {
    /// Locations from start to end, inclusive. Empty if no path exists.
    pub path: Vec<Point>,
    pub status: RouteStatus,
}

impl PathSearch {
    fn none(status: RouteStatus) -> Self {
        Self {
            path: vec![],
            status,
        }
    }
}

// Used for computing shortest path
#[derive(Debug, Clone, Copy, PartialEq, Default, Add)]
struct RouteCost(f32);

impl RouteCost {
    pub const MAX: Self = Self(f32::INFINITY);
}

impl Eq for RouteCost {}

impl PartialOrd for RouteCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RouteCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn state(node: RouteNodeId, arrival: Option<Orientation>) -> usize {
    node.index() * STATES_PER_NODE + arrival.map_or(DEPARTURE, |o| o.index())
}

fn arrival_of(state: usize) -> Option<Orientation> {
    Orientation::ALL.get(state % STATES_PER_NODE).copied()
}

/// Run Dijkstra's algorithm to compute the cheapest path from `start` to `end`.
///
/// The cost of a path is the sum of its edge weights plus `turn_penalty` for
/// every change of direction. Since the cost of leaving a node depends on how
/// it was entered, the search runs over `(node, arrival orientation)` states.
/// Ties are broken by state index, so the result is deterministic.
pub fn shortest_path(
    graph: &RouteGraph,
    start: &Point,
    end: &Point,
    turn_penalty: f32,
) -> PathSearch {
    let (Some(start_node), Some(end_node)) = (graph.find(start), graph.find(end)) else {
        warn!("start {} or end {} does not exist in the graph", start, end);
        return PathSearch::none(RouteStatus::AnchorMissing);
    };

    let n_states = graph.node_count() * STATES_PER_NODE;
    let mut costs = vec![RouteCost::MAX; n_states];
    let mut previous: Vec<Option<usize>> = vec![None; n_states];
    let mut visited = FixedBitSet::with_capacity(n_states);
    let mut frontier = BinaryHeap::new();

    let start_state = state(start_node, None);
    costs[start_state] = RouteCost(0.0);
    frontier.push(Reverse((RouteCost(0.0), start_state)));

    let mut reached: Option<usize> = None;

    while let Some(Reverse((cost, current))) = frontier.pop() {
        if visited.put(current) {
            continue;
        }

        let Some(node) = graph.node_id(current / STATES_PER_NODE) else { continue };

        if node == end_node {
            reached = Some(current);
            break;
        }

        let Some(from) = graph.location(node) else { continue };
        let arrival = arrival_of(current);

        for neighbor in graph.neighbors(node) {
            let Some(to) = graph.location(neighbor.id) else { continue };
            // Skip diagonal or degenerate edges.
            let Some(direction) = from.orientation_to(&to) else { continue };

            let turn_cost = match arrival {
                Some(a) if a != direction => turn_penalty,
                _ => 0.0,
            };
            let next = state(neighbor.id, Some(direction));
            let alt = cost + RouteCost(neighbor.weight + turn_cost);

            if !visited.contains(next) && alt < costs[next] {
                costs[next] = alt;
                previous[next] = Some(current);
                frontier.push(Reverse((alt, next)));
            }
        }
    }

    let Some(end_state) = reached else {
        warn!("no path found: {} -> {}", start, end);
        return PathSearch::none(RouteStatus::Unreachable);
    };

    // Reconstruct path
    let mut states = vec![end_state];
    let mut current = end_state;

    while let Some(prev) = previous[current] {
        states.push(prev);
        current = prev;
    }

    if current != start_state {
        warn!("no path found: {} -> {}", start, end);
        return PathSearch::none(RouteStatus::Unreachable);
    }

    let path = states
        .iter()
        .rev()
        .filter_map(|s| graph.node_id(s / STATES_PER_NODE))
        .filter_map(|id| graph.location(id))
        .collect::<Vec<_>>();
    let cost = costs[end_state].0;

    debug!("shortest path: {} points, cost {}", path.len(), cost);
    PathSearch {
        path,
        status: RouteStatus::Found { cost },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_turns(path: &[Point]) -> usize {
        let directions = path
            .windows(2)
            .filter_map(|w| w[0].orientation_to(&w[1]))
            .collect::<Vec<_>>();

        directions.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn simple_two_point_path() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let mut g = RouteGraph::new();
        let na = g.add_node(a);
        let nb = g.add_node(b);
        g.add_edge(na, nb);

        let search = shortest_path(&g, &a, &b, DEFAULT_TURN_PENALTY);

        assert_eq!(search.path, vec![a, b]);
        assert_eq!(search.status, RouteStatus::Found { cost: 10.0 });
    }

    #[test]
    fn disconnected_graph_has_no_path() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let mut g = RouteGraph::new();
        let na = g.add_node(a);
        let nb = g.add_node(b);
        // only b -> a
        g.add_edge(nb, na);

        let search = shortest_path(&g, &a, &b, DEFAULT_TURN_PENALTY);

        assert!(search.path.is_empty());
        assert_eq!(search.status, RouteStatus::Unreachable);
    }

    #[test]
    fn missing_anchor() {
        let a = Point::new(0.0, 0.0);
        let mut g = RouteGraph::new();
        g.add_node(a);

        let search = shortest_path(&g, &a, &Point::new(10.0, 0.0), DEFAULT_TURN_PENALTY);

        assert!(search.path.is_empty());
        assert_eq!(search.status, RouteStatus::AnchorMissing);
        assert_eq!(search.status.to_string(), "start or end point does not exist in the graph");
    }

    #[test]
    fn start_equals_end() {
        let a = Point::new(5.0, 5.0);
        let mut g = RouteGraph::new();
        g.add_node(a);

        let search = shortest_path(&g, &a, &a, DEFAULT_TURN_PENALTY);

        assert_eq!(search.path, vec![a]);
        assert_eq!(search.status, RouteStatus::Found { cost: 0.0 });
    }

    #[test]
    fn prefers_fewer_turns() {
        //  S------A
        //  |      |
        //  B------C
        //         |
        //         E
        let s = Point::new(0.0, 0.0);
        let a = Point::new(10.0, 0.0);
        let b = Point::new(0.0, 5.0);
        let c = Point::new(10.0, 5.0);
        let e = Point::new(10.0, 10.0);

        let mut g = RouteGraph::new();
        let [ns, na, nb, nc, ne] = [s, a, b, c, e].map(|p| g.add_node(p));
        g.add_edge(ns, nb);
        g.add_edge(nb, nc);
        g.add_edge(nc, ne);
        g.add_edge(ns, na);
        g.add_edge(na, ne);

        let search = shortest_path(&g, &s, &e, DEFAULT_TURN_PENALTY);

        assert_eq!(search.path, vec![s, a, e]);
        assert_eq!(search.status, RouteStatus::Found { cost: 25.0 });
        assert_eq!(count_turns(&search.path), 1);
    }

    #[test]
    fn turn_penalty_on_dense_grid() {
        let mut points = vec![];
        for y in [0.0, 10.0, 20.0, 30.0] {
            for x in [0.0, 10.0, 20.0, 30.0] {
                points.push(Point::new(x, y));
            }
        }
        let g = RouteGraph::build(points, &[]);
        let (s, e) = (Point::new(0.0, 0.0), Point::new(30.0, 30.0));

        let search = shortest_path(&g, &s, &e, DEFAULT_TURN_PENALTY);

        assert_eq!(search.path.first(), Some(&s));
        assert_eq!(search.path.last(), Some(&e));
        assert_eq!(search.path.len(), 7);
        assert_eq!(count_turns(&search.path), 1);
        assert_eq!(search.status, RouteStatus::Found { cost: 65.0 });

        // deterministic
        assert_eq!(shortest_path(&g, &s, &e, DEFAULT_TURN_PENALTY), search);
    }

    #[test]
    fn skips_diagonal_edges() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        let mut g = RouteGraph::new();
        let na = g.add_node(a);
        let nb = g.add_node(b);
        g.add_edge(na, nb);

        let search = shortest_path(&g, &a, &b, DEFAULT_TURN_PENALTY);

        assert_eq!(search.status, RouteStatus::Unreachable);
    }
}
