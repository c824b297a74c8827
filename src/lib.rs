pub mod algorithm;
pub mod connection;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod parser;
pub mod renderer;
pub mod route_graph;
pub mod scene;

pub use layout::{compute_route, OrthogonalRouter, Route, RouteOptions, RoutingEngine};
