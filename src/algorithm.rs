pub(crate) mod shortest_path;

pub use shortest_path::{shortest_path, PathSearch, RouteStatus, DEFAULT_TURN_PENALTY};
