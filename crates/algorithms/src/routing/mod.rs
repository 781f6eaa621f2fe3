//! Path finding around obstacles
//!
//! - **shortest_path**: A* search over a point grid that avoids polygons

mod shortest_path;

pub use shortest_path::{shortest_path, ShortestPath, ShortestPathParams};
