//! Board representation.
//!
//! Contains the arena geometry, unit kinds, the stationary occupancy map,
//! and the BFS adapter behind the pathfinding oracle.

pub mod location;
pub mod map;
pub mod nav;
pub mod unit;

pub use location::{friendly_edge_locations, Edge, Location, ARENA_SIZE, HALF_ARENA};
pub use map::{AttackerInfo, GameMap, Side, Structure};
pub use nav::shortest_path_to_edge;
pub use unit::{MobileKind, StationaryKind, UnitKind, UNIT_KIND_COUNT};
