//! The seam between the planners and the game engine.
//!
//! The planners never touch the board or the budgets directly; they go
//! through two traits. [`BoardOracle`] is the read side: stateless queries
//! against the current snapshot. [`GameApi`] adds the write side: placement
//! and upgrade attempts whose return values are ground truth, plus the
//! budget views the planners size their batches with.
//!
//! Queries reflect our own same-turn placements: once a wall is accepted,
//! later path and occupancy queries within the turn see it.

pub mod state;

pub use state::GameState;

use crate::board::location::{Edge, Location};
use crate::board::map::{AttackerInfo, Side};
use crate::board::unit::{StationaryKind, UnitKind};

/// Read-only queries against the current board snapshot.
pub trait BoardOracle {
    /// Returns true if a stationary unit occupies the location.
    fn contains_stationary_unit(&self, loc: Location) -> bool;

    /// All structures able to hit the location, from the side attacking
    /// `victim`, with their per-hit damage.
    fn attackers_of(&self, loc: Location, victim: Side) -> Vec<AttackerInfo>;

    /// Shortest path from `start` to any cell of `edge`, or `None` when
    /// the start is blocked or walled off.
    fn shortest_path_to_edge(&self, start: Location, edge: Edge) -> Option<Vec<Location>>;
}

/// The full per-turn interface the planners run against.
///
/// Placement and upgrade calls are attempts: the arbiter validates
/// occupancy, zone, and affordability, and the returned count or flag is
/// the only truth about what happened. Rejected attempts cost nothing.
pub trait GameApi: BoardOracle {
    /// The current turn number.
    fn turn(&self) -> u32;

    /// Remaining structure points, reflecting same-turn spends.
    fn structure_points(&self) -> f64;

    /// Remaining mobile points, reflecting same-turn spends.
    fn mobile_points(&self) -> f64;

    /// How many more units of the kind the current budget can pay for.
    fn affordable(&self, kind: UnitKind) -> u32;

    /// Attempts up to `per_location` placements of `kind` at each listed
    /// location, in order, and returns how many were accepted.
    fn attempt_place(&mut self, kind: UnitKind, locations: &[Location], per_location: u32)
        -> u32;

    /// Attempts an in-place upgrade of our structure at the location.
    fn attempt_upgrade(&mut self, loc: Location) -> bool;

    /// Locations of a side's structures of one kind, in a fixed scan order.
    fn structures_of(&self, side: Side, kind: StationaryKind) -> Vec<Location>;

    /// Returns true if the structure at the location is upgraded.
    fn is_upgraded(&self, loc: Location) -> bool;
}
