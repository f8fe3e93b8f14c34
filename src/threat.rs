//! Threat estimation along hypothetical mobile-unit paths.
//!
//! Both deployment questions reduce to the same primitive: how much damage
//! per sub-step do the structures in range of a cell deal. Two aggregations
//! are built on it. Exit-tile mode prices a lane by its last cell only --
//! the sprint units modeled here take their beating where they leave our
//! territory, not mid-path. Whole-path mode sums every cell and is what the
//! defensive-lane scorer wants, since slower defensive units soak fire all
//! the way up.
//!
//! An unpathable lane is not an error; it is the worst possible lane.

use std::cmp::Ordering;

use crate::board::location::{Edge, Location};
use crate::board::map::Side;
use crate::game::BoardOracle;

/// The estimated cost of walking a lane.
#[derive(Debug, Clone, Copy)]
pub enum PathRisk {
    /// Expected damage along the evaluated cells.
    Damage(f64),
    /// No path exists; compares greater than any damage.
    Unreachable,
}

impl PathRisk {
    pub const fn is_unreachable(self) -> bool {
        matches!(self, PathRisk::Unreachable)
    }

    /// The damage value, or `None` when unreachable.
    pub const fn damage(self) -> Option<f64> {
        match self {
            PathRisk::Damage(d) => Some(d),
            PathRisk::Unreachable => None,
        }
    }
}

impl PartialEq for PathRisk {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathRisk {}

impl PartialOrd for PathRisk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathRisk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathRisk::Damage(a), PathRisk::Damage(b)) => a.total_cmp(b),
            (PathRisk::Damage(_), PathRisk::Unreachable) => Ordering::Less,
            (PathRisk::Unreachable, PathRisk::Damage(_)) => Ordering::Greater,
            (PathRisk::Unreachable, PathRisk::Unreachable) => Ordering::Equal,
        }
    }
}

/// Damage per sub-step a friendly mobile unit takes standing on the cell:
/// the sum of per-hit damage over every enemy structure in range.
pub fn damage_at<O: BoardOracle + ?Sized>(oracle: &O, loc: Location) -> f64 {
    oracle
        .attackers_of(loc, Side::Ours)
        .iter()
        .map(|a| a.damage_per_hit)
        .sum()
}

/// Prices a lane by its exit tile: the damage collected at the last cell
/// of the shortest path from `start` to `edge`.
pub fn exit_damage<O: BoardOracle + ?Sized>(oracle: &O, start: Location, edge: Edge) -> PathRisk {
    match oracle.shortest_path_to_edge(start, edge) {
        Some(path) => match path.last() {
            Some(&exit) => PathRisk::Damage(damage_at(oracle, exit)),
            None => PathRisk::Unreachable,
        },
        None => PathRisk::Unreachable,
    }
}

/// Prices a lane by its whole path: the summed damage over every cell of
/// the shortest path from `start` to `edge`.
pub fn path_damage<O: BoardOracle + ?Sized>(oracle: &O, start: Location, edge: Edge) -> PathRisk {
    match oracle.shortest_path_to_edge(start, edge) {
        Some(path) => {
            let total = path.iter().map(|&loc| damage_at(oracle, loc)).sum();
            PathRisk::Damage(total)
        }
        None => PathRisk::Unreachable,
    }
}
