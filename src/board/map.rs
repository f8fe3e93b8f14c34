//! Stationary occupancy model.
//!
//! Tracks which cell holds which structure for both sides of the arena.
//! Mobile units are not tracked here: they co-occupy cells freely and the
//! planner only ever reasons about them through costs and deployment counts.
//!
//! Uses a fixed-size cell array indexed by `y * ARENA_SIZE + x` for O(1)
//! lookup, mirroring how the frame reports full unit rosters every turn.

use super::location::{Location, ARENA_SIZE};
use super::unit::StationaryKind;
use crate::config::MatchConfig;

/// Which player a unit or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Ours,
    Theirs,
}

impl Side {
    /// Resolves the wire owner flag: 1 is ourselves, 2 the opponent.
    pub fn from_owner_flag(flag: i64) -> Option<Side> {
        match flag {
            1 => Some(Side::Ours),
            2 => Some(Side::Theirs),
            _ => None,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Ours => Side::Theirs,
            Side::Theirs => Side::Ours,
        }
    }
}

/// A structure standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    pub kind: StationaryKind,
    pub side: Side,
    pub upgraded: bool,
}

/// A structure able to hit a given cell, with its per-hit damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerInfo {
    pub location: Location,
    pub damage_per_hit: f64,
}

/// Stationary occupancy for one board snapshot.
#[derive(Debug, Clone)]
pub struct GameMap {
    cells: Vec<Option<Structure>>,
}

impl GameMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        GameMap {
            cells: vec![None; (ARENA_SIZE * ARENA_SIZE) as usize],
        }
    }

    fn index(loc: Location) -> usize {
        (loc.y * ARENA_SIZE + loc.x) as usize
    }

    /// Returns the structure at a location, if any.
    pub fn structure_at(&self, loc: Location) -> Option<&Structure> {
        if !loc.in_arena_bounds() {
            return None;
        }
        self.cells[Self::index(loc)].as_ref()
    }

    /// Returns true if a stationary unit occupies the location.
    pub fn contains_stationary_unit(&self, loc: Location) -> bool {
        self.structure_at(loc).is_some()
    }

    /// Places a structure. Returns false if the cell is out of bounds or
    /// already occupied.
    pub fn place(&mut self, loc: Location, structure: Structure) -> bool {
        if !loc.in_arena_bounds() {
            return false;
        }
        let cell = &mut self.cells[Self::index(loc)];
        if cell.is_some() {
            return false;
        }
        *cell = Some(structure);
        true
    }

    /// Marks the structure at a location as upgraded. Returns false if the
    /// cell is empty or the structure was already upgraded.
    pub fn mark_upgraded(&mut self, loc: Location) -> bool {
        if !loc.in_arena_bounds() {
            return false;
        }
        match &mut self.cells[Self::index(loc)] {
            Some(s) if !s.upgraded => {
                s.upgraded = true;
                true
            }
            _ => false,
        }
    }

    /// All locations holding a structure of the given side and kind, in a
    /// fixed bottom-to-top, left-to-right scan order.
    pub fn structures_of(&self, side: Side, kind: StationaryKind) -> Vec<Location> {
        let mut found = Vec::new();
        for y in 0..ARENA_SIZE {
            for x in 0..ARENA_SIZE {
                let loc = Location::new(x, y);
                if let Some(s) = self.structure_at(loc) {
                    if s.side == side && s.kind == kind {
                        found.push(loc);
                    }
                }
            }
        }
        found
    }

    /// All enemy structures that can hit the given cell, with the damage
    /// each deals per hit to a mobile unit of `victim`'s side.
    ///
    /// Attack capability is read from the stats table, not hardwired to a
    /// kind: any structure with positive walker damage and a range covering
    /// the cell counts. Upgraded structures use their upgraded range and
    /// damage.
    pub fn attackers_of(
        &self,
        target: Location,
        victim: Side,
        config: &MatchConfig,
    ) -> Vec<AttackerInfo> {
        let mut attackers = Vec::new();
        for y in 0..ARENA_SIZE {
            for x in 0..ARENA_SIZE {
                let loc = Location::new(x, y);
                let Some(s) = self.structure_at(loc) else {
                    continue;
                };
                if s.side == victim {
                    continue;
                }
                let stats = config.stats(s.kind.into());
                let (range, damage) = match (s.upgraded, stats.upgrade) {
                    (true, Some(up)) => (up.attack_range, up.walker_damage),
                    _ => (stats.attack_range, stats.walker_damage),
                };
                if damage <= 0.0 {
                    continue;
                }
                if loc.distance_to(target) <= range {
                    attackers.push(AttackerInfo {
                        location: loc,
                        damage_per_hit: damage,
                    });
                }
            }
        }
        attackers
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::new()
    }
}
