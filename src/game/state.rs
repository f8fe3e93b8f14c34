//! Concrete per-turn game state.
//!
//! Built fresh from every deploy frame: the stationary map from both unit
//! rosters, the ledger from the authoritative budget totals. Placement
//! attempts are validated locally (zone, occupancy, affordability) exactly
//! the way the server will re-validate them, so the confirmed count we
//! deduct against matches what the server will accept.

use crate::board::location::{Edge, Location};
use crate::board::map::{AttackerInfo, GameMap, Side, Structure};
use crate::board::nav;
use crate::board::unit::{StationaryKind, UnitKind};
use crate::config::MatchConfig;
use crate::ledger::ResourceLedger;
use crate::protocol::command::TurnCommands;
use crate::protocol::frame::{entry_location, Frame};

use super::{BoardOracle, GameApi};

/// One turn's mutable game state: board, budgets, and the command queue.
#[derive(Debug)]
pub struct GameState<'c> {
    config: &'c MatchConfig,
    turn: u32,
    map: GameMap,
    ledger: ResourceLedger,
    commands: TurnCommands,
}

impl<'c> GameState<'c> {
    /// Builds the state for a deploy frame.
    pub fn from_frame(config: &'c MatchConfig, frame: &Frame) -> Self {
        let mut map = GameMap::new();
        for side in [Side::Ours, Side::Theirs] {
            let rosters = frame.units_of(side);
            for (kind_index, entries) in rosters.iter().enumerate() {
                let Some(UnitKind::Stationary(kind)) = UnitKind::from_index(kind_index as i64)
                else {
                    continue;
                };
                for entry in entries {
                    if let Some(loc) = entry_location(entry) {
                        map.place(
                            loc,
                            Structure {
                                kind,
                                side,
                                upgraded: false,
                            },
                        );
                    }
                }
            }
            // Roster list 7 flags upgraded structures; it must be applied
            // after the kind lists so the structures exist.
            if let Some(upgrades) = rosters.get(7) {
                for entry in upgrades {
                    if let Some(loc) = entry_location(entry) {
                        map.mark_upgraded(loc);
                    }
                }
            }
        }

        GameState {
            config,
            turn: frame.turn(),
            map,
            ledger: ResourceLedger::new(frame.structure_points(), frame.mobile_points()),
            commands: TurnCommands::new(),
        }
    }

    /// Builds an empty state with explicit budgets, for tests and benches.
    pub fn empty(config: &'c MatchConfig, turn: u32, structure: f64, mobile: f64) -> Self {
        GameState {
            config,
            turn,
            map: GameMap::new(),
            ledger: ResourceLedger::new(structure, mobile),
            commands: TurnCommands::new(),
        }
    }

    /// Direct map access for scenario setup.
    pub fn map_mut(&mut self) -> &mut GameMap {
        &mut self.map
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Consumes the state, yielding the turn's command batch.
    pub fn into_commands(self) -> TurnCommands {
        self.commands
    }

    fn can_place(&self, kind: UnitKind, loc: Location) -> bool {
        match kind {
            UnitKind::Stationary(_) => {
                loc.in_our_half() && !self.map.contains_stationary_unit(loc)
            }
            UnitKind::Mobile(_) => {
                let on_edge =
                    Edge::BottomLeft.contains(loc) || Edge::BottomRight.contains(loc);
                on_edge && !self.map.contains_stationary_unit(loc)
            }
        }
    }

    fn place_one(&mut self, kind: UnitKind, loc: Location) -> bool {
        if !self.can_place(kind, loc) {
            return false;
        }
        let cost = self.config.cost(kind);
        if !self.ledger.can_afford(cost) {
            return false;
        }
        if let UnitKind::Stationary(stationary) = kind {
            let placed = self.map.place(
                loc,
                Structure {
                    kind: stationary,
                    side: Side::Ours,
                    upgraded: false,
                },
            );
            debug_assert!(placed, "can_place admitted an occupied cell");
        }
        self.ledger.commit(cost, 1);
        self.commands.push_placement(kind, loc);
        true
    }
}

impl BoardOracle for GameState<'_> {
    fn contains_stationary_unit(&self, loc: Location) -> bool {
        self.map.contains_stationary_unit(loc)
    }

    fn attackers_of(&self, loc: Location, victim: Side) -> Vec<AttackerInfo> {
        self.map.attackers_of(loc, victim, self.config)
    }

    fn shortest_path_to_edge(&self, start: Location, edge: Edge) -> Option<Vec<Location>> {
        nav::shortest_path_to_edge(&self.map, start, edge)
    }
}

impl GameApi for GameState<'_> {
    fn turn(&self) -> u32 {
        self.turn
    }

    fn structure_points(&self) -> f64 {
        self.ledger.structure()
    }

    fn mobile_points(&self) -> f64 {
        self.ledger.mobile()
    }

    fn affordable(&self, kind: UnitKind) -> u32 {
        self.ledger.affordable(self.config.cost(kind))
    }

    fn attempt_place(
        &mut self,
        kind: UnitKind,
        locations: &[Location],
        per_location: u32,
    ) -> u32 {
        let mut placed = 0;
        for &loc in locations {
            for _ in 0..per_location {
                if !self.place_one(kind, loc) {
                    break;
                }
                placed += 1;
            }
        }
        placed
    }

    fn attempt_upgrade(&mut self, loc: Location) -> bool {
        let Some(structure) = self.map.structure_at(loc) else {
            return false;
        };
        if structure.side != Side::Ours || structure.upgraded {
            return false;
        }
        let Some(cost) = self.config.upgrade_cost(structure.kind.into()) else {
            return false;
        };
        if !self.ledger.can_afford(cost) {
            return false;
        }
        let marked = self.map.mark_upgraded(loc);
        debug_assert!(marked, "structure_at admitted an empty cell");
        self.ledger.commit(cost, 1);
        self.commands.push_upgrade(loc);
        true
    }

    fn structures_of(&self, side: Side, kind: StationaryKind) -> Vec<Location> {
        self.map.structures_of(side, kind)
    }

    fn is_upgraded(&self, loc: Location) -> bool {
        self.map.structure_at(loc).is_some_and(|s| s.upgraded)
    }
}
