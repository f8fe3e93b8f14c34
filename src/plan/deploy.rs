//! The mobile-budget planner.
//!
//! Runs after the build stages, against whatever mobile points the turn
//! still holds. Two moves per turn: field interceptors over the lanes the
//! opponent has been scoring through, then decide whether this is a turn
//! to push scouts out or to bank the points.
//!
//! Lane choice is a two-horse race between the fixed entry cells at the
//! bottom tip: the left entry runs to the top-right edge and vice versa.
//! Defensive estimates price the whole path, offensive estimates only the
//! exit tile.

use rand::Rng;

use crate::board::location::{friendly_edge_locations, Edge, Location};
use crate::board::map::Side;
use crate::board::unit::{MobileKind, StationaryKind, UnitKind};
use crate::config::MatchConfig;
use crate::game::{BoardOracle, GameApi};
use crate::plan::schedule::{DeployPolicy, SiegePolicy};
use crate::threat::{exit_damage, path_damage, PathRisk};

/// Folds a turn's breach list into (location, count) pairs, ordered by
/// first occurrence. Repeat breaches at one cell raise its count, and its
/// priority stays where the first breach put it.
pub fn aggregate_breaches(breaches: &[Location]) -> Vec<(Location, u32)> {
    let mut table: Vec<(Location, u32)> = Vec::new();
    for &breach in breaches {
        match table.iter_mut().find(|(loc, _)| *loc == breach) {
            Some((_, count)) => *count += 1,
            None => table.push((breach, 1)),
        }
    }
    table
}

/// The entry whose whole path soaks the least damage; ties keep the left.
pub fn defensive_lane<O: BoardOracle + ?Sized>(
    oracle: &O,
    policy: &DeployPolicy,
) -> (Location, PathRisk) {
    let left = path_damage(oracle, policy.left_entry, lane_edge(policy, policy.left_entry));
    let right = path_damage(oracle, policy.right_entry, lane_edge(policy, policy.right_entry));
    if left <= right {
        (policy.left_entry, left)
    } else {
        (policy.right_entry, right)
    }
}

/// The entry whose exit tile is cheapest to cross; ties keep the left.
pub fn offensive_lane<O: BoardOracle + ?Sized>(
    oracle: &O,
    policy: &DeployPolicy,
) -> (Location, PathRisk) {
    let left = exit_damage(oracle, policy.left_entry, lane_edge(policy, policy.left_entry));
    let right = exit_damage(oracle, policy.right_entry, lane_edge(policy, policy.right_entry));
    if left <= right {
        (policy.left_entry, left)
    } else {
        (policy.right_entry, right)
    }
}

/// Spends the turn's mobile budget: interceptor cover, then the push.
pub fn run<G, R>(
    game: &mut G,
    config: &MatchConfig,
    policy: &DeployPolicy,
    breaches: &[Location],
    rng: &mut R,
) where
    G: GameApi + ?Sized,
    R: Rng,
{
    deploy_cover(game, policy, breaches, rng);
    deploy_offense(game, config, policy);
}

/// Each lane's path exits on the far edge diagonally across from it.
fn lane_edge(policy: &DeployPolicy, entry: Location) -> Edge {
    if entry == policy.left_entry {
        Edge::TopRight
    } else {
        Edge::TopLeft
    }
}

/// Fields this turn's interceptor quota: breached lanes first, sized by
/// how often each was crossed, then the fixed cover lanes, then anywhere
/// open on our edges.
fn deploy_cover<G, R>(game: &mut G, policy: &DeployPolicy, breaches: &[Location], rng: &mut R)
where
    G: GameApi + ?Sized,
    R: Rng,
{
    let quota = policy.interceptors.value_at(game.turn()) as usize;
    let interceptor = MobileKind::Interceptor.into();

    let table = aggregate_breaches(breaches);
    let mut filled = 0;
    for &(location, count) in table.iter().take(quota) {
        let _ = game.attempt_place(interceptor, &[location], count.max(1));
        filled += 1;
    }

    let mut lanes = policy.cover_lanes.iter();
    while filled < quota {
        match lanes.next() {
            Some(&lane) => {
                let _ = game.attempt_place(interceptor, &[lane], 1);
            }
            None => {
                if !random_cover(game, rng) {
                    break;
                }
            }
        }
        filled += 1;
    }
}

/// Last-resort cover: one interceptor on a uniformly chosen unblocked
/// friendly-edge cell. Returns false when no cell took the unit.
fn random_cover<G, R>(game: &mut G, rng: &mut R) -> bool
where
    G: GameApi + ?Sized,
    R: Rng,
{
    let open: Vec<Location> = friendly_edge_locations()
        .into_iter()
        .filter(|&loc| !game.contains_stationary_unit(loc))
        .collect();
    if open.is_empty() {
        return false;
    }
    let pick = open[rng.gen_range(0..open.len())];
    game.attempt_place(MobileKind::Interceptor.into(), &[pick], 1) == 1
}

/// The push decision.
///
/// Early turns trickle a sized scout squad through the defensively cheap
/// lane, but only when the exit fire would not shred it. From the
/// commitment turn onward the planner is all-or-nothing: once the sized
/// squad clears the turn's threshold, the entire remaining budget goes
/// through the cheapest exit; otherwise every point is banked for a
/// bigger wave.
fn deploy_offense<G: GameApi + ?Sized>(game: &mut G, config: &MatchConfig, policy: &DeployPolicy) {
    if let Some(siege) = policy.siege.as_ref() {
        if enemy_front_structures(game, siege) > siege.min_front_structures {
            run_siege(game, config, siege);
            return;
        }
    }

    let turn = game.turn();
    let mobile = game.mobile_points();
    let squad = (mobile * policy.offense_fraction).floor();
    if squad < 1.0 {
        return;
    }
    let scout = MobileKind::Scout.into();

    if turn < policy.early_turns {
        let (entry, _) = defensive_lane(game, policy);
        let PathRisk::Damage(exit) = exit_damage(game, entry, lane_edge(policy, entry)) else {
            return;
        };
        let squad_health = squad * config.stats(scout).start_health;
        if exit < squad_health * policy.push_gate {
            let _ = game.attempt_place(scout, &[entry], squad as u32);
        }
    } else {
        let threshold = policy.commit_threshold.value_at(turn) as f64;
        if squad > threshold {
            let (entry, risk) = offensive_lane(game, policy);
            if !risk.is_unreachable() {
                let _ = game.attempt_place(scout, &[entry], mobile.floor() as u32);
            }
        }
    }
}

/// Counts enemy structures of any kind across the configured front rows.
fn enemy_front_structures<G: GameApi + ?Sized>(game: &G, siege: &SiegePolicy) -> usize {
    let (lo, hi) = siege.front_rows;
    [
        StationaryKind::Wall,
        StationaryKind::Factory,
        StationaryKind::Turret,
    ]
    .iter()
    .map(|&kind| {
        game.structures_of(Side::Theirs, kind)
            .iter()
            .filter(|loc| loc.y >= lo && loc.y <= hi)
            .count()
    })
    .sum()
}

/// Builds the standoff line out of the cheapest stationary kind, right to
/// left, then pours every affordable demolisher out at the staging cell.
/// The line keeps the demolishers from wandering into the enemy half and
/// holds them at attack range of the front rows.
fn run_siege<G: GameApi + ?Sized>(game: &mut G, config: &MatchConfig, siege: &SiegePolicy) {
    let cheapest = [
        StationaryKind::Wall,
        StationaryKind::Factory,
        StationaryKind::Turret,
    ]
    .into_iter()
    .min_by(|&a, &b| {
        config
            .cost(a.into())
            .structure
            .total_cmp(&config.cost(b.into()).structure)
    })
    .unwrap_or(StationaryKind::Wall);

    for x in (6..=27).rev() {
        let _ = game.attempt_place(cheapest.into(), &[Location::new(x, siege.line_row)], 1);
    }
    let demolisher: UnitKind = MobileKind::Demolisher.into();
    let _ = game.attempt_place(demolisher, &[siege.staging], game.affordable(demolisher));
}
