//! Tunable planner policy.
//!
//! Everything turn-indexed lives here as data, not control flow: strategy
//! variants disagree on the exact breakpoints, so both the interceptor
//! count and the offensive commitment threshold are swappable step
//! functions rather than branches in the planners.

use crate::board::location::Location;

/// A piecewise-constant function of the turn number.
///
/// Breakpoints are `(from_turn, value)` pairs; the value at a turn is the
/// value of the last breakpoint not after it.
#[derive(Debug, Clone)]
pub struct StepSchedule {
    steps: Vec<(u32, u32)>,
}

impl StepSchedule {
    /// Builds a schedule from breakpoints, sorting them by turn.
    pub fn new(mut steps: Vec<(u32, u32)>) -> Self {
        steps.sort_by_key(|&(turn, _)| turn);
        StepSchedule { steps }
    }

    /// The schedule's value at a turn; zero before the first breakpoint.
    pub fn value_at(&self, turn: u32) -> u32 {
        self.steps
            .iter()
            .take_while(|&&(from, _)| from <= turn)
            .last()
            .map_or(0, |&(_, value)| value)
    }
}

/// Policy knobs for the structure-budget planner.
#[derive(Debug, Clone)]
pub struct BuildPolicy {
    /// Turret cells of the turn-0 opening layout.
    pub opening_turrets: Vec<Location>,
    /// Factory cells of the turn-0 opening layout.
    pub opening_factories: Vec<Location>,
    /// First expansion cell of the left wing.
    pub left_wing_seed: Location,
    /// First expansion cell of the right wing.
    pub right_wing_seed: Location,
    /// Factory count at which expansion stops and upgrades begin.
    pub production_cap: usize,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        BuildPolicy {
            opening_turrets: vec![
                Location::new(3, 12),
                Location::new(24, 12),
                Location::new(14, 11),
            ],
            opening_factories: vec![
                Location::new(13, 2),
                Location::new(14, 2),
                Location::new(12, 3),
                Location::new(15, 3),
            ],
            // One diagonal step inward of the opening factory block, so the
            // first expansion lands on a fresh cell.
            left_wing_seed: Location::new(11, 4),
            right_wing_seed: Location::new(16, 4),
            production_cap: 8,
        }
    }
}

/// The siege play: when the enemy packs structures into their front rows,
/// build a wall line at a fixed row and pour demolishers out behind it so
/// they shred the front rank from standoff range.
///
/// Sister strategy variants disagree on whether this play earns its cost,
/// so it ships as an opt-in policy block rather than a planner branch.
#[derive(Debug, Clone)]
pub struct SiegePolicy {
    /// Enemy structure count across the front rows that triggers the play.
    pub min_front_structures: usize,
    /// The enemy rows counted as "front".
    pub front_rows: (i32, i32),
    /// Our row the standoff line is built on.
    pub line_row: i32,
    /// Where the demolishers stage next to the line.
    pub staging: Location,
}

impl Default for SiegePolicy {
    fn default() -> Self {
        SiegePolicy {
            min_front_structures: 10,
            front_rows: (14, 15),
            line_row: 11,
            staging: Location::new(24, 10),
        }
    }
}

/// Policy knobs for the mobile-budget planner.
#[derive(Debug, Clone)]
pub struct DeployPolicy {
    /// The two fixed entry candidates at the bottom tip.
    pub left_entry: Location,
    pub right_entry: Location,
    /// Interceptors to field per turn.
    pub interceptors: StepSchedule,
    /// Mobile points required before an all-in push, per turn.
    pub commit_threshold: StepSchedule,
    /// Turns during which the bootstrapping push policy applies.
    pub early_turns: u32,
    /// Fraction of the mobile budget sized into a push.
    pub offense_fraction: f64,
    /// Early pushes go only where exit damage stays under this fraction
    /// of the squad's total health.
    pub push_gate: f64,
    /// Interceptor cells used when breach history does not fill the quota.
    pub cover_lanes: Vec<Location>,
    /// Opt-in siege play against structure-heavy fronts.
    pub siege: Option<SiegePolicy>,
}

impl Default for DeployPolicy {
    fn default() -> Self {
        DeployPolicy {
            left_entry: Location::new(13, 0),
            right_entry: Location::new(14, 0),
            interceptors: StepSchedule::new(vec![(0, 1), (3, 2), (5, 3), (9, 4)]),
            commit_threshold: StepSchedule::new(vec![
                (0, 0),
                (1, 4),
                (2, 8),
                (4, 12),
                (5, 16),
                (7, 20),
                (9, 24),
                (10, 28),
            ]),
            early_turns: 5,
            offense_fraction: 0.8,
            push_gate: 0.5,
            cover_lanes: vec![
                Location::new(1, 12),
                Location::new(25, 11),
                Location::new(13, 0),
                Location::new(2, 11),
                Location::new(25, 11),
                Location::new(14, 0),
                Location::new(3, 10),
                Location::new(24, 10),
                Location::new(4, 9),
                Location::new(23, 9),
            ],
            siege: None,
        }
    }
}
