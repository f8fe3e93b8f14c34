//! Per-match mutable state.
//!
//! Everything the engine remembers between turns lives in this one struct,
//! passed explicitly into the planner stages. It is reset at match start
//! and updated at the end of every planned turn; nothing here is ambient.

use crate::board::location::Location;
use crate::plan::frontier::FrontierState;
use crate::plan::schedule::BuildPolicy;

/// State that survives from turn to turn within one match.
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Economy expansion cursors.
    pub frontier: FrontierState,
    /// Every breach we have suffered so far, in order.
    pub breach_history: Vec<Location>,
}

impl MatchState {
    /// Fresh state for a new match, cursors on their policy seeds.
    pub fn new(policy: &BuildPolicy) -> Self {
        MatchState {
            frontier: FrontierState::new(policy.left_wing_seed, policy.right_wing_seed),
            breach_history: Vec::new(),
        }
    }

    /// Resets to the state of a new match.
    pub fn reset(&mut self, policy: &BuildPolicy) {
        *self = MatchState::new(policy);
    }

    /// Appends this turn's breaches to the running history.
    pub fn record_breaches(&mut self, breaches: &[Location]) {
        self.breach_history.extend_from_slice(breaches);
    }
}
