//! Outgoing command batch.
//!
//! Every placement and upgrade the planner wins against the local arbiter
//! is queued here in issue order, then serialized as the turn submission:
//! one JSON object with `build`, `deploy`, and `upgrade` arrays. Placement
//! entries are `[shorthand, x, y]`, upgrade entries `[x, y]`.

use serde_json::{json, Value};

use crate::board::location::Location;
use crate::board::unit::UnitKind;
use crate::config::MatchConfig;

/// One confirmed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: UnitKind,
    pub location: Location,
}

/// The commands issued during one turn, in issue order.
#[derive(Debug, Clone, Default)]
pub struct TurnCommands {
    placements: Vec<Placement>,
    upgrades: Vec<Location>,
}

impl TurnCommands {
    pub fn new() -> Self {
        TurnCommands::default()
    }

    /// Records a confirmed placement.
    pub fn push_placement(&mut self, kind: UnitKind, location: Location) {
        self.placements.push(Placement { kind, location });
    }

    /// Records a confirmed upgrade.
    pub fn push_upgrade(&mut self, location: Location) {
        self.upgrades.push(location);
    }

    /// All confirmed placements in issue order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// All confirmed upgrades in issue order.
    pub fn upgrades(&self) -> &[Location] {
        &self.upgrades
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.upgrades.is_empty()
    }

    /// Serializes the batch as the turn submission line.
    pub fn to_submit_json(&self, config: &MatchConfig) -> String {
        let mut build: Vec<Value> = Vec::new();
        let mut deploy: Vec<Value> = Vec::new();
        for p in &self.placements {
            let shorthand = &config.stats(p.kind).shorthand;
            let entry = json!([shorthand, p.location.x, p.location.y]);
            if p.kind.is_stationary() {
                build.push(entry);
            } else {
                deploy.push(entry);
            }
        }
        let upgrade: Vec<Value> = self
            .upgrades
            .iter()
            .map(|loc| json!([loc.x, loc.y]))
            .collect();

        json!({ "build": build, "deploy": deploy, "upgrade": upgrade }).to_string()
    }
}
