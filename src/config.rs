//! Match config loading.
//!
//! The game server sends one config JSON at match start. The only part the
//! engine cares about is the `unitInformation` array: per-kind costs, combat
//! stats, and the optional upgrade block. It is resolved ONCE into a fixed
//! lookup table indexed by [`UnitKind`]; nothing re-reads the raw JSON at
//! runtime.

use serde::Deserialize;

use crate::board::unit::{UnitKind, UNIT_KIND_COUNT};

/// Errors that can occur while loading the match config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config lists {got} unit kinds, need at least {expected}")]
    MissingUnits { expected: usize, got: usize },
}

/// What one unit of a kind costs, split across the two pools.
///
/// Stationary kinds cost structure points, mobile kinds cost mobile points;
/// the config carries both fields for every kind and the unused one is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceCost {
    pub structure: f64,
    pub mobile: f64,
}

impl ResourceCost {
    pub const ZERO: ResourceCost = ResourceCost {
        structure: 0.0,
        mobile: 0.0,
    };
}

/// Stats a kind gains when upgraded in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeStats {
    /// Structure points the upgrade costs.
    pub cost: f64,
    pub attack_range: f64,
    pub walker_damage: f64,
}

/// Resolved per-kind stats, immutable for the match.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitStats {
    /// Wire shorthand used in placement commands, e.g. "FF".
    pub shorthand: String,
    pub cost: ResourceCost,
    pub attack_range: f64,
    pub walker_damage: f64,
    pub start_health: f64,
    /// `None` for kinds the config does not allow upgrading.
    pub upgrade: Option<UpgradeStats>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    #[serde(rename = "unitInformation")]
    unit_information: Vec<RawUnitInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawUnitInfo {
    shorthand: String,
    cost1: f64,
    cost2: f64,
    #[serde(rename = "attackRange")]
    attack_range: f64,
    #[serde(rename = "attackDamageWalker")]
    attack_damage_walker: f64,
    #[serde(rename = "startHealth")]
    start_health: f64,
    upgrade: Option<RawUpgrade>,
}

/// The upgrade block only lists the fields the upgrade changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawUpgrade {
    cost1: Option<f64>,
    #[serde(rename = "attackRange")]
    attack_range: Option<f64>,
    #[serde(rename = "attackDamageWalker")]
    attack_damage_walker: Option<f64>,
}

/// The resolved stats table for one match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    stats: [UnitStats; UNIT_KIND_COUNT],
}

impl MatchConfig {
    /// Parses the config JSON the game server sends at match start.
    pub fn from_json(json: &str) -> Result<MatchConfig, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        if raw.unit_information.len() < UNIT_KIND_COUNT {
            return Err(ConfigError::MissingUnits {
                expected: UNIT_KIND_COUNT,
                got: raw.unit_information.len(),
            });
        }

        let stats = std::array::from_fn(|i| resolve(&raw.unit_information[i]));
        Ok(MatchConfig { stats })
    }

    /// Returns the resolved stats for a kind.
    pub fn stats(&self, kind: UnitKind) -> &UnitStats {
        &self.stats[kind.index() as usize]
    }

    /// Returns what placing one unit of the kind costs.
    pub fn cost(&self, kind: UnitKind) -> ResourceCost {
        self.stats(kind).cost
    }

    /// Returns what upgrading a placed unit of the kind costs, or `None`
    /// if the kind cannot be upgraded.
    pub fn upgrade_cost(&self, kind: UnitKind) -> Option<ResourceCost> {
        self.stats(kind).upgrade.map(|u| ResourceCost {
            structure: u.cost,
            mobile: 0.0,
        })
    }
}

fn resolve(raw: &RawUnitInfo) -> UnitStats {
    let upgrade = raw.upgrade.as_ref().map(|u| UpgradeStats {
        cost: u.cost1.unwrap_or(raw.cost1),
        attack_range: u.attack_range.unwrap_or(raw.attack_range),
        walker_damage: u.attack_damage_walker.unwrap_or(raw.attack_damage_walker),
    });
    UnitStats {
        shorthand: raw.shorthand.clone(),
        cost: ResourceCost {
            structure: raw.cost1,
            mobile: raw.cost2,
        },
        attack_range: raw.attack_range,
        walker_damage: raw.attack_damage_walker,
        start_health: raw.start_health,
        upgrade,
    }
}
