//! Event ingestion.
//!
//! Combat resolution streams many action frames between our turns; each
//! carries a slice of the event log. The ingestor folds them into one
//! [`EventSnapshot`] per turn: which of our defenders took damage, which
//! were destroyed, and where the opponent crossed our edge.
//!
//! Filtering rules: only our own walls and turrets are tracked for repair
//! (factories are the expansion stage's problem), deaths the owner
//! scheduled themselves are not losses, and a breach only counts when the
//! crossing unit is not ours. Records that fail to decode are dropped
//! without comment.

use std::collections::HashMap;
use std::mem;

use crate::board::location::Location;
use crate::board::map::Side;
use crate::board::unit::{StationaryKind, UnitKind};
use crate::protocol::frame::{BreachEvent, DamageEvent, DeathEvent, RawEvents};

/// What last turn's combat did to us, aggregated across action frames.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    /// Our defenders that took damage and still stand, by location.
    pub damaged: HashMap<Location, StationaryKind>,
    /// Our defenders that were destroyed (not self-removed), by location.
    pub destroyed: HashMap<Location, StationaryKind>,
    /// Every edge cell the opponent scored through, in arrival order.
    /// Duplicates are kept: a lane breached three times is three entries.
    pub breaches: Vec<Location>,
}

impl EventSnapshot {
    pub fn new() -> Self {
        EventSnapshot::default()
    }

    pub fn is_empty(&self) -> bool {
        self.damaged.is_empty() && self.destroyed.is_empty() && self.breaches.is_empty()
    }
}

/// Accumulates raw frame events into the per-turn snapshot.
#[derive(Debug, Default)]
pub struct EventIngestor {
    snapshot: EventSnapshot,
}

impl EventIngestor {
    pub fn new() -> Self {
        EventIngestor::default()
    }

    /// Folds one frame's events into the pending snapshot.
    pub fn ingest(&mut self, events: &RawEvents) {
        for value in &events.damage {
            let Some(ev) = DamageEvent::decode(value) else {
                continue;
            };
            if ev.owner != Side::Ours {
                continue;
            }
            if let Some(kind) = defender_kind(ev.kind_index) {
                self.snapshot.damaged.insert(ev.location, kind);
            }
        }

        for value in &events.death {
            let Some(ev) = DeathEvent::decode(value) else {
                continue;
            };
            if ev.owner != Side::Ours || ev.self_removed {
                continue;
            }
            if let Some(kind) = defender_kind(ev.kind_index) {
                self.snapshot.destroyed.insert(ev.location, kind);
            }
        }

        for value in &events.breach {
            let Some(ev) = BreachEvent::decode(value) else {
                continue;
            };
            if ev.owner != Side::Ours {
                self.snapshot.breaches.push(ev.location);
            }
        }
    }

    /// Yields the accumulated snapshot and starts a fresh one.
    pub fn take(&mut self) -> EventSnapshot {
        mem::take(&mut self.snapshot)
    }
}

/// Resolves a wire kind index to a defender kind, or `None` for anything
/// the repair pipeline does not react to.
fn defender_kind(index: i64) -> Option<StationaryKind> {
    match UnitKind::from_index(index) {
        Some(UnitKind::Stationary(kind)) if kind.is_defender() => Some(kind),
        _ => None,
    }
}
