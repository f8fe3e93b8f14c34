//! Turn-frame JSON model.
//!
//! The game server streams one JSON object per line: a config object at
//! match start, then frames. `turnInfo` distinguishes deploy frames (we
//! must answer with a turn), action frames (combat resolution snapshots
//! carrying the event log), and the end-of-game marker.
//!
//! Event records are heterogeneous JSON arrays and the server is free to
//! extend them, so they are decoded leniently field by field: a record
//! missing a field or carrying an unknown kind index decodes to `None` and
//! is dropped without comment. Only the frame envelope itself is allowed
//! to fail parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::board::location::Location;
use crate::board::map::Side;

/// Errors that can occur while parsing a frame line.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("invalid frame JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame has no turnInfo")]
    MissingTurnInfo,
    #[error("unknown frame phase {0}")]
    UnknownPhase(i64),
}

/// What the server expects us to do with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Start-of-turn snapshot: plan and submit a turn.
    Deploy,
    /// Mid-resolution snapshot: ingest events, answer nothing.
    Action,
    /// The match is over.
    End,
}

impl FramePhase {
    fn from_code(code: i64) -> Option<FramePhase> {
        match code {
            0 => Some(FramePhase::Deploy),
            1 => Some(FramePhase::Action),
            2 => Some(FramePhase::End),
            _ => None,
        }
    }
}

/// One parsed frame from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    #[serde(rename = "turnInfo")]
    turn_info: Vec<i64>,
    #[serde(rename = "p1Stats", default)]
    p1_stats: Vec<f64>,
    #[serde(rename = "p1Units", default)]
    p1_units: Vec<Vec<Value>>,
    #[serde(rename = "p2Units", default)]
    p2_units: Vec<Vec<Value>>,
    #[serde(default)]
    pub events: RawEvents,
}

/// The raw event arrays of one frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvents {
    #[serde(default)]
    pub breach: Vec<Value>,
    #[serde(default)]
    pub damage: Vec<Value>,
    #[serde(default)]
    pub death: Vec<Value>,
}

impl Frame {
    /// Parses one frame line.
    pub fn parse(line: &str) -> Result<Frame, FrameError> {
        let frame: Frame = serde_json::from_str(line)?;
        let code = *frame.turn_info.first().ok_or(FrameError::MissingTurnInfo)?;
        if FramePhase::from_code(code).is_none() {
            return Err(FrameError::UnknownPhase(code));
        }
        Ok(frame)
    }

    /// The frame's phase. `parse` guarantees the code is known; a frame
    /// deserialized some other way degrades to an action frame.
    pub fn phase(&self) -> FramePhase {
        self.turn_info
            .first()
            .and_then(|&code| FramePhase::from_code(code))
            .unwrap_or(FramePhase::Action)
    }

    /// The turn number this frame belongs to.
    pub fn turn(&self) -> u32 {
        self.turn_info.get(1).copied().unwrap_or(0).max(0) as u32
    }

    /// Our remaining health.
    pub fn health(&self) -> f64 {
        self.p1_stats.first().copied().unwrap_or(0.0)
    }

    /// Our structure points at frame time (authoritative).
    pub fn structure_points(&self) -> f64 {
        self.p1_stats.get(1).copied().unwrap_or(0.0)
    }

    /// Our mobile points at frame time (authoritative).
    pub fn mobile_points(&self) -> f64 {
        self.p1_stats.get(2).copied().unwrap_or(0.0)
    }

    /// Per-kind unit rosters for a side: entry `k` lists the units of wire
    /// kind `k`, entry 7 the locations of upgraded structures.
    pub fn units_of(&self, side: Side) -> &[Vec<Value>] {
        match side {
            Side::Ours => &self.p1_units,
            Side::Theirs => &self.p2_units,
        }
    }
}

/// Decodes the leading `[x, y]` pair of a roster or event entry.
pub fn entry_location(entry: &Value) -> Option<Location> {
    let arr = entry.as_array()?;
    let x = arr.first()?.as_i64()?;
    let y = arr.get(1)?.as_i64()?;
    Some(Location::new(x as i32, y as i32))
}

fn location_at(arr: &[Value], i: usize) -> Option<Location> {
    let pair = arr.get(i)?.as_array()?;
    let x = pair.first()?.as_i64()?;
    let y = pair.get(1)?.as_i64()?;
    Some(Location::new(x as i32, y as i32))
}

fn i64_at(arr: &[Value], i: usize) -> Option<i64> {
    arr.get(i)?.as_i64()
}

/// Flags arrive as booleans from some server versions and 0/1 from others.
fn bool_at(arr: &[Value], i: usize) -> Option<bool> {
    match arr.get(i)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_i64()? != 0),
        _ => None,
    }
}

/// A structure-or-mobile damage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEvent {
    pub location: Location,
    pub kind_index: i64,
    pub owner: Side,
}

impl DamageEvent {
    /// Record layout: `[location, damage, kind, id, owner]`.
    pub fn decode(value: &Value) -> Option<DamageEvent> {
        let arr = value.as_array()?;
        Some(DamageEvent {
            location: location_at(arr, 0)?,
            kind_index: i64_at(arr, 2)?,
            owner: Side::from_owner_flag(i64_at(arr, 4)?)?,
        })
    }
}

/// A unit death record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    pub location: Location,
    pub kind_index: i64,
    pub owner: Side,
    /// True when the owner scheduled the removal themselves.
    pub self_removed: bool,
}

impl DeathEvent {
    /// Record layout: `[location, kind, id, owner, removedByOwner]`.
    pub fn decode(value: &Value) -> Option<DeathEvent> {
        let arr = value.as_array()?;
        Some(DeathEvent {
            location: location_at(arr, 0)?,
            kind_index: i64_at(arr, 1)?,
            owner: Side::from_owner_flag(i64_at(arr, 3)?)?,
            self_removed: bool_at(arr, 4)?,
        })
    }
}

/// An edge-crossing record: a mobile unit scored on a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachEvent {
    pub location: Location,
    /// Owner of the breaching unit.
    pub owner: Side,
}

impl BreachEvent {
    /// Record layout: `[location, damage, kind, id, owner]`.
    pub fn decode(value: &Value) -> Option<BreachEvent> {
        let arr = value.as_array()?;
        Some(BreachEvent {
            location: location_at(arr, 0)?,
            owner: Side::from_owner_flag(i64_at(arr, 4)?)?,
        })
    }
}
