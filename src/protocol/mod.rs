//! Turn protocol handling.
//!
//! This module implements the line-per-JSON-object wire format: the frame
//! model the server streams in and the command batch we answer each deploy
//! phase with.

pub mod command;
pub mod frame;

pub use command::{Placement, TurnCommands};
pub use frame::{
    entry_location, BreachEvent, DamageEvent, DeathEvent, Frame, FrameError, FramePhase,
    RawEvents,
};
