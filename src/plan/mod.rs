//! Turn planning.
//!
//! The structure budget is spent by an ordered list of [`BuildStage`]s
//! sharing one mutable [`PlanContext`]; the mobile budget by the deploy
//! planner that runs after them. The stage order IS the resource
//! discipline: each stage sees exactly what its predecessors left in the
//! ledger, so reordering is a semantic change, not a refactor.

pub mod build;
pub mod deploy;
pub mod frontier;
pub mod schedule;

pub use build::BuildPlanner;
pub use schedule::{BuildPolicy, DeployPolicy, StepSchedule};

use crate::game::GameApi;
use crate::ingest::EventSnapshot;
use crate::state::MatchState;

/// Everything a build stage may read and mutate.
pub struct PlanContext<'a> {
    pub game: &'a mut dyn GameApi,
    pub state: &'a mut MatchState,
    pub events: &'a mut EventSnapshot,
    pub policy: &'a BuildPolicy,
}

/// One step of the structure-budget pipeline.
pub trait BuildStage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut PlanContext<'_>);
}
