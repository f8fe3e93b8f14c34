//! Engine state management.
//!
//! Holds the resolved match config, the per-match state, and the planner
//! policies, and runs the fixed per-turn pipeline for every deploy frame:
//! take the accumulated event snapshot, run the build stages, run the
//! deploy planner, record the turn's breaches. Action frames only feed
//! the ingestor.
//!
//! One pass per turn, strictly in order, no rollbacks: each step reads
//! the budgets exactly as the previous step left them.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::MatchConfig;
use crate::game::GameState;
use crate::ingest::EventIngestor;
use crate::plan::build::{opening_layout, BuildPlanner};
use crate::plan::{deploy, BuildPolicy, DeployPolicy, PlanContext};
use crate::protocol::command::TurnCommands;
use crate::protocol::frame::Frame;
use crate::state::MatchState;

/// The per-turn decision engine for one match.
pub struct Engine {
    config: MatchConfig,
    build_policy: BuildPolicy,
    deploy_policy: DeployPolicy,
    planner: BuildPlanner,
    ingestor: EventIngestor,
    state: MatchState,
    rng: SmallRng,
}

impl Engine {
    /// Creates an engine with the default policies.
    pub fn new(config: MatchConfig) -> Self {
        Engine::with_policies(config, BuildPolicy::default(), DeployPolicy::default())
    }

    /// Creates an engine with explicit policies, for strategy variants.
    pub fn with_policies(
        config: MatchConfig,
        build_policy: BuildPolicy,
        deploy_policy: DeployPolicy,
    ) -> Self {
        let state = MatchState::new(&build_policy);
        Engine {
            config,
            build_policy,
            deploy_policy,
            planner: BuildPlanner::standard(),
            ingestor: EventIngestor::new(),
            state,
            rng: SmallRng::from_entropy(),
        }
    }

    /// The resolved match config.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The per-match state, for inspection.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Resets all per-match state for a new match.
    pub fn new_match(&mut self) {
        self.state.reset(&self.build_policy);
        self.ingestor = EventIngestor::new();
    }

    /// Folds an action frame's events into the pending snapshot.
    pub fn on_action_frame(&mut self, frame: &Frame) {
        self.ingestor.ingest(&frame.events);
    }

    /// Plans one turn against a deploy frame and returns the command batch.
    pub fn play_turn(&mut self, frame: &Frame) -> TurnCommands {
        let mut game = GameState::from_frame(&self.config, frame);
        let mut events = self.ingestor.take();

        if frame.turn() == 0 {
            opening_layout(&mut game, &self.build_policy);
        }

        {
            let mut ctx = PlanContext {
                game: &mut game,
                state: &mut self.state,
                events: &mut events,
                policy: &self.build_policy,
            };
            self.planner.run(&mut ctx);
        }

        deploy::run(
            &mut game,
            &self.config,
            &self.deploy_policy,
            &events.breaches,
            &mut self.rng,
        );

        self.state.record_breaches(&events.breaches);
        game.into_commands()
    }
}
