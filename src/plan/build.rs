//! The structure-budget pipeline.
//!
//! Three stages in strict priority order, each gated only on what the
//! ledger still holds when it runs: put back what the enemy knocked down,
//! harden what it chewed on, then grow the economy with whatever is left.
//! Every placement or upgrade may be rejected; a rejection skips that
//! candidate for the rest of the turn and nothing else.

use std::mem;

use crate::board::location::Location;
use crate::board::map::Side;
use crate::board::unit::StationaryKind;
use crate::game::GameApi;
use crate::plan::frontier::Wing;
use crate::plan::schedule::BuildPolicy;

use super::{BuildStage, PlanContext};

/// Runs the build stages in their fixed order.
pub struct BuildPlanner {
    stages: Vec<Box<dyn BuildStage>>,
}

impl BuildPlanner {
    /// The standard rebuild, reinforce, expand pipeline.
    pub fn standard() -> Self {
        BuildPlanner {
            stages: vec![
                Box::new(Rebuild),
                Box::new(Reinforce),
                Box::new(Expand),
            ],
        }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage against the shared context.
    pub fn run(&self, ctx: &mut PlanContext<'_>) {
        for stage in &self.stages {
            stage.run(ctx);
        }
    }
}

/// Places the fixed turn-0 layout: turrets first, then the factory block.
pub fn opening_layout<G: GameApi + ?Sized>(game: &mut G, policy: &BuildPolicy) {
    let _ = game.attempt_place(
        StationaryKind::Turret.into(),
        &policy.opening_turrets,
        1,
    );
    let _ = game.attempt_place(
        StationaryKind::Factory.into(),
        &policy.opening_factories,
        1,
    );
}

/// Recreates destroyed defenders at their exact old locations.
///
/// The records are consumed whether or not the placement is accepted: one
/// attempt per location per turn. The destruction will be reported again
/// if the slot keeps mattering.
struct Rebuild;

impl BuildStage for Rebuild {
    fn name(&self) -> &'static str {
        "rebuild"
    }

    fn run(&self, ctx: &mut PlanContext<'_>) {
        let destroyed = mem::take(&mut ctx.events.destroyed);
        for (location, kind) in destroyed {
            let _ = ctx.game.attempt_place(kind.into(), &[location], 1);
        }
    }
}

/// Upgrades damaged defenders in place; a turret whose upgrade is refused
/// gets a wall one row ahead of it instead, soaking the next volley.
struct Reinforce;

impl BuildStage for Reinforce {
    fn name(&self) -> &'static str {
        "reinforce"
    }

    fn run(&self, ctx: &mut PlanContext<'_>) {
        let damaged = mem::take(&mut ctx.events.damaged);
        for (location, kind) in damaged {
            let upgraded = ctx.game.attempt_upgrade(location);
            if !upgraded && kind == StationaryKind::Turret {
                let shield = Location::new(location.x, location.y + 1);
                let _ = ctx
                    .game
                    .attempt_place(StationaryKind::Wall.into(), &[shield], 1);
            }
        }
    }
}

/// Grows the economy to the cap, then upgrades it.
///
/// Below the cap, factories are placed on the alternating wing cursors; a
/// cursor moves only when its cell was accepted, so a blocked cell is
/// retried next turn instead of being skipped. At the cap, the first
/// not-yet-upgraded factory in scan order gets the turn's single upgrade
/// attempt.
struct Expand;

impl BuildStage for Expand {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn run(&self, ctx: &mut PlanContext<'_>) {
        let factory = StationaryKind::Factory;
        let mut owned = ctx.game.structures_of(Side::Ours, factory).len();

        if owned >= ctx.policy.production_cap {
            upgrade_one_factory(ctx);
            return;
        }

        let mut wing = ctx.state.frontier.next_wing();
        let mut rejected = [false; 2];
        while owned < ctx.policy.production_cap && ctx.game.affordable(factory.into()) >= 1 {
            if rejected[wing_index(wing)] {
                if rejected[wing_index(wing.other())] {
                    break;
                }
                wing = wing.other();
                continue;
            }
            let cursor = ctx.state.frontier.cursor(wing);
            if ctx.game.attempt_place(factory.into(), &[cursor], 1) == 1 {
                ctx.state.frontier.advance(wing);
                owned += 1;
                wing = ctx.state.frontier.next_wing();
            } else {
                rejected[wing_index(wing)] = true;
                wing = wing.other();
            }
        }
    }
}

fn wing_index(wing: Wing) -> usize {
    match wing {
        Wing::Left => 0,
        Wing::Right => 1,
    }
}

/// One upgrade attempt per turn, on the first plain factory in scan order.
fn upgrade_one_factory(ctx: &mut PlanContext<'_>) {
    for location in ctx.game.structures_of(Side::Ours, StationaryKind::Factory) {
        if !ctx.game.is_upgraded(location) {
            let _ = ctx.game.attempt_upgrade(location);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::map::Structure;
    use crate::board::unit::UnitKind;
    use crate::config::MatchConfig;
    use crate::game::GameState;
    use crate::ingest::EventSnapshot;
    use crate::protocol::command::Placement;
    use crate::state::MatchState;

    const CONFIG_JSON: &str = r#"{"unitInformation": [
        {"shorthand": "FF", "cost1": 1.0, "startHealth": 60.0, "upgrade": {"cost1": 1.5}},
        {"shorthand": "EF", "cost1": 12.0, "startHealth": 30.0, "upgrade": {}},
        {"shorthand": "DF", "cost1": 2.0, "attackRange": 3.5,
         "attackDamageWalker": 6.0, "startHealth": 75.0,
         "upgrade": {"attackRange": 5.0, "attackDamageWalker": 10.0, "cost1": 4.0}},
        {"shorthand": "PI", "cost2": 1.0, "startHealth": 15.0},
        {"shorthand": "EI", "cost2": 3.0, "startHealth": 5.0},
        {"shorthand": "SI", "cost2": 1.0, "startHealth": 40.0}
    ]}"#;

    fn config() -> MatchConfig {
        MatchConfig::from_json(CONFIG_JSON).unwrap()
    }

    fn run_stages(
        state: &mut GameState<'_>,
        match_state: &mut MatchState,
        events: &mut EventSnapshot,
        policy: &BuildPolicy,
    ) {
        let mut ctx = PlanContext {
            game: state,
            state: match_state,
            events,
            policy,
        };
        BuildPlanner::standard().run(&mut ctx);
    }

    fn our_factory() -> Structure {
        Structure {
            kind: StationaryKind::Factory,
            side: Side::Ours,
            upgraded: false,
        }
    }

    #[test]
    fn stage_order_is_fixed() {
        assert_eq!(
            BuildPlanner::standard().stage_names(),
            vec!["rebuild", "reinforce", "expand"]
        );
    }

    #[test]
    fn opening_layout_places_turrets_then_factories() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 0, 30.0, 0.0);
        opening_layout(&mut state, &policy);

        let commands = state.into_commands();
        let kinds: Vec<UnitKind> = commands.placements().iter().map(|p| p.kind).collect();
        // 3 turrets at 2.0 each, then 30 - 6 = 24 points pay for 2 of the
        // 4 factories at 12.0.
        assert_eq!(
            kinds,
            vec![
                StationaryKind::Turret.into(),
                StationaryKind::Turret.into(),
                StationaryKind::Turret.into(),
                StationaryKind::Factory.into(),
                StationaryKind::Factory.into(),
            ]
        );
    }

    #[test]
    fn opening_layout_never_overspends() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 0, 30.0, 0.0);
        opening_layout(&mut state, &policy);
        let spent: f64 = state
            .into_commands()
            .placements()
            .iter()
            .map(|p| config.cost(p.kind).structure)
            .sum();
        assert!(spent <= 30.0, "spent {} from a 30 point budget", spent);
    }

    #[test]
    fn destroyed_defender_is_rebuilt_at_its_location() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 50.0, 0.0);
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();
        events
            .destroyed
            .insert(Location::new(3, 12), StationaryKind::Turret);

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        assert_eq!(
            commands.placements()[0],
            Placement {
                kind: StationaryKind::Turret.into(),
                location: Location::new(3, 12),
            }
        );
        assert!(events.destroyed.is_empty(), "record must be consumed");
    }

    #[test]
    fn rebuild_runs_before_expand() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 50.0, 0.0);
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();
        events
            .destroyed
            .insert(Location::new(3, 12), StationaryKind::Turret);

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        let first_factory = commands
            .placements()
            .iter()
            .position(|p| p.kind == StationaryKind::Factory.into());
        let rebuild = commands
            .placements()
            .iter()
            .position(|p| p.location == Location::new(3, 12))
            .expect("rebuild must be issued");
        if let Some(first_factory) = first_factory {
            assert!(
                rebuild < first_factory,
                "rebuild at index {} must precede expand at {}",
                rebuild,
                first_factory
            );
        }
    }

    #[test]
    fn damaged_turret_upgrade_falls_back_to_shield_wall() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 3.0, 0.0);
        // 3.0 points: the 4.0 turret upgrade is refused, the 1.0 wall is not.
        let turret = Location::new(14, 11);
        state.map_mut().place(
            turret,
            Structure {
                kind: StationaryKind::Turret,
                side: Side::Ours,
                upgraded: false,
            },
        );
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();
        events.damaged.insert(turret, StationaryKind::Turret);

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        assert!(commands.upgrades().is_empty());
        assert!(commands.placements().iter().any(|p| {
            p.kind == StationaryKind::Wall.into() && p.location == Location::new(14, 12)
        }));
        assert!(events.damaged.is_empty(), "record must be consumed");
    }

    #[test]
    fn damaged_wall_gets_no_shield_wall() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 0.5, 0.0);
        // Budget below both the wall upgrade and a new wall.
        let wall = Location::new(3, 13);
        state.map_mut().place(
            wall,
            Structure {
                kind: StationaryKind::Wall,
                side: Side::Ours,
                upgraded: false,
            },
        );
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();
        events.damaged.insert(wall, StationaryKind::Wall);

        run_stages(&mut state, &mut match_state, &mut events, &policy);
        assert!(state.into_commands().is_empty());
    }

    #[test]
    fn damaged_turret_prefers_the_upgrade() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 4.0, 0.0);
        let turret = Location::new(14, 11);
        state.map_mut().place(
            turret,
            Structure {
                kind: StationaryKind::Turret,
                side: Side::Ours,
                upgraded: false,
            },
        );
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();
        events.damaged.insert(turret, StationaryKind::Turret);

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        assert_eq!(commands.upgrades(), &[turret]);
        assert!(commands.placements().is_empty());
    }

    #[test]
    fn expansion_alternates_wings_from_the_seeds() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 25.0, 0.0);
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        let factories: Vec<Location> = commands
            .placements()
            .iter()
            .filter(|p| p.kind == StationaryKind::Factory.into())
            .map(|p| p.location)
            .collect();
        // 25 points pay for two factories: left seed then right seed.
        assert_eq!(
            factories,
            vec![policy.left_wing_seed, policy.right_wing_seed]
        );
        assert_eq!(
            match_state.frontier.cursor(Wing::Left),
            Location::new(10, 5)
        );
        assert_eq!(
            match_state.frontier.cursor(Wing::Right),
            Location::new(17, 5)
        );
    }

    #[test]
    fn blocked_cursor_does_not_advance() {
        let config = config();
        let policy = BuildPolicy::default();
        let mut state = GameState::empty(&config, 4, 12.0, 0.0);
        // A wall of ours squats on the left seed; only the right wing can grow.
        state.map_mut().place(
            policy.left_wing_seed,
            Structure {
                kind: StationaryKind::Wall,
                side: Side::Ours,
                upgraded: false,
            },
        );
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        let factories: Vec<Location> = commands
            .placements()
            .iter()
            .filter(|p| p.kind == StationaryKind::Factory.into())
            .map(|p| p.location)
            .collect();
        assert_eq!(factories, vec![policy.right_wing_seed]);
        // The left cursor still points at the blocked cell for next turn.
        assert_eq!(
            match_state.frontier.cursor(Wing::Left),
            policy.left_wing_seed
        );
        assert_eq!(match_state.frontier.next_wing(), Wing::Left);
    }

    #[test]
    fn at_the_cap_one_factory_upgrade_per_turn() {
        let config = config();
        let policy = BuildPolicy {
            production_cap: 2,
            ..BuildPolicy::default()
        };
        let mut state = GameState::empty(&config, 9, 40.0, 0.0);
        let first = Location::new(13, 2);
        let second = Location::new(14, 2);
        state.map_mut().place(first, our_factory());
        state.map_mut().place(second, our_factory());
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();

        run_stages(&mut state, &mut match_state, &mut events, &policy);

        let commands = state.into_commands();
        assert_eq!(commands.upgrades(), &[first], "one upgrade only");
        assert!(
            commands.placements().is_empty(),
            "no expansion past the cap"
        );
    }

    #[test]
    fn upgrade_scan_skips_already_upgraded_factories() {
        let config = config();
        let policy = BuildPolicy {
            production_cap: 2,
            ..BuildPolicy::default()
        };
        let mut state = GameState::empty(&config, 9, 40.0, 0.0);
        let first = Location::new(13, 2);
        let second = Location::new(14, 2);
        state.map_mut().place(first, our_factory());
        state.map_mut().place(second, our_factory());
        state.map_mut().mark_upgraded(first);
        let mut match_state = MatchState::new(&policy);
        let mut events = EventSnapshot::new();

        run_stages(&mut state, &mut match_state, &mut events, &policy);
        assert_eq!(state.into_commands().upgrades(), &[second]);
    }

    #[test]
    fn structure_spend_never_exceeds_the_turn_budget() {
        let config = config();
        let policy = BuildPolicy::default();
        for budget in [0.0, 1.0, 5.0, 13.0, 26.0, 60.0] {
            let mut state = GameState::empty(&config, 6, budget, 0.0);
            let mut match_state = MatchState::new(&policy);
            let mut events = EventSnapshot::new();
            events
                .destroyed
                .insert(Location::new(3, 12), StationaryKind::Turret);
            events
                .damaged
                .insert(Location::new(14, 11), StationaryKind::Turret);

            run_stages(&mut state, &mut match_state, &mut events, &policy);

            let remaining = state.structure_points();
            let commands = state.into_commands();
            let spent: f64 = commands
                .placements()
                .iter()
                .map(|p| config.cost(p.kind).structure)
                .sum();
            assert!(
                spent <= budget + 1e-9,
                "budget {}: spent {} on placements",
                budget,
                spent
            );
            assert!(remaining >= 0.0);
        }
    }
}
