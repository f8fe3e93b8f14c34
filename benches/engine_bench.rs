use criterion::{black_box, criterion_group, criterion_main, Criterion};

use serde_json::json;

use redoubt::board::location::{Edge, Location};
use redoubt::board::map::{Side, Structure};
use redoubt::board::unit::StationaryKind;
use redoubt::config::MatchConfig;
use redoubt::engine::Engine;
use redoubt::game::GameState;
use redoubt::plan::deploy::aggregate_breaches;
use redoubt::protocol::frame::Frame;
use redoubt::threat::{exit_damage, path_damage};

const CONFIG_JSON: &str = r#"{"unitInformation": [{"shorthand": "FF", "cost1": 1.0, "startHealth": 60.0, "upgrade": {"cost1": 1.5}}, {"shorthand": "EF", "cost1": 12.0, "startHealth": 30.0, "upgrade": {}}, {"shorthand": "DF", "cost1": 2.0, "attackRange": 3.5, "attackDamageWalker": 6.0, "startHealth": 75.0, "upgrade": {"attackRange": 5.0, "attackDamageWalker": 10.0, "cost1": 4.0}}, {"shorthand": "PI", "cost2": 1.0, "startHealth": 15.0}, {"shorthand": "EI", "cost2": 3.0, "startHealth": 5.0}, {"shorthand": "SI", "cost2": 1.0, "startHealth": 40.0}]}"#;

/// A mid-game board: an enemy turret line across their front row and a few
/// deep guards, the kind of defense the lane estimators grind against.
fn fortified_state(config: &MatchConfig) -> GameState<'_> {
    let mut state = GameState::empty(config, 12, 0.0, 0.0);
    for x in (2..26).step_by(3) {
        state.map_mut().place(
            Location::new(x, 14),
            Structure {
                kind: StationaryKind::Turret,
                side: Side::Theirs,
                upgraded: x % 2 == 0,
            },
        );
    }
    for loc in [
        Location::new(13, 20),
        Location::new(15, 23),
        Location::new(12, 25),
    ] {
        state.map_mut().place(
            loc,
            Structure {
                kind: StationaryKind::Turret,
                side: Side::Theirs,
                upgraded: true,
            },
        );
    }
    state
}

fn bench_exit_damage(c: &mut Criterion) {
    let config = MatchConfig::from_json(CONFIG_JSON).unwrap();
    let state = fortified_state(&config);
    c.bench_function("exit_damage_fortified", |b| {
        b.iter(|| {
            exit_damage(
                black_box(&state),
                black_box(Location::new(13, 0)),
                Edge::TopRight,
            )
        })
    });
}

fn bench_path_damage(c: &mut Criterion) {
    let config = MatchConfig::from_json(CONFIG_JSON).unwrap();
    let state = fortified_state(&config);
    c.bench_function("path_damage_fortified", |b| {
        b.iter(|| {
            path_damage(
                black_box(&state),
                black_box(Location::new(14, 0)),
                Edge::TopLeft,
            )
        })
    });
}

fn bench_aggregate_breaches(c: &mut Criterion) {
    let breaches: Vec<Location> = (0..64)
        .map(|i| Location::new(13 - (i % 7), i % 7))
        .collect();
    c.bench_function("aggregate_64_breaches", |b| {
        b.iter(|| aggregate_breaches(black_box(&breaches)))
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let frame_text = json!({
        "turnInfo": [0, 9, -1],
        "p1Stats": [25.0, 26.0, 14.0, 0],
        "p1Units": [
            [[0, 13, 60.0, "1"], [27, 13, 60.0, "2"]],
            [[13, 2, 30.0, "3"], [14, 2, 30.0, "4"]],
            [[3, 12, 75.0, "5"], [24, 12, 75.0, "6"], [14, 11, 75.0, "7"]],
            [], [], [], [], [[14, 11]]
        ],
        "p2Units": [
            [], [],
            [[5, 14, 75.0, "8"], [13, 14, 75.0, "9"], [22, 14, 75.0, "10"]],
            [], [], [], [], []
        ],
        "events": {}
    })
    .to_string();
    let action_text = json!({
        "turnInfo": [1, 8, 20],
        "events": {
            "damage": [[[14, 11], 6.0, 2, "7", 1]],
            "death": [[[3, 12], 2, "5", 1, false]],
            "breach": [[[5, 8], 1.0, 3, "20", 2], [[5, 8], 1.0, 3, "21", 2]]
        }
    })
    .to_string();

    c.bench_function("play_turn_midgame", |b| {
        let config = MatchConfig::from_json(CONFIG_JSON).unwrap();
        let frame = Frame::parse(&frame_text).unwrap();
        let action = Frame::parse(&action_text).unwrap();
        b.iter(|| {
            let mut engine = Engine::new(config.clone());
            engine.on_action_frame(black_box(&action));
            black_box(engine.play_turn(black_box(&frame)))
        })
    });
}

criterion_group!(
    benches,
    bench_exit_damage,
    bench_path_damage,
    bench_aggregate_breaches,
    bench_full_turn
);
criterion_main!(benches);
