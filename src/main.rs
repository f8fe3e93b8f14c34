//! Redoubt -- a per-turn decision engine for diamond-grid tower defense.
//!
//! This binary speaks the game server's line protocol on stdin/stdout: the
//! first line is the match config, every following line a frame. Deploy
//! frames are answered with one submission line; action frames only feed
//! the event ingestor. Stdout belongs to the protocol, diagnostics go to
//! stderr.

use std::io::{self, BufRead, Write};

use redoubt::config::MatchConfig;
use redoubt::engine::Engine;
use redoubt::protocol::frame::{Frame, FramePhase};

/// Runs the main protocol loop, reading frames from stdin and writing
/// turn submissions to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut lines = stdin.lock().lines();

    let config = loop {
        let line = match lines.next() {
            Some(Ok(l)) => l,
            Some(Err(_)) | None => return,
        };
        if line.trim().is_empty() {
            continue;
        }
        match MatchConfig::from_json(&line) {
            Ok(config) => break config,
            Err(e) => {
                eprintln!("failed to parse match config: {}", e);
                return;
            }
        }
    };

    let mut engine = Engine::new(config);

    for line in lines {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let frame = match Frame::parse(&line) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("skipping frame: {}", e);
                continue;
            }
        };

        match frame.phase() {
            FramePhase::Deploy => {
                let commands = engine.play_turn(&frame);
                writeln!(out, "{}", commands.to_submit_json(engine.config())).unwrap();
                out.flush().unwrap();
            }
            FramePhase::Action => {
                engine.on_action_frame(&frame);
            }
            FramePhase::End => {
                break;
            }
        }
    }
}
