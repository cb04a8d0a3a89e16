//! Ring Pilot headless demo driver
//!
//! Runs the engine without a renderer: a simple autopilot steers at the
//! nearest ring until something kills it, then the flight report is
//! requested fire-and-forget and a JSON run summary is printed.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use ring_pilot::consts::{PLANE_X, SIM_DT};
use ring_pilot::report::{CannedReporter, ReportChannel, ReportRequest};
use ring_pilot::sim::{GameEvent, GameState, RunPhase, TerminationCause, TickInput, tick};

/// Cap the demo at two minutes of sim time
const MAX_TICKS: u64 = 2 * 60 * 60;

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    run_id: u64,
    score: u32,
    ticks: u64,
    seconds: f32,
    cause: Option<TerminationCause>,
    report: String,
}

/// Steer at the hole of the nearest ring still ahead of the plane
fn autopilot(state: &GameState) -> TickInput {
    let target_y = state
        .rings
        .iter()
        .filter(|r| !r.passed && r.pos.x > PLANE_X)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|r| r.pos.y)
        .unwrap_or(state.height / 2.0);
    TickInput {
        target_y: Some(target_y),
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("ring-pilot demo starting, seed {seed}");

    let mut state = GameState::new(seed, 1280.0, 720.0);
    state.start(seed);

    let mut cause = None;
    while state.phase == RunPhase::Active && state.time_ticks < MAX_TICKS {
        let input = autopilot(&state);
        tick(&mut state, &input);
        for event in state.take_events() {
            match event {
                GameEvent::RingScored { pos } => {
                    log::info!("ring scored at ({:.0}, {:.0}), score {}", pos.x, pos.y, state.score);
                }
                GameEvent::SpeedIncreased { scroll_speed } => {
                    log::info!("speed increase! now {scroll_speed:.2} px/tick");
                }
                GameEvent::RunTerminated { cause: c, score } => {
                    log::info!("flight terminated: {c:?} with score {score}");
                    cause = Some(c);
                }
            }
        }
    }

    // Fire-and-forget the flight report; the sim is already free to restart
    let reports = ReportChannel::new();
    reports.dispatch(
        Arc::new(CannedReporter),
        ReportRequest {
            run_id: state.run_id,
            final_score: state.score,
        },
    );
    let mut report = String::new();
    for _ in 0..100 {
        if let Some(text) = reports.poll(state.run_id) {
            report = text;
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    let summary = RunSummary {
        seed,
        run_id: state.run_id,
        score: state.score,
        ticks: state.time_ticks,
        seconds: state.time_ticks as f32 * SIM_DT,
        cause,
        report,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize run summary: {err}"),
    }
}
