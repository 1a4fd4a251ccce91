//! Headless demo runner (default binary).
//!
//! Plays a seeded session by probing random adjacent swaps until the
//! requested number of moves resolve, printing every engine event as a
//! JSON line plus a final snapshot. Useful for eyeballing cascade
//! behavior and for piping into analysis tools.

use anyhow::{anyhow, Result};
use serde_json::json;

use kitchen_crush::core::{Engine, EngineConfig, EngineEvent, EngineSnapshot, SimpleRng};
use kitchen_crush::types::Coordinate;

struct DemoConfig {
    seed: u32,
    moves: u32,
}

fn parse_args(args: &[String]) -> Result<DemoConfig> {
    let mut config = DemoConfig { seed: 1, moves: 10 };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --moves"))?;
                config.moves = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --moves value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn event_json(event: &EngineEvent) -> serde_json::Value {
    match event {
        EngineEvent::SwapAccepted { a, b } => json!({
            "type": "swap_accepted",
            "a": [a.x, a.y],
            "b": [b.x, b.y],
        }),
        EngineEvent::SwapRejected { a, b, reason } => json!({
            "type": "swap_rejected",
            "a": [a.x, a.y],
            "b": [b.x, b.y],
            "code": reason.code(),
            "message": reason.message(),
        }),
        EngineEvent::TilesCleared { count } => json!({
            "type": "tiles_cleared",
            "count": count,
        }),
        EngineEvent::SpecialSpawned { at, kind } => json!({
            "type": "special_spawned",
            "at": [at.x, at.y],
            "kind": kind.as_str(),
        }),
        EngineEvent::SpecialActivated { at, kind, affected } => json!({
            "type": "special_activated",
            "at": [at.x, at.y],
            "kind": kind.as_str(),
            "affected": affected,
        }),
        EngineEvent::BoardSettled { cascades } => json!({
            "type": "board_settled",
            "cascades": cascades,
        }),
        EngineEvent::BoardReset => json!({ "type": "board_reset" }),
        EngineEvent::GenerationExhausted { residual } => json!({
            "type": "generation_exhausted",
            "residual": residual,
        }),
    }
}

fn flush_events(engine: &mut Engine) {
    for event in engine.drain_events() {
        println!("{}", event_json(&event));
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut engine = Engine::new(EngineConfig {
        seed: config.seed,
        ..EngineConfig::default()
    });
    flush_events(&mut engine);

    // Separate stream so probing does not disturb refill determinism
    let mut probe = SimpleRng::new(config.seed.wrapping_add(1));
    let width = engine.board().width() as i8;
    let height = engine.board().height() as i8;

    let mut attempts = 0u32;
    while engine.moves_resolved() < config.moves {
        attempts += 1;
        if attempts > config.moves.saturating_mul(10_000) {
            return Err(anyhow!("no accepted swap found after {} probes", attempts));
        }

        let a = Coordinate::new(
            probe.next_range(width as u32) as i8,
            probe.next_range(height as u32) as i8,
        );
        let b = if probe.percent(50) {
            Coordinate::new(a.x + 1, a.y)
        } else {
            Coordinate::new(a.x, a.y + 1)
        };
        if !engine.board().in_bounds(b.x, b.y) {
            continue;
        }

        let outcome = engine.request_swap(a, b);
        if outcome.is_accepted() {
            flush_events(&mut engine);
        } else {
            // Drop the rejection chatter; only accepted moves are printed
            engine.drain_events();
        }
    }

    let snapshot = EngineSnapshot::of(&engine);
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}
