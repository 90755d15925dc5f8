//! Headless autoplay runner (default binary).
//!
//! Builds a session from `HEX_TRIAD_*` environment variables and plays it
//! by always taking the first available move, printing every event.
//! Set `RUST_LOG=debug` to follow the engine pass by pass.

use anyhow::{anyhow, Context, Result};

use hex_triad::core::EngineConfig;
use hex_triad::session::{Event, Session};

const DEFAULT_TURNS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunArgs {
    seed: Option<u32>,
    turns: u32,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<RunArgs> {
    let mut run = RunArgs {
        seed: None,
        turns: DEFAULT_TURNS,
        json: false,
    };
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                run.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--turns" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --turns"))?;
                run.turns = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --turns value: {}", v))?;
            }
            "--json" => run.json = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(run)
}

fn describe(event: &Event) -> String {
    match event {
        Event::Rejected { selection } => format!("rejected {:?}", selection),
        Event::Rotated { clockwise, path } => format!(
            "rotated {} by {} step(s)",
            if *clockwise { "clockwise" } else { "counter-clockwise" },
            path.len()
        ),
        Event::Exploded {
            pass_index,
            elements,
        } => {
            let cells: usize = elements.iter().map(|e| e.positions.len()).sum();
            format!(
                "exploded {} group(s), {} cell(s) (pass {})",
                elements.len(),
                cells,
                pass_index
            )
        }
        Event::ScoreChanged { score } => format!("score {}", score),
        Event::BombsUpdated { bombs } => {
            let timers: Vec<String> = bombs
                .iter()
                .map(|b| format!("({},{})={}", b.coord.x, b.coord.y, b.moves_left))
                .collect();
            format!("bombs [{}]", timers.join(" "))
        }
        Event::Filled { passes } => {
            let spawned = passes.iter().flatten().filter(|r| r.is_spawn()).count();
            format!("filled in {} pass(es), {} new cell(s)", passes.len(), spawned)
        }
        Event::GameOver { reason } => format!("game over: {:?}", reason),
    }
}

fn emit(events: &[Event], json: bool) -> Result<()> {
    for event in events {
        if json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("  {}", describe(event));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;

    let mut config = EngineConfig::from_env();
    if let Some(seed) = run.seed {
        config = config.with_seed(seed);
    }
    let mut session = Session::new(config.clone())
        .with_context(|| format!("failed to start session with {:?}", config))?;

    if !run.json {
        println!(
            "board {}x{}, {} colors, seed {}",
            config.width, config.height, config.colors, config.seed
        );
    }
    emit(&session.start(), run.json)?;

    for turn in 1..=run.turns {
        if session.is_over() {
            break;
        }
        let Some(selection) = session.first_available_move() else {
            break;
        };
        if !run.json {
            println!("turn {}: {:?}", turn, selection.coords());
        }
        emit(&session.rotate(&selection, true), run.json)?;
    }

    if !run.json {
        println!("final score {}", session.score());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let run = parse_args(&[]).unwrap();
        assert_eq!(
            run,
            RunArgs {
                seed: None,
                turns: DEFAULT_TURNS,
                json: false
            }
        );
    }

    #[test]
    fn test_parse_all_flags() {
        let run = parse_args(&args(&["--seed", "42", "--json", "--turns", "3"])).unwrap();
        assert_eq!(run.seed, Some(42));
        assert_eq!(run.turns, 3);
        assert!(run.json);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--turns", "many"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }
}
