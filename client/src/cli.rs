use std::{
    io,
    sync::{Arc, RwLock, RwLockWriteGuard},
    time::Duration,
};

use anyhow::{Context, anyhow, bail};
use libgame::{
    boundary::BoundaryMode,
    pattern::{PatternKind, shapes::Shape},
};

use crate::{
    State, config, display,
    ticker::{TickerHost, nature::NatureTicker},
};

pub fn run_cli(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                eprintln!("! {e:?}");
                break;
            }
        };

        let mut args = line.split_whitespace().peekable();
        if args.peek().is_none() {
            continue;
        }

        match handle_cmd(state_arc.clone(), args) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("! {e:?}"),
        }
    }

    let ticker = match state_arc.write() {
        Ok(mut state) => state.ticker.take(),
        Err(_) => None,
    };
    if let Some(ticker) = ticker {
        ticker.stop();
    }
}

enum Flow {
    Continue,
    Exit,
}

fn handle_cmd<'a, I>(state_arc: Arc<RwLock<State>>, mut args: I) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str>,
{
    let cmd = args.next().context("No command")?;

    match cmd {
        "step" | "delta" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = lock(&state_arc)?;
            for _ in 0..times {
                if cmd == "delta" {
                    state.universe.step_delta();
                } else {
                    state.universe.step();
                }
            }
            print_state(&state);
        }

        "run" => {
            let mut state = lock(&state_arc)?;
            let rate = match args.next() {
                Some(rate) => rate.parse::<u64>()?,
                None => state.config.tick_millis,
            };
            state.config.tick_millis = rate;

            let interval = Duration::from_millis(rate);

            // A ticker whose thread already exited no longer listens, so replace it.
            let running = match state.ticker.take() {
                Some(ticker) if ticker.set_interval(interval) => {
                    state.ticker = Some(ticker);
                    true
                }
                _ => false,
            };
            drop(state);

            if !running {
                let ticker =
                    TickerHost::start(state_arc.clone(), interval, Box::new(NatureTicker));
                lock(&state_arc)?.ticker = Some(ticker);
            }
        }

        "stop" => {
            let ticker = lock(&state_arc)?.ticker.take();
            ticker.context("Not running")?.stop();
        }

        "show" => {
            print_state(&*lock(&state_arc)?);
        }

        "blank" | "random" | "fancy" => {
            let mut state = lock(&state_arc)?;
            let state = &mut *state;

            match (cmd, args.next()) {
                ("random", Some(seed)) => state.universe.reset_random_seeded(seed.parse()?),
                _ => {
                    let pattern = cmd.parse::<PatternKind>()?;
                    state.config.fill(&mut state.universe, pattern);
                }
            }
            print_state(state);
        }

        "load" => {
            let path = args.collect::<Vec<_>>().join(" ");
            if path.is_empty() {
                bail!("missing pattern path");
            }

            let mut state = lock(&state_arc)?;
            config::load_pattern_file(&mut state.universe, &path)?;
            print_state(&state);
        }

        "resize" => {
            let width = args.next().context("missing width")?.parse::<u32>()?;
            let height = args.next().context("missing height")?.parse::<u32>()?;

            let mut state = lock(&state_arc)?;
            state.universe.resize(width, height)?;
            print_state(&state);
        }

        "boundary" => {
            let mode = args
                .next()
                .context("missing boundary mode (wrap, dead or alive)")?
                .parse::<BoundaryMode>()?;

            lock(&state_arc)?.universe.set_boundary_mode(mode);
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<u32>()?;
            let col = args.next().context("missing column")?.parse::<u32>()?;

            let mut state = lock(&state_arc)?;
            state.universe.toggle_cell(row, col)?;
            print_state(&state);
        }

        "shape" => {
            let name = args.next().context("missing shape name")?;
            let shape = Shape::by_name(name).with_context(|| format!("Unknown shape {name}"))?;
            let row = args.next().unwrap_or("0").parse::<u32>()?;
            let col = args.next().unwrap_or("0").parse::<u32>()?;

            let mut state = lock(&state_arc)?;
            state.universe.place_shape(shape, row, col)?;
            print_state(&state);
        }

        "exit" => {
            return Ok(Flow::Exit);
        }

        _ => bail!("Unknown command"),
    }

    println!("OK");
    Ok(Flow::Continue)
}

fn lock(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
    state_arc.write().map_err(|_| anyhow!("state lock poisoned"))
}

fn print_state(state: &State) {
    display::print_universe(&state.universe, state.config.show_changes);
}
