use std::{
    env,
    sync::{Arc, RwLock},
};

use anyhow::Context;
use config::ClientConfig;
use libgame::Universe;
use ticker::TickerHost;

mod cli;
mod config;
mod display;
mod ticker;

pub struct State {
    universe: Universe,
    config: ClientConfig,
    ticker: Option<TickerHost>,
}

impl State {
    pub fn new(universe: Universe, config: ClientConfig) -> Self {
        Self {
            universe,
            config,
            ticker: None,
        }
    }

    /// One generation, in delta mode when changes are being shown.
    pub fn advance(&mut self) {
        if self.config.show_changes {
            self.universe.step_delta();
        } else {
            self.universe.step();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(config_path) => ClientConfig::load(config_path)?,
        None => ClientConfig::default(),
    };

    let universe = config
        .build_universe()
        .context("Couldn't create universe")?;
    display::print_universe(&universe, config.show_changes);

    let state_arc = Arc::new(RwLock::new(State::new(universe, config)));
    cli::run_cli(state_arc);

    Ok(())
}
