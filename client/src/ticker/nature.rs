use crate::{State, display};

use super::Ticker;

/// Lets the universe evolve on its own, rendering after every step.
pub struct NatureTicker;

impl Ticker for NatureTicker {
    fn tick(&mut self, state: &mut State) {
        state.advance();
        display::print_universe(&state.universe, state.config.show_changes);
    }
}
