//! Generation transitions, in full-buffer and delta-tracking form.
//!
//! Both modes compute the next generation into a spare buffer that is read-only with respect to
//! the current one, then swap it in. Results never depend on scan order.

use crate::{
    board::{Board, Cell},
    boundary::BoundaryMode,
    neighbors::NeighborCounter,
    pos::Position,
    rule::Rule,
};

/// Cells that changed during the most recent delta step.
///
/// The lists are cleared in place before every delta step, so their capacity is reused across
/// steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaRecord {
    born: Vec<Position>,
    died: Vec<Position>,
}

impl DeltaRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells that went from dead to alive, in row-major order.
    pub fn born(&self) -> &[Position] {
        &self.born
    }

    /// Cells that went from alive to dead, in row-major order.
    pub fn died(&self) -> &[Position] {
        &self.died
    }

    pub fn is_empty(&self) -> bool {
        self.born.is_empty() && self.died.is_empty()
    }

    pub fn clear(&mut self) {
        self.born.clear();
        self.died.clear();
    }

    /// Replays the recorded changes onto a board holding the generation they were taken from.
    pub fn apply(&self, board: &mut Board) {
        for (positions, cell) in [(&self.born, Cell::Alive), (&self.died, Cell::Dead)] {
            for &pos in positions {
                if let Some(index) = board.index(pos) {
                    board.cells_mut()[index] = cell;
                }
            }
        }
    }

    fn record(&mut self, pos: Position, new: Cell) {
        match new {
            Cell::Alive => self.born.push(pos),
            Cell::Dead => self.died.push(pos),
        }
    }
}

/// Advances boards one generation at a time.
///
/// Owns the spare buffer used for double buffering; it lives as long as the engine and only
/// reallocates when the board grows.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    rule: Rule,
    spare: Vec<Cell>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full mode: recomputes every cell and swaps the result in.
    pub fn step(&mut self, board: &mut Board, mode: BoundaryMode) {
        self.compute_next(board, mode);
        board.swap_cells(&mut self.spare);
    }

    /// Delta mode: same next generation as [`Self::step`], while recording every cell whose state
    /// changed into `delta`.
    pub fn step_delta(&mut self, board: &mut Board, mode: BoundaryMode, delta: &mut DeltaRecord) {
        delta.clear();
        self.compute_next(board, mode);

        for (index, (&old, &new)) in board.cells().iter().zip(&self.spare).enumerate() {
            if old != new {
                delta.record(board.position(index), new);
            }
        }

        board.swap_cells(&mut self.spare);
    }

    /// Writes the next generation of `board` into the spare buffer. The board is only read.
    fn compute_next(&mut self, board: &Board, mode: BoundaryMode) {
        let rule = self.rule;
        let counter = NeighborCounter::new(board, mode);

        self.spare.clear();
        self.spare.extend(
            board
                .enumerate_cells()
                .map(|(pos, cell)| rule.next(cell, counter.count(pos))),
        );
    }
}
