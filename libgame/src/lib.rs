//! A Game of Life engine: a bounded cell grid stepped one generation at a time under a chosen
//! boundary mode, reporting either the whole grid or just the cells that changed.

use std::fmt;

use board::{Board, Cell};
use boundary::BoundaryMode;
use error::{ParseError, UniverseError};
use pattern::{Pattern, PatternKind, shapes::Shape};
use pos::Position;
use rand::{SeedableRng, rngs::StdRng};
use transition::{DeltaRecord, TransitionEngine};

pub mod board;
pub mod boundary;
pub mod error;
pub mod neighbors;
pub mod pattern;
pub mod pos;
pub mod rule;
pub mod transition;

/// One simulation instance: a grid, its boundary mode and the changes from the last delta step.
///
/// Every operation runs to completion before returning. Errors leave the universe as it was.
#[derive(Debug, Clone)]
pub struct Universe {
    board: Board,
    boundary_mode: BoundaryMode,
    engine: TransitionEngine,
    delta: DeltaRecord,
    generation: u64,
}

impl Universe {
    /// An all-dead universe that wraps at its edges.
    pub fn new(width: u32, height: u32) -> Result<Self, UniverseError> {
        Ok(Self::with_board(Board::new(width, height)?))
    }

    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self::with_board(pattern.clone().into_board())
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            boundary_mode: BoundaryMode::default(),
            engine: TransitionEngine::new(),
            delta: DeltaRecord::new(),
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.board.width()
    }

    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// Changes the width. Every cell is reset to dead, whatever the new width.
    pub fn set_width(&mut self, width: u32) -> Result<(), UniverseError> {
        self.resize(width, self.height())
    }

    /// Changes the height. Every cell is reset to dead, whatever the new height.
    pub fn set_height(&mut self, height: u32) -> Result<(), UniverseError> {
        self.resize(self.width(), height)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), UniverseError> {
        self.board.resize(width, height)?;
        self.restart();
        Ok(())
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    /// Takes effect on the next step.
    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        self.boundary_mode = mode;
    }

    pub fn reset(&mut self, kind: PatternKind) {
        match kind {
            PatternKind::Blank => self.reset_blank(),
            PatternKind::Random => self.reset_random(),
            PatternKind::Fancy => self.reset_fancy(),
        }
    }

    pub fn reset_blank(&mut self) {
        pattern::fill_blank(&mut self.board);
        self.restart();
    }

    pub fn reset_random(&mut self) {
        pattern::fill_random(&mut self.board, &mut rand::rng());
        self.restart();
    }

    /// A random fill that is the same for the same seed and dimensions.
    pub fn reset_random_seeded(&mut self, seed: u64) {
        pattern::fill_random(&mut self.board, &mut StdRng::seed_from_u64(seed));
        self.restart();
    }

    pub fn reset_fancy(&mut self) {
        pattern::fill_fancy(&mut self.board);
        self.restart();
    }

    /// Replaces the grid with a plaintext or RLE pattern, adopting its dimensions.
    ///
    /// The input is fully parsed before anything changes, so on error the universe is untouched.
    pub fn load_from_text(&mut self, input: &[u8]) -> Result<(), ParseError> {
        let pattern = pattern::parse_bytes(input)?;
        self.load_pattern(&pattern);
        Ok(())
    }

    pub fn load_pattern(&mut self, pattern: &Pattern) {
        self.board = pattern.clone().into_board();
        self.restart();
    }

    /// Advances one generation, recomputing the whole grid.
    pub fn step(&mut self) {
        self.delta.clear();
        self.engine.step(&mut self.board, self.boundary_mode);
        self.generation += 1;
    }

    /// Advances one generation, recording the cells that were born or died.
    pub fn step_delta(&mut self) {
        self.engine
            .step_delta(&mut self.board, self.boundary_mode, &mut self.delta);
        self.generation += 1;
    }

    /// Returns the cells buffer.
    ///
    /// Cells are laid out as a linear stack of rows.
    /// Mapping from (row, col) coordinates to an index into the linear stack
    /// can be done with: `idx = (row_num * width + col_num)`
    pub fn cells(&self) -> &[Cell] {
        self.board.cells()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: u32, col: u32) -> Result<Cell, UniverseError> {
        self.board.get((row, col))
    }

    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) -> Result<(), UniverseError> {
        self.board.set((row, col), cell)?;
        self.delta.clear();
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> Result<Cell, UniverseError> {
        let cell = self.board.toggle((row, col))?;
        self.delta.clear();
        Ok(cell)
    }

    /// Makes every listed cell alive. Nothing changes unless every coordinate is in range.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) -> Result<(), UniverseError> {
        let positions = cells
            .iter()
            .map(|&pos| self.board.get(pos).map(|_| pos))
            .collect::<Result<Vec<_>, _>>()?;

        for pos in positions {
            self.board.set(pos, Cell::Alive)?;
        }
        self.delta.clear();

        Ok(())
    }

    /// Stamps a shape with its top-left corner at `(row, col)`, clipping whatever falls off the
    /// grid. Returns how many cells were placed.
    pub fn place_shape(
        &mut self,
        shape: &Shape,
        row: u32,
        col: u32,
    ) -> Result<usize, UniverseError> {
        self.board.get((row, col))?;

        let placed = shape.stamp(&mut self.board, Position::new(row, col));
        self.delta.clear();

        Ok(placed)
    }

    pub fn delta(&self) -> &DeltaRecord {
        &self.delta
    }

    pub fn born(&self) -> &[Position] {
        self.delta.born()
    }

    pub fn died(&self) -> &[Position] {
        self.delta.died()
    }

    pub fn born_count(&self) -> usize {
        self.delta.born().len()
    }

    pub fn died_count(&self) -> usize {
        self.delta.died().len()
    }

    /// Steps taken since the grid was last reset, resized or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.board.live_count()
    }

    /// The grid as plaintext pattern rows, readable by [`Universe::load_from_text`].
    pub fn render_as_text(&self) -> String {
        self.to_string()
    }

    fn restart(&mut self) {
        self.delta.clear();
        self.generation = 0;
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pattern::plaintext::write_cells(f, self.board.width(), self.board.cells())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let universe = Universe::new(4, 3).unwrap();
        assert_eq!((universe.width(), universe.height()), (4, 3));
        assert_eq!(universe.boundary_mode(), BoundaryMode::Wrap);
        assert_eq!(universe.live_count(), 0);
        assert_eq!(universe.cells().len(), 12);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(
            Universe::new(0, 5).unwrap_err(),
            UniverseError::InvalidDimension {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn test_new_rejects_unallocatable() {
        assert_eq!(
            Universe::new(u32::MAX, u32::MAX).unwrap_err(),
            UniverseError::InvalidDimension {
                width: u32::MAX,
                height: u32::MAX
            }
        );
    }

    #[test]
    fn test_set_dimensions_reset_cells() {
        let mut universe = Universe::new(8, 8).unwrap();
        universe.reset_fancy();
        universe.step();

        universe.set_width(8).unwrap();
        assert_eq!(universe.live_count(), 0);
        assert_eq!(universe.generation(), 0);

        universe.reset_fancy();
        universe.set_height(5).unwrap();
        assert_eq!((universe.width(), universe.height()), (8, 5));
        assert_eq!(universe.live_count(), 0);
    }

    #[test]
    fn test_invalid_dimension_keeps_state() {
        let mut universe = Universe::new(6, 6).unwrap();
        universe.reset_fancy();
        let before = universe.render_as_text();

        assert!(universe.set_width(0).is_err());
        assert!(universe.set_height(0).is_err());
        assert_eq!(universe.render_as_text(), before);
        assert_eq!((universe.width(), universe.height()), (6, 6));
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut universe = Universe::new(3, 3).unwrap();
        universe.toggle_cell(1, 1).unwrap();
        let before = universe.cells().to_vec();

        assert_eq!(
            universe.toggle_cell(3, 0),
            Err(UniverseError::IndexOutOfRange {
                row: 3,
                col: 0,
                width: 3,
                height: 3
            })
        );
        assert_eq!(universe.cells(), before.as_slice());
    }

    #[test]
    fn test_set_cells_is_all_or_nothing() {
        let mut universe = Universe::new(3, 3).unwrap();
        assert!(universe.set_cells(&[(0, 0), (5, 5)]).is_err());
        assert_eq!(universe.live_count(), 0);

        universe.set_cells(&[(0, 0), (2, 1)]).unwrap();
        assert_eq!(universe.render_as_text(), "O..\n...\n.O.\n");
    }

    #[test]
    fn test_place_shape() {
        let mut universe = Universe::new(5, 5).unwrap();
        universe.reset_fancy();
        universe.step_delta();

        let glider = Shape::by_name("glider").unwrap();
        assert_eq!(universe.place_shape(glider, 3, 3), Ok(1));
        assert_eq!(universe.cell(3, 4), Ok(Cell::Alive));
        assert!(universe.delta().is_empty());

        let before = universe.cells().to_vec();
        assert!(universe.place_shape(glider, 5, 0).is_err());
        assert_eq!(universe.cells(), before.as_slice());
    }

    #[test]
    fn test_glider_moves_on_torus() {
        let mut universe = Universe::new(6, 6).unwrap();
        universe.reset_fancy();
        let start = universe.render_as_text();

        for _ in 0..4 {
            universe.step_delta();
        }

        assert_eq!(universe.generation(), 4);
        assert_eq!(universe.live_count(), 5);
        assert_ne!(universe.render_as_text(), start);
        // A glider travels one cell down and one right every four generations.
        assert_eq!(
            universe.render_as_text(),
            "......\n..O...\n...O..\n.OOO..\n......\n......\n"
        );
    }

    #[test]
    fn test_delta_counts() {
        let mut universe = Universe::new(5, 5).unwrap();
        universe.set_cells(&[(2, 1), (2, 2), (2, 3)]).unwrap();

        universe.step_delta();
        assert_eq!(universe.born_count(), 2);
        assert_eq!(universe.died_count(), 2);
        assert_eq!(universe.born(), &[Position::new(1, 2), Position::new(3, 2)]);
        assert_eq!(universe.died(), &[Position::new(2, 1), Position::new(2, 3)]);
    }

    #[test]
    fn test_mutations_clear_delta() {
        let mut universe = Universe::new(5, 5).unwrap();
        universe.set_cells(&[(2, 1), (2, 2), (2, 3)]).unwrap();

        universe.step_delta();
        universe.toggle_cell(0, 0).unwrap();
        assert!(universe.delta().is_empty());

        universe.step_delta();
        universe.step();
        assert!(universe.delta().is_empty());
    }

    #[test]
    fn test_load_from_text() {
        let mut universe = Universe::new(10, 10).unwrap();
        universe.load_from_text(b"!Name: Pair\n.O.\nO.O\n").unwrap();

        assert_eq!((universe.width(), universe.height()), (3, 2));
        assert_eq!(universe.render_as_text(), ".O.\nO.O\n");
    }

    #[test]
    fn test_load_rle() {
        let mut universe = Universe::new(2, 2).unwrap();
        universe.load_from_text(b"x = 3, y = 1\n3o!\n").unwrap();
        assert_eq!(universe.render_as_text(), "OOO\n");
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut universe = Universe::new(4, 4).unwrap();
        universe.reset_fancy();
        universe.step_delta();
        let cells = universe.cells().to_vec();
        let born = universe.born().to_vec();

        let err = universe.load_from_text(b"OO\nO\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(universe.load_from_text(b"").is_err());
        assert!(
            universe
                .load_from_text(b"x = 4294967295, y = 4294967295\n!")
                .is_err()
        );

        assert_eq!((universe.width(), universe.height()), (4, 4));
        assert_eq!(universe.cells(), cells.as_slice());
        assert_eq!(universe.born(), born.as_slice());
        assert_eq!(universe.generation(), 1);
    }

    #[test]
    fn test_boundary_mode_applies_to_next_step() {
        let mut universe = Universe::new(1, 1).unwrap();
        universe.set_boundary_mode(BoundaryMode::Alive);
        universe.step();
        // Dead with 8 live (outside) neighbors stays dead.
        assert_eq!(universe.cells(), &[Cell::Dead]);

        universe.toggle_cell(0, 0).unwrap();
        universe.set_boundary_mode(BoundaryMode::Dead);
        universe.step_delta();
        assert_eq!(universe.died(), &[Position::new(0, 0)]);
    }

    #[test]
    fn test_seeded_random_repeats() {
        let mut a = Universe::new(12, 7).unwrap();
        let mut b = Universe::new(12, 7).unwrap();
        a.reset_random_seeded(42);
        b.reset_random_seeded(42);
        assert_eq!(a.cells(), b.cells());
    }
}
