use crate::{
    board::{Board, Cell},
    boundary::BoundaryMode,
    pos::Position,
};

/// Moore neighborhood offsets as `(row, col)`, in row-major order.
pub const NEIGHBOR_RELATIVE_POSITIONS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Counts live Moore neighbors on a board under a boundary mode.
#[derive(Debug, Clone, Copy)]
pub struct NeighborCounter<'a> {
    board: &'a Board,
    mode: BoundaryMode,
}

impl<'a> NeighborCounter<'a> {
    pub fn new(board: &'a Board, mode: BoundaryMode) -> Self {
        Self { board, mode }
    }

    /// Number of live neighbors, in `0..=8`.
    pub fn count(&self, pos: Position) -> u8 {
        NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .map(|&(delta_row, delta_col)| {
                let (row, col) = pos.offset(delta_row, delta_col);
                self.neighbor(row, col)
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    fn neighbor(&self, row: i64, col: i64) -> Cell {
        let in_rows = (0..self.board.height() as i64).contains(&row);
        let in_cols = (0..self.board.width() as i64).contains(&col);

        if in_rows && in_cols {
            self.board.cell_at(row as u32, col as u32)
        } else {
            self.mode.resolve(self.board, row, col)
        }
    }
}
