use serde::{Deserialize, Serialize};

/// A cell coordinate. Rows count down from the top edge, columns right from the left edge.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Offsets the position by a signed amount on each axis, without any bounds handling.
    pub fn offset(self, delta_row: i64, delta_col: i64) -> (i64, i64) {
        (self.row as i64 + delta_row, self.col as i64 + delta_col)
    }
}

impl From<(u32, u32)> for Position {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

impl From<[u32; 2]> for Position {
    fn from(value: [u32; 2]) -> Self {
        Self {
            row: value[0],
            col: value[1],
        }
    }
}

impl From<Position> for (u32, u32) {
    fn from(value: Position) -> Self {
        (value.row, value.col)
    }
}
