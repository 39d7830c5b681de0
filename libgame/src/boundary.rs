//! Resolution of neighbor lookups that fall outside the grid.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::board::{Board, Cell};

/// How neighbor lookups past the grid edges are answered.
///
/// Stored per universe and read at the start of every transition, so a change takes effect on
/// the next step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryMode {
    /// Edges are adjacent to the opposite edges (torus topology).
    #[default]
    Wrap,
    /// Everything outside the grid counts as dead.
    Dead,
    /// Everything outside the grid counts as alive.
    Alive,
}

impl BoundaryMode {
    /// The fixed value reported for outside coordinates, or `None` if the mode wraps instead.
    pub fn outside_cell(self) -> Option<Cell> {
        match self {
            BoundaryMode::Wrap => None,
            BoundaryMode::Dead => Some(Cell::Dead),
            BoundaryMode::Alive => Some(Cell::Alive),
        }
    }

    /// Maps an index on one axis into `[0, extent)`, or `None` if it lies outside and the mode
    /// does not wrap.
    pub fn resolve_axis(self, index: i64, extent: u32) -> Option<u32> {
        let extent = extent as i64;

        if (0..extent).contains(&index) {
            return Some(index as u32);
        }

        match self {
            BoundaryMode::Wrap => Some(index.rem_euclid(extent) as u32),
            BoundaryMode::Dead | BoundaryMode::Alive => None,
        }
    }

    /// Looks up a possibly out-of-range coordinate on the board.
    ///
    /// Each axis is resolved on its own; under the fixed modes a single outside axis is enough
    /// to produce the fixed value.
    pub fn resolve(self, board: &Board, row: i64, col: i64) -> Cell {
        let resolved = self
            .resolve_axis(row, board.height())
            .zip(self.resolve_axis(col, board.width()));

        match resolved {
            Some((row, col)) => board.cell_at(row, col),
            // Only the fixed modes can fail to resolve an axis.
            None => self.outside_cell().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("wrap".parse(), Ok(BoundaryMode::Wrap));
        assert_eq!("dead".parse(), Ok(BoundaryMode::Dead));
        assert_eq!("alive".parse(), Ok(BoundaryMode::Alive));
        assert!("torus".parse::<BoundaryMode>().is_err());
        assert_eq!(BoundaryMode::Alive.to_string(), "alive");
    }

    #[test]
    fn test_wrap_axis() {
        assert_eq!(BoundaryMode::Wrap.resolve_axis(-1, 5), Some(4));
        assert_eq!(BoundaryMode::Wrap.resolve_axis(5, 5), Some(0));
        assert_eq!(BoundaryMode::Wrap.resolve_axis(-1, 1), Some(0));
        assert_eq!(BoundaryMode::Wrap.resolve_axis(3, 5), Some(3));
    }

    #[test]
    fn test_fixed_axis() {
        assert_eq!(BoundaryMode::Dead.resolve_axis(-1, 5), None);
        assert_eq!(BoundaryMode::Alive.resolve_axis(5, 5), None);
        assert_eq!(BoundaryMode::Alive.resolve_axis(2, 5), Some(2));
    }

    #[test]
    fn test_resolve_corner() {
        let mut board = Board::new(3, 3).unwrap();
        board.set((2, 2), Cell::Alive).unwrap();

        assert_eq!(BoundaryMode::Wrap.resolve(&board, -1, -1), Cell::Alive);
        assert_eq!(BoundaryMode::Dead.resolve(&board, -1, -1), Cell::Dead);
        assert_eq!(BoundaryMode::Alive.resolve(&board, -1, 1), Cell::Alive);
        assert_eq!(BoundaryMode::Alive.resolve(&board, 1, 1), Cell::Dead);
    }
}
