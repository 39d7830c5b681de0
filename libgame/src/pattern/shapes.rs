//! Small well-known shapes that can be stamped onto a board.

use super::Pattern;
use crate::{
    board::{Board, Cell},
    pos::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    /// Live cells as `(row, col)` relative to the shape's top-left corner.
    pub alive: &'static [(u32, u32)],
}

pub const GLIDER: Shape = Shape {
    name: "glider",
    width: 3,
    height: 3,
    alive: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const BLINKER: Shape = Shape {
    name: "blinker",
    width: 3,
    height: 1,
    alive: &[(0, 0), (0, 1), (0, 2)],
};

pub const R_PENTOMINO: Shape = Shape {
    name: "r-pentomino",
    width: 3,
    height: 3,
    alive: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const ALL: &[Shape] = &[GLIDER, BLINKER, R_PENTOMINO];

impl Shape {
    pub fn by_name(name: &str) -> Option<&'static Shape> {
        ALL.iter().find(|shape| shape.name.eq_ignore_ascii_case(name))
    }

    /// Sets the shape's live cells with its top-left corner at `origin`. Cells that would land
    /// outside the board are dropped. Returns how many cells were placed.
    pub fn stamp(&self, board: &mut Board, origin: Position) -> usize {
        self.alive
            .iter()
            .filter_map(|&(row, col)| {
                let pos = Position {
                    row: origin.row.checked_add(row)?,
                    col: origin.col.checked_add(col)?,
                };
                board.set(pos, Cell::Alive).ok()
            })
            .count()
    }

    pub fn to_pattern(&self) -> Pattern {
        let mut board = Board::with_cells(
            self.width,
            self.height,
            vec![Cell::Dead; (self.width * self.height) as usize],
        );
        self.stamp(&mut board, Position::default());

        Pattern {
            width: self.width,
            height: self.height,
            cells: board.cells().to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pattern::parse_str;

    const GLIDER_CELLS: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/patterns/glider.cells"
    ));
    const BLINKER_CELLS: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/patterns/blinker.cells"
    ));
    const R_PENTOMINO_RLE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/patterns/r-pentomino.rle"
    ));

    #[test]
    fn test_shapes_match_pattern_files() {
        assert_eq!(GLIDER.to_pattern(), parse_str(GLIDER_CELLS).unwrap());
        assert_eq!(BLINKER.to_pattern(), parse_str(BLINKER_CELLS).unwrap());
        assert_eq!(R_PENTOMINO.to_pattern(), parse_str(R_PENTOMINO_RLE).unwrap());
    }

    #[test]
    fn test_stamp_clips() {
        let mut board = Board::new(3, 3).unwrap();
        let placed = GLIDER.stamp(&mut board, Position::new(1, 1));
        assert_eq!(placed, 1);
        assert_eq!(board.get((1, 2)), Ok(Cell::Alive));
        assert_eq!(board.get((2, 1)), Ok(Cell::Dead));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Shape::by_name("Glider"), Some(&GLIDER));
        assert_eq!(Shape::by_name("loaf"), None);
    }
}
