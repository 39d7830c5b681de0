//! Initial grid contents: parsed text patterns and procedural fills.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    board::{Board, Cell, cell_count},
    error::{ParseError, UniverseError},
    pos::Position,
};

pub mod plaintext;
pub mod rle;
pub mod shapes;

/// Procedural fills a universe can be reset to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PatternKind {
    Blank,
    Random,
    #[default]
    Fancy,
}

/// Immutable pattern storage, the result of parsing pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Pattern {
    pub fn new(width: u32, height: u32, cells: Vec<Cell>) -> Result<Self, UniverseError> {
        if cell_count(width, height)? != cells.len() {
            return Err(UniverseError::InvalidDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Live cell positions in row-major order.
    pub fn live_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(index, _)| Position {
                row: (index / width) as u32,
                col: (index % width) as u32,
            })
    }

    pub(crate) fn into_board(self) -> Board {
        Board::with_cells(self.width, self.height, self.cells)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        plaintext::write_cells(f, self.width, &self.cells)
    }
}

/// Text formats understood by [`parse_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Format {
    Plaintext,
    Rle,
}

impl Format {
    /// Guesses the format from the input. Anything that does not look like RLE is treated as
    /// plaintext, which then reports its own errors.
    pub fn sniff(input: &str) -> Self {
        if rle::sniff(input) {
            Format::Rle
        } else {
            Format::Plaintext
        }
    }

    pub fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Plaintext => &["cells", "txt"],
            Format::Rle => &["rle"],
        }
    }

    /// The format a file extension conventionally holds, compared case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        [Format::Plaintext, Format::Rle].into_iter().find(|format| {
            format
                .file_extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
    }
}

pub fn parse_str(input: &str) -> Result<Pattern, ParseError> {
    match Format::sniff(input) {
        Format::Plaintext => plaintext::parse(input),
        Format::Rle => rle::parse(input),
    }
}

/// Parses raw bytes, which must be UTF-8.
pub fn parse_bytes(input: &[u8]) -> Result<Pattern, ParseError> {
    let input = std::str::from_utf8(input).map_err(|e| {
        let valid = &input[..e.valid_up_to()];
        // `valid_up_to` marks a prefix that always decodes.
        let valid = std::str::from_utf8(valid).unwrap_or_default();
        ParseError::at(valid, "", "input is not valid UTF-8")
    })?;

    parse_str(input)
}

pub fn fill_blank(board: &mut Board) {
    board.clear();
}

/// Makes each cell independently alive with probability one half.
pub fn fill_random<R>(board: &mut Board, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for cell in board.cells_mut() {
        *cell = Cell::from(rng.random_bool(0.5));
    }
}

/// The fixed "fancy" start: a glider in the top-left corner and, on boards of at least
/// 10x10, an R-pentomino in the middle. Everything else is dead.
pub fn fill_fancy(board: &mut Board) {
    board.clear();

    shapes::GLIDER.stamp(board, Position::new(0, 0));

    if board.width() >= 10 && board.height() >= 10 {
        let shape = &shapes::R_PENTOMINO;
        let origin = Position {
            row: (board.height() - shape.height) / 2,
            col: (board.width() - shape.width) / 2,
        };
        shape.stamp(board, origin);
    }
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_sniff() {
        assert_eq!(Format::sniff("!Name: Glider\n.O.\n"), Format::Plaintext);
        assert_eq!(Format::sniff("x = 3, y = 3\nbo$2bo$3o!\n"), Format::Rle);
        assert_eq!(Format::sniff("#N Glider\nx = 3, y = 3\n3o!"), Format::Rle);
        assert_eq!(Format::sniff(""), Format::Plaintext);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("cells"), Some(Format::Plaintext));
        assert_eq!(Format::from_extension("RLE"), Some(Format::Rle));
        assert_eq!(Format::from_extension("lif"), None);
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(b"O.\n.\xff").unwrap_err();
        assert_eq!((err.line, err.column), (2, 2));
    }

    #[test]
    fn test_pattern_dimensions_checked() {
        assert!(Pattern::new(2, 2, vec![Cell::Dead; 3]).is_err());
        assert!(Pattern::new(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_live_positions() {
        let pattern = parse_str(".O\nO.\n").unwrap();
        assert_eq!(
            pattern.live_positions().collect::<Vec<_>>(),
            vec![Position::new(0, 1), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_random_fill_is_seeded() {
        let mut a = Board::new(16, 16).unwrap();
        let mut b = Board::new(16, 16).unwrap();

        fill_random(&mut a, &mut StdRng::seed_from_u64(7));
        fill_random(&mut b, &mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
        assert!(a.live_count() > 0 && a.live_count() < 256);
    }

    #[test]
    fn test_fancy_small_board() {
        let mut board = Board::new(4, 4).unwrap();
        fill_fancy(&mut board);
        assert_eq!(board.live_count(), 5);
        assert_eq!(board.get((2, 2)), Ok(Cell::Alive));
    }

    #[test]
    fn test_fancy_large_board() {
        let mut board = Board::new(20, 12).unwrap();
        fill_fancy(&mut board);
        assert_eq!(board.live_count(), 10);
        // Top-left of the centred R-pentomino's box is (4, 8); its first live cell is (4, 9).
        assert_eq!(board.get((4, 9)), Ok(Cell::Alive));
    }

    #[test]
    fn test_fancy_clipped() {
        let mut board = Board::new(2, 1).unwrap();
        fill_fancy(&mut board);
        assert_eq!(board.cells(), &[Cell::Dead, Cell::Alive]);
    }
}
