use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::UniverseError;

use super::pos::Position;

/// Row-major `width * height` cell storage.
///
/// The buffer length always equals `width * height`; every change of dimensions reallocates
/// it with all cells dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Result<Self, UniverseError> {
        let cells = dead_cells(width, height)?;
        Ok(Self::with_cells(width, height, cells))
    }

    pub(crate) fn with_cells(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole buffer, laid out as a linear stack of rows: `index = row * width + col`.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn get<P>(&self, pos: P) -> Result<Cell, UniverseError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        Ok(self.cells[index])
    }

    pub fn set<P>(&mut self, pos: P, cell: Cell) -> Result<(), UniverseError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Flips a cell between dead and alive, returning its new state.
    pub fn toggle<P>(&mut self, pos: P) -> Result<Cell, UniverseError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        let cell = &mut self.cells[index];
        *cell = cell.toggled();
        Ok(*cell)
    }

    /// Reallocates the board to the new dimensions with every cell dead.
    ///
    /// Zero dimensions are rejected and leave the board untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), UniverseError> {
        let cells = dead_cells(width, height)?;

        self.width = width;
        self.height = height;
        self.cells = cells;

        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let pos = pos.into();
        self.contains(pos)
            .then(|| pos.row as usize * self.width as usize + pos.col as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position {
            row: (index / width) as u32,
            col: (index % width) as u32,
        }
    }

    /// All positions in row-major order, paired with their cells.
    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(Position::from)
            .zip(self.cells.iter().copied())
    }

    /// Reads an in-range cell. Callers guarantee the coordinate is inside the board.
    pub(crate) fn cell_at(&self, row: u32, col: u32) -> Cell {
        self.cells[row as usize * self.width as usize + col as usize]
    }

    /// Exchanges the cell buffer with an equally sized one.
    pub(crate) fn swap_cells(&mut self, other: &mut Vec<Cell>) {
        debug_assert_eq!(self.cells.len(), other.len());
        std::mem::swap(&mut self.cells, other);
    }

    fn checked_index(&self, pos: Position) -> Result<usize, UniverseError> {
        self.index(pos).ok_or(UniverseError::IndexOutOfRange {
            row: pos.row,
            col: pos.col,
            width: self.width,
            height: self.height,
        })
    }
}

/// Number of cells in a `width * height` board, if that is a board that can exist.
pub(crate) fn cell_count(width: u32, height: u32) -> Result<usize, UniverseError> {
    if width == 0 || height == 0 {
        return Err(UniverseError::InvalidDimension { width, height });
    }

    (width as usize)
        .checked_mul(height as usize)
        .ok_or(UniverseError::InvalidDimension { width, height })
}

/// An all-dead buffer for a `width * height` board. Dimensions whose buffer cannot be
/// allocated are rejected rather than aborting.
pub(crate) fn dead_cells(width: u32, height: u32) -> Result<Vec<Cell>, UniverseError> {
    let len = cell_count(width, height)?;

    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| UniverseError::InvalidDimension { width, height })?;
    cells.resize(len, Cell::Dead);

    Ok(cells)
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}
