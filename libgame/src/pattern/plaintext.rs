//! Plaintext (`.cells`) patterns: one line per row, `O` for alive, `.` for dead.
//!
//! Lines starting with `!` are comments. All rows must have the same length; a trailing newline
//! is optional and `\r\n` line endings are accepted.
//!
//! Based on <https://conwaylife.com/wiki/Plaintext>.

use std::fmt;

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, line_ending, not_line_ending},
    combinator::{eof, value},
    multi::many1,
    sequence::{pair, terminated},
};

use super::Pattern;
use crate::{board::Cell, error::ParseError};

pub const ALIVE: char = 'O';
pub const DEAD: char = '.';
pub const COMMENT: char = '!';

pub fn parse(input: &str) -> Result<Pattern, ParseError> {
    if input.is_empty() {
        return Err(ParseError::new(1, 1, "input is empty"));
    }

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Ok((after, ())) = terminated(comment, line_end)(rest) {
            rest = after;
            continue;
        }

        // Trailing blank lines are allowed, blank lines between rows are not.
        if !rows.is_empty() && rest.trim_end_matches(['\r', '\n']).is_empty() {
            break;
        }

        let Ok((after, row)) = terminated(cell_row, line_end)(rest) else {
            return Err(row_error(input, rest));
        };

        if let Some(expected) = rows.first().map(Vec::len) {
            if expected != row.len() {
                let message = format!("row has {} cells, expected {expected}", row.len());
                let mut err = ParseError::at(input, rest, message);
                err.column = expected.min(row.len()) + 1;
                return Err(err);
            }
        }

        rows.push(row);
        rest = after;
    }

    let height = rows.len();
    let Some(width) = rows.first().map(Vec::len) else {
        return Err(ParseError::at(input, rest, "pattern has no rows"));
    };

    let too_large = |_| ParseError::new(1, 1, "pattern is too large");
    let width = u32::try_from(width).map_err(too_large)?;
    let height = u32::try_from(height).map_err(too_large)?;

    let cells = rows.into_iter().flatten().collect();
    Pattern::new(width, height, cells).map_err(|e| ParseError::new(1, 1, e.to_string()))
}

/// Writes cells as plaintext rows, each terminated by a newline.
pub fn write_cells<W>(f: &mut W, width: u32, cells: &[Cell]) -> fmt::Result
where
    W: fmt::Write,
{
    for line in cells.chunks(width.max(1) as usize) {
        for &cell in line {
            let symbol = match cell {
                Cell::Alive => ALIVE,
                Cell::Dead => DEAD,
            };
            f.write_char(symbol)?;
        }
        f.write_char('\n')?;
    }

    Ok(())
}

/// Explains why the line at `rest` is not a row of cells.
fn row_error(input: &str, rest: &str) -> ParseError {
    let valid_len = rest
        .find(|c: char| c != ALIVE && c != DEAD)
        .unwrap_or(rest.len());
    let offending = &rest[valid_len..];

    let message = match offending.chars().next() {
        _ if valid_len == 0 && (offending.starts_with('\n') || offending.starts_with("\r\n")) => {
            "empty row".to_owned()
        }
        Some(c) => format!("unexpected character {c:?}, expected '{ALIVE}' or '{DEAD}'"),
        None => "unexpected end of input".to_owned(),
    };

    ParseError::at(input, offending, message)
}

fn cell_row(i: &str) -> IResult<&str, Vec<Cell>> {
    let alive = value(Cell::Alive, char(ALIVE));
    let dead = value(Cell::Dead, char(DEAD));
    many1(alt((alive, dead)))(i)
}

fn comment(i: &str) -> IResult<&str, ()> {
    value((), pair(char(COMMENT), not_line_ending))(i)
}

fn line_end(i: &str) -> IResult<&str, &str> {
    alt((line_ending, eof))(i)
}
