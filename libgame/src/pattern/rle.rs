//! Run length encoded (`.rle`) patterns.
//!
//! Based on <https://conwaylife.com/wiki/Run_Length_Encoded>. Only two-state patterns under the
//! B3/S23 rule are accepted.

use std::str::FromStr;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, digit1, line_ending, multispace0, not_line_ending, space0},
    combinator::{map, map_res, opt, value},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
};

use super::Pattern;
use crate::{
    board::{Cell, dead_cells},
    error::ParseError,
    rule::Rule,
};

struct Header<'a> {
    width: u32,
    height: u32,
    rule: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Run(u32, Cell),
    EndRow(u32),
    End,
}

/// Whether the input looks like RLE: a header line after any `#` comments.
pub fn sniff(input: &str) -> bool {
    preamble(input).is_ok_and(|(rest, ())| rest.trim_start().starts_with('x'))
}

pub fn parse(input: &str) -> Result<Pattern, ParseError> {
    let (rest, ()) =
        preamble(input).map_err(|_| ParseError::new(1, 1, "malformed comment lines"))?;

    if rest.is_empty() {
        return Err(ParseError::at(input, rest, "input is empty"));
    }

    let (body, header) = terminated(header, line_ending)(rest).map_err(|_| {
        ParseError::at(input, rest, "expected header `x = <width>, y = <height>`")
    })?;

    if let Some(rule) = header.rule {
        if !Rule::CONWAY.matches_notation(rule) {
            return Err(ParseError::at(
                input,
                rest,
                format!("unsupported rule {rule:?}, only {} is supported", Rule::CONWAY),
            ));
        }
    }

    if header.width == 0 || header.height == 0 {
        return Err(ParseError::at(input, rest, "pattern must be at least 1x1"));
    }

    let mut cells = dead_cells(header.width, header.height).map_err(|_| {
        let message = format!("pattern of {}x{} is too large", header.width, header.height);
        ParseError::at(input, rest, message)
    })?;
    let width = header.width as usize;
    let height = header.height as usize;
    let (mut row, mut col) = (0usize, 0usize);
    let mut rest = body;

    loop {
        let Ok((after, token)) = token(rest) else {
            let rest = rest.trim_start();
            let message = match rest.chars().next() {
                Some(c) => format!("unexpected character {c:?}"),
                None => "missing '!' at end of pattern".to_owned(),
            };
            return Err(ParseError::at(input, rest, message));
        };

        match token {
            Token::Run(count, cell) => {
                let count = count as usize;
                if row >= height || col + count > width {
                    return Err(ParseError::at(
                        input,
                        rest.trim_start(),
                        format!("run exceeds the {width}x{height} pattern bounds"),
                    ));
                }

                if cell == Cell::Alive {
                    let start = row * width + col;
                    cells[start..start + count].fill(Cell::Alive);
                }
                col += count;
            }
            Token::EndRow(count) => {
                row += count as usize;
                col = 0;
            }
            Token::End => break,
        }

        rest = after;
    }

    Pattern::new(header.width, header.height, cells)
        .map_err(|e| ParseError::at(input, rest, e.to_string()))
}

/// Skips `#` comment lines and blank lines.
fn preamble(i: &str) -> IResult<&str, ()> {
    let comment_line = value((), pair(hash_comment, line_ending));
    let blank_line = value((), pair(space0, line_ending));
    value((), many0(alt((comment_line, blank_line))))(i)
}

fn hash_comment(i: &str) -> IResult<&str, ()> {
    value((), pair(char('#'), not_line_ending))(i)
}

fn header(i: &str) -> IResult<&str, Header<'_>> {
    let (i, width) = kv("x", map_res(digit1, u32::from_str))(i)?;
    let (i, _) = pair(space0, char(','))(i)?;
    let (i, height) = kv("y", map_res(digit1, u32::from_str))(i)?;
    let (i, rule) = opt(preceded(
        pair(space0, char(',')),
        kv("rule", take_till1(|c: char| c.is_whitespace())),
    ))(i)?;
    let (i, _) = space0(i)?;

    Ok((
        i,
        Header {
            width,
            height,
            rule,
        },
    ))
}

/// A run count followed by `b`, `o`, `$` or `!`, with any whitespace in front.
fn token(i: &str) -> IResult<&str, Token> {
    let (i, _) = multispace0(i)?;
    let (i, count) = opt(map_res(digit1, u32::from_str))(i)?;
    let count = count.unwrap_or(1);

    alt((
        map(char('b'), move |_| Token::Run(count, Cell::Dead)),
        map(char('o'), move |_| Token::Run(count, Cell::Alive)),
        map(char('$'), move |_| Token::EndRow(count)),
        value(Token::End, char('!')),
    ))(i)
}

/// ` {key} = {value} ` with whitespace handling
fn kv<'a, F, O>(key: &'static str, value: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(tuple((space0, tag(key), space0, char('='), space0)), value)
}
