//! Error types reported by the engine.

use std::fmt;

/// Errors arising from grid access, sizing, or pattern loading.
///
/// None of these are fatal: the universe that reported one is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseError {
    /// A coordinate lies outside the grid.
    IndexOutOfRange {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },
    /// A grid with zero width or height (or too many cells to address) was requested.
    InvalidDimension { width: u32, height: u32 },
    /// Pattern text could not be parsed.
    Parse(ParseError),
}

impl fmt::Display for UniverseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "cell ({row}, {col}) is out of range for a {width}x{height} grid"
            ),
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UniverseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for UniverseError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

/// A malformed pattern, located by 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Locates `rest`, which must be a suffix of `input`, and reports the error there.
    pub(crate) fn at(input: &str, rest: &str, message: impl Into<String>) -> Self {
        let offset = input.len().saturating_sub(rest.len());
        let consumed = &input[..offset];

        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |newline| newline + 1);
        let column = consumed[line_start..].chars().count() + 1;

        Self::new(line, column, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_locate_suffix() {
        let input = "O..\n.O.\n..x\n";
        let rest = &input[10..];
        assert_eq!(ParseError::at(input, rest, "bad"), ParseError::new(3, 3, "bad"));
    }

    #[test]
    fn test_locate_start() {
        assert_eq!(ParseError::at("abc", "abc", "bad"), ParseError::new(1, 1, "bad"));
    }

    #[test]
    fn test_display() {
        let err = UniverseError::from(ParseError::new(2, 5, "unexpected character 'x'"));
        assert_eq!(
            err.to_string(),
            "parse error at line 2, column 5: unexpected character 'x'"
        );
    }
}
