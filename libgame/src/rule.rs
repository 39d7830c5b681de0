use std::fmt;

use crate::board::Cell;

/// A birth/survival rule over Moore neighbor counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub birth: &'static [u8],
    pub survive: &'static [u8],
}

impl Rule {
    /// B3/S23, the rule every universe runs.
    pub const CONWAY: Rule = Rule {
        birth: &[3],
        survive: &[2, 3],
    };

    pub fn next(&self, cell: Cell, alive_neighbor_count: u8) -> Cell {
        let alive = match cell {
            Cell::Alive => self.survive.contains(&alive_neighbor_count),
            Cell::Dead => self.birth.contains(&alive_neighbor_count),
        };

        Cell::from(alive)
    }

    /// Whether a rule string names this rule, in either `B3/S23` or the older `23/3` form.
    pub fn matches_notation(&self, notation: &str) -> bool {
        let notation = notation.trim().to_ascii_uppercase();
        let Some((first, second)) = notation.split_once('/') else {
            return false;
        };

        let (birth, survive) = match (first.strip_prefix('B'), second.strip_prefix('S')) {
            (Some(birth), Some(survive)) => (birth, survive),
            (None, None) => (second, first),
            _ => return false,
        };

        digits_match(birth, self.birth) && digits_match(survive, self.survive)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::CONWAY
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for count in self.birth {
            write!(f, "{count}")?;
        }
        write!(f, "/S")?;
        for count in self.survive {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

fn digits_match(digits: &str, counts: &[u8]) -> bool {
    let mut parsed = Vec::with_capacity(digits.len());
    for c in digits.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => parsed.push(d as u8),
            _ => return false,
        }
    }

    parsed.sort_unstable();
    parsed.dedup();

    let mut expected = counts.to_vec();
    expected.sort_unstable();
    parsed == expected
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_conway_transitions() {
        let rule = Rule::CONWAY;
        for count in 0..=8 {
            let expected_alive = count == 2 || count == 3;
            assert_eq!(rule.next(Cell::Alive, count), Cell::from(expected_alive));

            let expected_born = count == 3;
            assert_eq!(rule.next(Cell::Dead, count), Cell::from(expected_born));
        }
    }

    #[test]
    fn test_notation() {
        assert_eq!(Rule::CONWAY.to_string(), "B3/S23");
        assert!(Rule::CONWAY.matches_notation("B3/S23"));
        assert!(Rule::CONWAY.matches_notation("b3/s32"));
        assert!(Rule::CONWAY.matches_notation("23/3"));
        assert!(!Rule::CONWAY.matches_notation("B36/S23"));
        assert!(!Rule::CONWAY.matches_notation("B3S23"));
        assert!(!Rule::CONWAY.matches_notation("B3/23"));
    }
}
