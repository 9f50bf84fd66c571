/*
 * Copyright 2025 FileManager-Actions contributors
 *
 * This program is free software; you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation; either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program; if not, see <http://www.gnu.org/licenses/>.
 *
 * For more details see the file COPYING.
 */

use winnow::{
    Result as PResult,
    ascii::{digit1, space0},
    combinator::{alt, opt},
    prelude::*,
    seq,
    token::{one_of, rest},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
}

/// A selection count constraint such as `>0` or `=1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionCount {
    pub comparison: Comparison,
    pub number: i64,
}

fn comparison(input: &mut &str) -> PResult<Comparison> {
    alt((
        '<'.value(Comparison::Less),
        '='.value(Comparison::Equal),
        '>'.value(Comparison::Greater),
    ))
    .parse_next(input)
}

// Out of range numbers saturate.
fn number(input: &mut &str) -> PResult<i64> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .map(|digits: &str| {
            digits.parse().unwrap_or(if digits.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            })
        })
        .parse_next(input)
}

// A missing number reads as zero and trailing text is ignored.
fn selection_count(input: &mut &str) -> PResult<SelectionCount> {
    seq!(SelectionCount {
        comparison: comparison,
        _: space0,
        number: opt(number).map(Option::unwrap_or_default),
        _: rest,
    })
    .parse_next(input)
}

impl SelectionCount {
    /// `Ok(None)` means there is no constraint.
    pub fn parse(expression: &str) -> Result<Option<Self>, String> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Ok(None);
        }
        selection_count
            .parse(expression)
            .map(Some)
            .map_err(|error| error.to_string())
    }

    pub fn accepts(&self, count: usize) -> bool {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        match self.comparison {
            Comparison::Less => count < self.number,
            Comparison::Equal => count == self.number,
            Comparison::Greater => count > self.number,
        }
    }
}

pub(super) fn is_valid_selection_count(expression: &str, count: usize) -> bool {
    match SelectionCount::parse(expression) {
        Ok(Some(constraint)) => constraint.accepts(count),
        Ok(None) => true,
        Err(error) => {
            eprintln!("Malformed selection count '{expression}': {error}");
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            SelectionCount::parse(">0"),
            Ok(Some(SelectionCount {
                comparison: Comparison::Greater,
                number: 0
            }))
        );
        assert_eq!(
            SelectionCount::parse(" = 12 files"),
            Ok(Some(SelectionCount {
                comparison: Comparison::Equal,
                number: 12
            }))
        );
        assert_eq!(
            SelectionCount::parse("<"),
            Ok(Some(SelectionCount {
                comparison: Comparison::Less,
                number: 0
            }))
        );
        assert_eq!(SelectionCount::parse("  "), Ok(None));
        assert!(SelectionCount::parse("!3").is_err());
    }

    #[test]
    fn test_selection_count() {
        assert!(is_valid_selection_count("=1", 1));
        assert!(!is_valid_selection_count("=1", 2));
        assert!(is_valid_selection_count(">0", 1));
        assert!(is_valid_selection_count(">0", 25));
        assert!(!is_valid_selection_count(">0", 0));
        assert!(is_valid_selection_count("<2", 0));
        assert!(is_valid_selection_count("<2", 1));
        assert!(!is_valid_selection_count("<2", 2));
        assert!(is_valid_selection_count("", 7));
        assert!(!is_valid_selection_count("~1", 1));
    }

    #[test]
    fn test_huge_number_saturates() {
        assert_eq!(
            SelectionCount::parse("=99999999999999999999"),
            Ok(Some(SelectionCount {
                comparison: Comparison::Equal,
                number: i64::MAX
            }))
        );
        assert!(!is_valid_selection_count("=99999999999999999999", 0));
        assert!(!is_valid_selection_count(">99999999999999999999", 3));
        assert!(is_valid_selection_count("<99999999999999999999", 3));
        assert!(is_valid_selection_count(">-99999999999999999999", 0));
    }
}
