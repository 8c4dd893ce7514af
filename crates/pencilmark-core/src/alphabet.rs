//! Digit alphabets and range notation.

use std::fmt::{self, Display};

use crate::{Digit, DigitSet};

const DEFAULT_SYMBOLS: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The ordered set of digit symbols a puzzle uses.
///
/// Alphabets are written in a compact range notation: `"1-9"`, `"0-8"`,
/// `"1-9A-G"`, or an explicit list such as `"1;3;5 7"`. Parsing never fails;
/// characters that are not digit symbols are dropped.
///
/// # Examples
///
/// ```
/// use pencilmark_core::DigitAlphabet;
///
/// let alphabet = DigitAlphabet::parse("1-6");
/// assert_eq!(alphabet.len(), 6);
/// assert_eq!(alphabet.to_string(), "123456");
///
/// let alphabet = DigitAlphabet::parse("1-9A-C");
/// assert_eq!(alphabet.to_string(), "123456789ABC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitAlphabet {
    digits: Vec<Digit>,
    set: DigitSet,
}

impl DigitAlphabet {
    /// Parses a range expression.
    ///
    /// `;`, `,` and spaces separate entries. A `-` between two symbols expands
    /// to every symbol strictly between them; a `-` at either end of the
    /// expression is dropped. Duplicate symbols keep their first occurrence.
    #[must_use]
    pub fn parse(expr: &str) -> Self {
        let chars: Vec<char> = expr
            .chars()
            .filter(|c| !matches!(c, ';' | ',' | ' '))
            .collect();

        let mut expanded = Vec::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if c != '-' {
                expanded.push(c);
                continue;
            }
            let (Some(&start), Some(&end)) = (
                i.checked_sub(1).and_then(|p| chars.get(p)),
                chars.get(i + 1),
            ) else {
                continue;
            };
            let interior = (u32::from(start) + 1..u32::from(end)).filter_map(char::from_u32);
            expanded.extend(interior);
        }

        expanded.into_iter().filter_map(Digit::from_char).collect()
    }

    /// Returns the alphabet used when a puzzle does not declare one.
    ///
    /// This is the first `side` symbols of `1-9A-Z`.
    #[must_use]
    pub fn default_for_side(side: u8) -> Self {
        DEFAULT_SYMBOLS
            .chars()
            .take(usize::from(side))
            .filter_map(Digit::from_char)
            .collect()
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns `true` if the alphabet has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns `true` if `digit` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, digit: Digit) -> bool {
        self.set.contains(digit)
    }

    /// Returns the symbols in declaration order.
    #[must_use]
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Returns the symbols as a [`DigitSet`].
    #[must_use]
    pub fn as_set(&self) -> DigitSet {
        self.set
    }
}

impl FromIterator<Digit> for DigitAlphabet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut digits = vec![];
        let mut set = DigitSet::EMPTY;
        for digit in iter {
            if set.insert(digit) {
                digits.push(digit);
            }
        }
        Self { digits, set }
    }
}

impl Display for DigitAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            Display::fmt(digit, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(expr: &str) -> String {
        DigitAlphabet::parse(expr).to_string()
    }

    #[test]
    fn test_ranges() {
        assert_eq!(parse("1-9"), "123456789");
        assert_eq!(parse("0-8"), "012345678");
        assert_eq!(parse("1-9A-G"), "123456789ABCDEFG");
        assert_eq!(parse("1-3-5"), "12345");
    }

    #[test]
    fn test_separators_and_lists() {
        assert_eq!(parse("1;3;5 7"), "1357");
        assert_eq!(parse("1, 2, 4"), "124");
        assert_eq!(parse("1 - 4"), "1234");
    }

    #[test]
    fn test_malformed_input_degrades() {
        assert_eq!(parse("-9"), "9");
        assert_eq!(parse("1-"), "1");
        assert_eq!(parse("9-1"), "91");
        assert_eq!(parse("1?2"), "12");
        assert_eq!(parse("1-3;2"), "123");
        assert!(DigitAlphabet::parse("").is_empty());
    }

    #[test]
    fn test_range_over_punctuation_keeps_symbols_only() {
        // ':' through '@' lie between '9' and 'A'
        assert_eq!(parse("8-B"), "89AB");
    }

    #[test]
    fn test_default_for_side() {
        assert_eq!(DigitAlphabet::default_for_side(6).to_string(), "123456");
        assert_eq!(
            DigitAlphabet::default_for_side(16).to_string(),
            "123456789ABCDEFG"
        );
    }
}
