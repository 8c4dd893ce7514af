//! Digit symbols and sets of digits.
//!
//! Variant puzzles are not limited to `1-9`: a 6×6 puzzle uses `1-6`, a 16×16
//! puzzle commonly uses `1-9A-G`, and some puzzles use `0-8`. A [`Digit`] is
//! therefore one symbol of a fixed universe of 62 symbols (`0-9`, `A-Z`,
//! `a-z`), and a [`DigitSet`] is a 64-bit bitset over that universe.
//!
//! # Examples
//!
//! ```
//! use pencilmark_core::{Digit, DigitSet};
//!
//! let marks = DigitSet::from_marks("37");
//! assert_eq!(marks.len(), 2);
//! assert!(marks.contains(Digit::from_char('7').unwrap()));
//! assert_eq!(marks.to_string(), "37");
//! ```

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub},
};

/// A single digit symbol.
///
/// Symbols are ordered by their character code, so `'1' < '9' < 'A' < 'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Number of symbols in the digit universe.
    pub const COUNT: u8 = 62;

    /// Creates a digit from its symbol.
    ///
    /// Returns `None` for characters outside `0-9`, `A-Z` and `a-z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pencilmark_core::Digit;
    ///
    /// assert_eq!(Digit::from_char('5').map(Digit::to_char), Some('5'));
    /// assert_eq!(Digit::from_char('G').map(Digit::to_char), Some('G'));
    /// assert_eq!(Digit::from_char('-'), None);
    /// ```
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let index = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            'a'..='z' => c as u32 - 'a' as u32 + 36,
            _ => return None,
        };
        u8::try_from(index).ok().map(Self)
    }

    /// Creates a digit from its index in the universe (0-61).
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the index of this digit in the universe (0-61).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the symbol of this digit.
    #[must_use]
    pub const fn to_char(self) -> char {
        let base = match self.0 {
            0..=9 => b'0',
            10..=35 => b'A' - 10,
            _ => b'a' - 36,
        };
        (base + self.0) as char
    }

    /// Returns the numeric value used by arithmetic rules (Kropki, XV, non-consecutive).
    ///
    /// Decimal symbols map to 0-9 and letters map to 10-35, case-insensitively.
    #[must_use]
    pub fn numeric_value(self) -> u32 {
        match self.0 {
            0..=35 => u32::from(self.0),
            _ => u32::from(self.0 - 26),
        }
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_char(), f)
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> char {
        digit.to_char()
    }
}

/// A set of digits, represented as a bitset over the digit universe.
///
/// Iteration yields digits in ascending symbol order. The [`Display`] form is
/// the concatenation of the symbols, which is also the pencil-mark string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet(u64);

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set holding a single digit.
    #[must_use]
    pub const fn from_elem(digit: Digit) -> Self {
        Self(1 << digit.0)
    }

    /// Parses a pencil-mark string.
    ///
    /// Characters that are not digit symbols are ignored.
    #[must_use]
    pub fn from_marks(marks: &str) -> Self {
        marks.chars().filter_map(Digit::from_char).collect()
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set holds no digits.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the set holds `digit`.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.0 & (1 << digit.0) != 0
    }

    /// Inserts a digit, returning `true` if it was not present.
    pub fn insert(&mut self, digit: Digit) -> bool {
        let added = !self.contains(digit);
        self.0 |= 1 << digit.0;
        added
    }

    /// Removes a digit, returning `true` if it was present.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let removed = self.contains(digit);
        self.0 &= !(1 << digit.0);
        removed
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the digits of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if every digit of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Returns `true` if every digit of `other` is in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Returns the only digit of the set, or `None` if the set does not hold exactly one.
    #[must_use]
    pub fn as_single(self) -> Option<Digit> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Returns the smallest digit of the set.
    #[must_use]
    pub fn first(self) -> Option<Digit> {
        if self.is_empty() {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        Digit::from_index(self.0.trailing_zeros() as u8)
    }

    /// Returns an iterator over the digits in ascending order.
    #[must_use]
    pub const fn iter(self) -> DigitSetIter {
        DigitSetIter { bits: self.0 }
    }
}

impl Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in *self {
            Display::fmt(&digit, f)?;
        }
        Ok(())
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl Extend<Digit> for DigitSet {
    fn extend<I: IntoIterator<Item = Digit>>(&mut self, iter: I) {
        for digit in iter {
            self.insert(digit);
        }
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl Sub for DigitSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

/// Iterator over the digits of a [`DigitSet`].
#[derive(Debug, Clone)]
pub struct DigitSetIter {
    bits: u64,
}

impl Iterator for DigitSetIter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(Digit(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for DigitSetIter {}
impl ExactSizeIterator for DigitSetIter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn d(c: char) -> Digit {
        Digit::from_char(c).unwrap()
    }

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(d('0').index(), 0);
        assert_eq!(d('9').index(), 9);
        assert_eq!(d('A').index(), 10);
        assert_eq!(d('Z').index(), 35);
        assert_eq!(d('a').index(), 36);
        assert_eq!(d('z').index(), 61);
        assert_eq!(Digit::from_index(62), None);
        assert!(d('9') < d('A'));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(d('1').numeric_value(), 1);
        assert_eq!(d('9').numeric_value(), 9);
        assert_eq!(d('A').numeric_value(), 10);
        assert_eq!(d('a').numeric_value(), 10);
        assert_eq!(d('G').numeric_value(), 16);
    }

    #[test]
    fn test_marks_ignore_unknown_characters() {
        let set = DigitSet::from_marks("3 7-7!");
        assert_eq!(set.to_string(), "37");
    }

    #[test]
    fn test_set_operations() {
        let a = DigitSet::from_marks("123");
        let b = DigitSet::from_marks("234");
        assert_eq!((a | b).to_string(), "1234");
        assert_eq!((a & b).to_string(), "23");
        assert_eq!((a - b).to_string(), "1");
        assert!(DigitSet::from_marks("23").is_subset(a));
        assert!(!b.is_subset(a));
        assert_eq!(DigitSet::from_marks("7").as_single(), Some(d('7')));
        assert_eq!(a.as_single(), None);
    }

    proptest! {
        #[test]
        fn test_char_round_trip(index in 0u8..Digit::COUNT) {
            let digit = Digit::from_index(index).unwrap();
            prop_assert_eq!(Digit::from_char(digit.to_char()), Some(digit));
        }

        #[test]
        fn test_iteration_is_sorted_and_sized(bits in any::<u64>()) {
            let set = DigitSet(bits & ((1 << Digit::COUNT) - 1));
            let digits: Vec<_> = set.iter().collect();
            prop_assert_eq!(digits.len(), set.len());
            prop_assert!(digits.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
