//! Integral, boolean and character generators.

use super::{Gen, GenIteration};
use crate::scaling::{Integral, Range};
use crate::space::ExampleSpace;
use std::iter;
use std::ops::BitOr;
use std::rc::Rc;

/// Shrink candidates for `value`, moving towards `origin`.
///
/// The first candidate is the origin itself and the last is one step away
/// from `value`; the distances in between halve each time.
pub fn towards<N: Integral>(origin: N, value: N) -> impl Iterator<Item = N> {
    let (origin, value) = (origin.to_wide(), value.to_wide());
    let distance = value - origin;
    iter::successors((distance != 0).then_some(distance), |&half| {
        let half = half / 2;
        (half != 0).then_some(half)
    })
    .filter_map(move |half| N::from_wide(value - half))
}

impl<N: Integral> Gen<N> {
    /// Generate integers within a range, shrinking towards its origin.
    pub fn from_range(range: Range<N>) -> Self {
        Gen::new(move |parameters| {
            if let Err(message) = range.validate() {
                return GenIteration::error("integer", message);
            }
            let (min, max) = range.bounds(parameters.size);
            match parameters.rng.value(min, max) {
                Ok(value) => {
                    let origin = range.origin;
                    GenIteration::Instance {
                        next_parameters: parameters.next(),
                        example_space: ExampleSpace::unfold(
                            value,
                            move |&v| Box::new(towards(origin, v)),
                            |&v| v,
                        ),
                    }
                }
                Err(e) => GenIteration::error("integer", e.to_string()),
            }
        })
        .named("integer")
    }

    /// Generate integers over the whole type, growing exponentially with size.
    pub fn integer() -> Self {
        Self::from_range(Range::full())
    }
}

impl Gen<i32> {
    /// Generate integers uniformly in `[min, max]`, shrinking towards zero
    /// or the bound nearest to it.
    pub fn int_range(min: i32, max: i32) -> Self {
        Self::from_range(Range::new(min, max))
    }
}

impl Gen<bool> {
    /// Generate booleans, shrinking `true` to `false`.
    pub fn bool() -> Self {
        Gen::<u8>::from_range(Range::new(0, 1))
            .map(|&b| b == 1)
            .named("bool")
    }
}

/// A set of character classes to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharType(u8);

impl CharType {
    pub const NONE: CharType = CharType(0);
    pub const WHITESPACE: CharType = CharType(1);
    pub const LOWERCASE: CharType = CharType(1 << 1);
    pub const UPPERCASE: CharType = CharType(1 << 2);
    pub const NUMERIC: CharType = CharType(1 << 3);
    pub const SYMBOL: CharType = CharType(1 << 4);
    /// Latin-1 supplement, U+00A1 to U+00FF.
    pub const EXTENDED: CharType = CharType(1 << 5);
    pub const CONTROL: CharType = CharType(1 << 6);
    pub const ALL: CharType = CharType((1 << 7) - 1);

    pub fn contains(self, other: CharType) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every character in the set, simplest classes first.
    pub fn alphabet(self) -> Vec<char> {
        let classes: [(CharType, fn() -> Vec<char>); 7] = [
            (CharType::LOWERCASE, || ('a'..='z').collect()),
            (CharType::UPPERCASE, || ('A'..='Z').collect()),
            (CharType::NUMERIC, || ('0'..='9').collect()),
            (CharType::WHITESPACE, || vec![' ', '\t', '\n', '\r']),
            (CharType::SYMBOL, || {
                ('!'..='~').filter(|c| !c.is_ascii_alphanumeric()).collect()
            }),
            (CharType::EXTENDED, || ('\u{a1}'..='\u{ff}').collect()),
            (CharType::CONTROL, || {
                ('\0'..='\u{1f}')
                    .chain(iter::once('\u{7f}'))
                    .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
                    .collect()
            }),
        ];

        classes
            .iter()
            .filter(|(class, _)| self.contains(*class))
            .flat_map(|(_, chars)| chars())
            .collect()
    }
}

impl BitOr for CharType {
    type Output = CharType;

    fn bitor(self, rhs: CharType) -> CharType {
        CharType(self.0 | rhs.0)
    }
}

impl Gen<char> {
    /// Generate characters from the given classes, shrinking towards `'a'`
    /// (or the first character of the simplest class present).
    pub fn char_of(char_type: CharType) -> Self {
        let alphabet: Rc<[char]> = char_type.alphabet().into();
        if alphabet.is_empty() {
            return Gen::fail("char", format!("no characters in {char_type:?}"));
        }
        Gen::<usize>::from_range(Range::new(0, alphabet.len() - 1))
            .map(move |&index| alphabet[index])
            .named("char")
    }

    /// Generate ASCII letters and digits.
    pub fn ascii_alphanumeric() -> Self {
        Self::char_of(CharType::LOWERCASE | CharType::UPPERCASE | CharType::NUMERIC)
    }

    /// Generate printable ASCII characters.
    pub fn ascii_printable() -> Self {
        Self::char_of(
            CharType::LOWERCASE
                | CharType::UPPERCASE
                | CharType::NUMERIC
                | CharType::SYMBOL
                | CharType::WHITESPACE,
        )
    }
}
