#![doc = r#"
Note durations and their length in ticks.

# Grammar

| Token   | Meaning                                   |
|---------|-------------------------------------------|
| `1`     | whole note                                |
| `4`     | quarter note                              |
| `d2`    | dotted half                               |
| `dd4`   | double dotted quarter                     |
| `8t`    | eighth note triplet                       |
| `4t5`   | quarter note quintuplet                   |
| `t50`   | exactly 50 ticks, whatever the division   |
| `0`     | nothing, for silent placeholder notes     |

The base must be 1 or a power of two. A [`Duration::Sequence`] sums its members,
which is how rests stacked before a note are expressed.

# Example
```rust
# use midi_writer::prelude::*;
let quarter: Duration = "4".parse().unwrap();
assert_eq!(quarter.ticks(128), 128.);

let three = Duration::parse_sequence(["4", "4", "4"]).unwrap();
assert_eq!(three.ticks(128), 384.);

assert!("3".parse::<Duration>().is_err());
```
"#]

mod parser;

use crate::{DurationError, codec::rounded_if_close};
use alloc::vec::Vec;
use core::{fmt, str::FromStr};

/// A typed duration, resolved against a division with [`Duration::ticks`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// An explicit tick count
    Ticks(u32),
    /// A note value such as a dotted quarter or an eighth triplet
    Value(NoteValue),
    /// The durations one after another
    Sequence(Vec<Duration>),
}

/// The note value part of the grammar: `d* base (t tuplet?)?`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteValue {
    /// Number of augmentation dots
    pub dots: u8,
    /// 1 for a whole note, 4 for a quarter, ...
    pub base: u32,
    /// Number of notes in the time of two base values
    pub tuplet: Option<u32>,
}

impl NoteValue {
    /// Length of this value measured in quarter notes.
    pub fn quarters(&self) -> f64 {
        let mut quarters = 4. / self.base as f64;
        if self.dots > 0 {
            let divisor = 2f64.powi(self.dots as i32);
            quarters += quarters * ((divisor - 1.) / divisor);
        }
        if let Some(count) = self.tuplet {
            // always "count in the time of two"
            let fit_into = quarters * 2.;
            quarters = fit_into / count as f64;
        }
        quarters
    }
}

impl Duration {
    /// A quarter note, the default length of a note event.
    pub const QUARTER: Self = Self::Value(NoteValue {
        dots: 0,
        base: 4,
        tuplet: None,
    });

    /// No time at all.
    pub const ZERO: Self = Self::Ticks(0);

    /// Parse a single duration token.
    pub fn parse(token: &str) -> Result<Self, DurationError> {
        parser::parse(token)
    }

    /// Parse a list of tokens whose lengths add up.
    pub fn parse_sequence<I, S>(tokens: I) -> Result<Self, DurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| Self::parse(token.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Sequence)
    }

    /// Returns true if this duration never takes any time.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Ticks(ticks) => *ticks == 0,
            Self::Value(_) => false,
            Self::Sequence(items) => items.iter().all(Self::is_zero),
        }
    }

    /// The length of this duration in ticks, given `division` ticks per quarter note.
    ///
    /// Explicit tick counts ignore the division. The result may be fractional
    /// for tuplets; values within float noise of an integer are snapped to it.
    pub fn ticks(&self, division: u16) -> f64 {
        match self {
            Self::Ticks(ticks) => *ticks as f64,
            Self::Value(value) => rounded_if_close(division as f64 * value.quarters()),
            Self::Sequence(items) => items.iter().map(|item| item.ticks(division)).sum(),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::QUARTER
    }
}

impl FromStr for Duration {
    type Err = DurationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Duration {
    type Error = DurationError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<u32> for Duration {
    fn from(ticks: u32) -> Self {
        Self::Ticks(ticks)
    }
}

impl fmt::Display for NoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.dots {
            f.write_str("d")?;
        }
        write!(f, "{}", self.base)?;
        if let Some(count) = self.tuplet {
            write!(f, "t{count}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticks(ticks) => write!(f, "t{ticks}"),
            Self::Value(value) => write!(f, "{value}"),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ticks(token: &str) -> f64 {
        Duration::parse(token).unwrap().ticks(128)
    }

    #[test]
    fn plain_values() {
        assert_eq!(ticks("1"), 512.);
        assert_eq!(ticks("2"), 256.);
        assert_eq!(ticks("4"), 128.);
        assert_eq!(ticks("8"), 64.);
        assert_eq!(ticks("16"), 32.);
        assert_eq!(ticks("64"), 8.);
    }

    #[test]
    fn dotted_values() {
        assert_eq!(ticks("d2"), 384.);
        assert_eq!(ticks("d4"), 192.);
        assert_eq!(ticks("dd4"), 224.);
        assert_eq!(ticks("ddd4"), 240.);
    }

    #[test]
    fn tuplets() {
        assert_eq!(ticks("4t"), 256. / 3.);
        assert_eq!(ticks("4t3"), 256. / 3.);
        assert_eq!(ticks("8t"), 128. / 3.);
        assert_eq!(ticks("4t5"), 256. / 5.);
        assert_eq!(ticks("2t"), 512. / 3.);
        assert_eq!(ticks("d4t"), 128.);
    }

    #[test]
    fn explicit_ticks() {
        assert_eq!(ticks("t50"), 50.);
        assert_eq!(ticks("T50"), 50.);
        assert_eq!(Duration::parse("t50").unwrap().ticks(480), 50.);
        assert_eq!(ticks("0"), 0.);
    }

    #[test]
    fn sequences_sum() {
        let seq = Duration::parse_sequence(["4", "4", "4"]).unwrap();
        assert_eq!(seq.ticks(128), 384.);

        let nested = Duration::Sequence(alloc::vec![seq, Duration::parse("t10").unwrap()]);
        assert_eq!(nested.ticks(128), 394.);

        assert_eq!(Duration::Sequence(Vec::new()).ticks(128), 0.);
        assert!(Duration::Sequence(Vec::new()).is_zero());
    }

    #[test]
    fn division_scales() {
        assert_eq!(Duration::QUARTER.ticks(480), 480.);
        assert_eq!(Duration::parse("d2").unwrap().ticks(96), 288.);
        assert_eq!(Duration::parse("8").unwrap().ticks(96), 48.);
    }

    #[test]
    fn rejects_bad_tokens() {
        for token in ["3", "6", "12", "", "d", "x4", "4x", "t", "tt4", "4t0", "d0", "00"] {
            assert!(Duration::parse(token).is_err(), "{token} should not parse");
        }
        assert_eq!(
            Duration::parse("3"),
            Err(DurationError::Invalid("3".into()))
        );
        assert_eq!(
            Duration::parse("4t0"),
            Err(DurationError::ZeroTuplet("4t0".into()))
        );
    }

    #[test]
    fn display_follows_grammar() {
        for token in ["4", "d2", "dd8t3", "4t5", "t50"] {
            assert_eq!(Duration::parse(token).unwrap().to_string(), token);
        }
    }
}
