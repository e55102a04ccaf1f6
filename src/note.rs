use core::{fmt, str::FromStr};

use crate::{DataByte, EncodeError, ParseError, PitchError};
use alloc::string::ToString;

#[doc = r#"
Identifies the pitch of a note event.

Notes are interpreted as a 7-bit number. [`Note`] `0` is `C-1`, [`Note`] `60`
is `C4` and [`Note`] `127` is `G9`.

Pitches parse from `<letter><accidentals><octave>` strings. Letters may be
either case; `#` raises by a semitone, `b` lowers by one and `x` raises by two.

# Example
```rust
# use midi_writer::prelude::*;
let note: Note = "C#4".parse().unwrap();

assert_eq!(note.byte(), 61);
assert_eq!(note.key(), Key::CSharp);
assert_eq!(note.octave(), Octave::new(4));

assert_eq!("B#4".parse::<Note>().unwrap().byte(), 72);
assert_eq!("bb3".parse::<Note>().unwrap().byte(), 58);
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(DataByte);

impl Note {
    /// Middle C, `C4`.
    pub const MIDDLE_C: Self = Self(DataByte::new_unchecked(60));

    /// Create a new note from a raw note number.
    ///
    /// Checks for correctness (leading 0 bit).
    pub fn from_databyte<B>(rep: B) -> Result<Self, ParseError>
    where
        B: TryInto<DataByte, Error = ParseError>,
    {
        rep.try_into().map(Self)
    }

    /// Create a note from a given key and octave, or `None` past `G9`.
    pub const fn new(key: Key, octave: Octave) -> Option<Self> {
        let value = (octave.value() as i16 + 1) * 12 + key.get_mod_12() as i16;
        if value > 127 {
            return None;
        }
        Some(Self(DataByte::new_unchecked(value as u8)))
    }

    /// Identifies the key of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_data_byte(&self.0)
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_data_byte(&self.0)
    }

    /// Returns the underlying note number
    #[inline]
    pub const fn byte(&self) -> u8 {
        self.0.0
    }

    /// Re-centre this note so that `middle_c` sounds as note 60.
    ///
    /// With the default middle C of `C4` the note is unchanged.
    pub fn relative_to(&self, middle_c: Note) -> Result<DataByte, EncodeError> {
        let value = 60 - middle_c.byte() as i32 + self.byte() as i32;
        if !(0..=127).contains(&value) {
            return Err(EncodeError::Pitch(value));
        }
        Ok(DataByte::new_unchecked(value as u8))
    }

    fn parse_name(name: &str) -> Result<Self, PitchError> {
        let syntax = || PitchError::Syntax(name.to_string());
        let mut chars = name.chars().peekable();

        let step: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(syntax()),
        };

        let mut alteration = 0i32;
        while let Some(&c) = chars.peek() {
            match c {
                '#' => alteration += 1,
                'b' => alteration -= 1,
                'x' => alteration += 2,
                _ => break,
            }
            chars.next();
        }

        let octave: &str = &chars.collect::<alloc::string::String>();
        let octave: i32 = match octave.strip_prefix('-') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                -digits.parse::<i32>().map_err(|_| syntax())?
            }
            None if !octave.is_empty() && octave.bytes().all(|b| b.is_ascii_digit()) => {
                octave.parse().map_err(|_| syntax())?
            }
            _ => return Err(syntax()),
        };

        let value = (octave + 1) * 12 + step + alteration;
        if !(0..=127).contains(&value) {
            return Err(PitchError::OutOfRange {
                name: name.to_string(),
                value,
            });
        }
        Ok(Self(DataByte::new_unchecked(value as u8)))
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::MIDDLE_C
    }
}

impl FromStr for Note {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_name(s.trim())?)
    }
}

impl TryFrom<&str> for Note {
    type Error = ParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<u8> for Note {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_databyte(value)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

#[test]
fn test_note() {
    let c = Note::from_databyte(12u8).unwrap();

    assert_eq!(Key::C, c.key());

    let a_sharp = Note::from_databyte(94u8).unwrap();
    assert_eq!(Key::ASharp, a_sharp.key());
}

#[test]
fn test_octave() {
    let c = Note::from_databyte(12u8).unwrap();

    assert_eq!(0, c.octave().value());

    let a_sharp = Note::from_databyte(94u8).unwrap();
    assert_eq!(6, a_sharp.octave().value());
}

#[test]
fn parse_pitch_names() {
    let byte = |s: &str| s.parse::<Note>().unwrap().byte();
    assert_eq!(byte("C4"), 60);
    assert_eq!(byte("c4"), 60);
    assert_eq!(byte("F7"), 101);
    assert_eq!(byte("B#4"), 72);
    assert_eq!(byte("G#3"), 56);
    assert_eq!(byte("Bb3"), 58);
    assert_eq!(byte("Cbb4"), 58);
    assert_eq!(byte("Fx4"), 67);
    assert_eq!(byte("C-1"), 0);
    assert_eq!(byte("G9"), 127);
}

#[test]
fn reject_bad_pitches() {
    for name in ["", "H4", "C", "C#", "C4x", "C--1", "4"] {
        assert!(name.parse::<Note>().is_err(), "{name} should not parse");
    }
    assert_eq!(
        "G#9".parse::<Note>(),
        Err(ParseError::Pitch(PitchError::OutOfRange {
            name: "G#9".into(),
            value: 128
        }))
    );
    assert!("Cb-1".parse::<Note>().is_err());
}

#[test]
fn display_parses_back() {
    for byte in 0..128u8 {
        let note = Note::from_databyte(byte).unwrap();
        assert_eq!(note.to_string().parse::<Note>().unwrap(), note);
    }
    assert_eq!(Note::MIDDLE_C.to_string(), "C4");
    assert_eq!(Note::from_databyte(1u8).unwrap().to_string(), "C#-1");
}

#[test]
fn middle_c_shifts() {
    let c4 = Note::MIDDLE_C;
    assert_eq!(c4.relative_to(Note::MIDDLE_C).unwrap().value(), 60);

    let c5: Note = "C5".parse().unwrap();
    assert_eq!(c4.relative_to(c5).unwrap().value(), 48);

    let g9: Note = "G9".parse().unwrap();
    let c3: Note = "C3".parse().unwrap();
    assert_eq!(g9.relative_to(c3), Err(EncodeError::Pitch(139)));
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[doc = r#"
Identifies the pitch class of a [`Note`]

# Example
```rust
# use midi_writer::prelude::*;
let note = Key::FSharp.with_octave(Octave::new(4)).unwrap();

assert_eq!(note.octave().value(), 4);
assert_eq!(note.key(), Key::FSharp);
```
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}
impl Key {
    /// Returns true if the key is one of the black keys
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// Identify the key from a note byte.
    #[inline]
    pub const fn from_data_byte(key: &DataByte) -> Self {
        use Key::*;
        match key.value() % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }
    const fn get_mod_12(&self) -> u8 {
        use Key::*;
        match self {
            C => 0,
            CSharp => 1,
            D => 2,
            DSharp => 3,
            E => 4,
            F => 5,
            FSharp => 6,
            G => 7,
            GSharp => 8,
            A => 9,
            ASharp => 10,
            B => 11,
        }
    }

    /// Create a [`Note`] given this key and a provided [`Octave`]
    pub const fn with_octave(self, octave: Octave) -> Option<Note> {
        Note::new(self, octave)
    }
}
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
Identifies the octave of a [`Note`]. Values range from -1 to 9.

# Example

```rust
# use midi_writer::prelude::*;
let octave = Octave::new(12); // clamps to 9

assert_eq!(octave.value(), 9);
```
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Octave(i8);

impl Octave {
    /// Identify an octave from a note byte.
    pub const fn from_data_byte(key: &DataByte) -> Self {
        let octave = key.value() / 12;

        Self(octave as i8 - 1)
    }
    /// Should be a value between [-1, 9]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < -1 {
            octave = -1
        } else if octave > 9 {
            octave = 9;
        }
        Self(octave)
    }

    /// The octave, from `[-1,9]`
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn note_from_key_octave_pairs() {
    for key_byte in 0..128u8 {
        let key = Note::from_databyte(key_byte).unwrap();

        let made_key = Note::new(key.key(), key.octave()).unwrap();

        assert_eq!(key.octave(), made_key.octave());
        assert_eq!(key.key(), made_key.key());
        assert_eq!(key, made_key);
    }
}
