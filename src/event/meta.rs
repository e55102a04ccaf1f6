use super::TrackCursor;
use crate::{
    EncodeError, ParseError,
    codec::{number_to_bytes, string_to_bytes, write_variable_length},
    micros::UMicros,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use num_enum::IntoPrimitive;

/// Prefix of every meta event.
pub const META_EVENT: u8 = 0xFF;

/// The type byte following [`META_EVENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaKind {
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    TimeSignature = 0x58,
    KeySignature = 0x59,
}

fn write_meta(kind: MetaKind, payload: &[u8], out: &mut Vec<u8>) {
    out.push(META_EVENT);
    out.push(kind.into());
    write_variable_length(payload.len() as u32, out);
    out.extend_from_slice(payload);
}

/// Which text meta event a [`TextEvent`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextKind {
    /// Any text
    Text,
    /// Copyright notice
    Copyright,
    /// Sequence or track name
    TrackName,
    /// Instrument name
    InstrumentName,
    /// A lyric syllable
    Lyric,
    /// Rehearsal letter or section name
    Marker,
    /// Something happening on stage or screen
    CuePoint,
}

impl From<TextKind> for MetaKind {
    fn from(value: TextKind) -> Self {
        match value {
            TextKind::Text => Self::Text,
            TextKind::Copyright => Self::Copyright,
            TextKind::TrackName => Self::TrackName,
            TextKind::InstrumentName => Self::InstrumentName,
            TextKind::Lyric => Self::Lyric,
            TextKind::Marker => Self::Marker,
            TextKind::CuePoint => Self::CuePoint,
        }
    }
}

#[doc = r#"
A text meta event: `FF id len text`.

# Example
```rust
# use midi_writer::prelude::*;
let lyric = TextEvent::new(TextKind::Lyric, "la", 0);
let bytes = Event::from(lyric).data(&WriterOptions::default()).unwrap();

assert_eq!(bytes, [0x00, 0xFF, 0x05, 0x02, b'l', b'a']);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEvent {
    kind: TextKind,
    text: String,
    delta: u32,
}

impl TextEvent {
    /// Create a text event of `kind` after `delta` ticks.
    pub fn new(kind: TextKind, text: impl Into<String>, delta: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            delta,
        }
    }

    /// Which text event this is
    pub fn kind(&self) -> TextKind {
        self.kind
    }

    /// The raw text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        let bytes = string_to_bytes(&self.text);
        if bytes.len() > crate::codec::MAX_VARIABLE_LENGTH as usize {
            return Err(EncodeError::VariableLength(bytes.len() as u64));
        }
        write_meta(self.kind.into(), &bytes, out);
        Ok(tick)
    }
}

#[doc = r#"
Sets the tempo in beats per minute, written as microseconds per quarter note.

# Example
```rust
# use midi_writer::prelude::*;
let bytes = Event::from(TempoEvent::new(120., 0)).data(&WriterOptions::default()).unwrap();
assert_eq!(bytes, [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoEvent {
    bpm: f64,
    delta: u32,
}

impl TempoEvent {
    /// Tempo change to `bpm` after `delta` ticks. Validated when built.
    pub const fn new(bpm: f64, delta: u32) -> Self {
        Self { bpm, delta }
    }

    /// Beats per minute
    pub const fn bpm(&self) -> f64 {
        self.bpm
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let micros = UMicros::per_quarter_note(self.bpm)?;
        let value = number_to_bytes(micros.us(), 3)?;
        let tick = cursor.write_delta(self.delta as f64, out)?;
        write_meta(MetaKind::Tempo, &value, out);
        Ok(tick)
    }
}

#[doc = r#"
A time signature: `FF 58 04 nn dd cc bb`.

The denominator is written as a power of two, so 4/4 is `04 02` and 6/8 is
`06 03`. `cc` is MIDI clocks per metronome click (24) and `bb` the number of
notated 32nd notes in a quarter (8).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignatureEvent {
    numerator: u8,
    denominator_power: u8,
    clocks_per_click: u8,
    notated_32nds: u8,
    delta: u32,
}

impl TimeSignatureEvent {
    /// `numerator / denominator` with the default click and 32nd counts.
    ///
    /// # Errors
    /// if `denominator` is not a power of two.
    pub fn new(numerator: u8, denominator: u8) -> Result<Self, ParseError> {
        Self::with_clocks(numerator, denominator, 24, 8, 0)
    }

    /// Full control over every field.
    pub fn with_clocks(
        numerator: u8,
        denominator: u8,
        clocks_per_click: u8,
        notated_32nds: u8,
        delta: u32,
    ) -> Result<Self, ParseError> {
        if !denominator.is_power_of_two() {
            return Err(ParseError::TimeSignatureDenominator(denominator));
        }
        Ok(Self {
            numerator,
            denominator_power: denominator.trailing_zeros() as u8,
            clocks_per_click,
            notated_32nds,
            delta,
        })
    }

    /// The beats per bar
    pub const fn numerator(&self) -> u8 {
        self.numerator
    }

    /// The beat unit, 4 for a quarter
    pub const fn denominator(&self) -> u8 {
        1 << self.denominator_power
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        write_meta(
            MetaKind::TimeSignature,
            &[
                self.numerator,
                self.denominator_power,
                self.clocks_per_click,
                self.notated_32nds,
            ],
            out,
        );
        Ok(tick)
    }
}

/// Major or minor, the `mi` byte of a key signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum KeyMode {
    /// `0`
    #[default]
    Major = 0,
    /// `1`
    Minor = 1,
}

#[doc = r#"
A key signature: `FF 59 02 sf mi`, where `sf` counts sharps (positive) or
flats (negative).

# Example
```rust
# use midi_writer::prelude::*;
let key = KeySignatureEvent::from_name("Eb").unwrap();
assert_eq!(key.accidentals(), -3);
assert_eq!(key.mode(), KeyMode::Major);

let key = KeySignatureEvent::from_name("F#m").unwrap();
assert_eq!(key.accidentals(), 3);
assert_eq!(key.mode(), KeyMode::Minor);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignatureEvent {
    accidentals: i8,
    mode: KeyMode,
    delta: u32,
}

impl KeySignatureEvent {
    /// A key with `accidentals` sharps (or flats if negative), -7..=7.
    pub fn new(accidentals: i8, mode: KeyMode) -> Result<Self, ParseError> {
        if !(-7..=7).contains(&accidentals) {
            return Err(ParseError::Accidentals(accidentals));
        }
        Ok(Self {
            accidentals,
            mode,
            delta: 0,
        })
    }

    /// A key from its name: a letter, an optional `#` or `b`, and `m` for minor.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        let unknown = || ParseError::KeySignature(name.to_string());
        let mut chars = name.trim().chars();

        // position on the circle of fifths for the major key
        let mut fifths: i8 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('F') => -1,
            Some('C') => 0,
            Some('G') => 1,
            Some('D') => 2,
            Some('A') => 3,
            Some('E') => 4,
            Some('B') => 5,
            _ => return Err(unknown()),
        };

        let rest = chars.as_str();
        let rest = if let Some(rest) = rest.strip_prefix('#') {
            fifths += 7;
            rest
        } else if let Some(rest) = rest.strip_prefix('b') {
            fifths -= 7;
            rest
        } else {
            rest
        };

        let mode = match rest {
            "" => KeyMode::Major,
            "m" => {
                fifths -= 3;
                KeyMode::Minor
            }
            _ => return Err(unknown()),
        };

        Self::new(fifths, mode).map_err(|_| unknown())
    }

    /// Sets the ticks since the previous event.
    pub const fn with_delta(mut self, delta: u32) -> Self {
        self.delta = delta;
        self
    }

    /// Number of sharps, or flats if negative
    pub const fn accidentals(&self) -> i8 {
        self.accidentals
    }

    /// Major or minor
    pub const fn mode(&self) -> KeyMode {
        self.mode
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        write_meta(
            MetaKind::KeySignature,
            &[self.accidentals as u8, self.mode.into()],
            out,
        );
        Ok(tick)
    }
}

/// Marks the end of a track. Tracks add one when building if missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTrackEvent {
    delta: u32,
}

impl EndTrackEvent {
    /// End the track `delta` ticks after the previous event.
    pub const fn new(delta: u32) -> Self {
        Self { delta }
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        write_meta(MetaKind::EndOfTrack, &[], out);
        Ok(tick)
    }
}
