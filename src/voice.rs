#![doc = r#"
Import of notation voices: an ordered list of notes and rests with
notation style durations.

Pitches are written `c#/4` (letter, accidentals, slash, octave) and base
durations `w`, `h`, `q` or a number (`8`, `16`, ...). Rests are not written
as events; they add to the wait of the next note. Rests left at the end of
the voice are kept with a silent, zero length `C4`.

# Example
```rust
# use midi_writer::prelude::*;
let voice = Voice::new([
    Tickable::note(["c/4", "e/4"], "q"),
    Tickable::rest("8"),
    Tickable::note(["g/4"], "8"),
]);
let track = track_from_voice(&voice).unwrap();
assert_eq!(track.events().len(), 2);
```
"#]

use crate::{
    Duration, ParseError,
    event::{NoteEvent, NoteOptions},
    file::Track,
    note::Note,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

/// What a [`Tickable`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickableKind {
    /// Sounds its keys
    Note,
    /// Silence
    Rest,
    /// Anything else a voice may hold, ignored
    Other,
}

/// One entry of a [`Voice`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tickable {
    /// Note, rest or other
    pub kind: TickableKind,
    /// Pitches such as `c#/4`
    pub keys: Vec<String>,
    /// Base duration: `w`, `h`, `q`, `8`, `16`, ...
    pub duration: String,
    /// Number of augmentation dots
    pub dots: u8,
    /// Notes in the tuplet this tickable belongs to, if any
    pub tuplet: Option<u32>,
}

impl Tickable {
    /// A note sounding `keys`.
    pub fn note<I, S>(keys: I, duration: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: TickableKind::Note,
            keys: keys.into_iter().map(Into::into).collect(),
            duration: duration.to_string(),
            dots: 0,
            tuplet: None,
        }
    }

    /// A rest.
    pub fn rest(duration: &str) -> Self {
        Self {
            kind: TickableKind::Rest,
            keys: Vec::new(),
            duration: duration.to_string(),
            dots: 0,
            tuplet: None,
        }
    }

    /// Anything that is neither a note nor a rest.
    pub fn other() -> Self {
        Self {
            kind: TickableKind::Other,
            keys: Vec::new(),
            duration: String::new(),
            dots: 0,
            tuplet: None,
        }
    }

    /// Sets the number of dots.
    pub fn dotted(mut self, dots: u8) -> Self {
        self.dots = dots;
        self
    }

    /// Marks the tickable as part of an `num_notes` tuplet.
    pub fn in_tuplet(mut self, num_notes: u32) -> Self {
        self.tuplet = Some(num_notes);
        self
    }
}

/// An ordered list of tickables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    /// The notes, rests and others in order
    pub tickables: Vec<Tickable>,
}

impl Voice {
    /// A voice of `tickables`.
    pub fn new(tickables: impl IntoIterator<Item = Tickable>) -> Self {
        Self {
            tickables: tickables.into_iter().collect(),
        }
    }
}

/// `c#/4` to `c#4`.
pub fn convert_pitch(pitch: &str) -> String {
    pitch.replacen('/', "", 1)
}

/// `w`, `h` and `q` to `1`, `2` and `4`. Anything else is already numeric.
pub fn convert_base_duration(duration: &str) -> &str {
    match duration {
        "w" => "1",
        "h" => "2",
        "q" => "4",
        other => other,
    }
}

/// The duration token of `tickable`: dots, base, then the tuplet suffix.
pub fn convert_duration(tickable: &Tickable) -> String {
    let mut token = "d".repeat(tickable.dots as usize);
    token.push_str(convert_base_duration(&tickable.duration));
    if let Some(num_notes) = tickable.tuplet {
        token.push('t');
        token.push_str(&num_notes.to_string());
    }
    token
}

fn take_wait(wait: &mut Vec<Duration>) -> Duration {
    if wait.is_empty() {
        Duration::ZERO
    } else {
        Duration::Sequence(core::mem::take(wait))
    }
}

/// Turn a voice into a track of note events.
///
/// # Errors
/// if a pitch or duration does not convert.
pub fn track_from_voice(voice: &Voice) -> Result<Track, ParseError> {
    let mut track = Track::new();
    let mut wait = Vec::new();

    for tickable in &voice.tickables {
        match tickable.kind {
            TickableKind::Note => {
                let pitch = tickable
                    .keys
                    .iter()
                    .map(|key| convert_pitch(key).parse())
                    .collect::<Result<Vec<Note>, _>>()?;
                let event = NoteEvent::new(NoteOptions {
                    pitch,
                    duration: Duration::parse(&convert_duration(tickable))?,
                    wait: take_wait(&mut wait),
                    ..Default::default()
                })?;
                track.add_event(event);
            }
            TickableKind::Rest => wait.push(Duration::parse(&convert_duration(tickable))?),
            TickableKind::Other => {}
        }
    }

    // silent zero length note so trailing rests still take time
    if !wait.is_empty() {
        let ghost = NoteEvent::new(NoteOptions {
            pitch: alloc::vec![Note::MIDDLE_C],
            duration: Duration::ZERO,
            wait: take_wait(&mut wait),
            velocity: 0.,
            ..Default::default()
        })?;
        track.add_event(ghost);
    }

    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pitches() {
        assert_eq!(convert_pitch("c/4"), "c4");
        assert_eq!(convert_pitch("bb/-1"), "bb-1");
    }

    #[test]
    fn durations() {
        let cases = [
            (Tickable::note(["c/4"], "w"), "1"),
            (Tickable::note(["c/4"], "h"), "2"),
            (Tickable::note(["c/4"], "q"), "4"),
            (Tickable::note(["c/4"], "8"), "8"),
            (Tickable::note(["c/4"], "h").dotted(1), "d2"),
            (Tickable::note(["c/4"], "q").dotted(1), "d4"),
            (Tickable::note(["c/4"], "8").dotted(2), "dd8"),
            (Tickable::note(["c/4"], "64"), "64"),
            (Tickable::note(["c/4"], "8").in_tuplet(3), "8t3"),
            (Tickable::rest("q").dotted(1).in_tuplet(5), "d4t5"),
        ];
        for (tickable, expected) in cases {
            assert_eq!(convert_duration(&tickable), expected);
        }
    }

    #[test]
    fn bad_pitch_is_reported() {
        let voice = Voice::new([Tickable::note(["h/4"], "q")]);
        assert!(matches!(
            track_from_voice(&voice),
            Err(ParseError::Pitch(_))
        ));
    }

    #[test]
    fn bad_duration_is_reported() {
        let voice = Voice::new([Tickable::rest("x")]);
        assert!(matches!(
            track_from_voice(&voice),
            Err(ParseError::Duration(_))
        ));
    }
}
