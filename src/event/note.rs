use super::TrackCursor;
use crate::{
    Duration, EncodeError, ParseError,
    codec::{convert_velocity, rounded_if_close},
    file::WriterOptions,
    message::{Channel, VoiceStatus},
    note::Note,
};
use alloc::vec::Vec;

#[doc = r#"
Fields of a [`NoteEvent`], with their defaults.

| Field        | Default                   |
|--------------|---------------------------|
| `pitch`      | none, at least one needed |
| `duration`   | quarter note              |
| `wait`       | no wait                   |
| `velocity`   | 50 (of 100)               |
| `channel`    | 1                         |
| `start_tick` | none (`0` is the same)    |
| `sequential` | false                     |
| `repeat`     | 1                         |
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoteOptions {
    /// One pitch, or several for a chord or a run
    pub pitch: Vec<Note>,
    /// How long each note sounds
    pub duration: Duration,
    /// Rest before the first note on
    pub wait: Duration,
    /// 1-100, scaled onto 0-127
    pub velocity: f64,
    /// 1-16
    pub channel: u8,
    /// Absolute tick of the first note on. Overrides `wait`; `0` counts as unset.
    pub start_tick: Option<f64>,
    /// Play the pitches one after another instead of together
    pub sequential: bool,
    /// How many times to play the pattern
    pub repeat: u32,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            pitch: Vec::new(),
            duration: Duration::QUARTER,
            wait: Duration::ZERO,
            velocity: 50.,
            channel: 1,
            start_tick: None,
            sequential: false,
            repeat: 1,
        }
    }
}

#[doc = r#"
A note on message followed by its note off.

With several pitches the event is a chord: all note ons, then all note offs.
With `sequential` set, each pitch sounds for the full duration before the
next starts.

# Example
```rust
# use midi_writer::prelude::*;
let note = NoteEvent::parse(&["C4"], "4").unwrap();
let bytes = Event::from(note).data(&WriterOptions::default()).unwrap();

assert_eq!(bytes, [0x00, 0x90, 0x3C, 0x40, 0x81, 0x00, 0x80, 0x3C, 0x40]);
```
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pitch: Vec<Note>,
    duration: Duration,
    wait: Duration,
    velocity: f64,
    channel: Channel,
    start_tick: Option<f64>,
    sequential: bool,
    repeat: u32,
}

impl NoteEvent {
    /// Validate `options` into a note event.
    ///
    /// # Errors
    /// if there is no pitch or the channel is not 1-16.
    pub fn new(options: NoteOptions) -> Result<Self, ParseError> {
        if options.pitch.is_empty() {
            return Err(ParseError::MissingPitch);
        }
        Ok(Self {
            pitch: options.pitch,
            duration: options.duration,
            wait: options.wait,
            velocity: options.velocity,
            channel: Channel::new(options.channel)?,
            start_tick: options.start_tick,
            sequential: options.sequential,
            repeat: options.repeat.max(1),
        })
    }

    /// Shorthand for pitch names and a duration token with every other field
    /// left at its default.
    pub fn parse(pitch: &[&str], duration: &str) -> Result<Self, ParseError> {
        Self::new(NoteOptions {
            pitch: pitch
                .iter()
                .map(|name| name.parse())
                .collect::<Result<_, _>>()?,
            duration: duration.parse()?,
            ..Default::default()
        })
    }

    /// The pitches this event plays
    pub fn pitch(&self) -> &[Note] {
        &self.pitch
    }

    /// How long each note sounds
    pub fn duration(&self) -> &Duration {
        &self.duration
    }

    /// Rest before the first note on
    pub fn wait(&self) -> &Duration {
        &self.wait
    }

    /// Absolute tick of the first note on, if set explicitly
    pub fn start_tick(&self) -> Option<f64> {
        self.start_tick
    }

    /// The channel the notes are sent on
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        options: &WriterOptions,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let division = options.division;
        let duration = self.duration.ticks(division);
        let lead = match self.start_tick.filter(|&tick| tick != 0.) {
            Some(start_tick) => {
                let start_tick = rounded_if_close(start_tick);
                if start_tick < cursor.tick_pointer() {
                    return Err(EncodeError::StartTick {
                        start_tick,
                        tick_pointer: cursor.tick_pointer(),
                    });
                }
                start_tick - cursor.tick_pointer()
            }
            None => self.wait.ticks(division),
        };

        let keys = self
            .pitch
            .iter()
            .map(|note| note.relative_to(options.middle_c).map(u8::from))
            .collect::<Result<Vec<_>, _>>()?;
        let velocity = convert_velocity(self.velocity);
        let note_on = VoiceStatus::NoteOn.on(self.channel);
        let note_off = VoiceStatus::NoteOff.on(self.channel);

        let mut lead = Some(lead);
        let mut start = None;

        for _ in 0..self.repeat {
            if self.sequential {
                for &key in &keys {
                    let tick = cursor.write_delta(lead.take().unwrap_or(0.), out)?;
                    start.get_or_insert(tick);
                    out.extend_from_slice(&[note_on, key, velocity]);

                    cursor.write_delta(duration, out)?;
                    out.extend_from_slice(&[note_off, key, velocity]);
                }
            } else {
                for &key in &keys {
                    let tick = cursor.write_delta(lead.take().unwrap_or(0.), out)?;
                    start.get_or_insert(tick);
                    out.extend_from_slice(&[note_on, key, velocity]);
                }
                let mut sustain = Some(duration);
                for &key in &keys {
                    cursor.write_delta(sustain.take().unwrap_or(0.), out)?;
                    out.extend_from_slice(&[note_off, key, velocity]);
                }
            }
        }

        Ok(start.unwrap_or(cursor.tick_pointer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use pretty_assertions::assert_eq;

    fn bytes(event: NoteEvent) -> Vec<u8> {
        Event::from(event).data(&WriterOptions::default()).unwrap()
    }

    fn pitches(names: &[&str]) -> Vec<Note> {
        names.iter().map(|name| name.parse().unwrap()).collect()
    }

    #[test]
    fn missing_pitch_is_rejected() {
        assert_eq!(
            NoteEvent::new(NoteOptions::default()),
            Err(ParseError::MissingPitch)
        );
        assert_eq!(
            NoteEvent::new(NoteOptions {
                pitch: pitches(&["C4"]),
                channel: 17,
                ..Default::default()
            }),
            Err(ParseError::Channel(17))
        );
    }

    #[test]
    fn three_stacked_quarters() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["C4"]),
            duration: Duration::parse_sequence(["4", "4", "4"]).unwrap(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bytes(note),
            [0x00, 0x90, 0x3C, 0x40, 0x83, 0x00, 0x80, 0x3C, 0x40]
        );
    }

    #[test]
    fn explicit_tick_duration() {
        let note = NoteEvent::parse(&["C4"], "T50").unwrap();
        assert_eq!(bytes(note), [0x00, 0x90, 0x3C, 0x40, 0x32, 0x80, 0x3C, 0x40]);
    }

    #[test]
    fn wait_channel_and_velocity() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["A4"]),
            duration: Duration::parse("8").unwrap(),
            wait: Duration::parse("4").unwrap(),
            velocity: 100.,
            channel: 10,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bytes(note),
            [0x81, 0x00, 0x99, 0x45, 0x7F, 0x40, 0x89, 0x45, 0x7F]
        );
    }

    #[test]
    fn chord() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["C4", "E4", "G4"]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bytes(note),
            [
                0x00, 0x90, 0x3C, 0x40, //
                0x00, 0x90, 0x40, 0x40, //
                0x00, 0x90, 0x43, 0x40, //
                0x81, 0x00, 0x80, 0x3C, 0x40, //
                0x00, 0x80, 0x40, 0x40, //
                0x00, 0x80, 0x43, 0x40,
            ]
        );
    }

    #[test]
    fn sequential_repeat() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["C4", "D4"]),
            duration: Duration::parse("8").unwrap(),
            wait: Duration::parse("8").unwrap(),
            sequential: true,
            repeat: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bytes(note),
            [
                0x40, 0x90, 0x3C, 0x40, 0x40, 0x80, 0x3C, 0x40, //
                0x00, 0x90, 0x3E, 0x40, 0x40, 0x80, 0x3E, 0x40, //
                0x00, 0x90, 0x3C, 0x40, 0x40, 0x80, 0x3C, 0x40, //
                0x00, 0x90, 0x3E, 0x40, 0x40, 0x80, 0x3E, 0x40,
            ]
        );
    }

    #[test]
    fn start_tick_seeds_pointer() {
        let note = Event::from(
            NoteEvent::new(NoteOptions {
                pitch: pitches(&["C4"]),
                wait: Duration::parse("1").unwrap(),
                start_tick: Some(200.),
                ..Default::default()
            })
            .unwrap(),
        );
        let options = WriterOptions::default();
        let built = note.build(TrackCursor::START, &options).unwrap();
        assert_eq!(built.tick, 200.);
        assert_eq!(&built.data[..2], [0x81, 0x48]);
        assert_eq!(built.cursor.tick_pointer(), 328.);

        assert_eq!(
            note.build(built.cursor, &options),
            Err(EncodeError::StartTick {
                start_tick: 200.,
                tick_pointer: 328.
            })
        );
    }

    #[test]
    fn zero_start_tick_keeps_wait() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["C4"]),
            duration: Duration::parse("8").unwrap(),
            wait: Duration::parse("4").unwrap(),
            start_tick: Some(0.),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bytes(note),
            [0x81, 0x00, 0x90, 0x3C, 0x40, 0x40, 0x80, 0x3C, 0x40]
        );
    }

    #[test]
    fn middle_c_option() {
        let note = Event::from(NoteEvent::parse(&["C4"], "4").unwrap());
        let options = WriterOptions {
            middle_c: "C3".parse().unwrap(),
            ..Default::default()
        };
        let data = note.data(&options).unwrap();
        assert_eq!(data[2], 72);
    }

    #[test]
    fn zero_length_ghost() {
        let note = NoteEvent::new(NoteOptions {
            pitch: pitches(&["C4"]),
            duration: Duration::ZERO,
            velocity: 0.,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(bytes(note), [0x00, 0x90, 0x3C, 0x00, 0x00, 0x80, 0x3C, 0x00]);
    }
}
