use crate::{
    ParseError, TrackError,
    event::{
        ControllerChangeEvent, ControllerChangeOptions, EndTrackEvent, Event, EventKind,
        KeySignatureEvent, ProgramChangeEvent, ProgramChangeOptions, TempoEvent, TextEvent,
        TextKind, TimeSignatureEvent, TrackCursor,
    },
    file::{
        WriterOptions,
        builder::chunk::{Chunk, TRACK_TAG},
    },
};
use alloc::{string::String, vec::Vec};

#[doc = r#"
An ordered list of events that becomes one `MTrk` chunk.

Events are kept as added and only turned into bytes by [`Track::build`],
which walks them from the start of the track every time it is called.
An end of track event is appended if the last event is not one already.

# Example
```rust
# use midi_writer::prelude::*;
let mut track = Track::new();
track.set_tempo(120.).add_track_name("lead");
track.add_event(NoteEvent::parse(&["E4"], "8").unwrap());

let chunk = track.build(&WriterOptions::default()).unwrap();
assert!(chunk.data().ends_with(&[0x00, 0xFF, 0x2F, 0x00]));
```
"#]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    /// An empty track
    pub fn new() -> Self {
        Self::default()
    }

    /// The events in insertion order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Append an event.
    pub fn add_event(&mut self, event: impl Into<Event>) -> &mut Self {
        self.events.push(event.into());
        self
    }

    /// Append several events in order.
    pub fn add_events<I>(&mut self, events: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Event>,
    {
        self.events.extend(events.into_iter().map(Into::into));
        self
    }

    /// Set the tempo in beats per minute.
    pub fn set_tempo(&mut self, bpm: f64) -> &mut Self {
        self.add_event(TempoEvent::new(bpm, 0))
    }

    /// Set the time signature, `4, 4` for common time.
    pub fn set_time_signature(
        &mut self,
        numerator: u8,
        denominator: u8,
    ) -> Result<&mut Self, ParseError> {
        let event = TimeSignatureEvent::new(numerator, denominator)?;
        Ok(self.add_event(event))
    }

    /// Set the key signature from a name such as `D` or `Ebm`.
    pub fn set_key_signature(&mut self, name: &str) -> Result<&mut Self, ParseError> {
        let event = KeySignatureEvent::from_name(name)?;
        Ok(self.add_event(event))
    }

    fn add_text_kind(&mut self, kind: TextKind, text: impl Into<String>) -> &mut Self {
        self.add_event(TextEvent::new(kind, text, 0))
    }

    /// Add a free text event.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::Text, text)
    }

    /// Add a copyright notice.
    pub fn add_copyright(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::Copyright, text)
    }

    /// Name the track.
    pub fn add_track_name(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::TrackName, text)
    }

    /// Name the instrument the track is meant for.
    pub fn add_instrument_name(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::InstrumentName, text)
    }

    /// Add a marker.
    pub fn add_marker(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::Marker, text)
    }

    /// Add a cue point.
    pub fn add_cue_point(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::CuePoint, text)
    }

    /// Add a lyric.
    pub fn add_lyric(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_text_kind(TextKind::Lyric, text)
    }

    /// Set `controller` to `value` on channel 1.
    pub fn controller_change(
        &mut self,
        controller: u8,
        value: u8,
    ) -> Result<&mut Self, ParseError> {
        let event = ControllerChangeEvent::new(ControllerChangeOptions {
            controller_number: controller,
            controller_value: value,
            ..Default::default()
        })?;
        Ok(self.add_event(event))
    }

    /// Select `instrument` on channel 1.
    pub fn program_change(&mut self, instrument: u8) -> Result<&mut Self, ParseError> {
        let event = ProgramChangeEvent::new(ProgramChangeOptions {
            instrument,
            ..Default::default()
        })?;
        Ok(self.add_event(event))
    }

    /// Encode every event into a track chunk.
    ///
    /// Running state starts over on every call, so building twice gives the
    /// same bytes.
    ///
    /// # Errors
    /// with the index of the first event that cannot be encoded.
    #[cfg_attr(not(feature = "tracing"), allow(unused_assignments))]
    pub fn build(&self, options: &WriterOptions) -> Result<Chunk, TrackError> {
        let mut cursor = TrackCursor::START;
        let mut data = Vec::new();
        let mut ended = false;
        let last = self.events.len().saturating_sub(1);

        for (index, event) in self.events.iter().enumerate() {
            let is_end = event.kind() == EventKind::EndOfTrack;
            if is_end && index != last {
                #[cfg(feature = "tracing")]
                tracing::warn!(index, "dropping end of track event before the last event");
                continue;
            }
            let built = event
                .build(cursor, options)
                .map_err(|kind| TrackError::new(index, kind))?;
            data.extend_from_slice(&built.data);
            cursor = built.cursor;
            ended = is_end;
        }

        if !ended {
            let built = Event::from(EndTrackEvent::default())
                .build(cursor, options)
                .map_err(|kind| TrackError::new(self.events.len(), kind))?;
            data.extend_from_slice(&built.data);
            cursor = built.cursor;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            events = self.events.len(),
            bytes = data.len(),
            ticks = cursor.tick_pointer(),
            "built track"
        );

        Chunk::new(TRACK_TAG, data).map_err(|kind| TrackError::new(self.events.len(), kind))
    }
}

impl FromIterator<Event> for Track {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodeError, event::NoteEvent};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_track_still_ends() {
        let chunk = Track::new().build(&WriterOptions::default()).unwrap();
        assert_eq!(chunk.data(), [0x00, 0xFF, 0x2F, 0x00]);
        assert_eq!(chunk.length(), 4);
    }

    #[test]
    fn explicit_end_is_not_doubled() {
        let mut track = Track::new();
        track
            .add_event(EndTrackEvent::default())
            .add_event(NoteEvent::parse(&["C4"], "T50").unwrap())
            .add_event(EndTrackEvent::new(10));
        let chunk = track.build(&WriterOptions::default()).unwrap();
        assert_eq!(
            chunk.data(),
            [0x00, 0x90, 0x3C, 0x40, 0x32, 0x80, 0x3C, 0x40, 0x0A, 0xFF, 0x2F, 0x00]
        );
    }

    #[test]
    fn build_is_repeatable() {
        let mut track = Track::new();
        track.add_events([
            NoteEvent::parse(&["C4"], "8t").unwrap(),
            NoteEvent::parse(&["D4"], "8t").unwrap(),
        ]);
        let options = WriterOptions::default();
        assert_eq!(track.build(&options), track.build(&options));
    }

    #[test]
    fn failing_event_is_located() {
        let mut track = Track::new();
        track.add_text("intro").set_tempo(-4.);
        assert_eq!(
            track.build(&WriterOptions::default()),
            Err(TrackError::new(1, EncodeError::Tempo(-4.)))
        );
    }

    #[test]
    fn convenience_setters() {
        let mut track = Track::new();
        track
            .set_time_signature(3, 4)
            .unwrap()
            .set_key_signature("G")
            .unwrap()
            .program_change(0)
            .unwrap();
        assert!(track.set_time_signature(3, 5).is_err());
        assert!(track.controller_change(128, 0).is_err());
        let kinds: Vec<_> = track.events().iter().map(Event::kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::TimeSignature,
                EventKind::KeySignature,
                EventKind::ProgramChange
            ]
        );
    }
}
