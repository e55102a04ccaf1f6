#![doc = r#"
The events a [`Track`](crate::prelude::Track) is made of.

Every event is written as a delta time followed by its message bytes. Deltas
are only known once the event's place in its track is known, so events are
finalized by the track through [`Event::build`], which threads a
[`TrackCursor`] (running tick position and rounding carry) from one event to
the next.

```text
|-------|------------------------------------------------------------|
| Event | Bytes                                                      |
|-------|------------------------------------------------------------|
| Note  | delta 9n key vel ... delta 8n key vel                      |
| CC    | delta Bn controller value                                  |
| PC    | delta Cn program                                           |
| Tempo | delta FF 51 03 tt tt tt                                    |
| Text  | delta FF id len text...                                    |
| EOT   | delta FF 2F 00                                             |
|-------|------------------------------------------------------------|
```
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod note;
pub use note::*;

use crate::{
    EncodeError,
    codec::{checked_ticks, rounded_if_close, write_variable_length},
    file::WriterOptions,
};
use alloc::vec::Vec;

/// The running state of a track while its events are written.
///
/// Deltas are written as integers, so a fractional delta leaves a rounding
/// remainder. The remainder is carried to the next delta, which keeps the
/// written deltas summing to the exact tick position instead of drifting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackCursor {
    tick_pointer: f64,
    precision_loss: f64,
}

impl TrackCursor {
    /// The state of a track before its first event.
    pub const START: Self = Self {
        tick_pointer: 0.,
        precision_loss: 0.,
    };

    /// Absolute, unrounded tick position reached so far.
    pub const fn tick_pointer(&self) -> f64 {
        self.tick_pointer
    }

    /// How many ticks too many (positive) or too few (negative) the written
    /// deltas account for so far.
    pub const fn precision_loss(&self) -> f64 {
        self.precision_loss
    }

    /// Write `delta` ticks as a variable length quantity, corrected by the
    /// carried rounding remainder, and advance the tick pointer.
    ///
    /// Returns the absolute tick the following message fires at.
    pub(crate) fn write_delta(
        &mut self,
        delta: f64,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        if !delta.is_finite() || delta < 0. {
            return Err(EncodeError::Ticks(delta));
        }
        let corrected = rounded_if_close(delta - self.precision_loss);
        let ticks = checked_ticks(corrected.max(0.))?;

        #[cfg(feature = "tracing")]
        {
            if corrected != delta || ticks as f64 != corrected {
                tracing::trace!(delta, corrected, ticks, "precision correction");
            }
        }

        self.precision_loss = ticks as f64 - corrected;
        self.tick_pointer = rounded_if_close(self.tick_pointer + delta);
        write_variable_length(ticks, out);
        Ok(self.tick_pointer)
    }
}

/// The bytes of one finalized event and where it left its track.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltEvent {
    /// Delta prefixed message bytes
    pub data: Vec<u8>,
    /// Absolute tick the event fires at
    pub tick: f64,
    /// Exact ticks consumed, before rounding
    pub delta: f64,
    /// The track state to hand to the next event
    pub cursor: TrackCursor,
}

/// Type tag of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Note on and note off pairs
    Note,
    /// Control change
    ControllerChange,
    /// Program change
    ProgramChange,
    /// Set tempo meta event
    Tempo,
    /// One of the text meta events
    Text(TextKind),
    /// Time signature meta event
    TimeSignature,
    /// Key signature meta event
    KeySignature,
    /// End of track meta event
    EndOfTrack,
}

/// Any event that can be added to a track.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// See [`NoteEvent`]
    Note(NoteEvent),
    /// See [`ControllerChangeEvent`]
    ControllerChange(ControllerChangeEvent),
    /// See [`ProgramChangeEvent`]
    ProgramChange(ProgramChangeEvent),
    /// See [`TempoEvent`]
    Tempo(TempoEvent),
    /// See [`TextEvent`]
    Text(TextEvent),
    /// See [`TimeSignatureEvent`]
    TimeSignature(TimeSignatureEvent),
    /// See [`KeySignatureEvent`]
    KeySignature(KeySignatureEvent),
    /// See [`EndTrackEvent`]
    EndOfTrack(EndTrackEvent),
}

impl Event {
    /// Returns the type tag of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Note(_) => EventKind::Note,
            Self::ControllerChange(_) => EventKind::ControllerChange,
            Self::ProgramChange(_) => EventKind::ProgramChange,
            Self::Tempo(_) => EventKind::Tempo,
            Self::Text(text) => EventKind::Text(text.kind()),
            Self::TimeSignature(_) => EventKind::TimeSignature,
            Self::KeySignature(_) => EventKind::KeySignature,
            Self::EndOfTrack(_) => EventKind::EndOfTrack,
        }
    }

    /// Finalize the event at `cursor`, returning its bytes and the cursor
    /// for the next event.
    pub fn build(
        &self,
        cursor: TrackCursor,
        options: &WriterOptions,
    ) -> Result<BuiltEvent, EncodeError> {
        let mut next = cursor;
        let mut data = Vec::new();
        let tick = match self {
            Self::Note(e) => e.write(&mut next, options, &mut data)?,
            Self::ControllerChange(e) => e.write(&mut next, &mut data)?,
            Self::ProgramChange(e) => e.write(&mut next, &mut data)?,
            Self::Tempo(e) => e.write(&mut next, &mut data)?,
            Self::Text(e) => e.write(&mut next, &mut data)?,
            Self::TimeSignature(e) => e.write(&mut next, &mut data)?,
            Self::KeySignature(e) => e.write(&mut next, &mut data)?,
            Self::EndOfTrack(e) => e.write(&mut next, &mut data)?,
        };
        Ok(BuiltEvent {
            data,
            tick,
            delta: next.tick_pointer - cursor.tick_pointer,
            cursor: next,
        })
    }

    /// The bytes of this event as the first event of a track.
    pub fn data(&self, options: &WriterOptions) -> Result<Vec<u8>, EncodeError> {
        self.build(TrackCursor::START, options).map(|built| built.data)
    }
}

macro_rules! impl_from_event {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Event {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_event!(
    Note(NoteEvent),
    ControllerChange(ControllerChangeEvent),
    ProgramChange(ProgramChangeEvent),
    Tempo(TempoEvent),
    Text(TextEvent),
    TimeSignature(TimeSignatureEvent),
    KeySignature(KeySignatureEvent),
    EndOfTrack(EndTrackEvent),
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_carries_rounding() {
        let mut cursor = TrackCursor::START;
        let mut out = Vec::new();
        let third = 256. / 3.;

        cursor.write_delta(third, &mut out).unwrap();
        cursor.write_delta(third, &mut out).unwrap();
        cursor.write_delta(third, &mut out).unwrap();

        assert_eq!(out, [85, 86, 85]);
        assert_eq!(cursor.tick_pointer(), 256.);
        assert!(cursor.precision_loss().abs() < 1e-9);
    }

    #[test]
    fn cursor_rejects_negative_deltas() {
        let mut cursor = TrackCursor::START;
        let mut out = Vec::new();
        assert_eq!(
            cursor.write_delta(-1., &mut out),
            Err(EncodeError::Ticks(-1.))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn build_reports_position() {
        let options = WriterOptions::default();
        let note = Event::from(NoteEvent::parse(&["C4"], "2").unwrap());

        let first = note.build(TrackCursor::START, &options).unwrap();
        assert_eq!(first.tick, 0.);
        assert_eq!(first.delta, 256.);
        assert_eq!(first.cursor.tick_pointer(), 256.);

        let second = note.build(first.cursor, &options).unwrap();
        assert_eq!(second.tick, 256.);
        assert_eq!(second.cursor.tick_pointer(), 512.);
        assert_eq!(note.kind(), EventKind::Note);
    }
}
