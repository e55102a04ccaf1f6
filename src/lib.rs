#![warn(missing_docs)]
#![doc = r#"
Write Standard MIDI Files from declarative event descriptions.

A [`Track`](prelude::Track) holds notes, tempo changes, text and controller
events. A [`Writer`](prelude::Writer) turns tracks into the file bytes,
base64 or a data URI.

Note lengths are given as note values (`"4"`, `"d8"`, `"8t"`) rather than
ticks. Values that do not land on a whole tick, such as triplets, are rounded
per event while the rounding remainder is carried from event to event, so a
track never drifts away from its exact length.

# Example
```rust
use midi_writer::prelude::*;

let mut track = Track::new();
track.set_tempo(90.).add_track_name("arpeggio");
track.add_event(
    NoteEvent::new(NoteOptions {
        pitch: ["C4", "E4", "G4"].iter().map(|n| n.parse().unwrap()).collect(),
        duration: "8t".parse().unwrap(),
        sequential: true,
        repeat: 4,
        ..Default::default()
    })
    .unwrap(),
);

let file = Writer::new([track]).build_file().unwrap();
assert_eq!(&file[..4], b"MThd");
```

# Features
- `tracing` (default): emits `tracing` events while building
- `serde`: `Serialize`/`Deserialize` for option and value types
"#]

extern crate alloc;

mod byte;
pub use byte::*;

pub mod codec;

mod duration;
pub use duration::*;

mod error;
pub use error::*;

pub mod event;

pub mod file;

pub mod message;

/// Tempo values in microseconds
pub mod micros;

/// Pitches: [`Note`](note::Note), [`Key`](note::Key) and [`Octave`](note::Octave)
pub mod note;

pub mod voice;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        DataByte, Duration, DurationError, EncodeError, NoteValue, ParseError, PitchError,
        TrackError, WriteError, WriteResult,
        event::*,
        file::{HeaderChunk, Timing, Track, Writer, WriterOptions, builder::chunk::Chunk},
        message::{Channel, VoiceStatus},
        micros::UMicros,
        note::{Key, Note, Octave},
        voice::{Tickable, TickableKind, Voice, track_from_voice},
    };
}
