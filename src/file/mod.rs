#![doc = r#"
Assembling tracks into a Standard MIDI File

A [`Writer`] owns its tracks and the [`WriterOptions`] they are built with.
The file is the header chunk followed by one track chunk per track, in the
order the tracks were given.
"#]

/// Contains the chunk envelope and the header format word.
pub mod builder;

mod header;
pub use header::*;

mod options;
pub use options::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::{WriteError, WriteResult, file::builder::chunk::Chunk};
use alloc::{string::String, vec::Vec};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// MIME prefix of [`Writer::data_uri`].
pub const DATA_URI_PREFIX: &str = "data:audio/midi;base64,";

#[doc = r#"
Puts tracks together and renders the file.

# Example
```rust
# use midi_writer::prelude::*;
let mut track = Track::new();
track.add_event(NoteEvent::parse(&["C4"], "T50").unwrap());

let writer = Writer::new([track]);
assert_eq!(
    writer.base64().unwrap(),
    "TVRoZAAAAAYAAAABAIBNVHJrAAAADACQPEAygDxAAP8vAA=="
);
```
"#]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Writer {
    tracks: Vec<Track>,
    options: WriterOptions,
}

impl Writer {
    /// A writer for `tracks` with default options.
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        Self {
            tracks: tracks.into_iter().collect(),
            options: WriterOptions::default(),
        }
    }

    /// Replace the options every track is built with.
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options tracks are built with
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Returns the tracks in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The header chunk followed by every track chunk.
    pub fn build_data(&self) -> WriteResult<Vec<Chunk>> {
        let header = HeaderChunk::new(self.tracks.len(), self.options.division)?;
        let mut chunks = Vec::with_capacity(self.tracks.len() + 1);
        chunks.push(header.to_chunk());

        for (index, track) in self.tracks.iter().enumerate() {
            let chunk = track
                .build(&self.options)
                .map_err(|source| WriteError::track(index, source))?;
            chunks.push(chunk);
        }
        Ok(chunks)
    }

    /// The complete file.
    pub fn build_file(&self) -> WriteResult<Vec<u8>> {
        let chunks = self.build_data()?;
        let mut file = Vec::new();
        for chunk in &chunks {
            chunk.write_into(&mut file);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tracks = self.tracks.len(),
            bytes = file.len(),
            "built midi file"
        );

        Ok(file)
    }

    /// The file as standard base64 with padding.
    pub fn base64(&self) -> WriteResult<String> {
        Ok(BASE64.encode(self.build_file()?))
    }

    /// The file as a `data:audio/midi;base64,` URI.
    pub fn data_uri(&self) -> WriteResult<String> {
        let mut uri = String::from(DATA_URI_PREFIX);
        BASE64.encode_string(self.build_file()?, &mut uri);
        Ok(uri)
    }

    /// Write the file to `out`.
    pub fn write_to<W: std::io::Write>(&self, mut out: W) -> WriteResult<()> {
        out.write_all(&self.build_file()?)?;
        out.flush()?;
        Ok(())
    }

    /// Write the file to standard output.
    pub fn stdout(&self) -> WriteResult<()> {
        self.write_to(std::io::stdout().lock())
    }
}

impl From<Track> for Writer {
    fn from(track: Track) -> Self {
        Self::new([track])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodeError, TrackError, event::NoteEvent};
    use pretty_assertions::assert_eq;

    fn note_track(duration: &str) -> Track {
        let mut track = Track::new();
        track.add_event(NoteEvent::parse(&["C4"], duration).unwrap());
        track
    }

    #[test]
    fn header_per_track_count() {
        let chunks = Writer::new([note_track("4"), note_track("8")])
            .build_data()
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].data(), [0, 1, 0, 2, 0, 0x80]);
        assert!(chunks[1..].iter().all(Chunk::is_track));
    }

    #[test]
    fn data_uri_prefix() {
        let writer = Writer::from(note_track("T50"));
        assert_eq!(
            writer.data_uri().unwrap(),
            "data:audio/midi;base64,TVRoZAAAAAYAAAABAIBNVHJrAAAADACQPEAygDxAAP8vAA=="
        );
    }

    #[test]
    fn write_to_matches_build_file() {
        let writer = Writer::from(note_track("2"));
        let mut out = Vec::new();
        writer.write_to(&mut out).unwrap();
        assert_eq!(out, writer.build_file().unwrap());
    }

    #[test]
    fn division_option_scales_ticks() {
        let writer = Writer::from(note_track("4")).with_options(WriterOptions {
            division: 96,
            ..Default::default()
        });
        let file = writer.build_file().unwrap();
        assert_eq!(&file[12..14], [0x00, 0x60]);
        assert_eq!(&file[22..31], [0x00, 0x90, 0x3C, 0x40, 0x60, 0x80, 0x3C, 0x40, 0x00]);
    }

    #[test]
    fn track_errors_name_the_track() {
        let mut broken = Track::new();
        broken.set_tempo(0.);
        let error = Writer::new([note_track("4"), broken]).build_file().unwrap_err();
        match error {
            WriteError::Track { track, source } => {
                assert_eq!(track, 1);
                assert_eq!(source, TrackError::new(0, EncodeError::Tempo(0.)));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
