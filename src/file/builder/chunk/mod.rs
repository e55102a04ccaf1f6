#![doc = r#"
Contains the chunk envelope every part of a MIDI file is wrapped in

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length field and then the chunk data.

## Header chunk

The header chunk (identified by "MThd") is the first chunk in the file. Its data is always
6 bytes long:

- the [`FormatType`](crate::file::builder::FormatType) word and the number of tracks
- the [`Timing`](crate::prelude::Timing), here always ticks per quarter note

## Track chunks

Track chunks (identified by "MTrk") hold the delta prefixed events of one
[`Track`](crate::prelude::Track), always finished by an end of track meta event.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
"#]

use crate::EncodeError;
use alloc::vec::Vec;

/// Type identifier of the header chunk
pub const HEADER_TAG: [u8; 4] = *b"MThd";

/// Type identifier of a track chunk
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// A tagged, length prefixed byte envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub(crate) tag: [u8; 4],
    pub(crate) data: Vec<u8>,
}

impl Chunk {
    /// Wrap `data` under `tag`.
    ///
    /// # Errors
    /// if `data` is longer than the 32 bit length field allows.
    pub fn new(tag: [u8; 4], data: Vec<u8>) -> Result<Self, EncodeError> {
        if u32::try_from(data.len()).is_err() {
            return Err(EncodeError::Overflow {
                value: data.len() as u64,
                width: 4,
            });
        }
        Ok(Self { tag, data })
    }

    /// The four character type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }

    /// The chunk data without its tag and length
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the data as written in the chunk
    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }

    /// Returns true if this is a track chunk
    pub const fn is_track(&self) -> bool {
        matches!(self.tag, TRACK_TAG)
    }

    /// Append tag, length and data to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.length().to_be_bytes());
        out.extend_from_slice(&self.data);
    }

    /// The full chunk bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.data.len());
        self.write_into(&mut out);
        out
    }
}

#[test]
fn envelope() {
    let chunk = Chunk::new(TRACK_TAG, alloc::vec![0x00, 0xFF, 0x2F, 0x00]).unwrap();
    assert!(chunk.is_track());
    assert_eq!(
        chunk.to_bytes(),
        [b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00]
    );
}
