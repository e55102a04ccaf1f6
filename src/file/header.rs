use crate::{
    EncodeError,
    file::{
        Timing,
        builder::{
            RawFormat,
            chunk::{Chunk, HEADER_TAG},
        },
    },
};

#[doc = r#"
The header chunk: format, track count and timing.

# Example
```rust
# use midi_writer::prelude::*;
let header = HeaderChunk::new(1, 128).unwrap();
assert_eq!(
    header.to_chunk().to_bytes(),
    [0x4D, 0x54, 0x68, 0x64, 0, 0, 0, 6, 0, 0, 0, 1, 0, 0x80]
);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChunk {
    format: RawFormat,
    timing: Timing,
}

impl HeaderChunk {
    /// A header for `num_tracks` tracks at `division` ticks per quarter note.
    pub fn new(num_tracks: usize, division: u16) -> Result<Self, EncodeError> {
        Ok(Self {
            format: RawFormat::for_tracks(num_tracks)?,
            timing: Timing::new_ticks_per_quarter_note(division)?,
        })
    }

    /// Format and track count
    pub const fn format(&self) -> &RawFormat {
        &self.format
    }

    /// Get the timing props
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The six data bytes
    pub const fn data(&self) -> [u8; 6] {
        let [f0, f1, t0, t1] = self.format.to_bytes();
        let [d0, d1] = self.timing.to_bytes();
        [f0, f1, t0, t1, d0, d1]
    }

    /// Wrap the header in its `MThd` chunk.
    pub fn to_chunk(&self) -> Chunk {
        Chunk {
            tag: HEADER_TAG,
            data: self.data().to_vec(),
        }
    }
}
