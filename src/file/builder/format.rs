use crate::EncodeError;

#[doc = r#"
The format word of the header chunk.

```text
0  a single track holding every channel
1  several tracks played simultaneously
2  independent single track patterns (never written)
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
}

impl FormatType {
    /// Format 0 for one track, format 1 for anything else.
    pub const fn for_tracks(num_tracks: usize) -> Self {
        if num_tracks == 1 {
            Self::SingleMultiChannel
        } else {
            Self::Simultaneous
        }
    }

    /// The 16 bit value written in the header.
    pub const fn word(&self) -> u16 {
        match self {
            Self::SingleMultiChannel => 0,
            Self::Simultaneous => 1,
        }
    }
}

/// A format together with the number of tracks it announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFormat {
    format_type: FormatType,
    num_tracks: u16,
}

impl RawFormat {
    /// Pick the format for `num_tracks` tracks.
    ///
    /// # Errors
    /// if the count does not fit the 16 bit header field.
    pub fn for_tracks(num_tracks: usize) -> Result<Self, EncodeError> {
        let count = u16::try_from(num_tracks).map_err(|_| EncodeError::Overflow {
            value: num_tracks as u64,
            width: 2,
        })?;
        Ok(Self {
            format_type: FormatType::for_tracks(num_tracks),
            num_tracks: count,
        })
    }

    /// Returns the number of tracks identified by the format.
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// Returns the format type of the format.
    pub const fn format_type(&self) -> FormatType {
        self.format_type
    }

    /// The four header bytes: format word then track count.
    pub const fn to_bytes(&self) -> [u8; 4] {
        let format = self.format_type.word().to_be_bytes();
        let tracks = self.num_tracks.to_be_bytes();
        [format[0], format[1], tracks[0], tracks[1]]
    }
}

#[test]
fn format_words() {
    assert_eq!(RawFormat::for_tracks(1).unwrap().to_bytes(), [0, 0, 0, 1]);
    assert_eq!(RawFormat::for_tracks(3).unwrap().to_bytes(), [0, 1, 0, 3]);
    assert_eq!(
        RawFormat::for_tracks(0).unwrap().format_type(),
        FormatType::Simultaneous
    );
    assert_eq!(
        RawFormat::for_tracks(70_000),
        Err(EncodeError::Overflow {
            value: 70_000,
            width: 2
        })
    );
}
