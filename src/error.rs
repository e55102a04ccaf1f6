use thiserror::Error;

#[doc = r#"
A set of errors that can occur while constructing events from caller input.

These are raised immediately, never deferred to build time.
"#]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The duration string does not follow the duration grammar
    #[error("Duration {0}")]
    Duration(#[from] DurationError),
    /// The pitch string could not be mapped to a note number
    #[error("Pitch {0}")]
    Pitch(#[from] PitchError),
    /// Channels are numbered 1 through 16
    #[error("Invalid channel {0}, expected 1-16")]
    Channel(u8),
    /// Data bytes have a leading 0 bit
    #[error("Invalid data byte {0}, expected 0-127")]
    DataByte(u8),
    /// A note event needs at least one pitch
    #[error("Note event has no pitch")]
    MissingPitch,
    /// Time signature denominators are written as a power of two
    #[error("Time signature denominator {0} is not a power of two")]
    TimeSignatureDenominator(u8),
    /// Key signature names look like `C`, `F#`, `Bb`, `Am`
    #[error("Unknown key signature {0:?}")]
    KeySignature(alloc::string::String),
    /// Key signatures range from 7 flats to 7 sharps
    #[error("Key signature accidental count {0} outside -7..=7")]
    Accidentals(i8),
}

/// Errors from the duration grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Unparseable token or a base that is not 1 or a power of two
    #[error("{0} is not a valid duration.")]
    Invalid(alloc::string::String),
    /// A `t0` tuplet would divide by zero
    #[error("{0} has a zero tuplet count")]
    ZeroTuplet(alloc::string::String),
}

/// Errors from pitch strings such as `C#4`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// Not of the form `<letter><accidentals><octave>`
    #[error("{0:?} is not a pitch")]
    Syntax(alloc::string::String),
    /// Parsed, but lands outside 0-127
    #[error("{name:?} maps to {value}, outside 0-127")]
    OutOfRange {
        /// The pitch as written
        name: alloc::string::String,
        /// The computed note number
        value: i32,
    },
}

/// Errors raised while encoding a finished event into bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A number's natural encoding is wider than the field
    #[error("{value} does not fit in {width} bytes")]
    Overflow {
        /// The value that was written
        value: u64,
        /// The declared field width
        width: usize,
    },
    /// Tick values must be finite and not negative once rounded
    #[error("Invalid tick value {0}")]
    Ticks(f64),
    /// Variable length quantities hold at most 28 bits
    #[error("{0} exceeds the variable length maximum of 0x0FFFFFFF")]
    VariableLength(u64),
    /// Beats per minute must be positive and finite
    #[error("Invalid tempo {0} bpm")]
    Tempo(f64),
    /// The middle C option moved a pitch out of range
    #[error("Pitch {0} is outside 0-127 after applying middle C")]
    Pitch(i32),
    /// An explicit start tick can only move the track forward
    #[error("Start tick {start_tick} is behind the track position {tick_pointer}")]
    StartTick {
        /// The requested absolute tick
        start_tick: f64,
        /// Where the track already is
        tick_pointer: f64,
    },
}

#[doc = r#"
An error while building a single track, with the index of the event that failed.
"#]
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Building event {event}, {kind}")]
pub struct TrackError {
    event: usize,
    pub(crate) kind: EncodeError,
}

impl TrackError {
    /// Create a track error from an event index and kind
    pub const fn new(event: usize, kind: EncodeError) -> Self {
        Self { event, kind }
    }
    /// Returns the index of the event that could not be encoded.
    pub const fn event(&self) -> usize {
        self.event
    }
    /// Returns the error kind.
    pub fn kind(&self) -> &EncodeError {
        &self.kind
    }
}

/// Errors while assembling or emitting a whole file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// One of the tracks failed to build
    #[error("Track {track}: {source}")]
    Track {
        /// Index of the track in insertion order
        track: usize,
        /// What went wrong inside the track
        source: TrackError,
    },
    /// The file level chunks could not be encoded
    #[error("Header {0}")]
    Header(#[from] EncodeError),
    /// The output stream refused the bytes
    #[error("Output {0}")]
    Io(#[from] std::io::Error),
}

impl WriteError {
    pub(crate) const fn track(track: usize, source: TrackError) -> Self {
        Self::Track { track, source }
    }
}

/// The Write Result type (see [`WriteError`])
pub type WriteResult<T> = Result<T, WriteError>;
