use super::TrackCursor;
use crate::{
    DataByte, EncodeError, ParseError,
    message::{Channel, VoiceStatus},
};
use alloc::vec::Vec;

/// Fields of a [`ControllerChangeEvent`]. Channel defaults to 1, delta to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerChangeOptions {
    /// Controller number, 0-127
    pub controller_number: u8,
    /// Controller value, 0-127
    pub controller_value: u8,
    /// 1-16
    pub channel: u8,
    /// Ticks since the previous event
    pub delta: u32,
}

impl Default for ControllerChangeOptions {
    fn default() -> Self {
        Self {
            controller_number: 0,
            controller_value: 0,
            channel: 1,
            delta: 0,
        }
    }
}

#[doc = r#"
Sets a controller such as modulation (1) or sustain (64) to a value.

# Example
```rust
# use midi_writer::prelude::*;
let event = ControllerChangeEvent::new(ControllerChangeOptions {
    controller_number: 1,
    controller_value: 127,
    ..Default::default()
})
.unwrap();

let bytes = Event::from(event).data(&WriterOptions::default()).unwrap();
assert_eq!(bytes, [0x00, 0xB0, 0x01, 0x7F]);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerChangeEvent {
    controller_number: DataByte,
    controller_value: DataByte,
    channel: Channel,
    delta: u32,
}

impl ControllerChangeEvent {
    /// Validate the options into an event.
    pub fn new(options: ControllerChangeOptions) -> Result<Self, ParseError> {
        Ok(Self {
            controller_number: DataByte::new(options.controller_number)?,
            controller_value: DataByte::new(options.controller_value)?,
            channel: Channel::new(options.channel)?,
            delta: options.delta,
        })
    }

    /// The channel of the controller
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        out.extend_from_slice(&[
            VoiceStatus::ControlChange.on(self.channel),
            self.controller_number.value(),
            self.controller_value.value(),
        ]);
        Ok(tick)
    }
}

/// Fields of a [`ProgramChangeEvent`]. Channel defaults to 1, delta to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgramChangeOptions {
    /// General MIDI program number, 0-127
    pub instrument: u8,
    /// 1-16
    pub channel: u8,
    /// Ticks since the previous event
    pub delta: u32,
}

impl Default for ProgramChangeOptions {
    fn default() -> Self {
        Self {
            instrument: 0,
            channel: 1,
            delta: 0,
        }
    }
}

/// Selects the instrument a channel plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramChangeEvent {
    instrument: DataByte,
    channel: Channel,
    delta: u32,
}

impl ProgramChangeEvent {
    /// Validate the options into an event.
    pub fn new(options: ProgramChangeOptions) -> Result<Self, ParseError> {
        Ok(Self {
            instrument: DataByte::new(options.instrument)?,
            channel: Channel::new(options.channel)?,
            delta: options.delta,
        })
    }

    /// The channel whose instrument changes
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub(super) fn write(
        &self,
        cursor: &mut TrackCursor,
        out: &mut Vec<u8>,
    ) -> Result<f64, EncodeError> {
        let tick = cursor.write_delta(self.delta as f64, out)?;
        out.extend_from_slice(&[
            VoiceStatus::ProgramChange.on(self.channel),
            self.instrument.value(),
        ]);
        Ok(tick)
    }
}
