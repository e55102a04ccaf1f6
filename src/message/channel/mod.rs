#![doc = r#"
Channel voice messages written by note, controller and program events

# Status bytes
```text
|--------|------------------|----------------------|
| Status | Message          | Data bytes           |
|--------|------------------|----------------------|
| 0x8n   | Note off         | key, velocity        |
| 0x9n   | Note on          | key, velocity        |
| 0xBn   | Control change   | controller, value    |
| 0xCn   | Program change   | program              |
|--------|------------------|----------------------|
```
`n` is the channel, 0-15 on the wire and 1-16 for humans.
"#]

use crate::ParseError;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen MIDI channels. Defaults to [`Channel::One`].

# Example
```rust
# use midi_writer::prelude::*;
let channel = Channel::new(10).unwrap();
assert_eq!(channel, Channel::Ten);
assert_eq!(channel.to_byte(), 9);

assert!(Channel::new(0).is_err());
assert!(Channel::new(17).is_err());
```
"#]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    #[default]
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Look up a channel by its human number, 1 through 16.
    pub fn new(number: u8) -> Result<Self, ParseError> {
        number
            .checked_sub(1)
            .and_then(|wire| Self::try_from_primitive(wire).ok())
            .ok_or(ParseError::Channel(number))
    }

    /// The channel nibble written into status bytes.
    pub fn to_byte(self) -> u8 {
        self.into()
    }
}

/// The upper nibble of a channel voice status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum VoiceStatus {
    /// `0x80`
    NoteOff = 0x80,
    /// `0x90`
    NoteOn = 0x90,
    /// `0xB0`
    ControlChange = 0xB0,
    /// `0xC0`
    ProgramChange = 0xC0,
}

impl VoiceStatus {
    /// The full status byte for this message on `channel`.
    pub fn on(self, channel: Channel) -> u8 {
        u8::from(self) | channel.to_byte()
    }
}

#[test]
fn status_bytes() {
    assert_eq!(VoiceStatus::NoteOn.on(Channel::One), 0x90);
    assert_eq!(VoiceStatus::NoteOff.on(Channel::Sixteen), 0x8F);
    assert_eq!(VoiceStatus::ControlChange.on(Channel::default()), 0xB0);
    assert_eq!(VoiceStatus::ProgramChange.on(Channel::Three), 0xC2);
}

#[test]
fn channel_numbers() {
    for number in 1..=16u8 {
        assert_eq!(Channel::new(number).unwrap().to_byte(), number - 1);
    }
    assert_eq!(Channel::new(0), Err(ParseError::Channel(0)));
    assert_eq!(Channel::new(17), Err(ParseError::Channel(17)));
}
