use crate::ParseError;

#[doc = r#"
A byte with a leading 0 bit, the payload of every channel message.

# Example
```rust
# use midi_writer::prelude::*;
let byte = DataByte::new(127).unwrap();
assert_eq!(byte.value(), 127);

assert!(DataByte::new(128).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::DataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Creates a data byte without checking the leading bit
    pub(crate) const fn new_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the underlying byte
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}
