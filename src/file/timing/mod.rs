use crate::EncodeError;

/// The header timing type.
///
/// Only the ticks per quarter note form is written. Its leading bit must be
/// clear, the set bit marks SMPTE timing, so the division is 1-32767.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    inner: [u8; 2],
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// # Errors
    /// if `tpqn` is 0 or uses the leading bit.
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Result<Self, EncodeError> {
        if tpqn == 0 || tpqn & 0x8000 != 0 {
            return Err(EncodeError::Overflow {
                value: tpqn as u64,
                width: 2,
            });
        }
        let msb = (tpqn >> 8) as u8;
        let lsb = (tpqn & 0x00FF) as u8;
        Ok(Self { inner: [msb, lsb] })
    }

    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }

    /// The two division bytes of the header
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.inner
    }
}

#[test]
fn division_bytes() {
    let timing = Timing::new_ticks_per_quarter_note(128).unwrap();
    assert_eq!(timing.to_bytes(), [0x00, 0x80]);
    assert_eq!(timing.ticks_per_quarter_note(), 128);
    assert_eq!(
        Timing::new_ticks_per_quarter_note(480).unwrap().to_bytes(),
        [0x01, 0xE0]
    );
    assert!(Timing::new_ticks_per_quarter_note(0).is_err());
    assert!(Timing::new_ticks_per_quarter_note(0x8000).is_err());
}
