use crate::EncodeError;

/// Unsigned Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// Length of one quarter note at `bpm` beats per minute,
    /// `round(60_000_000 / bpm)`.
    ///
    /// # Errors
    /// if `bpm` is not positive or the result is not finite.
    pub fn per_quarter_note(bpm: f64) -> Result<Self, EncodeError> {
        let micros = (60_000_000. / bpm).round();
        if bpm <= 0. || !micros.is_finite() {
            return Err(EncodeError::Tempo(bpm));
        }
        Ok(Self(micros as u64))
    }

    /// Returns seconds
    #[inline]
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }
}

#[test]
fn tempo_micros() {
    assert_eq!(UMicros::per_quarter_note(120.).unwrap(), UMicros::new(500_000));
    assert_eq!(UMicros::per_quarter_note(60.).unwrap().as_secs_f64(), 1.);
    assert_eq!(UMicros::per_quarter_note(7.).unwrap().us(), 8_571_429);
    assert_eq!(UMicros::per_quarter_note(0.), Err(EncodeError::Tempo(0.)));
    assert!(UMicros::per_quarter_note(-90.).is_err());
    assert!(UMicros::per_quarter_note(f64::NAN).is_err());
}
