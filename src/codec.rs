#![doc = r#"
Byte level primitives shared by every event.

# Variable length quantities

Delta times are written as variable length quantities: 7 data bits per byte, most
significant group first, with the high bit set on every byte except the last.

```text
0x00000000  00
0x0000007F  7F
0x00000080  81 00
0x00003FFF  FF 7F
0x0FFFFFFF  FF FF FF 7F
```

Four bytes cap the value at `0x0FFFFFFF`.
"#]

use crate::EncodeError;
use alloc::vec::Vec;

/// The largest value a variable length quantity can carry.
pub const MAX_VARIABLE_LENGTH: u32 = 0x0FFF_FFFF;

/// Tolerance under which a tick value snaps to the nearest integer.
const CLOSE_ENOUGH: f64 = 0.000_001;

/// Round a tick value and encode it as a variable length quantity.
///
/// Fractional input is accepted and rounded to the nearest integer first.
/// Negative (after rounding) and non-finite input is rejected.
pub fn number_to_variable_length(ticks: f64) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(4);
    write_variable_length(checked_ticks(ticks)?, &mut out);
    Ok(out)
}

/// Converts a tick value into an integer that fits a variable length quantity.
pub(crate) fn checked_ticks(ticks: f64) -> Result<u32, EncodeError> {
    let rounded = ticks.round();
    if !rounded.is_finite() || rounded < 0. {
        return Err(EncodeError::Ticks(ticks));
    }
    if rounded > MAX_VARIABLE_LENGTH as f64 {
        return Err(EncodeError::VariableLength(rounded as u64));
    }
    Ok(rounded as u32)
}

/// Append `value` to `out` as a variable length quantity.
///
/// The caller guarantees `value <= MAX_VARIABLE_LENGTH`.
pub(crate) fn write_variable_length(value: u32, out: &mut Vec<u8>) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        if i > 0 {
            out.push(groups[i] | 0x80);
        } else {
            out.push(groups[i]);
        }
    }
}

/// Decode a variable length quantity from the front of `bytes`.
///
/// Returns the value and how many bytes were consumed, or `None` if the
/// quantity is truncated or longer than four bytes.
pub fn number_from_variable_length(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value = 0u32;
    for (i, byte) in bytes.iter().take(4).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// Fixed width big-endian encoding, left padded with zeroes to `width` bytes.
pub fn number_to_bytes(number: u64, width: usize) -> Result<Vec<u8>, EncodeError> {
    let natural = ((64 - number.leading_zeros() as usize).div_ceil(8)).max(1);
    if natural > width {
        return Err(EncodeError::Overflow {
            value: number,
            width,
        });
    }
    let mut out = alloc::vec![0u8; width - natural];
    out.extend_from_slice(&number.to_be_bytes()[8 - natural..]);
    Ok(out)
}

/// Reads `bytes` as a big-endian integer. Empty input is 0.
///
/// Only the last eight bytes contribute.
pub fn number_from_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64)
}

/// Maps a 1-100 velocity onto the 0-127 data byte range.
///
/// Input above 100 is clamped to 100 and input below 0 to 0.
pub fn convert_velocity(velocity: f64) -> u8 {
    let velocity = velocity.clamp(0., 100.);
    (velocity / 100. * 127.).round() as u8
}

/// One byte per character for ASCII text.
///
/// Non-ASCII text is written as its UTF-8 bytes.
pub fn string_to_bytes(text: &str) -> Vec<u8> {
    text.bytes().collect()
}

/// Snap `tick` to the nearest integer if it is within float noise of it.
pub fn rounded_if_close(tick: f64) -> f64 {
    let rounded = tick.round();
    if (rounded - tick).abs() < CLOSE_ENOUGH {
        rounded
    } else {
        tick
    }
}

/// How far rounding moves `tick`: `round(tick) - tick`.
pub fn precision_loss(tick: f64) -> f64 {
    tick.round() - tick
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variable_length_known_values() {
        let cases: [(f64, &[u8]); 9] = [
            (0., &[0x00]),
            (0x40 as f64, &[0x40]),
            (0x7F as f64, &[0x7F]),
            (0x80 as f64, &[0x81, 0x00]),
            (384., &[0x83, 0x00]),
            (0x2000 as f64, &[0xC0, 0x00]),
            (0x3FFF as f64, &[0xFF, 0x7F]),
            (0x10_0000 as f64, &[0xC0, 0x80, 0x00]),
            (0x0FFF_FFFF as f64, &[0xFF, 0xFF, 0xFF, 0x7F]),
        ];
        for (value, bytes) in cases {
            assert_eq!(number_to_variable_length(value).unwrap(), bytes);
        }
    }

    #[test]
    fn variable_length_rounds_fractions() {
        assert_eq!(number_to_variable_length(85.333).unwrap(), [85]);
        assert_eq!(number_to_variable_length(85.5).unwrap(), [86]);
        assert_eq!(number_to_variable_length(-0.4).unwrap(), [0]);
    }

    #[test]
    fn variable_length_rejects_out_of_range() {
        assert_eq!(
            number_to_variable_length(-3.),
            Err(EncodeError::Ticks(-3.))
        );
        assert!(matches!(
            number_to_variable_length(f64::INFINITY),
            Err(EncodeError::Ticks(_))
        ));
        assert_eq!(
            number_to_variable_length(0x1000_0000 as f64),
            Err(EncodeError::VariableLength(0x1000_0000))
        );
    }

    #[test]
    fn variable_length_round_trip() {
        let mut value = 0u32;
        while value <= MAX_VARIABLE_LENGTH {
            let bytes = number_to_variable_length(value as f64).unwrap();
            assert_eq!(number_from_variable_length(&bytes), Some((value, bytes.len())));
            value = value * 3 + 1;
        }
        for value in [127, 128, 16_383, 16_384, 2_097_151, 2_097_152] {
            let bytes = number_to_variable_length(value as f64).unwrap();
            assert_eq!(number_from_variable_length(&bytes), Some((value, bytes.len())));
        }
    }

    #[test]
    fn variable_length_decode_truncated() {
        assert_eq!(number_from_variable_length(&[0x81]), None);
        assert_eq!(number_from_variable_length(&[]), None);
        assert_eq!(number_from_variable_length(&[0x81, 0x00, 0x55]), Some((128, 2)));
    }

    #[test]
    fn fixed_width() {
        assert_eq!(number_to_bytes(5, 2).unwrap(), [0, 5]);
        assert_eq!(number_to_bytes(0, 1).unwrap(), [0]);
        assert_eq!(number_to_bytes(500_000, 3).unwrap(), [0x07, 0xA1, 0x20]);
        assert_eq!(number_to_bytes(13, 4).unwrap(), [0, 0, 0, 13]);
        assert_eq!(
            number_to_bytes(0x1_0000, 2),
            Err(EncodeError::Overflow {
                value: 0x1_0000,
                width: 2
            })
        );
    }

    #[test]
    fn from_bytes() {
        assert_eq!(number_from_bytes(&[0x21, 0x0F]), 8463);
        assert_eq!(number_from_bytes(&[0x00, 0x80]), 128);
        assert_eq!(number_from_bytes(&[]), 0);
        assert_eq!(number_from_bytes(&[0x07, 0xA1, 0x20]), 500_000);
    }

    #[test]
    fn velocity() {
        assert_eq!(convert_velocity(50.), 64);
        assert_eq!(convert_velocity(100.), 127);
        assert_eq!(convert_velocity(250.), 127);
        assert_eq!(convert_velocity(0.), 0);
        assert_eq!(convert_velocity(-5.), 0);
        assert_eq!(convert_velocity(1.), 1);
    }

    #[test]
    fn text() {
        assert_eq!(string_to_bytes("test"), [116, 101, 115, 116]);
        assert_eq!(string_to_bytes(""), Vec::<u8>::new());
    }

    #[test]
    fn close_rounding() {
        assert_eq!(rounded_if_close(127.999_999_9), 128.);
        assert_eq!(rounded_if_close(85.333), 85.333);
        assert!((precision_loss(85.4) - -0.4).abs() < 1e-9);
    }
}
