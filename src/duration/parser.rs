use super::{Duration, NoteValue};
use crate::DurationError;
use alloc::string::ToString;

/// Parse a single duration token.
///
/// ```text
/// token    := "0" | ticks | value
/// ticks    := ("t" | "T") digit+
/// value    := "d"* digit+ ("t" digit*)?
/// ```
pub(super) fn parse(token: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(token.to_string());

    if token == "0" {
        return Ok(Duration::Ticks(0));
    }

    let mut cursor = Cursor::new(token);

    if cursor.eat_if(|c| c == b't' || c == b'T') {
        let ticks = cursor.number().ok_or_else(invalid)?;
        if !cursor.is_done() {
            return Err(invalid());
        }
        return Ok(Duration::Ticks(ticks));
    }

    let dots = cursor.count(b'd');
    let base = cursor.number().ok_or_else(invalid)?;
    if !base.is_power_of_two() {
        return Err(invalid());
    }

    let tuplet = if cursor.eat_if(|c| c == b't') {
        let count = if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            cursor.number().ok_or_else(invalid)?
        } else {
            3
        };
        if count == 0 {
            return Err(DurationError::ZeroTuplet(token.to_string()));
        }
        Some(count)
    } else {
        None
    };

    if !cursor.is_done() {
        return Err(invalid());
    }

    let dots = u8::try_from(dots).map_err(|_| invalid())?;
    Ok(Duration::Value(NoteValue { dots, base, tuplet }))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(token: &'a str) -> Self {
        Self {
            bytes: token.as_bytes(),
            pos: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat_if(&mut self, pred: impl Fn(u8) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn count(&mut self, byte: u8) -> usize {
        let start = self.pos;
        while self.eat_if(|c| c == byte) {}
        self.pos - start
    }

    /// Reads a run of ascii digits. `None` if there are none or they overflow.
    fn number(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.eat_if(|c| c.is_ascii_digit()) {}
        let digits = &self.bytes[start..self.pos];
        if digits.is_empty() {
            return None;
        }
        digits.iter().try_fold(0u32, |acc, d| {
            acc.checked_mul(10)?.checked_add((d - b'0') as u32)
        })
    }
}
