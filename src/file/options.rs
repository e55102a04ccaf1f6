use crate::note::Note;

#[doc = r#"
Settings applied to every track of a [`Writer`](crate::prelude::Writer).

| Field      | Default | Meaning                                      |
|------------|---------|----------------------------------------------|
| `middle_c` | `C4`    | which pitch name sounds as note number 60    |
| `division` | 128     | ticks per quarter note, written in the header |

# Example
```rust
# use midi_writer::prelude::*;
let options = WriterOptions {
    middle_c: "C3".parse().unwrap(),
    ..Default::default()
};
assert_eq!(options.division, 128);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterOptions {
    /// Pitch names are shifted so this note is written as 60
    pub middle_c: Note,
    /// Ticks per quarter note
    pub division: u16,
}

impl WriterOptions {
    /// Ticks per quarter note used when none is given
    pub const DEFAULT_DIVISION: u16 = 128;
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            middle_c: Note::MIDDLE_C,
            division: Self::DEFAULT_DIVISION,
        }
    }
}
