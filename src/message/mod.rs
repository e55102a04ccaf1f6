#![doc = r#"
Contains the channel message building blocks
"#]

mod channel;
pub use channel::*;
