mod format;
pub use format::*;

pub mod chunk;
