//! UTF-8 decoding and grapheme symbol interning for the `tsm` terminal core.

pub mod symbol;
pub mod utf8;

pub use symbol::{Symbol, SymbolTable};
pub use utf8::{Utf8Decoder, Utf8State, REPLACEMENT_CHARACTER};
