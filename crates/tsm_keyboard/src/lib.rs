//! Keyboard event translation: turns `(keysym, ascii_mirror, modifiers,
//! unicode)` tuples into host-bound byte sequences under the current VTE
//! mode state.

pub mod key;
pub mod modes;
pub mod modifier;
pub mod translate;

pub use key::{Key, NamedKey};
pub use modes::{InputEncoding, KeyboardModes};
pub use modifier::KeyModifiers;
pub use translate::{translate, KeyInput};
