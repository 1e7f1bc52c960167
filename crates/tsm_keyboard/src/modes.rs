//! The subset of VTE mode state that changes key translation.

/// How the fallback Unicode code point (when nothing else matches) is
/// encoded onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    Utf8,
    EightBit,
    SevenBit,
}

/// VTE mode bits the keyboard translator consults. Constructed fresh from
/// `tsm_vte`'s live mode state on every translation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardModes {
    pub cursor_key_application: bool,
    pub keypad_application: bool,
    /// `LF/NL` mode: Enter sends `CR LF` instead of bare `CR`.
    pub lf_nl: bool,
    pub encoding: InputEncoding,
}

impl Default for KeyboardModes {
    fn default() -> Self {
        Self {
            cursor_key_application: false,
            keypad_application: false,
            lf_nl: false,
            encoding: InputEncoding::Utf8,
        }
    }
}
