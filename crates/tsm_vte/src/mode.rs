//! Protocol-level mode state: the bits that affect how bytes are
//! interpreted or replied to, as distinct from `tsm_screen`'s
//! rendering-visible [`tsm_screen::ScreenFlags`].

/// How incoming bytes are decoded before reaching the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Utf8,
    /// Strips the high bit off every byte and warns.
    SevenBit,
    /// Bypasses UTF-8 decoding; raw bytes feed the parser directly.
    EightBit,
}

bitflags::bitflags! {
    /// DEC private and ANSI modes not already covered by
    /// [`tsm_screen::ScreenFlags`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VteModes: u32 {
        /// `?1`: cursor keys send `ESC O` instead of `ESC [`.
        const CURSOR_KEY_APPLICATION = 0b0000_0001;
        /// `?3`: 132-column switch. Preserved as a documented no-op.
        const COLUMN_132             = 0b0000_0010;
        /// `?8`: auto-repeat. Stub; carried but not acted on.
        const AUTO_REPEAT            = 0b0000_0100;
        /// `?12`: send/receive. When CLEARED, local echo is enabled.
        const SEND_RECEIVE           = 0b0000_1000;
        /// `?42`: national replacement charset mode. Stub.
        const NATIONAL               = 0b0001_0000;
        /// `?66`/keypad app mode via `ESC =` / `ESC >`.
        const KEYPAD_APPLICATION     = 0b0010_0000;
        /// `tite-inhibit`: suppresses the alternate-buffer modes.
        const TITE_INHIBIT           = 0b0100_0000;
        /// ANSI mode `20`: line feed also performs carriage return.
        const LF_NL                  = 0b1000_0000;
    }
}

impl Default for VteModes {
    fn default() -> Self {
        VteModes::SEND_RECEIVE
    }
}
