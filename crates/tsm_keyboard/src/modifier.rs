//! Keyboard modifier flags.

bitflags::bitflags! {
    /// Modifier keys held alongside a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT   = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT     = 0b0000_0100;
    }
}

impl Default for KeyModifiers {
    fn default() -> Self {
        Self::empty()
    }
}

impl KeyModifiers {
    /// The xterm "modifyOtherKeys"-style modifier parameter: 1 + a bitmask
    /// of (shift=1, alt=2, ctrl=4). Only emitted on the wire when more
    /// than the bare key is held.
    #[must_use]
    pub fn xterm_param(self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let mut bits = 0u8;
        if self.contains(Self::SHIFT) {
            bits |= 1;
        }
        if self.contains(Self::ALT) {
            bits |= 2;
        }
        if self.contains(Self::CONTROL) {
            bits |= 4;
        }
        Some(1 + bits)
    }
}
