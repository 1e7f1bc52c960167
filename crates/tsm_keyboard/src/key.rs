//! The keysym side of a key event.

/// A non-printable key identified by name, per the xterm function/named key
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Tab,
    BackTab,
    Enter,
    KpEnter,
    Backspace,
    Escape,
    /// `F(1)` through `F(20)`.
    F(u8),
    /// Keypad digit `0`-`9`. Only distinguished from the top-row digit in
    /// keypad-application mode; otherwise falls through to its unicode
    /// value like any other printable key.
    Kp(u8),
    KpAdd,
    KpSubtract,
    KpMultiply,
    KpDivide,
    KpDecimal,
    KpSeparator,
    KpEqual,
}

/// The effective keysym of a key event: either a named key or a character
/// key (the common case for printable keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Named(NamedKey),
    Char(char),
}
