//! Translate a key event plus the live VTE mode state into host-bound bytes.

use vtenc::{write_csi, write_esc};

use crate::key::{Key, NamedKey};
use crate::modifier::KeyModifiers;
use crate::modes::{InputEncoding, KeyboardModes};

/// A key event as the translator consumes it.
///
/// Mirrors the `(keysym, ascii_mirror, modifiers, unicode_codepoint)` tuple:
/// `keysym` is `key`, `ascii_mirror` is the mirrored ASCII symbol for
/// layout-independent `Ctrl` mapping, and `unicode` is the codepoint the
/// key produces with the current layout (used only once everything else
/// fails to match).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ascii_mirror: Option<char>,
    pub modifiers: KeyModifiers,
    pub unicode: Option<char>,
}

/// Translate one key event. Returns `None` when the key is unhandled (rule
/// 6 of the translation order): the caller should not emit anything.
#[must_use]
pub fn translate(input: &KeyInput, modes: &KeyboardModes) -> Option<Vec<u8>> {
    let prepend_esc = input.modifiers.contains(KeyModifiers::ALT);

    let effective = input.ascii_mirror.or(match input.key {
        Key::Char(c) => Some(c),
        Key::Named(_) => None,
    });

    if input.modifiers.contains(KeyModifiers::CONTROL) {
        if let Some(c) = effective {
            if let Some(byte) = ctrl_byte(c) {
                return Some(finish(prepend_esc, vec![byte]));
            }
        }
    }

    if let Key::Named(named) = input.key {
        if let Some(bytes) = named_bytes(named, input.modifiers, modes) {
            return Some(finish(prepend_esc, bytes));
        }
    }

    let unicode = input.unicode.or(match input.key {
        Key::Char(c) => Some(c),
        Key::Named(_) => None,
    });
    if let Some(c) = unicode {
        return Some(finish(prepend_esc, encode_unicode(c, modes.encoding)));
    }

    None
}

fn finish(prepend_esc: bool, mut bytes: Vec<u8>) -> Vec<u8> {
    if prepend_esc {
        let mut out = Vec::with_capacity(bytes.len() + 1);
        out.push(0x1B);
        out.append(&mut bytes);
        out
    } else {
        bytes
    }
}

/// `Ctrl+<key>` mapping, layout-independent (xterm's historical table).
fn ctrl_byte(c: char) -> Option<u8> {
    match c {
        '2' | ' ' => Some(0x00),
        'a'..='z' => Some(c as u8 - b'a' + 1),
        'A'..='Z' => Some(c as u8 - b'A' + 1),
        '3' | '[' | '{' => Some(0x1B),
        '4' | '\\' | '|' => Some(0x1C),
        '5' | ']' | '}' => Some(0x1D),
        '6' | '`' | '~' => Some(0x1E),
        '7' | '/' | '?' => Some(0x1F),
        '8' => Some(0x7F),
        _ => None,
    }
}

fn encode_unicode(c: char, encoding: InputEncoding) -> Vec<u8> {
    match encoding {
        InputEncoding::Utf8 => {
            let mut buf = [0u8; 4];
            c.encode_utf8(&mut buf).as_bytes().to_vec()
        }
        InputEncoding::EightBit => {
            let code = c as u32;
            vec![if code <= 0xFF { code as u8 } else { b'?' }]
        }
        InputEncoding::SevenBit => {
            let code = c as u32;
            vec![if code <= 0x7F { code as u8 } else { b'?' }]
        }
    }
}

fn named_bytes(key: NamedKey, modifiers: KeyModifiers, modes: &KeyboardModes) -> Option<Vec<u8>> {
    let app = modes.cursor_key_application;
    let mut buf = Vec::with_capacity(8);

    let result = match key {
        NamedKey::Up => arrow(&mut buf, app, b'A'),
        NamedKey::Down => arrow(&mut buf, app, b'B'),
        NamedKey::Right => arrow(&mut buf, app, b'C'),
        NamedKey::Left => arrow(&mut buf, app, b'D'),
        NamedKey::Home => arrow(&mut buf, app, b'H'),
        NamedKey::End => arrow(&mut buf, app, b'F'),
        NamedKey::Insert => tilde(&mut buf, 2),
        NamedKey::Delete => tilde(&mut buf, 3),
        NamedKey::PageUp => tilde(&mut buf, 5),
        NamedKey::PageDown => tilde(&mut buf, 6),
        NamedKey::Tab => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                csi_z(&mut buf)
            } else {
                buf.push(0x09);
                Ok(1)
            }
        }
        NamedKey::BackTab => csi_z(&mut buf),
        NamedKey::Enter => {
            buf.push(0x0D);
            if modes.lf_nl {
                buf.push(0x0A);
            }
            Ok(buf.len())
        }
        NamedKey::KpEnter => {
            if modes.keypad_application {
                esc_kp_enter(&mut buf)
            } else {
                buf.push(0x0D);
                if modes.lf_nl {
                    buf.push(0x0A);
                }
                Ok(buf.len())
            }
        }
        NamedKey::Backspace => {
            buf.push(0x7F);
            Ok(1)
        }
        NamedKey::Escape => {
            buf.push(0x1B);
            Ok(1)
        }
        NamedKey::F(n) => return function_key(n, modifiers),
        NamedKey::Kp(_)
        | NamedKey::KpAdd
        | NamedKey::KpSubtract
        | NamedKey::KpMultiply
        | NamedKey::KpDivide
        | NamedKey::KpDecimal
        | NamedKey::KpSeparator
        | NamedKey::KpEqual => return keypad_bytes(key, modes),
    };
    result.ok()?;
    Some(buf)
}

/// Keypad-application-mode encoding (`spec.md` §6): digits `0`-`9` are
/// `ESC O p`..`ESC O y`, the operator keys are `ESC O` followed by one of
/// `l m n j o k X`. Outside keypad-application mode, returns `None` so the
/// caller falls through to the key's plain unicode value instead.
fn keypad_bytes(key: NamedKey, modes: &KeyboardModes) -> Option<Vec<u8>> {
    if !modes.keypad_application {
        return None;
    }
    let letter = match key {
        NamedKey::Kp(n @ 0..=9) => b'p' + n,
        NamedKey::KpSeparator => b'l',
        NamedKey::KpSubtract => b'm',
        NamedKey::KpDecimal => b'n',
        NamedKey::KpMultiply => b'j',
        NamedKey::KpDivide => b'o',
        NamedKey::KpAdd => b'k',
        NamedKey::KpEqual => b'X',
        _ => return None,
    };
    let mut buf = Vec::with_capacity(3);
    let s = [letter];
    let letter_str = std::str::from_utf8(&s).unwrap();
    esc_one(&mut buf, letter_str).ok()?;
    Some(buf)
}

fn esc_one(buf: &mut Vec<u8>, letter: &str) -> Result<usize, vtenc::EncodeError> {
    write_esc!(buf; "O", letter)
}

fn arrow(buf: &mut Vec<u8>, app_mode: bool, letter: u8) -> Result<usize, vtenc::EncodeError> {
    let s = [letter];
    let letter_str = std::str::from_utf8(&s).unwrap();
    if app_mode {
        write_esc!(buf; "O", letter_str)
    } else {
        write_csi!(buf; letter_str)
    }
}

fn tilde(buf: &mut Vec<u8>, n: u32) -> Result<usize, vtenc::EncodeError> {
    write_csi!(buf; n, "~")
}

fn csi_z(buf: &mut Vec<u8>) -> Result<usize, vtenc::EncodeError> {
    write_csi!(buf; "Z")
}

fn esc_kp_enter(buf: &mut Vec<u8>) -> Result<usize, vtenc::EncodeError> {
    write_esc!(buf; "O", "M")
}

/// F1-F20, per the xterm function-key table: unshifted F1-F4 are
/// `ESC O P/Q/R/S`; every other case (any modifier, or F5 and up) is a CSI
/// numeric-parameter form, with the xterm modifier parameter appended only
/// when a modifier is actually held.
fn function_key(n: u8, modifiers: KeyModifiers) -> Option<Vec<u8>> {
    if (1..=4).contains(&n) {
        return function_key_low(n, modifiers).ok();
    }
    let param = function_key_param(n)?;
    function_key_high(param, modifiers).ok()
}

fn function_key_low(n: u8, modifiers: KeyModifiers) -> Result<Vec<u8>, vtenc::EncodeError> {
    let mut buf = Vec::with_capacity(10);
    if modifiers == KeyModifiers::SHIFT {
        // Shift+F1..F4 is the literal `CSI 23~`..`CSI 26~` form, not the
        // xterm modifier-parameter form used for every other modifier
        // combination on these four keys.
        let param = u32::from(n) + 22;
        write_csi!(&mut buf; param, "~")?;
        return Ok(buf);
    }
    let letter = [b'P' + (n - 1)];
    let letter_str = std::str::from_utf8(&letter).unwrap();
    match modifiers.xterm_param() {
        None => write_esc!(&mut buf; "O", letter_str)?,
        Some(m) => write_csi!(&mut buf; 1u8, ";", m, letter_str)?,
    };
    Ok(buf)
}

fn function_key_param(n: u8) -> Option<u32> {
    Some(match n {
        5 => 15,
        6 => 17,
        7 => 18,
        8 => 19,
        9 => 20,
        10 => 21,
        11 => 23,
        12 => 24,
        13 => 25,
        14 => 26,
        15 => 28,
        16 => 29,
        17 => 31,
        18 => 32,
        19 => 33,
        20 => 34,
        _ => return None,
    })
}

fn function_key_high(param: u32, modifiers: KeyModifiers) -> Result<Vec<u8>, vtenc::EncodeError> {
    let mut buf = Vec::with_capacity(10);
    match modifiers.xterm_param() {
        Some(m) => write_csi!(&mut buf; param, ";", m, "~")?,
        None => write_csi!(&mut buf; param, "~")?,
    };
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes() -> KeyboardModes {
        KeyboardModes::default()
    }

    #[test]
    fn ctrl_c_emits_one_byte() {
        let input = KeyInput {
            key: Key::Char('c'),
            ascii_mirror: Some('c'),
            modifiers: KeyModifiers::CONTROL,
            unicode: Some('c'),
        };
        assert_eq!(translate(&input, &modes()), Some(vec![0x03]));
    }

    #[test]
    fn up_arrow_normal_mode() {
        let input = KeyInput {
            key: Key::Named(NamedKey::Up),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1B[A".to_vec()));
    }

    #[test]
    fn up_arrow_application_mode() {
        let input = KeyInput {
            key: Key::Named(NamedKey::Up),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: None,
        };
        let mut m = modes();
        m.cursor_key_application = true;
        assert_eq!(translate(&input, &m), Some(b"\x1BOA".to_vec()));
    }

    #[test]
    fn alt_prefixes_escape() {
        let input = KeyInput {
            key: Key::Char('x'),
            ascii_mirror: Some('x'),
            modifiers: KeyModifiers::ALT,
            unicode: Some('x'),
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1Bx".to_vec()));
    }

    #[test]
    fn plain_unicode_falls_through_to_utf8() {
        let input = KeyInput {
            key: Key::Char('é'),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: Some('é'),
        };
        assert_eq!(translate(&input, &modes()), Some("é".as_bytes().to_vec()));
    }

    #[test]
    fn enter_under_lf_nl_sends_crlf() {
        let input = KeyInput {
            key: Key::Named(NamedKey::Enter),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: None,
        };
        let mut m = modes();
        m.lf_nl = true;
        assert_eq!(translate(&input, &m), Some(vec![0x0D, 0x0A]));
    }

    #[test]
    fn unhandled_key_returns_none() {
        let input = KeyInput {
            key: Key::Named(NamedKey::F(99)),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), None);
    }

    #[test]
    fn f1_unshifted_uses_ss3_form() {
        let input = KeyInput {
            key: Key::Named(NamedKey::F(1)),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1BOP".to_vec()));
    }

    #[test]
    fn shift_f1_uses_tilde_form() {
        let input = KeyInput {
            key: Key::Named(NamedKey::F(1)),
            ascii_mirror: None,
            modifiers: KeyModifiers::SHIFT,
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1B[23~".to_vec()));
    }

    #[test]
    fn shift_f4_uses_tilde_form() {
        let input = KeyInput {
            key: Key::Named(NamedKey::F(4)),
            ascii_mirror: None,
            modifiers: KeyModifiers::SHIFT,
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1B[26~".to_vec()));
    }

    #[test]
    fn ctrl_f1_still_uses_xterm_modifier_form() {
        let input = KeyInput {
            key: Key::Named(NamedKey::F(1)),
            ascii_mirror: None,
            modifiers: KeyModifiers::CONTROL,
            unicode: None,
        };
        assert_eq!(translate(&input, &modes()), Some(b"\x1B[1;5P".to_vec()));
    }

    #[test]
    fn keypad_digit_falls_through_to_unicode_outside_application_mode() {
        let input = KeyInput {
            key: Key::Named(NamedKey::Kp(5)),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: Some('5'),
        };
        assert_eq!(translate(&input, &modes()), Some(b"5".to_vec()));
    }

    #[test]
    fn keypad_digit_uses_ss3_form_in_application_mode() {
        let input = KeyInput {
            key: Key::Named(NamedKey::Kp(5)),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: Some('5'),
        };
        let mut m = modes();
        m.keypad_application = true;
        assert_eq!(translate(&input, &m), Some(b"\x1BOu".to_vec()));
    }

    #[test]
    fn keypad_plus_in_application_mode() {
        let input = KeyInput {
            key: Key::Named(NamedKey::KpAdd),
            ascii_mirror: None,
            modifiers: KeyModifiers::empty(),
            unicode: Some('+'),
        };
        let mut m = modes();
        m.keypad_application = true;
        assert_eq!(translate(&input, &m), Some(b"\x1BOk".to_vec()));
    }
}
