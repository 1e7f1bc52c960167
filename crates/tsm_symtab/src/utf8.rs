//! Byte-wise streaming UTF-8 decoder with explicit accept/reject states.
//!
//! A standalone state machine rather than logic inlined into the VTE, so it
//! can be driven one byte at a time without the VTE needing to know about
//! continuation-byte counting.

/// Replacement character substituted for any rejected sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Outcome of feeding one byte into the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8State {
    /// Waiting for more continuation bytes; no code point is ready yet.
    Incomplete,
    /// A complete, valid code point is ready via [`Utf8Decoder::take`].
    Accept,
    /// The byte sequence fed so far is invalid; a replacement character is
    /// ready via [`Utf8Decoder::take`].
    Reject,
}

#[derive(Debug, Clone, Copy)]
struct Sequence {
    /// Remaining continuation bytes expected.
    remaining: u8,
    /// Accumulated code point bits.
    code: u32,
    /// Valid byte range for the *next* continuation byte (tightened for the
    /// first continuation after `E0`/`ED`/`F0`/`F4` leads to reject
    /// overlong encodings and UTF-16 surrogates without a second pass).
    next_lo: u8,
    next_hi: u8,
    /// `C0`/`C1` leads always decode a code point below the 2-byte
    /// sequence's minimum (`U+0080`); the continuation byte still needs to
    /// be consumed as part of this sequence so the overlong pair rejects
    /// as a single unit instead of as two independently-invalid bytes.
    overlong: bool,
}

/// Holds at most two pending decoded characters: a byte can both close out
/// a rejected sequence (one `U+FFFD`) and, reprocessed as a fresh lead,
/// immediately complete a second one (e.g. an ASCII byte).
#[derive(Debug, Clone, Copy, Default)]
struct ReadyQueue {
    first: Option<char>,
    second: Option<char>,
}

impl ReadyQueue {
    fn push(&mut self, c: char) {
        if self.first.is_none() {
            self.first = Some(c);
        } else {
            debug_assert!(self.second.is_none(), "ready queue overflow");
            self.second = Some(c);
        }
    }

    fn pop(&mut self) -> Option<char> {
        let c = self.first.take()?;
        self.first = self.second.take();
        Some(c)
    }
}

/// Incremental UTF-8 decoder.
///
/// `feed` never buffers more than the bytes of the code point currently in
/// flight: at most 3 continuation bytes, no unbounded buffering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Decoder {
    seq: Option<Sequence>,
    ready: ReadyQueue,
}

impl Utf8Decoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seq: None,
            ready: ReadyQueue {
                first: None,
                second: None,
            },
        }
    }

    /// Feed one byte. Returns the resulting state; call [`take`](Self::take)
    /// when the state is `Accept` or `Reject` to retrieve the code point.
    /// A single byte can ready up to two code points (a rejected sequence
    /// followed by that same byte reprocessed as a fresh lead) — drain
    /// `take` in a loop rather than calling it once.
    pub fn feed(&mut self, byte: u8) -> Utf8State {
        match self.seq.take() {
            None => self.feed_lead(byte),
            Some(seq) => self.feed_continuation(seq, byte),
        }
    }

    /// Take the next decoded (or replacement) character. Call in a loop:
    /// one `feed` may ready more than one character.
    pub fn take(&mut self) -> Option<char> {
        self.ready.pop()
    }

    fn accept(&mut self, code: u32) -> Utf8State {
        self.ready
            .push(char::from_u32(code).unwrap_or(REPLACEMENT_CHARACTER));
        Utf8State::Accept
    }

    fn reject(&mut self) -> Utf8State {
        self.seq = None;
        self.ready.push(REPLACEMENT_CHARACTER);
        Utf8State::Reject
    }

    fn feed_lead(&mut self, byte: u8) -> Utf8State {
        match byte {
            0x00..=0x7F => self.accept(u32::from(byte)),
            0xC0..=0xC1 => {
                // Both leads only ever encode a code point below U+0080,
                // below the 2-byte form's minimum — always overlong. Still
                // consume the one expected continuation byte as a unit
                // rather than rejecting this lead alone, so a torture-test
                // pair like `C0 AF` surfaces exactly one replacement
                // character, not one per byte.
                self.seq = Some(Sequence {
                    remaining: 1,
                    code: u32::from(byte & 0x1F),
                    next_lo: 0x80,
                    next_hi: 0xBF,
                    overlong: true,
                });
                Utf8State::Incomplete
            }
            0xC2..=0xDF => {
                self.seq = Some(Sequence {
                    remaining: 1,
                    code: u32::from(byte & 0x1F),
                    next_lo: 0x80,
                    next_hi: 0xBF,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xE0 => {
                self.seq = Some(Sequence {
                    remaining: 2,
                    code: u32::from(byte & 0x0F),
                    next_lo: 0xA0,
                    next_hi: 0xBF,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xE1..=0xEC | 0xEE..=0xEF => {
                self.seq = Some(Sequence {
                    remaining: 2,
                    code: u32::from(byte & 0x0F),
                    next_lo: 0x80,
                    next_hi: 0xBF,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xED => {
                // Restrict to avoid the D800..DFFF surrogate range.
                self.seq = Some(Sequence {
                    remaining: 2,
                    code: u32::from(byte & 0x0F),
                    next_lo: 0x80,
                    next_hi: 0x9F,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xF0 => {
                self.seq = Some(Sequence {
                    remaining: 3,
                    code: u32::from(byte & 0x07),
                    next_lo: 0x90,
                    next_hi: 0xBF,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xF1..=0xF3 => {
                self.seq = Some(Sequence {
                    remaining: 3,
                    code: u32::from(byte & 0x07),
                    next_lo: 0x80,
                    next_hi: 0xBF,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            0xF4 => {
                // Restrict so the result never exceeds U+10FFFF.
                self.seq = Some(Sequence {
                    remaining: 3,
                    code: u32::from(byte & 0x07),
                    next_lo: 0x80,
                    next_hi: 0x8F,
                    overlong: false,
                });
                Utf8State::Incomplete
            }
            // Stray continuation byte, or F5..FF which can only ever
            // encode code points > U+10FFFF.
            _ => self.reject(),
        }
    }

    fn feed_continuation(&mut self, seq: Sequence, byte: u8) -> Utf8State {
        if byte < seq.next_lo || byte > seq.next_hi {
            // `byte` does not belong to the sequence in progress — it
            // never got consumed by it. Reject the aborted sequence, then
            // reprocess `byte` as a fresh lead rather than dropping it, so
            // e.g. `E2 41` yields one `U+FFFD` followed by `A` instead of
            // silently losing the `A`.
            self.reject();
            self.feed_lead(byte);
            return Utf8State::Reject;
        }
        let code = (seq.code << 6) | u32::from(byte & 0x3F);
        if seq.remaining == 1 {
            if seq.overlong {
                // The continuation byte has now been consumed as part of
                // this sequence; reject it as one unit rather than falling
                // through to treat `byte` as a fresh lead.
                return self.reject();
            }
            return self.accept(code);
        }
        self.seq = Some(Sequence {
            remaining: seq.remaining - 1,
            code,
            next_lo: 0x80,
            next_hi: 0xBF,
            overlong: seq.overlong,
        });
        Utf8State::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<char> {
        let mut dec = Utf8Decoder::new();
        let mut out = Vec::new();
        for &b in bytes {
            match dec.feed(b) {
                Utf8State::Accept | Utf8State::Reject => {
                    while let Some(c) = dec.take() {
                        out.push(c);
                    }
                }
                Utf8State::Incomplete => {}
            }
        }
        out
    }

    #[test]
    fn ascii_passthrough() {
        assert_eq!(decode_all(b"Hi!"), vec!['H', 'i', '!']);
    }

    #[test]
    fn two_byte_sequence() {
        // U+00E9 'é' = 0xC3 0xA9
        assert_eq!(decode_all(&[0xC3, 0xA9]), vec!['é']);
    }

    #[test]
    fn three_byte_sequence() {
        // U+2603 SNOWMAN = 0xE2 0x98 0x83
        assert_eq!(decode_all(&[0xE2, 0x98, 0x83]), vec!['☃']);
    }

    #[test]
    fn four_byte_sequence() {
        // U+1F600 GRINNING FACE = 0xF0 0x9F 0x98 0x80
        assert_eq!(
            decode_all(&[0xF0, 0x9F, 0x98, 0x80]),
            vec!['\u{1F600}']
        );
    }

    #[test]
    fn overlong_slash_is_rejected() {
        // 0xC0 0xAF is an overlong encoding of '/'; must never decode to '/'.
        let out = decode_all(&[0xC0, 0xAF]);
        assert_eq!(out, vec![REPLACEMENT_CHARACTER]);
    }

    #[test]
    fn surrogate_is_rejected() {
        // U+D800 encoded as ED A0 80 is a lone surrogate, must reject.
        let out = decode_all(&[0xED, 0xA0, 0x80]);
        assert!(out.iter().all(|&c| c == REPLACEMENT_CHARACTER));
    }

    #[test]
    fn truncated_sequence_then_recovers() {
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.feed(0xE2), Utf8State::Incomplete);
        // Interrupted by an ASCII byte instead of a continuation byte: the
        // aborted sequence rejects, and the interrupting byte is then
        // reprocessed as its own lead rather than being dropped.
        assert_eq!(dec.feed(b'A'), Utf8State::Reject);
        assert_eq!(dec.take(), Some(REPLACEMENT_CHARACTER));
        assert_eq!(dec.take(), Some('A'));
        assert_eq!(dec.take(), None);
    }

    #[test]
    fn invalid_continuation_does_not_drop_following_text() {
        // `E2 41` — a 3-byte lead followed by an ASCII byte where a
        // continuation byte was expected. Must surface both the
        // replacement character for the aborted sequence and the 'A',
        // not silently swallow the 'A'.
        assert_eq!(decode_all(&[0xE2, b'A']), vec![REPLACEMENT_CHARACTER, 'A']);
    }

    #[test]
    fn invalid_continuation_reprocesses_into_new_multibyte_sequence() {
        // `C3 E2 98 83`: `C3` starts a 2-byte sequence, but `E2` is not a
        // valid continuation byte for it. `E2` is reprocessed as a fresh
        // lead and completes the following 3-byte SNOWMAN sequence.
        assert_eq!(
            decode_all(&[0xC3, 0xE2, 0x98, 0x83]),
            vec![REPLACEMENT_CHARACTER, '☃']
        );
    }
}
