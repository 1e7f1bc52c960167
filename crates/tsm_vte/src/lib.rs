//! The VT interpreter: drives a push-parsed Williams state machine against
//! a [`tsm_screen::Screen`], turning host bytes into screen mutations and
//! screen mutations' side effects into host-bound replies.
//!
//! `vt_push_parser` supplies the state machine itself (actions, anywhere
//! events, `*_ignore` recovery); everything from [`VTEvent`] dispatch down
//! is this crate's. CSI/ESC events are matched directly on
//! `(private, intermediates, final_byte)` rather than through a typed
//! per-control-function registry — the same call made in [`sgr`] for SGR's
//! parameter grammar, for the same reason: a screen-mutating interpreter
//! needs the raw shape, not a struct per control function.

pub mod charset;
pub mod mode;
mod reply;
pub mod sgr;

use tracing::{debug, warn};
use vt_push_parser::event::{CSI, Esc, EscInvalid};
use vt_push_parser::{VT_PARSER_INTEREST_ALL, VTPushParser};

use tsm_keyboard::{KeyInput, KeyboardModes, translate as translate_key};
use tsm_palette::Palette;
use tsm_screen::{Attributes, Color, Screen, ScreenFlags};
use tsm_symtab::{Symbol, Utf8Decoder};

use charset::{Charset, Charsets};
use mode::{InputMode, VteModes};

/// Sink for bytes the interpreter wants to send back to the host. A plain
/// `FnMut(&[u8])` closure implements this directly.
pub trait HostWriter {
    fn write(&mut self, bytes: &[u8]);
}

impl<F: FnMut(&[u8])> HostWriter for F {
    fn write(&mut self, bytes: &[u8]) {
        (self)(bytes)
    }
}

/// Everything the interpreter owns apart from the push-parser itself. Split
/// out so [`Vte::input`] can hold `&mut self.parser` and `&mut self.state`
/// at once without aliasing: the parser's callback only ever touches
/// `state`.
struct State<'screen> {
    screen: &'screen mut Screen,
    utf8: Utf8Decoder,
    charsets: Charsets,
    modes: VteModes,
    input_mode: InputMode,
    palette: Palette,
    osc_buffer: Vec<u8>,
    pending_title: Option<String>,
}

impl<'screen> State<'screen> {
    fn new(screen: &'screen mut Screen) -> Self {
        Self {
            screen,
            utf8: Utf8Decoder::default(),
            charsets: Charsets::default(),
            modes: VteModes::default(),
            input_mode: InputMode::default(),
            palette: Palette::named("default"),
            osc_buffer: Vec::new(),
            pending_title: None,
        }
    }

    fn keyboard_modes(&self) -> KeyboardModes {
        KeyboardModes {
            cursor_key_application: self.modes.contains(VteModes::CURSOR_KEY_APPLICATION),
            keypad_application: self.modes.contains(VteModes::KEYPAD_APPLICATION),
            lf_nl: self.modes.contains(VteModes::LF_NL),
            encoding: match self.input_mode {
                InputMode::Utf8 => tsm_keyboard::InputEncoding::Utf8,
                InputMode::EightBit => tsm_keyboard::InputEncoding::EightBit,
                InputMode::SevenBit => tsm_keyboard::InputEncoding::SevenBit,
            },
        }
    }

    fn soft_reset(&mut self) {
        self.modes = VteModes::default();
        self.charsets = Charsets::default();
        self.screen.set_charsets(0, 1);
        self.screen
            .reset_flag(ScreenFlags::INSERT | ScreenFlags::ORIGIN | ScreenFlags::INVERSE);
        self.screen.reset_flag(ScreenFlags::HIDDEN_CURSOR);
        self.screen.set_flag(ScreenFlags::AUTO_WRAP);
        self.screen.set_margins(0, 0);
        self.screen.set_current_attr(Attributes::default());
    }

    fn hard_reset(&mut self) {
        self.soft_reset();
        self.screen.reset();
    }

    // ---- printable text --------------------------------------------------

    fn emit_glyph(&mut self, c: char) {
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if width == 0 {
            self.screen.combine(c);
        } else {
            let attr = self.screen.current_attr();
            self.screen.write(Symbol::from_char(c), width.min(2) as u8, attr);
        }
    }

    /// Print one GL/GR byte (`0x20..=0x7E` direct, or `0xA0..=0xFF` in
    /// 8-bit mode), running it through the designated charset first.
    fn print_byte(&mut self, byte: u8) {
        let (gl, gr) = self.screen.charsets();
        let translated = self.charsets.translate(byte, gl, gr);
        self.emit_glyph(translated);
    }

    /// Handle a `Raw` pass-through chunk: bytes the parser didn't classify
    /// as any control function. In UTF-8 mode this may be multi-byte text;
    /// in 8-bit mode every byte is its own glyph (through the charset
    /// tables, no decoding).
    fn print_raw(&mut self, bytes: &[u8]) {
        match self.input_mode {
            InputMode::EightBit => {
                for &b in bytes {
                    self.print_byte(b);
                }
            }
            InputMode::Utf8 | InputMode::SevenBit => {
                for &b in bytes {
                    match self.utf8.feed(b) {
                        tsm_symtab::Utf8State::Incomplete => {}
                        // A rejected sequence can ready a second character
                        // immediately (the same byte reprocessed as a
                        // fresh lead) — drain fully, not just once.
                        tsm_symtab::Utf8State::Accept | tsm_symtab::Utf8State::Reject => {
                            while let Some(c) = self.utf8.take() {
                                if (c as u32) < 0x80 {
                                    self.print_byte(c as u8);
                                } else {
                                    self.emit_glyph(c);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // ---- C0 -----------------------------------------------------------

    fn handle_c0<W: HostWriter>(&mut self, byte: u8, writer: &mut W) {
        match byte {
            0x05 => writer.write(reply::ENQ_REPLY),
            0x08 => self.screen.move_left(1),
            0x09 => self.screen.tab_right(1),
            0x0A | 0x0B | 0x0C => {
                if self.modes.contains(VteModes::LF_NL) {
                    self.screen.newline();
                } else {
                    self.screen.move_down(1, true);
                }
            }
            0x0D => self.screen.move_to_col(0),
            0x0E => self.screen.set_charsets(1, self.screen.charsets().1),
            0x0F => self.screen.set_charsets(0, self.screen.charsets().1),
            0x18 | 0x1A => {}
            _ => debug!(byte, "unhandled C0 control"),
        }
    }

    // ---- ESC ------------------------------------------------------------

    fn handle_esc<W: HostWriter>(&mut self, esc: &Esc, writer: &mut W) {
        let intermediates = esc.intermediates.as_ref();
        if let Some(slot) = charset_slot(intermediates) {
            if let Some(charset) = Charset::from_designator(esc.final_byte) {
                self.charsets.designate(slot, charset);
            } else {
                debug!(final_byte = esc.final_byte, "unknown charset designator");
            }
            return;
        }

        match esc.final_byte {
            b'D' => self.screen.move_down(1, true),
            b'E' => self.screen.newline(),
            b'H' => self.screen.set_tabstop(),
            b'M' => self.screen.move_up(1, true),
            b'N' => self.charsets.single_shift = Some(2),
            b'O' => self.charsets.single_shift = Some(3),
            b'Z' => writer.write(reply::PRIMARY_DA),
            b'7' => self.screen.save_cursor(),
            b'8' => self.screen.restore_cursor(),
            b'=' => self.modes.insert(VteModes::KEYPAD_APPLICATION),
            b'>' => self.modes.remove(VteModes::KEYPAD_APPLICATION),
            b'c' => self.hard_reset(),
            b'~' => self.screen.set_charsets(self.screen.charsets().0, 1),
            b'n' => self.screen.set_charsets(2, self.screen.charsets().1),
            b'}' => self.screen.set_charsets(self.screen.charsets().0, 2),
            b'o' => self.screen.set_charsets(3, self.screen.charsets().1),
            b'|' => self.screen.set_charsets(self.screen.charsets().0, 3),
            b'F' | b'G' if intermediates.contains(&b' ') => {
                // S7C1T / S8C1T: all outbound control strings stay 7-bit
                // regardless, so this only needs to be accepted.
            }
            b'\\' => {}
            _ => debug!(final_byte = esc.final_byte, "unhandled ESC final"),
        }
    }

    // ---- CSI ------------------------------------------------------------

    /// Parses each CSI parameter's raw ASCII-digit slice into an integer.
    /// An empty slice (no digits between separators) is the unset sentinel
    /// `-1`; accumulation is capped at 65535 per the parameter-overflow
    /// protection §4.D calls for.
    fn params(csi: &CSI) -> Vec<i32> {
        csi.params
            .iter()
            .map(|&p| {
                if p.is_empty() {
                    -1
                } else {
                    atoi_simd::parse::<i64>(p)
                        .map(|v| v.clamp(0, 65535) as i32)
                        .unwrap_or(-1)
                }
            })
            .collect()
    }

    fn param(params: &[i32], index: usize, default: i32) -> i32 {
        match params.get(index).copied() {
            Some(v) if v >= 0 => v,
            _ => default,
        }
    }

    fn handle_csi<W: HostWriter>(&mut self, csi: &CSI, writer: &mut W) {
        let params = Self::params(csi);
        let intermediates = csi.intermediates.as_ref();
        let private = csi.private == Some(b'?');
        let n = |d: i32| Self::param(&params, 0, d).max(1) as usize;

        match csi.final_byte {
            b'm' => {
                let mut attr = self.screen.current_attr();
                sgr::apply(&mut attr, &params);
                self.screen.set_current_attr(attr);
            }
            b'A' => self.screen.move_up(n(1), false),
            b'B' | b'e' => self.screen.move_down(n(1), false),
            b'C' => self.screen.move_right(n(1)),
            b'D' => self.screen.move_left(n(1)),
            b'E' => {
                self.screen.move_down(n(1), false);
                self.screen.move_to_col(0);
            }
            b'F' => {
                self.screen.move_up(n(1), false);
                self.screen.move_to_col(0);
            }
            b'G' => {
                self.screen
                    .move_to_col(Self::param(&params, 0, 1).max(1) as usize - 1);
            }
            b'd' => {
                let x = self.screen.cursor_x();
                self.screen.move_to(x, Self::param(&params, 0, 1).max(1) as usize - 1);
            }
            b'H' | b'f' => {
                let row = Self::param(&params, 0, 1).max(1) as usize - 1;
                let col = Self::param(&params, 1, 1).max(1) as usize - 1;
                self.screen.move_to(col, row);
            }
            b'I' => self.screen.tab_right(n(1)),
            b'Z' => self.screen.tab_left(n(1)),
            b'J' => self.erase_display(Self::param(&params, 0, 0), private),
            b'K' => self.erase_line(Self::param(&params, 0, 0), private),
            b'X' => self.screen.erase_chars(n(1)),
            b'L' => self.screen.insert_lines(n(1)),
            b'M' => self.screen.delete_lines(n(1)),
            b'@' => self.screen.insert_chars(n(1)),
            b'P' => self.screen.delete_chars(n(1)),
            b'S' => self.screen.scroll_up(n(1)),
            b'T' => self.screen.scroll_down(n(1)),
            b'r' => {
                let top = Self::param(&params, 0, 0).max(0) as usize;
                let bottom = Self::param(&params, 1, 0).max(0) as usize;
                self.screen.set_margins(top.saturating_sub(1), bottom);
            }
            b'g' => match Self::param(&params, 0, 0) {
                3 => self.screen.reset_all_tabstops(),
                _ => self.screen.reset_tabstop(),
            },
            b'c' => {
                if csi.private == Some(b'>') {
                    writer.write(reply::SECONDARY_DA);
                } else if csi.private.is_none() {
                    writer.write(reply::PRIMARY_DA);
                }
            }
            b'n' => match Self::param(&params, 0, 0) {
                5 => writer.write(reply::DSR_OK),
                6 => {
                    let row = self.screen.cursor_y() + 1;
                    let col = self.screen.cursor_x() + 1;
                    if let Ok(buf) = cursor_position_reply(row, col) {
                        writer.write(&buf);
                    }
                }
                _ => {}
            },
            b'p' => {
                if intermediates.contains(&b'!') {
                    self.soft_reset();
                } else {
                    debug!("DECSCL compatibility-level query/set treated as a tolerant stub");
                }
            }
            b'h' => self.set_modes(&params, private, true),
            b'l' => self.set_modes(&params, private, false),
            _ => debug!(final_byte = csi.final_byte, "unhandled CSI final"),
        }
    }

    fn erase_display(&mut self, mode: i32, protect: bool) {
        match mode {
            1 => self.screen.erase_screen_to_cursor(protect),
            2 | 3 => {
                self.screen.erase_screen(protect);
                if mode == 3 {
                    self.screen.clear_sb();
                }
            }
            _ => self.screen.erase_cursor_to_screen(protect),
        }
    }

    fn erase_line(&mut self, mode: i32, protect: bool) {
        match mode {
            1 => self.screen.erase_home_to_cursor(protect),
            2 => self.screen.erase_current_line(protect),
            _ => self.screen.erase_cursor_to_end(protect),
        }
    }

    fn set_modes(&mut self, params: &[i32], private: bool, enable: bool) {
        for &code in params {
            if private {
                self.set_dec_mode(code, enable);
            } else {
                self.set_ansi_mode(code, enable);
            }
        }
    }

    fn set_ansi_mode(&mut self, code: i32, enable: bool) {
        match code {
            20 => self.modes.set(VteModes::LF_NL, enable),
            _ => debug!(code, "unhandled ANSI mode"),
        }
    }

    fn set_dec_mode(&mut self, code: i32, enable: bool) {
        match code {
            1 => self.modes.set(VteModes::CURSOR_KEY_APPLICATION, enable),
            2 => debug!("VT52 mode ignored"),
            3 => self.modes.set(VteModes::COLUMN_132, enable),
            5 => self.screen_flag(ScreenFlags::INVERSE, enable),
            6 => {
                self.screen_flag(ScreenFlags::ORIGIN, enable);
                self.screen.move_to(0, 0);
            }
            7 => self.screen_flag(ScreenFlags::AUTO_WRAP, enable),
            8 => self.modes.set(VteModes::AUTO_REPEAT, enable),
            12 => self.modes.set(VteModes::SEND_RECEIVE, enable),
            25 => self.screen_flag(ScreenFlags::HIDDEN_CURSOR, !enable),
            42 => self.modes.set(VteModes::NATIONAL, enable),
            47 => self.toggle_alternate(enable),
            1047 => {
                if !enable {
                    self.screen.erase_screen(false);
                }
                self.toggle_alternate(enable);
            }
            1048 => {
                if self.modes.contains(VteModes::TITE_INHIBIT) {
                    return;
                }
                if enable {
                    self.screen.save_cursor();
                } else {
                    self.screen.restore_cursor();
                }
            }
            1049 => {
                if self.modes.contains(VteModes::TITE_INHIBIT) {
                    return;
                }
                if enable {
                    self.screen.save_cursor();
                    self.screen.set_flag(ScreenFlags::ALTERNATE);
                    self.screen.erase_screen(false);
                } else {
                    self.screen.reset_flag(ScreenFlags::ALTERNATE);
                    self.screen.restore_cursor();
                }
            }
            _ => debug!(code, "unhandled DEC private mode"),
        }
    }

    /// OSC `0`/`1`/`2`: set icon name and/or window title. Everything else
    /// is accepted and discarded — no window exists at this layer to act
    /// on it, but the title is cheap to keep and otherwise useful to a
    /// caller that does own a window.
    fn handle_osc(&mut self, data: &[u8]) {
        let Some(sep) = data.iter().position(|&b| b == b';') else {
            return;
        };
        let Ok(code) = std::str::from_utf8(&data[..sep]).unwrap_or("").parse::<u32>() else {
            return;
        };
        if matches!(code, 0 | 1 | 2) {
            self.pending_title = Some(String::from_utf8_lossy(&data[sep + 1..]).into_owned());
        }
    }

    fn screen_flag(&mut self, flag: ScreenFlags, enable: bool) {
        if enable {
            self.screen.set_flag(flag);
        } else {
            self.screen.reset_flag(flag);
        }
    }

    fn toggle_alternate(&mut self, enable: bool) {
        if self.modes.contains(VteModes::TITE_INHIBIT) {
            return;
        }
        self.screen_flag(ScreenFlags::ALTERNATE, enable);
    }
}

/// CSI/ESC intermediate byte for a charset-designation slot: `(` G0, `)`
/// G1, `*` G2, `+` G3. Same `#[try_from(repr)]` shape `vtio_control_base`'s
/// own `EscapeSequenceIntroducer` and `vtparser::registry` use for
/// byte-to-enum conversions, applied here to the four designator bytes.
#[derive(Copy, Clone, Debug, derive_more::TryFrom)]
#[repr(u8)]
#[try_from(repr)]
enum GSlot {
    G0 = b'(',
    G1 = b')',
    G2 = b'*',
    G3 = b'+',
}

fn charset_slot(intermediates: &[u8]) -> Option<u8> {
    GSlot::try_from(*intermediates.first()?).ok().map(|g| g as u8)
}

/// The VT interpreter. Borrows a [`Screen`] for its lifetime and drives it
/// from host bytes ([`Vte::input`]) or translated key events
/// ([`Vte::handle_keyboard`]).
pub struct Vte<'screen> {
    parser: VTPushParser<VT_PARSER_INTEREST_ALL>,
    state: State<'screen>,
}

impl<'screen> Vte<'screen> {
    #[must_use]
    pub fn new(screen: &'screen mut Screen) -> Self {
        Self {
            parser: VTPushParser::new_with_interest::<VT_PARSER_INTEREST_ALL>(),
            state: State::new(screen),
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.state.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        self.state.screen
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.state.input_mode = mode;
    }

    pub fn set_tite_inhibit(&mut self, inhibit: bool) {
        self.state.modes.set(VteModes::TITE_INHIBIT, inhibit);
    }

    /// Select a named color palette; re-renders by marking every cell
    /// dirty (resolved colors live outside the cell, so a palette swap is
    /// otherwise invisible to the age-based dirty protocol).
    pub fn set_palette(&mut self, name: &str) {
        self.state.palette = Palette::named(name);
        self.state.screen.touch_all();
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.state.palette
    }

    pub fn reset(&mut self) {
        self.state.soft_reset();
    }

    pub fn hard_reset(&mut self) {
        self.state.hard_reset();
    }

    /// Take the most recently received OSC `0`/`1`/`2` title string, if any
    /// arrived since the last call. `tsm_vte` has no window to apply it to;
    /// a caller that owns one polls this after each `input`/`idle` call.
    pub fn take_title_event(&mut self) -> Option<String> {
        self.state.pending_title.take()
    }

    /// Feed host bytes into the parser, synchronously. `7-bit` mode strips
    /// the high bit off every byte (and warns); `8-bit` mode bypasses the
    /// UTF-8 decoder and feeds every byte straight through the charset
    /// tables; `UTF-8` (the default) decodes multi-byte text before it
    /// reaches the screen.
    pub fn input<W: HostWriter>(&mut self, bytes: &[u8], writer: &mut W) {
        let Vte { parser, state } = self;
        match state.input_mode {
            InputMode::SevenBit => {
                let stripped: Vec<u8> = bytes
                    .iter()
                    .map(|&b| {
                        if b & 0x80 != 0 {
                            warn!(byte = b, "7-bit mode: stripping high bit");
                        }
                        b & 0x7F
                    })
                    .collect();
                parser.feed_with(&stripped, |event| dispatch(state, &event, writer));
            }
            InputMode::EightBit | InputMode::Utf8 => {
                parser.feed_with(bytes, |event| dispatch(state, &event, writer));
            }
        }
    }

    /// Flush any partial escape sequence left over from the last `input`
    /// call, as if the host had gone idle. Returns `true` if anything was
    /// emitted as a result.
    pub fn idle<W: HostWriter>(&mut self, writer: &mut W) -> bool {
        let Vte { parser, state } = self;
        match parser.idle() {
            Some(event) => {
                dispatch(state, &event, writer);
                true
            }
            None => false,
        }
    }

    /// Translate one key event and, if it produced output, write it to the
    /// host and (when local echo is enabled) feed it straight back into
    /// `input`. Returns `false` for an unhandled key (translation rule 6).
    ///
    /// This is the only place a local-echo re-feed happens: replies
    /// emitted from inside `input` (DA/DSR/ENQ) never loop back, since
    /// they go through `writer` directly without passing through here.
    pub fn handle_keyboard<W: HostWriter>(&mut self, input: &KeyInput, writer: &mut W) -> bool {
        let modes = self.state.keyboard_modes();
        let Some(bytes) = translate_key(input, &modes) else {
            return false;
        };
        debug_assert!(
            matches!(self.state.input_mode, InputMode::EightBit) || bytes.iter().all(|&b| b < 0x80),
            "outbound byte must be 7-bit outside 8-bit mode"
        );
        writer.write(&bytes);
        if !self.state.modes.contains(VteModes::SEND_RECEIVE) {
            self.input(&bytes, writer);
        }
        true
    }
}

fn dispatch<W: HostWriter>(state: &mut State, event: &vt_push_parser::event::VTEvent, writer: &mut W) {
    use vt_push_parser::event::VTEvent;
    match event {
        VTEvent::Raw(bytes) => state.print_raw(bytes),
        VTEvent::C0(byte) => state.handle_c0(*byte, writer),
        VTEvent::Esc(esc) => state.handle_esc(esc, writer),
        VTEvent::EscInvalid(esc) => log_esc_invalid(esc),
        VTEvent::Csi(csi) => state.handle_csi(csi, writer),
        VTEvent::Ss2(_) => state.charsets.single_shift = Some(2),
        VTEvent::Ss3(_) => state.charsets.single_shift = Some(3),
        VTEvent::OscStart => state.osc_buffer.clear(),
        VTEvent::OscCancel => state.osc_buffer.clear(),
        VTEvent::OscData(data) => state.osc_buffer.extend_from_slice(data),
        VTEvent::OscEnd { data, .. } => {
            state.osc_buffer.extend_from_slice(data);
            let buffer = std::mem::take(&mut state.osc_buffer);
            state.handle_osc(&buffer);
        }
        VTEvent::DcsStart(_) | VTEvent::DcsCancel | VTEvent::DcsData(_) => {}
        VTEvent::DcsEnd(_) => debug!("DCS payload accepted and discarded"),
    }
}

fn log_esc_invalid(_esc: &EscInvalid) {
    debug!("malformed escape sequence ignored");
}

/// DSR cursor-position report. A free function (rather than inlined in
/// `handle_csi`, which returns `()`) because `write_csi!` expands to a block
/// using `?`, which needs a `Result`-returning function around it.
fn cursor_position_reply(row: usize, col: usize) -> Result<Vec<u8>, vtenc::EncodeError> {
    let mut buf = Vec::with_capacity(10);
    vtenc::write_csi!(&mut buf; row, ";", col, "R")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect<'a>(vte: &mut Vte<'a>, bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        vte.input(bytes, &mut |b: &[u8]| out.extend_from_slice(b));
        out
    }

    #[test]
    fn plain_text_wraps_like_screen_scenario_one() {
        let mut screen = Screen::new(5, 2);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"ABCDEFG");
        assert_eq!((vte.screen().cursor_x(), vte.screen().cursor_y()), (2, 1));
    }

    #[test]
    fn cursor_position_is_one_based_on_the_wire() {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"\x1b[2;3H");
        assert_eq!((vte.screen().cursor_x(), vte.screen().cursor_y()), (2, 1));
    }

    #[test]
    fn sgr_sets_and_resets_foreground() {
        let mut screen = Screen::new(10, 1);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"\x1b[31mR\x1b[0mG");
        assert_eq!(vte.screen().cell(0, 0).unwrap().attr.fg, Color::Indexed(1));
        assert_eq!(vte.screen().cell(1, 0).unwrap().attr, Attributes::default());
    }

    #[test]
    fn primary_da_query_replies_exact_bytes() {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        let out = collect(&mut vte, b"\x1b[c");
        assert_eq!(out, reply::PRIMARY_DA);
        assert_eq!(out.len(), 17);
    }

    #[test]
    fn dsr_cursor_position_report() {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"\x1b[5;4H");
        let out = collect(&mut vte, b"\x1b[6n");
        assert_eq!(out, b"\x1b[4;5R");
    }

    #[test]
    fn alternate_buffer_round_trip_restores_primary() {
        let mut screen = Screen::new(10, 3);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"A");
        let before = (vte.screen().cursor_x(), vte.screen().cursor_y());
        collect(&mut vte, b"\x1b[?1049h");
        collect(&mut vte, b"X");
        collect(&mut vte, b"\x1b[?1049l");
        assert_eq!((vte.screen().cursor_x(), vte.screen().cursor_y()), before);
        assert!(!vte.screen().is_alternate());
    }

    #[test]
    fn ctrl_c_keyboard_emits_one_byte() {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        let input = KeyInput {
            key: tsm_keyboard::Key::Char('c'),
            ascii_mirror: Some('c'),
            modifiers: tsm_keyboard::KeyModifiers::CONTROL,
            unicode: Some('c'),
        };
        let mut out = Vec::new();
        assert!(vte.handle_keyboard(&input, &mut |b: &[u8]| out.extend_from_slice(b)));
        assert_eq!(out, vec![0x03]);
    }

    #[test]
    fn invalid_utf8_overlong_produces_one_replacement_char() {
        let mut screen = Screen::new(10, 1);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, &[0xC0, 0xAF]);
        assert_eq!(
            vte.screen().cell(0, 0).unwrap().symbol.decode().0,
            tsm_symtab::REPLACEMENT_CHARACTER,
        );
        // The overlong pair is one rejected unit, not two independently
        // bad bytes: only one cell is written, so the cursor sits at 1
        // and the next cell is still blank.
        assert_eq!(vte.screen().cursor_x(), 1);
        assert_eq!(vte.screen().cell(1, 0).unwrap().symbol.decode().0, ' ');
    }

    #[test]
    fn osc_0_sets_pending_title() {
        let mut screen = Screen::new(80, 24);
        let mut vte = Vte::new(&mut screen);
        collect(&mut vte, b"\x1b]0;my shell\x07");
        assert_eq!(vte.take_title_event().as_deref(), Some("my shell"));
        assert_eq!(vte.take_title_event(), None);
    }
}
