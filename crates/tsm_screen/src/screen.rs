//! The screen model: two cell grids, scrollback, and all editing
//! primitives that mutate them.

use std::collections::VecDeque;

use tsm_symtab::Symbol;

use crate::attr::{AttrFlags, Attributes, Color};
use crate::buffer::{Buffer, BufferId, SavedCursor};
use crate::cell::{Cell, Line};

bitflags::bitflags! {
    /// Screen-wide mode flags.
    ///
    /// `BCE` (background-color-erase) is carried here alongside the named
    /// flags from the data model even though it is documented separately
    /// as "a mode, not an attribute" — it has the same set/reset lifecycle
    /// as the rest of this set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScreenFlags: u16 {
        const INSERT         = 0b0000_0001;
        const AUTO_WRAP       = 0b0000_0010;
        const ORIGIN          = 0b0000_0100;
        const INVERSE         = 0b0000_1000;
        const HIDDEN_CURSOR   = 0b0001_0000;
        const ALTERNATE       = 0b0010_0000;
        const BCE             = 0b0100_0000;
    }
}

impl Default for ScreenFlags {
    fn default() -> Self {
        ScreenFlags::AUTO_WRAP
    }
}

/// A cell grid with attributes, cursor, scroll region, scrollback, tab
/// stops, an alternate buffer, and the editing primitives that operate
/// on them.
#[derive(Debug, Clone)]
pub struct Screen {
    primary: Buffer,
    alternate: Buffer,
    active: BufferId,
    scrollback: VecDeque<Line>,
    sb_max: usize,
    sb_offset: usize,
    flags: ScreenFlags,
    /// The pen used for new writes; also the source of the "current
    /// default attribute" BCE erases copy from.
    cur_attr: Attributes,
    gl: u8,
    gr: u8,
    age_counter: u64,
}

impl Screen {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let attr = Attributes::default();
        Self {
            primary: Buffer::new(width, height, attr),
            alternate: Buffer::new(width, height, attr),
            active: BufferId::Primary,
            scrollback: VecDeque::new(),
            sb_max: 0,
            sb_offset: 0,
            flags: ScreenFlags::default(),
            cur_attr: attr,
            gl: 0,
            gr: 1,
            age_counter: 0,
        }
    }

    fn buf(&self) -> &Buffer {
        match self.active {
            BufferId::Primary => &self.primary,
            BufferId::Alternate => &self.alternate,
        }
    }

    fn buf_mut(&mut self) -> &mut Buffer {
        match self.active {
            BufferId::Primary => &mut self.primary,
            BufferId::Alternate => &mut self.alternate,
        }
    }

    fn bump(&mut self) -> u64 {
        self.age_counter += 1;
        self.age_counter
    }

    // ---- accessors -----------------------------------------------------

    #[must_use]
    pub fn width(&self) -> usize {
        self.buf().width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.buf().height()
    }

    #[must_use]
    pub fn cursor_x(&self) -> usize {
        self.buf().cursor_x
    }

    #[must_use]
    pub fn cursor_y(&self) -> usize {
        self.buf().cursor_y
    }

    /// The cell at `(x, y)` in the active buffer, if in bounds.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.buf().lines.get(y)?.cells.get(x).copied()
    }

    /// Force every cell to appear dirty on the next draw. Needed after a
    /// palette change: resolved colors live outside the cell, so nothing
    /// about the cells themselves changes, but every previous `draw` is
    /// now stale.
    pub fn touch_all(&mut self) {
        let age = self.bump();
        for buf in [&mut self.primary, &mut self.alternate] {
            for line in &mut buf.lines {
                line.age = age;
                for cell in &mut line.cells {
                    cell.age = age;
                }
            }
        }
    }

    #[must_use]
    pub fn flags(&self) -> ScreenFlags {
        self.flags
    }

    #[must_use]
    pub fn current_attr(&self) -> Attributes {
        self.cur_attr
    }

    pub fn set_current_attr(&mut self, attr: Attributes) {
        self.cur_attr = attr;
    }

    #[must_use]
    pub fn charsets(&self) -> (u8, u8) {
        (self.gl, self.gr)
    }

    pub fn set_charsets(&mut self, gl: u8, gr: u8) {
        self.gl = gl;
        self.gr = gr;
    }

    #[must_use]
    pub fn margins(&self) -> (usize, usize) {
        self.buf().margins()
    }

    #[must_use]
    pub fn is_alternate(&self) -> bool {
        matches!(self.active, BufferId::Alternate)
    }

    fn erase_attr(&self) -> Attributes {
        if self.flags.contains(ScreenFlags::BCE) {
            Attributes {
                fg: Color::Default,
                bg: self.cur_attr.bg,
                flags: AttrFlags::empty(),
            }
        } else {
            Attributes::default()
        }
    }

    // ---- resize ----------------------------------------------------------

    /// Reallocate both buffers to `(width, height)`, whichever is active.
    /// Both are kept in lockstep so switching into the alternate buffer
    /// (`CSI ?1049h` and friends) after a resize never finds it still at
    /// stale dimensions: `width()`/`height()`/margins/tab stops would
    /// otherwise silently operate against the wrong bounds for as long as
    /// that buffer stayed active. Only the primary buffer's overflow rows
    /// feed the scrollback; the alternate buffer has none.
    pub fn resize(&mut self, width: usize, height: usize) {
        let attr = self.erase_attr();
        let age = self.bump();
        let primary_dropped = self.primary.resize(width, height, attr);
        self.alternate.resize(width, height, attr);
        for line in primary_dropped {
            self.push_scrollback(line);
        }
        for buf in [&mut self.primary, &mut self.alternate] {
            buf.lines.iter_mut().for_each(|l| l.age = age);
        }
    }

    // ---- scrollback --------------------------------------------------------

    fn push_scrollback(&mut self, line: Line) {
        if self.sb_max == 0 {
            return;
        }
        self.scrollback.push_back(line);
        while self.scrollback.len() > self.sb_max {
            self.scrollback.pop_front();
        }
    }

    pub fn set_max_sb(&mut self, n: usize) {
        self.sb_max = n;
        while self.scrollback.len() > self.sb_max {
            self.scrollback.pop_front();
        }
        self.sb_offset = self.sb_offset.min(self.scrollback.len());
    }

    pub fn sb_up(&mut self, n: usize) {
        if self.is_alternate() {
            return;
        }
        self.sb_offset = (self.sb_offset + n).min(self.scrollback.len());
    }

    pub fn sb_down(&mut self, n: usize) {
        self.sb_offset = self.sb_offset.saturating_sub(n);
    }

    pub fn sb_page_up(&mut self) {
        self.sb_up(self.height());
    }

    pub fn sb_page_down(&mut self) {
        self.sb_down(self.height());
    }

    pub fn sb_reset(&mut self) {
        self.sb_offset = 0;
    }

    pub fn clear_sb(&mut self) {
        self.scrollback.clear();
        self.sb_offset = 0;
    }

    #[must_use]
    pub fn sb_depth(&self) -> usize {
        self.scrollback.len()
    }

    // ---- flags ----------------------------------------------------------

    pub fn set_flag(&mut self, flag: ScreenFlags) {
        if flag.contains(ScreenFlags::ALTERNATE) && !self.is_alternate() {
            self.active = BufferId::Alternate;
        }
        self.flags.insert(flag);
    }

    pub fn reset_flag(&mut self, flag: ScreenFlags) {
        if flag.contains(ScreenFlags::ALTERNATE) && self.is_alternate() {
            self.active = BufferId::Primary;
        }
        self.flags.remove(flag);
    }

    // ---- cursor motion ----------------------------------------------------

    pub fn move_to(&mut self, x: usize, y: usize) {
        let origin = self.flags.contains(ScreenFlags::ORIGIN);
        let (top, bottom) = self.margins();
        let width = self.width();
        let height = self.height();
        let buf = self.buf_mut();
        buf.cursor_x = x.min(width.saturating_sub(1));
        buf.cursor_y = if origin {
            (top + y).clamp(top, bottom.saturating_sub(1))
        } else {
            y.min(height.saturating_sub(1))
        };
    }

    /// Repositions the cursor within its current row, leaving `cursor_y`
    /// untouched. Unlike [`Self::move_to`], this never re-interprets `x` as
    /// origin-relative — for CR and the CSI cursor motions that keep the
    /// same row (`E`/`F`/`G`), round-tripping the already-absolute
    /// `cursor_y` back through `move_to` would, under DECOM, add `top` to
    /// it a second time.
    pub fn move_to_col(&mut self, x: usize) {
        let width = self.width();
        let buf = self.buf_mut();
        buf.cursor_x = x.min(width.saturating_sub(1));
    }

    pub fn move_left(&mut self, n: usize) {
        let buf = self.buf_mut();
        buf.cursor_x = buf.cursor_x.saturating_sub(n);
    }

    pub fn move_right(&mut self, n: usize) {
        let width = self.width();
        let buf = self.buf_mut();
        buf.cursor_x = (buf.cursor_x + n).min(width.saturating_sub(1));
    }

    pub fn move_up(&mut self, n: usize, scroll: bool) {
        let (top, _) = self.margins();
        for _ in 0..n {
            let y = self.buf().cursor_y;
            if scroll && y == top {
                self.scroll_down(1);
            } else {
                let buf = self.buf_mut();
                buf.cursor_y = buf.cursor_y.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self, n: usize, scroll: bool) {
        let (_, bottom) = self.margins();
        for _ in 0..n {
            let y = self.buf().cursor_y;
            if scroll && bottom > 0 && y == bottom - 1 {
                self.scroll_up(1);
            } else {
                let height = self.height();
                let buf = self.buf_mut();
                buf.cursor_y = (buf.cursor_y + 1).min(height.saturating_sub(1));
            }
        }
    }

    pub fn newline(&mut self) {
        self.buf_mut().cursor_x = 0;
        self.move_down(1, true);
    }

    pub fn tab_right(&mut self, n: usize) {
        let width = self.width();
        for _ in 0..n {
            let buf = self.buf_mut();
            let start = buf.cursor_x + 1;
            let next = (start..width).find(|&x| buf.tabstops[x]);
            buf.cursor_x = next.unwrap_or(width - 1);
        }
    }

    pub fn tab_left(&mut self, n: usize) {
        for _ in 0..n {
            let buf = self.buf_mut();
            if buf.cursor_x == 0 {
                break;
            }
            let prev = (0..buf.cursor_x).rev().find(|&x| buf.tabstops[x]);
            buf.cursor_x = prev.unwrap_or(0);
        }
    }

    pub fn set_tabstop(&mut self) {
        let buf = self.buf_mut();
        let x = buf.cursor_x.min(buf.width - 1);
        buf.tabstops[x] = true;
    }

    pub fn reset_tabstop(&mut self) {
        let buf = self.buf_mut();
        if buf.cursor_x < buf.width {
            buf.tabstops[buf.cursor_x] = false;
        }
    }

    pub fn reset_all_tabstops(&mut self) {
        let buf = self.buf_mut();
        buf.tabstops.iter_mut().for_each(|t| *t = false);
    }

    pub fn set_margins(&mut self, top: usize, bottom: usize) {
        let height = self.height();
        let (top, bottom) = if top == 0 && bottom == 0 {
            (0, height)
        } else {
            (top, bottom)
        };
        if bottom <= top || bottom > height {
            return;
        }
        let buf = self.buf_mut();
        buf.top = top;
        buf.bottom = bottom;
    }

    pub fn save_cursor(&mut self) {
        let (x, y) = self.buf().cursor();
        let saved = SavedCursor {
            x,
            y,
            attr: self.cur_attr,
            gl: self.gl,
            gr: self.gr,
            auto_wrap: self.flags.contains(ScreenFlags::AUTO_WRAP),
            origin_mode: self.flags.contains(ScreenFlags::ORIGIN),
        };
        self.buf_mut().saved = Some(saved);
    }

    pub fn restore_cursor(&mut self) {
        let Some(saved) = self.buf().saved else {
            return;
        };
        let buf = self.buf_mut();
        buf.cursor_x = saved.x.min(buf.width);
        buf.cursor_y = saved.y.min(buf.height - 1);
        self.cur_attr = saved.attr;
        self.gl = saved.gl;
        self.gr = saved.gr;
        self.flags.set(ScreenFlags::AUTO_WRAP, saved.auto_wrap);
        self.flags.set(ScreenFlags::ORIGIN, saved.origin_mode);
    }

    // ---- writing ----------------------------------------------------------

    /// Write a glyph at the cursor, honoring insert mode and pending wrap.
    /// `width` is 1 or 2; combining marks go through [`Self::combine`]
    /// instead.
    pub fn write(&mut self, symbol: Symbol, width: u8, attr: Attributes) {
        let width = width.max(1);
        let buf_width = self.width();
        if self.buf().cursor_x >= buf_width {
            if self.flags.contains(ScreenFlags::AUTO_WRAP) {
                self.newline();
            } else {
                self.buf_mut().cursor_x = buf_width.saturating_sub(1);
            }
        }
        let age = self.bump();
        let insert = self.flags.contains(ScreenFlags::INSERT);
        let buf = self.buf_mut();
        let y = buf.cursor_y;
        let x = buf.cursor_x.min(buf_width.saturating_sub(1));
        if insert {
            let line = &mut buf.lines[y];
            for _ in 0..width {
                line.cells.insert(x, Cell::blank(attr));
                line.cells.truncate(buf_width);
            }
        }
        let line = &mut buf.lines[y];
        line.cells[x] = Cell {
            symbol,
            width,
            attr,
            age,
        };
        if width == 2 && x + 1 < buf_width {
            line.cells[x + 1] = Cell::continuation(attr);
            line.cells[x + 1].age = age;
        }
        line.age = age;
        buf.cursor_x = x + usize::from(width);
    }

    /// Fold a combining mark onto the cell immediately left of the cursor.
    /// Dropped silently if the cursor is at column 0 with no prior cell.
    pub fn combine(&mut self, mark: char) {
        if self.buf().cursor_x == 0 {
            return;
        }
        let buf_width = self.width();
        let x = self.buf().cursor_x.min(buf_width.saturating_sub(1));
        let age = self.bump();
        let buf = self.buf_mut();
        let y = buf.cursor_y;
        let target = x.saturating_sub(usize::from(buf.lines[y].cells[x].is_continuation()));
        let cell = &mut buf.lines[y].cells[target];
        cell.symbol = cell.symbol.append(mark);
        cell.age = age;
        buf.lines[y].age = age;
    }

    // ---- line/char editing --------------------------------------------------

    pub fn insert_lines(&mut self, n: usize) {
        let (top, bottom) = self.margins();
        let y = self.buf().cursor_y;
        if y < top || y >= bottom {
            return;
        }
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        let n = n.min(bottom - y);
        for _ in 0..n {
            buf.lines.remove(bottom - 1);
            buf.lines.insert(y, Line::blank(width, attr));
        }
        for line in &mut buf.lines[y..bottom] {
            line.age = age;
        }
    }

    pub fn delete_lines(&mut self, n: usize) {
        let (top, bottom) = self.margins();
        let y = self.buf().cursor_y;
        if y < top || y >= bottom {
            return;
        }
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        let n = n.min(bottom - y);
        for _ in 0..n {
            buf.lines.remove(y);
            buf.lines.insert(bottom - 1, Line::blank(width, attr));
        }
        for line in &mut buf.lines[y..bottom] {
            line.age = age;
        }
    }

    pub fn insert_chars(&mut self, n: usize) {
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        let y = buf.cursor_y;
        let x = buf.cursor_x.min(width.saturating_sub(1));
        let line = &mut buf.lines[y];
        for _ in 0..n {
            line.cells.insert(x, Cell::blank(attr));
        }
        line.cells.truncate(width);
        line.age = age;
    }

    pub fn delete_chars(&mut self, n: usize) {
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        let y = buf.cursor_y;
        let x = buf.cursor_x.min(width.saturating_sub(1));
        let line = &mut buf.lines[y];
        let n = n.min(line.cells.len() - x);
        line.cells.drain(x..x + n);
        line.cells.resize(width, Cell::blank(attr));
        line.age = age;
    }

    pub fn erase_chars(&mut self, n: usize) {
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        let y = buf.cursor_y;
        let x = buf.cursor_x.min(width.saturating_sub(1));
        let end = (x + n).min(width);
        let line = &mut buf.lines[y];
        for cell in &mut line.cells[x..end] {
            *cell = Cell::blank(attr);
            cell.age = age;
        }
        line.age = age;
    }

    fn erase_range(&mut self, y: usize, from: usize, to: usize, protect: bool) {
        let attr = self.erase_attr();
        let age = self.bump();
        let buf = self.buf_mut();
        let line = &mut buf.lines[y];
        for cell in &mut line.cells[from..to] {
            if protect && cell.attr.is_protected() {
                continue;
            }
            *cell = Cell::blank(attr);
            cell.age = age;
        }
        line.age = age;
    }

    pub fn erase_cursor_to_end(&mut self, protect: bool) {
        let width = self.width();
        let (x, y) = self.buf().cursor();
        self.erase_range(y, x, width, protect);
    }

    pub fn erase_home_to_cursor(&mut self, protect: bool) {
        let width = self.width();
        let (x, y) = self.buf().cursor();
        self.erase_range(y, 0, (x + 1).min(width), protect);
    }

    pub fn erase_current_line(&mut self, protect: bool) {
        let width = self.width();
        let y = self.buf().cursor_y;
        self.erase_range(y, 0, width, protect);
    }

    pub fn erase_cursor_to_screen(&mut self, protect: bool) {
        self.erase_cursor_to_end(protect);
        let height = self.height();
        let width = self.width();
        let y = self.buf().cursor_y;
        for row in y + 1..height {
            self.erase_range(row, 0, width, protect);
        }
    }

    pub fn erase_screen_to_cursor(&mut self, protect: bool) {
        self.erase_home_to_cursor(protect);
        let width = self.width();
        let y = self.buf().cursor_y;
        for row in 0..y {
            self.erase_range(row, 0, width, protect);
        }
    }

    pub fn erase_screen(&mut self, protect: bool) {
        let width = self.width();
        let height = self.height();
        for row in 0..height {
            self.erase_range(row, 0, width, protect);
        }
    }

    // ---- scrolling ----------------------------------------------------------

    pub fn scroll_up(&mut self, n: usize) {
        let (top, bottom) = self.margins();
        let attr = self.erase_attr();
        let width = self.width();
        let is_primary = matches!(self.active, BufferId::Primary);
        let age = self.bump();
        let mut pushed = Vec::new();
        {
            let buf = self.buf_mut();
            for _ in 0..n.min(bottom - top) {
                let line = buf.lines.remove(top);
                pushed.push(line);
                buf.lines.insert(bottom - 1, Line::blank(width, attr));
            }
            for line in &mut buf.lines[top..bottom] {
                line.age = age;
            }
        }
        if is_primary && top == 0 {
            for line in pushed {
                self.push_scrollback(line);
            }
        }
    }

    pub fn scroll_down(&mut self, n: usize) {
        let (top, bottom) = self.margins();
        let attr = self.erase_attr();
        let width = self.width();
        let age = self.bump();
        let buf = self.buf_mut();
        for _ in 0..n.min(bottom - top) {
            buf.lines.remove(bottom - 1);
            buf.lines.insert(top, Line::blank(width, attr));
        }
        for line in &mut buf.lines[top..bottom] {
            line.age = age;
        }
    }

    // ---- reset ----------------------------------------------------------

    /// Erase both buffers, clear scrollback, home the cursor and reset
    /// margins/tab stops/flags. Used for a hard VTE reset; a soft reset
    /// should NOT call this (it must preserve screen contents).
    pub fn reset(&mut self) {
        let w = self.width();
        let h = self.height();
        self.primary = Buffer::new(w, h, Attributes::default());
        self.alternate = Buffer::new(w, h, Attributes::default());
        self.active = BufferId::Primary;
        self.scrollback.clear();
        self.sb_offset = 0;
        self.flags = ScreenFlags::default();
        self.cur_attr = Attributes::default();
        self.gl = 0;
        self.gr = 1;
        self.age_counter = 0;
    }

    // ---- draw ----------------------------------------------------------

    /// Iterate the current view (live buffer, or scrolled into history for
    /// the primary buffer) cell by cell in scan order.
    pub fn draw<Ctx>(
        &self,
        mut prepare: impl FnMut(&mut Ctx),
        mut draw_cell: impl FnMut(usize, usize, Symbol, u8, Attributes, u64, &mut Ctx),
        mut render: impl FnMut(&mut Ctx),
        ctx: &mut Ctx,
    ) {
        prepare(ctx);
        let height = self.height();
        let history_len = self.scrollback.len();
        let offset = self.sb_offset.min(history_len);
        for y in 0..height {
            let line = self.visible_line(y, history_len, offset);
            if let Some(line) = line {
                for (x, cell) in line.cells.iter().enumerate() {
                    draw_cell(x, y, cell.symbol, cell.width, cell.attr, cell.age, ctx);
                }
            }
        }
        render(ctx);
    }

    fn visible_line(&self, y: usize, history_len: usize, offset: usize) -> Option<&Line> {
        if offset == 0 {
            return self.buf().lines.get(y);
        }
        // Rows scrolled in from history occupy the top of the view; the
        // remaining rows fall through to the live buffer.
        let idx = history_len.saturating_sub(offset) + y;
        if idx < history_len {
            self.scrollback.get(idx)
        } else {
            self.buf().lines.get(idx - history_len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c)
    }

    #[test]
    fn plain_text_wraps_at_width() {
        let mut s = Screen::new(5, 2);
        for c in "ABCDEFG".chars() {
            s.write(sym(c), 1, Attributes::default());
        }
        let row0: String = s
            .primary
            .line(0)
            .unwrap()
            .cells
            .iter()
            .map(|c| c.symbol.decode().0)
            .collect();
        let row1: String = s
            .primary
            .line(1)
            .unwrap()
            .cells
            .iter()
            .map(|c| c.symbol.decode().0)
            .collect();
        assert_eq!(row0, "ABCDE");
        assert_eq!(&row1[0..2], "FG");
        assert_eq!((s.cursor_x(), s.cursor_y()), (2, 1));
    }

    #[test]
    fn move_to_is_zero_based() {
        let mut s = Screen::new(80, 24);
        s.move_to(2, 1);
        assert_eq!((s.cursor_x(), s.cursor_y()), (2, 1));
    }

    #[test]
    fn save_restore_roundtrips_cursor_and_attr() {
        let mut s = Screen::new(80, 24);
        s.move_to(10, 5);
        s.set_current_attr(Attributes {
            fg: Color::Indexed(1),
            ..Attributes::default()
        });
        s.save_cursor();
        s.move_to(0, 0);
        s.set_current_attr(Attributes::default());
        s.restore_cursor();
        assert_eq!((s.cursor_x(), s.cursor_y()), (10, 5));
        assert_eq!(s.current_attr().fg, Color::Indexed(1));
    }

    #[test]
    fn alternate_buffer_round_trip_preserves_primary() {
        let mut s = Screen::new(10, 3);
        s.write(sym('X'), 1, Attributes::default());
        let before = s.primary.line(0).unwrap().cells[0].symbol;
        s.set_flag(ScreenFlags::ALTERNATE);
        assert!(s.is_alternate());
        s.write(sym('Y'), 1, Attributes::default());
        s.reset_flag(ScreenFlags::ALTERNATE);
        assert!(!s.is_alternate());
        assert_eq!(s.primary.line(0).unwrap().cells[0].symbol, before);
    }

    #[test]
    fn resize_keeps_alternate_buffer_in_sync() {
        let mut s = Screen::new(80, 24);
        s.resize(100, 30);
        s.set_flag(ScreenFlags::ALTERNATE);
        assert_eq!((s.width(), s.height()), (100, 30));
        assert_eq!(s.margins(), (0, 30));
    }

    #[test]
    fn resize_to_same_dims_is_a_no_op_on_cursor() {
        let mut s = Screen::new(10, 3);
        s.move_to(4, 1);
        s.resize(10, 3);
        assert_eq!((s.cursor_x(), s.cursor_y()), (4, 1));
    }

    #[test]
    fn scrollback_depth_capped_at_sb_max() {
        let mut s = Screen::new(4, 2);
        s.set_max_sb(3);
        for _ in 0..10 {
            s.scroll_up(1);
        }
        assert!(s.sb_depth() <= 3);
    }

    #[test]
    fn sb_reset_returns_to_live_view() {
        let mut s = Screen::new(4, 2);
        s.set_max_sb(10);
        for _ in 0..5 {
            s.scroll_up(1);
        }
        s.sb_up(3);
        s.sb_reset();
        assert_eq!(s.sb_offset, 0);
    }

    #[test]
    fn combining_mark_at_origin_with_no_prior_cell_is_dropped() {
        let mut s = Screen::new(10, 3);
        // cursor is at (0,0); nothing written yet.
        s.combine('\u{0301}');
    }

    #[test]
    fn pending_wrap_then_write_performs_newline_first() {
        let mut s = Screen::new(3, 2);
        s.write(sym('A'), 1, Attributes::default());
        s.write(sym('B'), 1, Attributes::default());
        s.write(sym('C'), 1, Attributes::default());
        assert_eq!(s.cursor_x(), 3);
        s.write(sym('D'), 1, Attributes::default());
        assert_eq!((s.cursor_x(), s.cursor_y()), (1, 1));
    }
}
