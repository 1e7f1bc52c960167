//! `SGR` (Select Graphic Rendition), `CSI ... m`.
//!
//! No typed event exists for this in the corpus this crate is grounded
//! on — SGR's parameter grammar (indexed colors, 256-color, direct RGB,
//! all sharing one flat parameter list with variable arity) doesn't fit
//! the one-struct-per-control-function model used for fixed-arity
//! sequences, so it is parsed directly here against the raw parameter
//! list.

use tsm_palette::{resolve_256, Rgb8};
use tsm_screen::{AttrFlags, Attributes, Color};

/// Apply one SGR parameter list (already split on `;`, `-1` for
/// unset/default slots) to `attr`. An empty list is equivalent to `[0]`
/// (reset).
pub fn apply(attr: &mut Attributes, params: &[i32]) {
    if params.is_empty() {
        *attr = Attributes::default();
        return;
    }
    let mut i = 0;
    while i < params.len() {
        let code = params[i];
        match code {
            0 => *attr = Attributes::default(),
            1 => attr.flags.insert(AttrFlags::BOLD),
            2 => attr.flags.insert(AttrFlags::DIM),
            4 => attr.flags.insert(AttrFlags::UNDERLINE),
            5 | 6 => attr.flags.insert(AttrFlags::BLINK),
            7 => attr.flags.insert(AttrFlags::INVERSE),
            22 => attr.flags.remove(AttrFlags::BOLD | AttrFlags::DIM),
            23 => {}
            24 => attr.flags.remove(AttrFlags::UNDERLINE),
            25 => attr.flags.remove(AttrFlags::BLINK),
            27 => attr.flags.remove(AttrFlags::INVERSE),
            30..=37 => attr.fg = Color::Indexed((code - 30) as u8),
            38 => {
                i += consume_extended(&params[i + 1..], &mut attr.fg);
            }
            39 => attr.fg = Color::Default,
            40..=47 => attr.bg = Color::Indexed((code - 40) as u8),
            48 => {
                i += consume_extended(&params[i + 1..], &mut attr.bg);
            }
            49 => attr.bg = Color::Default,
            90..=97 => attr.fg = Color::Indexed((code - 90) as u8 + 8),
            100..=107 => attr.bg = Color::Indexed((code - 100) as u8 + 8),
            _ => {}
        }
        i += 1;
    }
}

/// Consume the `5;n` or `2;r;g;b` continuation after a `38`/`48` code.
/// Returns how many extra parameters were consumed (0 if malformed).
fn consume_extended(rest: &[i32], color: &mut Color) -> usize {
    match rest.first() {
        Some(5) => {
            if let Some(&n) = rest.get(1) {
                if (0..=255).contains(&n) {
                    *color = Color::Indexed(n as u8);
                    return 2;
                }
            }
            1
        }
        Some(2) => {
            if let (Some(&r), Some(&g), Some(&b)) = (rest.get(1), rest.get(2), rest.get(3)) {
                if (0..=255).contains(&r) && (0..=255).contains(&g) && (0..=255).contains(&b) {
                    *color = Color::Rgb(Rgb8::new(r as u8, g as u8, b as u8));
                    return 4;
                }
            }
            1
        }
        _ => 0,
    }
}

/// Resolve a palette-indexed or direct color to RGB, the last mile before
/// handing attributes to a renderer.
#[must_use]
pub fn resolve(color: Color, palette: &tsm_palette::Palette, default: Rgb8) -> Rgb8 {
    match color {
        Color::Indexed(i) => resolve_256(palette, i),
        other => other.resolve(palette, default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_31_sets_red_foreground() {
        let mut attr = Attributes::default();
        apply(&mut attr, &[31]);
        assert_eq!(attr.fg, Color::Indexed(1));
    }

    #[test]
    fn sgr_0_resets_after_31() {
        let mut attr = Attributes::default();
        apply(&mut attr, &[31]);
        apply(&mut attr, &[0]);
        assert_eq!(attr, Attributes::default());
    }

    #[test]
    fn sgr_256_color_foreground() {
        let mut attr = Attributes::default();
        apply(&mut attr, &[38, 5, 208]);
        assert_eq!(attr.fg, Color::Indexed(208));
    }

    #[test]
    fn sgr_direct_rgb_background() {
        let mut attr = Attributes::default();
        apply(&mut attr, &[48, 2, 10, 20, 30]);
        assert_eq!(attr.bg, Color::Rgb(Rgb8::new(10, 20, 30)));
    }

    #[test]
    fn bright_foreground_codes() {
        let mut attr = Attributes::default();
        apply(&mut attr, &[91]);
        assert_eq!(attr.fg, Color::Indexed(9));
    }
}
