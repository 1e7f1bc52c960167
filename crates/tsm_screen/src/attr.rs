//! Cell attributes: colors and display flags.

use tsm_palette::{Palette, Rgb8};

/// A foreground or background color.
///
/// An indexed color is resolved against a [`Palette`] at draw time; a
/// direct color carries its own RGB and needs no palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Use the palette's configured default (the `foreground`/`background`
    /// sentinel).
    #[default]
    Default,
    /// One of the 16 base palette entries.
    Indexed(u8),
    /// A resolved 24-bit color, carried directly (code `-1` in the wire
    /// protocol this model is drawn from).
    Rgb(Rgb8),
}

impl Color {
    /// Resolve against `palette`'s 16-entry base table and `default`
    /// (the palette's `default_fg`/`default_bg`, chosen by the caller).
    #[must_use]
    pub fn resolve(self, palette: &Palette, default: Rgb8) -> Rgb8 {
        match self {
            Color::Default => default,
            Color::Indexed(i) => palette.entry(i),
            Color::Rgb(rgb) => rgb,
        }
    }
}

bitflags::bitflags! {
    /// Display flags carried by [`Attributes`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttrFlags: u16 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const INVERSE   = 0b0000_1000;
        const BLINK     = 0b0001_0000;
        const PROTECT   = 0b0010_0000;
    }
}

impl Default for AttrFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// The rendering attributes of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes {
    pub fg: Color,
    pub bg: Color,
    pub flags: AttrFlags,
}

impl Attributes {
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.flags.contains(AttrFlags::PROTECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_resolves_to_supplied_default() {
        let p = tsm_palette::DEFAULT;
        let def = Rgb8::new(1, 2, 3);
        assert_eq!(Color::Default.resolve(&p, def), def);
    }

    #[test]
    fn indexed_color_resolves_against_palette() {
        let p = tsm_palette::DEFAULT;
        assert_eq!(Color::Indexed(0).resolve(&p, Rgb8::default()), p.entry(0));
    }
}
