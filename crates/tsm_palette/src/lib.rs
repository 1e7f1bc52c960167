//! Named ANSI color palettes and 256-color / 24-bit RGB resolution.
//!
//! Builds on `xparsecolor::XColor` as the RGB representation used for OSC
//! color queries, adding the piece that crate doesn't cover: a small,
//! named set of 16-entry ANSI base palettes, plus the cube/grayscale math
//! SGR `38;5;n`/`48;5;n` needs.

use xparsecolor::XColor;

/// An 8-bit-per-channel RGB triple, the resolution unit the screen model
/// stores attributes in once a color has been looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for XColor {
    fn from(c: Rgb8) -> Self {
        // Expand 8-bit to the 16-bit X11 device range by replicating the
        // byte (0xRR -> 0xRRRR), the conventional lossless 8->16 expansion.
        XColor::Rgb {
            red: u16::from(c.r) * 0x0101,
            green: u16::from(c.g) * 0x0101,
            blue: u16::from(c.b) * 0x0101,
        }
    }
}

impl From<XColor> for Rgb8 {
    fn from(c: XColor) -> Self {
        match c {
            XColor::Rgb { red, green, blue } => {
                Rgb8::new((red >> 8) as u8, (green >> 8) as u8, (blue >> 8) as u8)
            }
            // Any non-device color space reaching here (should not happen
            // for palette entries, which are always constructed as `Rgb`)
            // resolves to black rather than panicking.
            _ => Rgb8::default(),
        }
    }
}

/// A named 16-entry ANSI base palette (indices 0-7 normal, 8-15 bright).
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub name: &'static str,
    entries: [Rgb8; 16],
    pub default_fg: Rgb8,
    pub default_bg: Rgb8,
}

impl Palette {
    #[must_use]
    pub const fn entry(&self, index: u8) -> Rgb8 {
        self.entries[(index & 0x0F) as usize]
    }

    /// Resolve a named palette (`default`, `solarized`, `solarized-black`,
    /// `solarized-white`), falling back to `default` for any other name —
    /// palette selection never fails.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            "solarized" => SOLARIZED,
            "solarized-black" => SOLARIZED_BLACK,
            "solarized-white" => SOLARIZED_WHITE,
            _ => DEFAULT,
        }
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb8 {
    Rgb8 { r, g, b }
}

/// The classic xterm 16-color palette.
pub const DEFAULT: Palette = Palette {
    name: "default",
    entries: [
        rgb(0x00, 0x00, 0x00),
        rgb(0xCD, 0x00, 0x00),
        rgb(0x00, 0xCD, 0x00),
        rgb(0xCD, 0xCD, 0x00),
        rgb(0x00, 0x00, 0xEE),
        rgb(0xCD, 0x00, 0xCD),
        rgb(0x00, 0xCD, 0xCD),
        rgb(0xE5, 0xE5, 0xE5),
        rgb(0x7F, 0x7F, 0x7F),
        rgb(0xFF, 0x00, 0x00),
        rgb(0x00, 0xFF, 0x00),
        rgb(0xFF, 0xFF, 0x00),
        rgb(0x5C, 0x5C, 0xFF),
        rgb(0xFF, 0x00, 0xFF),
        rgb(0x00, 0xFF, 0xFF),
        rgb(0xFF, 0xFF, 0xFF),
    ],
    default_fg: rgb(0xE5, 0xE5, 0xE5),
    default_bg: rgb(0x00, 0x00, 0x00),
};

/// Solarized (light base, dark accents), the "solarized" profile.
pub const SOLARIZED: Palette = Palette {
    name: "solarized",
    entries: [
        rgb(0x07, 0x36, 0x42),
        rgb(0xDC, 0x32, 0x2F),
        rgb(0x85, 0x99, 0x00),
        rgb(0xB5, 0x89, 0x00),
        rgb(0x26, 0x8B, 0xD2),
        rgb(0xD3, 0x36, 0x82),
        rgb(0x2A, 0xA1, 0x98),
        rgb(0xEE, 0xE8, 0xD5),
        rgb(0x00, 0x2B, 0x36),
        rgb(0xCB, 0x4B, 0x16),
        rgb(0x58, 0x6E, 0x75),
        rgb(0x65, 0x7B, 0x83),
        rgb(0x83, 0x94, 0x96),
        rgb(0x6C, 0x71, 0xC4),
        rgb(0x93, 0xA1, 0xA1),
        rgb(0xFD, 0xF6, 0xE3),
    ],
    default_fg: rgb(0x65, 0x7B, 0x83),
    default_bg: rgb(0xFD, 0xF6, 0xE3),
};

/// Solarized dark variant, "solarized-black".
pub const SOLARIZED_BLACK: Palette = Palette {
    name: "solarized-black",
    entries: SOLARIZED.entries,
    default_fg: rgb(0x83, 0x94, 0x96),
    default_bg: rgb(0x00, 0x2B, 0x36),
};

/// Solarized light variant, "solarized-white".
pub const SOLARIZED_WHITE: Palette = Palette {
    name: "solarized-white",
    entries: SOLARIZED.entries,
    default_fg: rgb(0x58, 0x6E, 0x75),
    default_bg: rgb(0xFD, 0xF6, 0xE3),
};

/// The 6 levels used by the 6x6x6 RGB color cube (indices 16-231).
const CUBE_LEVELS: [u8; 6] = [0x00, 0x5F, 0x87, 0xAF, 0xD7, 0xFF];

/// Resolve a 256-color palette index (0-255) to RGB.
///
/// - `0..=15`: the 16-entry base `palette`.
/// - `16..=231`: the 6x6x6 RGB cube.
/// - `232..=255`: a 24-step grayscale ramp.
#[must_use]
pub fn resolve_256(palette: &Palette, index: u8) -> Rgb8 {
    match index {
        0..=15 => palette.entry(index),
        16..=231 => {
            let n = index - 16;
            let r = n / 36;
            let g = (n % 36) / 6;
            let b = n % 6;
            Rgb8::new(
                CUBE_LEVELS[r as usize],
                CUBE_LEVELS[g as usize],
                CUBE_LEVELS[b as usize],
            )
        }
        232..=255 => {
            let level = (u16::from(index - 232) * 10 + 8) as u8;
            Rgb8::new(level, level, level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_fallback() {
        assert_eq!(Palette::named("nonexistent").name, "default");
    }

    #[test]
    fn cube_corners_match_spec() {
        let p = DEFAULT;
        assert_eq!(resolve_256(&p, 16), Rgb8::new(0, 0, 0));
        assert_eq!(resolve_256(&p, 231), Rgb8::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn grayscale_ramp_matches_formula() {
        let p = DEFAULT;
        // n=232 -> (232-232)*10+8 = 8
        assert_eq!(resolve_256(&p, 232), Rgb8::new(8, 8, 8));
        // n=255 -> (255-232)*10+8 = 238
        assert_eq!(resolve_256(&p, 255), Rgb8::new(238, 238, 238));
    }

    #[test]
    fn base_16_uses_named_palette_entries() {
        let p = Palette::named("solarized");
        assert_eq!(resolve_256(&p, 1), rgb(0xDC, 0x32, 0x2F));
    }

    #[test]
    fn rgb8_roundtrips_through_xcolor() {
        let c = Rgb8::new(0x12, 0x34, 0x56);
        let x: XColor = c.into();
        let back: Rgb8 = x.into();
        assert_eq!(c, back);
    }
}
