//! Icon color variants
//!
//! Each icon is drawn in one of two variants. The variant picks the fill and
//! outline colors of the circle; the glyph is always white.

use anyhow::{anyhow, Result};
use image::Rgba;
use std::{fmt, str::FromStr};

pub const NORMAL_FILL: Rgba<u8> = Rgba([0x42, 0x85, 0xf4, 0xff]);
pub const NORMAL_OUTLINE: Rgba<u8> = Rgba([0x33, 0x67, 0xd6, 0xff]);
pub const ACTIVE_FILL: Rgba<u8> = Rgba([0x34, 0xa8, 0x53, 0xff]);
pub const ACTIVE_OUTLINE: Rgba<u8> = Rgba([0x2d, 0x7d, 0x2d, 0xff]);
pub const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Icon state shown by the extension toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Active,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Normal, Variant::Active];

    /// File name for an icon of this variant, e.g. `icon16.png` or `icon16-active.png`
    pub fn file_name(self, size: u32) -> String {
        match self {
            Variant::Normal => format!("icon{size}.png"),
            Variant::Active => format!("icon{size}-active.png"),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Normal => f.write_str("normal"),
            Variant::Active => f.write_str("active"),
        }
    }
}

/// Fill and outline colors of the icon circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: Rgba<u8>,
    pub outline: Rgba<u8>,
}

impl Palette {
    pub const NORMAL: Palette = Palette {
        fill: NORMAL_FILL,
        outline: NORMAL_OUTLINE,
    };

    pub const ACTIVE: Palette = Palette {
        fill: ACTIVE_FILL,
        outline: ACTIVE_OUTLINE,
    };

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Normal => Palette::NORMAL,
            Variant::Active => Palette::ACTIVE,
        }
    }

    /// Replace either color with a CSS color string when one is given
    pub fn with_overrides(self, fill: Option<&str>, outline: Option<&str>) -> Result<Self> {
        Ok(Palette {
            fill: fill.map(parse_color).transpose()?.unwrap_or(self.fill),
            outline: outline.map(parse_color).transpose()?.unwrap_or(self.outline),
        })
    }
}

/// Parse a CSS color (`#4285f4`, `rgb(66, 133, 244)`, `green`, ...) into an opaque pixel
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {color:?} (expected a CSS color such as #4285f4)"))?;

    Ok(Rgba([
        channel(srgb.red),
        channel(srgb.green),
        channel(srgb.blue),
        0xff,
    ]))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render a pixel as `#rrggbb`
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selects_palette() {
        assert_eq!(Palette::for_variant(Variant::Normal).fill, NORMAL_FILL);
        assert_eq!(Palette::for_variant(Variant::Normal).outline, NORMAL_OUTLINE);
        assert_eq!(Palette::for_variant(Variant::Active).fill, ACTIVE_FILL);
        assert_eq!(Palette::for_variant(Variant::Active).outline, ACTIVE_OUTLINE);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Variant::Normal.file_name(16), "icon16.png");
        assert_eq!(Variant::Active.file_name(128), "icon128-active.png");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_color("#4285f4").unwrap(), NORMAL_FILL);
        assert_eq!(parse_color("#2d7d2d").unwrap(), ACTIVE_OUTLINE);
        assert_eq!(parse_color("white").unwrap(), WHITE);
    }

    #[test]
    fn test_parse_invalid_color() {
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_overrides_keep_unset_colors() {
        let palette = Palette::NORMAL
            .with_overrides(Some("#ff0000"), None)
            .unwrap();
        assert_eq!(palette.fill, Rgba([0xff, 0, 0, 0xff]));
        assert_eq!(palette.outline, NORMAL_OUTLINE);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(ACTIVE_FILL), "#34a853");
    }
}
