//! Glyph sources used to put the letter on an icon
//!
//! A glyph source can measure a string and draw it onto a canvas. Positions
//! always refer to the top-left corner of the inked bounding box, so a caller
//! can center text from the measured size alone.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a glyph source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("Failed to read font file {}: {reason}", .path.display())]
    FontUnreadable { path: PathBuf, reason: String },

    #[error("Not a usable TrueType/OpenType font: {}", .0.display())]
    FontInvalid(PathBuf),

    #[error("Font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("Nothing to draw")]
    EmptyText,
}

/// Inked bounding box of a measured string, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBox {
    pub width: u32,
    pub height: u32,
}

pub trait GlyphSource {
    /// Measure `text` as it would be drawn on an icon of `icon_size` pixels
    fn measure(&self, text: &str, icon_size: u32) -> Result<GlyphBox, GlyphError>;

    /// Draw `text` with the top-left corner of its inked box at `(x, y)`.
    /// Pixels falling outside the canvas are clipped.
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<(), GlyphError>;
}

const BITMAP_WIDTH: u32 = 5;
const BITMAP_HEIGHT: u32 = 7;
const BITMAP_SPACING: u32 = 1;

// 5x7 capitals, one byte per row, bit 4 is the leftmost column.
const BITMAP_CAPITALS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

/// Built-in 5x7 bitmap font covering `A`-`Z`.
///
/// Needs no font file and draws at the same pixel size on every icon.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapGlyphs;

impl BitmapGlyphs {
    fn rows(c: char) -> Result<&'static [u8; 7], GlyphError> {
        if c.is_ascii_uppercase() {
            Ok(&BITMAP_CAPITALS[(c as u8 - b'A') as usize])
        } else {
            Err(GlyphError::MissingGlyph(c))
        }
    }

    /// Draw whatever glyphs exist for `text`, skipping the rest.
    /// Used where drawing must not fail.
    pub fn stamp(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>) {
        let advance = (BITMAP_WIDTH + BITMAP_SPACING) as i32;
        for (i, c) in text.chars().enumerate() {
            if let Ok(rows) = Self::rows(c) {
                stamp_rows(canvas, rows, x + i as i32 * advance, y, color);
            }
        }
    }
}

fn stamp_rows(canvas: &mut RgbaImage, rows: &[u8; 7], x: i32, y: i32, color: Rgba<u8>) {
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..BITMAP_WIDTH {
            if bits & (0x10 >> col) != 0 {
                put_clipped(canvas, x + col as i32, y + row as i32, color);
            }
        }
    }
}

impl GlyphSource for BitmapGlyphs {
    fn measure(&self, text: &str, _icon_size: u32) -> Result<GlyphBox, GlyphError> {
        let count = text.chars().try_fold(0u32, |n, c| Self::rows(c).map(|_| n + 1))?;
        if count == 0 {
            return Err(GlyphError::EmptyText);
        }

        Ok(GlyphBox {
            width: count * (BITMAP_WIDTH + BITMAP_SPACING) - BITMAP_SPACING,
            height: BITMAP_HEIGHT,
        })
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<(), GlyphError> {
        let glyphs = text.chars().map(Self::rows).collect::<Result<Vec<_>, _>>()?;
        if glyphs.is_empty() {
            return Err(GlyphError::EmptyText);
        }

        let advance = (BITMAP_WIDTH + BITMAP_SPACING) as i32;
        for (i, rows) in glyphs.into_iter().enumerate() {
            stamp_rows(canvas, rows, x + i as i32 * advance, y, color);
        }
        Ok(())
    }
}

/// Glyphs rasterized from a TrueType/OpenType font file.
///
/// A font that cannot be loaded is kept as an error and reported by every
/// `measure`/`draw` call, so the caller decides how to recover.
pub struct TrueTypeGlyphs {
    font: Result<Font<'static>, GlyphError>,
}

const MIN_PIXEL_HEIGHT: u32 = 8;

impl TrueTypeGlyphs {
    pub fn open(path: &Path) -> Self {
        let font = std::fs::read(path)
            .map_err(|err| GlyphError::FontUnreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
            .and_then(|bytes| {
                Font::try_from_vec(bytes).ok_or_else(|| GlyphError::FontInvalid(path.to_path_buf()))
            });

        TrueTypeGlyphs { font }
    }

    pub fn is_loaded(&self) -> bool {
        self.font.is_ok()
    }

    /// Pixel height of the text on an icon of `icon_size` pixels
    pub fn pixel_height(icon_size: u32) -> f32 {
        (icon_size / 4).max(MIN_PIXEL_HEIGHT) as f32
    }

    fn layout(&self, text: &str, icon_size: u32) -> Result<Vec<PositionedGlyph<'_>>, GlyphError> {
        let font = self.font.as_ref().map_err(Clone::clone)?;
        if text.is_empty() {
            return Err(GlyphError::EmptyText);
        }
        if let Some(c) = text.chars().find(|&c| font.glyph(c).id().0 == 0) {
            return Err(GlyphError::MissingGlyph(c));
        }

        let scale = Scale::uniform(Self::pixel_height(icon_size));
        let ascent = font.v_metrics(scale).ascent;
        Ok(font.layout(text, scale, point(0.0, ascent)).collect())
    }
}

/// Union of the pixel bounding boxes as `(min_x, min_y, max_x, max_y)`
fn ink_bounds(glyphs: &[PositionedGlyph<'_>]) -> Option<(i32, i32, i32, i32)> {
    glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc, bb| {
            Some(match acc {
                None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                Some((x0, y0, x1, y1)) => (
                    x0.min(bb.min.x),
                    y0.min(bb.min.y),
                    x1.max(bb.max.x),
                    y1.max(bb.max.y),
                ),
            })
        })
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or(' ')
}

impl GlyphSource for TrueTypeGlyphs {
    fn measure(&self, text: &str, icon_size: u32) -> Result<GlyphBox, GlyphError> {
        let glyphs = self.layout(text, icon_size)?;
        let (x0, y0, x1, y1) =
            ink_bounds(&glyphs).ok_or_else(|| GlyphError::MissingGlyph(first_char(text)))?;

        Ok(GlyphBox {
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<(), GlyphError> {
        let glyphs = self.layout(text, canvas.width())?;
        let (min_x, min_y, _, _) =
            ink_bounds(&glyphs).ok_or_else(|| GlyphError::MissingGlyph(first_char(text)))?;

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = x + bb.min.x - min_x + gx as i32;
                let py = y + bb.min.y - min_y + gy as i32;
                blend_clipped(canvas, px, py, color, coverage);
            });
        }
        Ok(())
    }
}

fn in_bounds(canvas: &RgbaImage, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height()
}

fn put_clipped(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if in_bounds(canvas, x, y) {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Source-over blend of `color` at `coverage` (0.0..=1.0) onto the canvas
fn blend_clipped(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if !in_bounds(canvas, x, y) || coverage <= 0.0 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let src_a = coverage.min(1.0) * color[3] as f32 / 255.0;
    let dst_a = pixel[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }

    for i in 0..3 {
        let src = color[i] as f32 * src_a;
        let dst = pixel[i] as f32 * dst_a * (1.0 - src_a);
        pixel[i] = ((src + dst) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    pixel[3] = (out_a * 255.0).round() as u8;
}
