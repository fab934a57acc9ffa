//! Icon renderer: a colored circle with a white letter, encoded as PNG

use crate::glyph::{BitmapGlyphs, GlyphError, GlyphSource};
use crate::palette::{Palette, Variant, TRANSPARENT, WHITE};
use anyhow::{bail, Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const ICON_TEXT: &str = "M";
pub const OUTLINE_WIDTH: f32 = 2.0;

// Offset of the fallback glyph from the circle center
const FALLBACK_DX: i32 = -4;
const FALLBACK_DY: i32 = -6;

/// One icon to render and where to write it
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub size: u32,
    pub palette: Palette,
    pub variant: Variant,
    pub output: PathBuf,
}

impl RenderRequest {
    /// Request using the fixed colors of `variant`
    pub fn new(size: u32, variant: Variant, output: PathBuf) -> Self {
        RenderRequest {
            size,
            palette: Palette::for_variant(variant),
            variant,
            output,
        }
    }
}

/// Where the letter ended up, in canvas coordinates of its top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphPlacement {
    Centered { x: i32, y: i32 },
    Fallback { x: i32, y: i32, cause: GlyphError },
}

impl GlyphPlacement {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GlyphPlacement::Fallback { .. })
    }
}

/// Render one icon and write it to `request.output`, replacing any existing file
pub fn render_icon(request: &RenderRequest, glyphs: &dyn GlyphSource) -> Result<GlyphPlacement> {
    let (canvas, placement) = render_canvas(request.size, request.palette, glyphs)?;
    save_png(&canvas, &request.output)?;
    Ok(placement)
}

/// Draw an icon into a fresh transparent canvas
pub fn render_canvas(
    size: u32,
    palette: Palette,
    glyphs: &dyn GlyphSource,
) -> Result<(RgbaImage, GlyphPlacement)> {
    if size == 0 {
        bail!("Icon size must be a positive number of pixels");
    }

    let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);
    let center = (size / 2) as i32;
    let radius = size / 3;

    draw_circle(&mut canvas, center, radius, palette);
    let placement = draw_letter(&mut canvas, center, glyphs);

    Ok((canvas, placement))
}

/// Filled disc of `radius` around `(center, center)` with an inner outline ring.
///
/// Matches an ellipse drawn over the inclusive box `center ± radius`: a pixel
/// is inside when its distance to the center is within `radius + 0.5`.
fn draw_circle(canvas: &mut RgbaImage, center: i32, radius: u32, palette: Palette) {
    let outer = radius as f32 + 0.5;
    let inner = outer - OUTLINE_WIDTH;

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = (x as i32 - center) as f32;
        let dy = (y as i32 - center) as f32;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance <= inner {
            *pixel = palette.fill;
        } else if distance <= outer {
            *pixel = palette.outline;
        }
    }
}

/// Center the letter using glyph metrics, or stamp it at a fixed offset when
/// the glyph source fails.
fn draw_letter(canvas: &mut RgbaImage, center: i32, glyphs: &dyn GlyphSource) -> GlyphPlacement {
    let size = canvas.width();
    let centered = glyphs.measure(ICON_TEXT, size).and_then(|glyph_box| {
        let x = center - (glyph_box.width / 2) as i32;
        let y = center - (glyph_box.height / 2) as i32;

        // Draw into a scratch copy so a failed draw leaves no partial glyph
        let mut scratch = canvas.clone();
        glyphs.draw(&mut scratch, ICON_TEXT, x, y, WHITE)?;
        *canvas = scratch;
        Ok((x, y))
    });

    match centered {
        Ok((x, y)) => GlyphPlacement::Centered { x, y },
        Err(cause) => {
            let x = center + FALLBACK_DX;
            let y = center + FALLBACK_DY;
            BitmapGlyphs.stamp(canvas, ICON_TEXT, x, y, WHITE);
            GlyphPlacement::Fallback { x, y, cause }
        }
    }
}

pub fn save_png(canvas: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(canvas, &mut out)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to flush PNG {}", path.display()))?;
    Ok(())
}

// Fixed encoder settings and no metadata chunks keep the output byte-stable
fn write_png<W: Write>(canvas: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(canvas.as_raw(), canvas.width(), canvas.height(), ColorType::Rgba8)?;
    Ok(())
}

pub fn pixel_at(canvas: &RgbaImage, x: i32, y: i32) -> Option<Rgba<u8>> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        Some(*canvas.get_pixel(x, y))
    } else {
        None
    }
}
