use anyhow::{bail, Context, Result};
use extension_icons::generate::{icon_path, ICON_SIZES};
use extension_icons::palette::{to_hex, Palette, Variant, WHITE};
use image::{io::Reader as ImageReader, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("icons"));

    println!("Checking icons in: {}", dir.display());

    let mut failures = 0;
    for variant in Variant::ALL {
        for size in ICON_SIZES {
            let path = icon_path(&dir, size, variant);
            match check_icon(&path, size, variant) {
                Ok(()) => println!("  ✓ {}", path.display()),
                Err(err) => {
                    failures += 1;
                    println!("  ✗ {}: {err:#}", path.display());
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} icon(s) failed verification");
    }
    println!("\nAll icons look right");
    Ok(())
}

fn check_icon(path: &Path, size: u32, variant: Variant) -> Result<()> {
    let img = ImageReader::open(path)
        .context("Failed to open image")?
        .decode()
        .context("Failed to decode image")?;

    if img.width() != size || img.height() != size {
        bail!(
            "expected {size}x{size}, found {}x{}",
            img.width(),
            img.height()
        );
    }
    if !img.color().has_alpha() {
        bail!("no alpha channel");
    }

    let rgba = img.to_rgba8();
    let palette = Palette::for_variant(variant);
    let center = size / 2;
    let radius = size / 3;

    let center_pixel = *rgba.get_pixel(center, center);
    if !near(center_pixel, WHITE) {
        bail!("center is {}, expected white", to_hex(center_pixel));
    }

    // Top of the circle sits on the outline ring
    expect_color(&rgba, center, center - radius, palette.outline, "outline")?;
    // Left of the letter, inside the disc
    expect_color(&rgba, center - (radius - 2), center, palette.fill, "fill")?;
    Ok(())
}

fn expect_color(img: &RgbaImage, x: u32, y: u32, expected: Rgba<u8>, what: &str) -> Result<()> {
    let pixel = *img.get_pixel(x, y);
    if pixel != expected {
        bail!(
            "{what} at ({x}, {y}) is {}, expected {}",
            to_hex(pixel),
            to_hex(expected)
        );
    }
    Ok(())
}

fn near(pixel: Rgba<u8>, expected: Rgba<u8>) -> bool {
    pixel
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, b)| a.abs_diff(*b) <= 16)
}
