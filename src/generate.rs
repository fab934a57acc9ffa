use crate::glyph::{BitmapGlyphs, GlyphSource, TrueTypeGlyphs};
use crate::manifest::{manifest_path, IconManifest, MANIFEST_FILE};
use crate::palette::{Palette, Variant};
use crate::render::{render_icon, GlyphPlacement, RenderRequest};
use anyhow::{Context, Result};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

/// Icon sizes a browser extension asks for
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

pub const DEFAULT_OUTPUT_DIR: &str = "icons";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub font: Option<PathBuf>,
    pub manifest: bool,
    pub normal_fill: Option<String>,
    pub normal_outline: Option<String>,
    pub active_fill: Option<String>,
    pub active_outline: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            font: None,
            manifest: false,
            normal_fill: None,
            normal_outline: None,
            active_fill: None,
            active_outline: None,
        }
    }
}

impl GenerateOptions {
    /// Palette for `variant` with any color overrides applied
    pub fn palette(&self, variant: Variant) -> Result<Palette> {
        let (fill, outline) = match variant {
            Variant::Normal => (&self.normal_fill, &self.normal_outline),
            Variant::Active => (&self.active_fill, &self.active_outline),
        };
        Palette::for_variant(variant)
            .with_overrides(fill.as_deref(), outline.as_deref())
            .with_context(|| format!("Invalid {variant} icon color"))
    }

    fn glyph_source(&self) -> Box<dyn GlyphSource> {
        match &self.font {
            Some(path) => Box::new(TrueTypeGlyphs::open(path)),
            None => Box::new(BitmapGlyphs),
        }
    }
}

/// One written icon file
#[derive(Debug, Clone)]
pub struct GeneratedIcon {
    pub size: u32,
    pub variant: Variant,
    pub path: PathBuf,
    pub placement: GlyphPlacement,
}

/// Output path of the icon for `size` and `variant`
pub fn icon_path(out_dir: &Path, size: u32, variant: Variant) -> PathBuf {
    out_dir.join(variant.file_name(size))
}

/// Write the normal and active icon at every size into `options.output`
pub fn generate_icons(options: &GenerateOptions) -> Result<Vec<GeneratedIcon>> {
    // Resolve colors first so a bad override writes nothing
    let normal = options.palette(Variant::Normal)?;
    let active = options.palette(Variant::Active)?;

    create_dir_all(&options.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            options.output.display()
        )
    })?;

    let glyphs = options.glyph_source();

    println!("Generating extension icons...");
    let mut generated = Vec::with_capacity(ICON_SIZES.len() * Variant::ALL.len());
    for variant in Variant::ALL {
        let palette = match variant {
            Variant::Normal => normal,
            Variant::Active => active,
        };

        for size in ICON_SIZES {
            let request = RenderRequest {
                palette,
                ..RenderRequest::new(size, variant, icon_path(&options.output, size, variant))
            };
            let placement = render_icon(&request, glyphs.as_ref())?;

            match &placement {
                GlyphPlacement::Centered { .. } => println!(
                    "  ✓ Generated {} ({size}x{size})",
                    request.output.display()
                ),
                GlyphPlacement::Fallback { .. } => println!(
                    "  ✓ Generated {} ({size}x{size}, fixed letter position)",
                    request.output.display()
                ),
            }

            generated.push(GeneratedIcon {
                size: request.size,
                variant: request.variant,
                path: request.output,
                placement,
            });
        }
    }

    if options.manifest {
        write_manifest(&options.output, &generated)?;
    }

    println!(
        "\nAll {} icons created in {}",
        generated.len(),
        options.output.display()
    );
    Ok(generated)
}

fn write_manifest(out_dir: &Path, generated: &[GeneratedIcon]) -> Result<()> {
    // `.` or `..` has no directory name of its own
    let resolved = out_dir
        .canonicalize()
        .with_context(|| format!("Can't resolve output directory {}", out_dir.display()))?;

    let mut manifest = IconManifest::new();
    for icon in generated {
        let path = manifest_path(&resolved, &icon.variant.file_name(icon.size));
        match icon.variant {
            Variant::Normal => manifest.add_normal(icon.size, path),
            Variant::Active => manifest.add_active(icon.size, path),
        }
    }

    manifest.write_to(out_dir)?;
    println!("  ✓ Generated {}", out_dir.join(MANIFEST_FILE).display());
    Ok(())
}
