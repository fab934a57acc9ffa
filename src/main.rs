use anyhow::Result;
use clap::Parser;
use extension_icons::generate::{self, GenerateOptions};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "extension-icons",
    about = "Generate the normal and active toolbar icons for a browser extension"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = generate::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// TrueType/OpenType font for the letter. The built-in bitmap font is used when unset.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Also write icons.json, a manifest fragment listing the generated icons
    #[clap(long)]
    manifest: bool,

    /// Circle fill of the normal icons (CSS color format)
    #[clap(long, value_name = "COLOR")]
    normal_fill: Option<String>,

    /// Circle outline of the normal icons (CSS color format)
    #[clap(long, value_name = "COLOR")]
    normal_outline: Option<String>,

    /// Circle fill of the active icons (CSS color format)
    #[clap(long, value_name = "COLOR")]
    active_fill: Option<String>,

    /// Circle outline of the active icons (CSS color format)
    #[clap(long, value_name = "COLOR")]
    active_outline: Option<String>,
}

impl From<Args> for GenerateOptions {
    fn from(args: Args) -> Self {
        GenerateOptions {
            output: args.output,
            font: args.font,
            manifest: args.manifest,
            normal_fill: args.normal_fill,
            normal_outline: args.normal_outline,
            active_fill: args.active_fill,
            active_outline: args.active_outline,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    generate::generate_icons(&args.into())?;
    Ok(())
}
