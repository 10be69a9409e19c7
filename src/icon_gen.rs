use crate::background::{create_rounded_gradient, Gradient, DEFAULT_RADIUS_RATIO};
use crate::contents_json::{
    icon_filename, mac_app_icon_contents, write_contents_json, MacIconSlot,
    MAC_ICON_SLOTS,
};
use anyhow::{Context, Result};
use clap::Parser;
use icns::IconFamily;
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Pixel sizes rendered for the macOS icon set.
pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Share of the icon edge taken up by the foreground image.
pub const FOREGROUND_RATIO: f64 = 0.7;

#[derive(Debug, Parser)]
#[clap(
    name = "app-icon-gen",
    about = "Generate a macOS app icon set from a pawn image on a rounded gradient"
)]
pub struct Args {
    /// Foreground image composited on top of the gradient (PNG with transparency).
    #[clap(value_name = "INPUT", default_value = "/tmp/pawn.png")]
    pub input: PathBuf,

    /// Output .appiconset directory.
    #[clap(
        short,
        long,
        value_name = "DIR",
        default_value = "LichessApp/Assets.xcassets/AppIcon.appiconset"
    )]
    pub output: PathBuf,

    /// Gradient color at the top edge (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#eb9141")]
    pub top_color: String,

    /// Gradient color at the bottom edge (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#be6e28")]
    pub bottom_color: String,

    /// Corner radius as a fraction of the icon size. Above ~0.44 the pawn's
    /// corners reach the transparent cut-outs, where it is blended source-over.
    #[clap(long, value_name = "RATIO", default_value_t = DEFAULT_RADIUS_RATIO)]
    pub radius_ratio: f64,

    /// Also pack the rendered sizes into icon.icns
    #[clap(long)]
    pub icns: bool,
}

/// Rendering parameters shared by every size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle {
    pub gradient: Gradient,
    pub radius_ratio: f64,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            radius_ratio: DEFAULT_RADIUS_RATIO,
        }
    }
}

impl IconStyle {
    fn from_args(args: &Args) -> Result<Self> {
        if !(0.0..=0.5).contains(&args.radius_ratio) {
            anyhow::bail!(
                "Radius ratio must be between 0.0 and 0.5, got {}",
                args.radius_ratio
            );
        }

        Ok(Self {
            gradient: Gradient::parse(&args.top_color, &args.bottom_color)?,
            radius_ratio: args.radius_ratio,
        })
    }
}

pub fn generate_icons(args: Args) -> Result<()> {
    let style = IconStyle::from_args(&args)?;
    let foreground = load_image(&args.input)?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Can't create output directory {}", args.output.display()))?;

    println!("Generating app icons...");
    let mut renders = BTreeMap::new();
    for size in ICON_SIZES {
        let icon = compose_icon(size, &foreground, &style);
        let filename = icon_filename(size);
        save_png(&icon, &args.output.join(&filename))?;
        println!("  ✓ Generated {filename}");
        renders.insert(size, icon);
    }

    write_contents_json(&args.output, &mac_app_icon_contents())?;
    println!("  ✓ Generated Contents.json");

    if args.icns {
        write_icns(&renders, &args.output)?;
    }

    println!("Done!");
    Ok(())
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to load image {}", path.display()))
}

/// Edge length of the foreground and its offset from the top-left corner.
pub fn foreground_placement(size: u32) -> (u32, u32) {
    let fg_size = (size as f64 * FOREGROUND_RATIO) as u32;
    (fg_size, (size - fg_size) / 2)
}

/// Renders one icon: gradient background with the foreground centered on it.
pub fn compose_icon(size: u32, foreground: &DynamicImage, style: &IconStyle) -> RgbaImage {
    let mut icon = create_rounded_gradient(size, &style.gradient, style.radius_ratio);

    let (fg_size, offset) = foreground_placement(size);
    if fg_size == 0 {
        return icon;
    }

    let resized = foreground
        .resize_exact(fg_size, fg_size, FilterType::Lanczos3)
        .to_rgba8();
    image::imageops::overlay(&mut icon, &resized, offset.into(), offset.into());

    icon
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG {}", path.display()))
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// Packs the renders into `icon.icns`, one element per mac icon slot.
pub fn write_icns(renders: &BTreeMap<u32, RgbaImage>, out_dir: &Path) -> Result<()> {
    println!("Generating icon.icns...");
    let mut family = IconFamily::new();

    for slot in &MAC_ICON_SLOTS {
        let pixels = slot.pixels();
        let render = renders
            .get(&pixels)
            .with_context(|| format!("No {pixels}x{pixels} render for icon.icns"))?;

        let mut buf = Vec::new();
        write_png(render.as_raw(), &mut buf, pixels)?;
        let image = icns::Image::read_png(&buf[..])?;

        family
            .add_icon_with_type(&image, slot.icon_type)
            .with_context(|| {
                let MacIconSlot { points, scale, .. } = slot;
                format!("Can't add {points}x{points}@{scale}x to Icns Family")
            })?;
    }

    let mut out_file = BufWriter::new(
        File::create(out_dir.join("icon.icns")).context("Failed to create icon.icns")?,
    );
    family.write(&mut out_file)?;
    out_file.flush()?;

    println!("  ✓ Generated icon.icns");
    Ok(())
}
