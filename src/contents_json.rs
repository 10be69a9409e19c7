//! Contents.json data model for Apple's Asset Catalog format
//!
//! Only the keys an `AppIcon.appiconset` for macOS needs are modelled here.

use anyhow::{Context, Result};
use icns::IconType;
use serde::Serialize;
use std::path::Path;

/// Author recorded in the manifest, matching what Xcode writes itself.
pub const CATALOG_AUTHOR: &str = "xcode";

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// Array of image entries for different scales and sizes
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The PNG file backing this slot
    pub filename: String,

    /// The device type for the image ("mac" for every entry we write)
    pub idiom: String,

    /// The scale factor for the image (e.g., "1x", "2x")
    pub scale: String,

    /// The size of the image in points (e.g., "16x16", "512x512")
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The application or tool that authored the asset catalog
    pub author: String,

    /// The format version of the asset catalog (always 1)
    pub version: u8,
}

/// A slot in the macOS app icon set: logical size in points and scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacIconSlot {
    pub points: u32,
    pub scale: u32,
    pub icon_type: IconType,
}

impl MacIconSlot {
    /// Edge length of the backing bitmap in pixels.
    pub fn pixels(&self) -> u32 {
        self.points * self.scale
    }
}

/// The ten slots Xcode expects in a macOS AppIcon set, in catalog order.
pub const MAC_ICON_SLOTS: [MacIconSlot; 10] = [
    MacIconSlot {
        points: 16,
        scale: 1,
        icon_type: IconType::RGB24_16x16,
    },
    MacIconSlot {
        points: 16,
        scale: 2,
        icon_type: IconType::RGBA32_16x16_2x,
    },
    MacIconSlot {
        points: 32,
        scale: 1,
        icon_type: IconType::RGB24_32x32,
    },
    MacIconSlot {
        points: 32,
        scale: 2,
        icon_type: IconType::RGBA32_32x32_2x,
    },
    MacIconSlot {
        points: 128,
        scale: 1,
        icon_type: IconType::RGBA32_128x128,
    },
    MacIconSlot {
        points: 128,
        scale: 2,
        icon_type: IconType::RGBA32_128x128_2x,
    },
    MacIconSlot {
        points: 256,
        scale: 1,
        icon_type: IconType::RGBA32_256x256,
    },
    MacIconSlot {
        points: 256,
        scale: 2,
        icon_type: IconType::RGBA32_256x256_2x,
    },
    MacIconSlot {
        points: 512,
        scale: 1,
        icon_type: IconType::RGBA32_512x512,
    },
    MacIconSlot {
        points: 512,
        scale: 2,
        icon_type: IconType::RGBA32_512x512_2x,
    },
];

/// File name used for the rendered icon of the given pixel size.
pub fn icon_filename(pixels: u32) -> String {
    format!("icon_{pixels}x{pixels}.png")
}

impl ContentsFile {
    /// Creates a new Contents.json structure with the specified author
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { author, version: 1 },
        }
    }

    /// Adds an image entry to the contents file
    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Creates the entry for a mac icon slot.
    ///
    /// # Arguments
    /// * `points` - Logical size in points (e.g. 16 for "16x16")
    /// * `scale` - Scale factor (1 or 2)
    pub fn new_mac_icon(points: u32, scale: u32) -> Self {
        Self {
            filename: icon_filename(points * scale),
            idiom: "mac".to_string(),
            scale: format!("{scale}x"),
            size: format!("{points}x{points}"),
        }
    }
}

impl From<&MacIconSlot> for ImageEntry {
    fn from(slot: &MacIconSlot) -> Self {
        ImageEntry::new_mac_icon(slot.points, slot.scale)
    }
}

/// Builds the full macOS AppIcon manifest, one entry per slot.
pub fn mac_app_icon_contents() -> ContentsFile {
    let mut contents = ContentsFile::new(CATALOG_AUTHOR.to_string());
    for slot in &MAC_ICON_SLOTS {
        contents.add_image(slot.into());
    }
    contents
}

/// Writes a Contents.json file to the specified directory
///
/// # Errors
/// Returns an error if serialization or the file write fails.
pub fn write_contents_json(dir: &Path, contents: &ContentsFile) -> Result<()> {
    let json =
        serde_json::to_string_pretty(contents).context("Failed to serialize Contents.json")?;
    std::fs::write(dir.join("Contents.json"), json)
        .with_context(|| format!("Failed to write Contents.json in {}", dir.display()))
}
