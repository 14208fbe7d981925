pub mod chart;
pub mod pdf;
pub mod table;

use anyhow::{anyhow, Context, Result};
use printpdf::image_crate::{self, DynamicImage, RgbImage};
use std::path::PathBuf;

/// Shared palette of the report surfaces.
pub const CORRECT_COLOUR: (u8, u8, u8) = (0x76, 0xE1, 0xB5); // teal
pub const WRONG_COLOUR: (u8, u8, u8) = (0xFF, 0x7F, 0x50); // coral
pub const LIGHTGREY: (u8, u8, u8) = (0xF0, 0xF0, 0xF0);

/// An image handed to the PDF assembler: either a file on disk or an
/// in-memory raster produced by the renderers.
pub enum ImageSource {
    FilePath(PathBuf),
    InMemory(DynamicImage),
}

impl ImageSource {
    /// Wraps a raw RGB8 buffer as rendered by the plotters bitmap backend.
    pub fn from_rgb8(raw: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let image = RgbImage::from_raw(width, height, raw)
            .ok_or_else(|| anyhow!("rendered buffer does not match {width}x{height} RGB8"))?;
        Ok(ImageSource::InMemory(DynamicImage::ImageRgb8(image)))
    }

    /// Decodes the source into a raster, whichever arm it is.
    pub fn to_image(&self) -> Result<DynamicImage> {
        match self {
            ImageSource::FilePath(path) => image_crate::open(path)
                .with_context(|| format!("failed to read image at {}", path.display())),
            ImageSource::InMemory(image) => Ok(image.clone()),
        }
    }
}
